use crate::domain::entities::{Ownership, StreamSession};

/// Port for metrics reporting
pub trait MetricsReporter: Send + Sync {
    fn report_session_started(&self, session: &StreamSession);
    fn report_session_stopped(&self, session: &StreamSession);
    fn report_frame_sent(&self, bytes: usize);
    fn report_frame_converted(&self);
    fn report_payload_released(&self, ownership: Ownership);
}
