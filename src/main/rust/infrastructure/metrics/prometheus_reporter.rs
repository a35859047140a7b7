use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::domain::entities::{Ownership, StreamSession};
use crate::domain::ports::MetricsReporter;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_SESSIONS: IntGauge = IntGauge::new(
        "mjpeg_active_sessions",
        "Number of clients currently streaming"
    ).expect("metric can be created");
    pub static ref TOTAL_SESSIONS: IntCounter = IntCounter::new(
        "mjpeg_sessions_total",
        "Total number of streaming sessions since server start"
    ).expect("metric can be created");
    pub static ref FRAMES_SENT: IntCounter = IntCounter::new(
        "mjpeg_frames_sent_total",
        "Total number of frames written to clients"
    ).expect("metric can be created");
    pub static ref BYTES_SENT: IntCounter = IntCounter::new(
        "mjpeg_bytes_sent_total",
        "Total bytes written to clients, multipart framing included"
    ).expect("metric can be created");
    pub static ref FRAMES_CONVERTED: IntCounter = IntCounter::new(
        "mjpeg_frames_converted_total",
        "Total number of raw frames converted to JPEG"
    ).expect("metric can be created");
    pub static ref PAYLOADS_RELEASED: IntCounterVec = IntCounterVec::new(
        Opts::new("mjpeg_payloads_released_total", "Frame payloads released, by ownership"),
        &["ownership"]
    ).expect("metric can be created");
    pub static ref FRAME_BUFFERS_OUTSTANDING: IntGauge = IntGauge::new(
        "mjpeg_frame_buffers_outstanding",
        "Camera frame buffers currently held by sessions"
    ).expect("metric can be created");
    pub static ref SESSION_ENDS: IntCounterVec = IntCounterVec::new(
        Opts::new("mjpeg_session_ends_total", "Finished streaming sessions, by reason"),
        &["reason"]
    ).expect("metric can be created");
}

pub struct PrometheusReporter;

impl PrometheusReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn init_metrics() -> Result<(), prometheus::Error> {
        REGISTRY.register(Box::new(ACTIVE_SESSIONS.clone()))?;
        REGISTRY.register(Box::new(TOTAL_SESSIONS.clone()))?;
        REGISTRY.register(Box::new(FRAMES_SENT.clone()))?;
        REGISTRY.register(Box::new(BYTES_SENT.clone()))?;
        REGISTRY.register(Box::new(FRAMES_CONVERTED.clone()))?;
        REGISTRY.register(Box::new(PAYLOADS_RELEASED.clone()))?;
        REGISTRY.register(Box::new(FRAME_BUFFERS_OUTSTANDING.clone()))?;
        REGISTRY.register(Box::new(SESSION_ENDS.clone()))?;
        Ok(())
    }

    pub fn gather_metrics() -> Vec<u8> {
        let encoder = TextEncoder::new();
        let metric_families = REGISTRY.gather();
        let mut buffer = vec![];
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
            return b"# Error encoding metrics\n".to_vec();
        }
        buffer
    }
}

impl Default for PrometheusReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsReporter for PrometheusReporter {
    fn report_session_started(&self, _session: &StreamSession) {
        ACTIVE_SESSIONS.inc();
        TOTAL_SESSIONS.inc();
    }

    fn report_session_stopped(&self, session: &StreamSession) {
        ACTIVE_SESSIONS.dec();
        if let Some(end) = session.end() {
            SESSION_ENDS.with_label_values(&[end.as_str()]).inc();
        }
    }

    fn report_frame_sent(&self, bytes: usize) {
        FRAMES_SENT.inc();
        BYTES_SENT.inc_by(bytes as u64);
    }

    fn report_frame_converted(&self) {
        FRAMES_CONVERTED.inc();
    }

    fn report_payload_released(&self, ownership: Ownership) {
        PAYLOADS_RELEASED
            .with_label_values(&[ownership.as_str()])
            .inc();
    }
}
