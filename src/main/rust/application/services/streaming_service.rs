use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

use super::{EncoderAdapter, MultipartWriter};
use crate::domain::entities::{
    EncodedPayload, Ownership, SessionEnd, SessionState, StreamSession,
};
use crate::domain::ports::{ChunkSink, FrameEncoder, FrameSource, MetricsReporter};
use crate::domain::value_objects::{JpegQuality, StreamConfig};

/// Holds the payload of the current iteration until it is released.
///
/// If the session future is dropped while a write is pending, the payload
/// is released on drop instead.
struct PayloadLease<'a> {
    payload: Option<EncodedPayload>,
    source: &'a dyn FrameSource,
    metrics: &'a dyn MetricsReporter,
}

impl<'a> PayloadLease<'a> {
    fn new(
        payload: EncodedPayload,
        source: &'a dyn FrameSource,
        metrics: &'a dyn MetricsReporter,
    ) -> Self {
        Self {
            payload: Some(payload),
            source,
            metrics,
        }
    }

    fn give_back(&mut self) -> Option<Ownership> {
        let ownership = self.payload.take()?.release(self.source);
        self.metrics.report_payload_released(ownership);
        Some(ownership)
    }

    fn release(mut self) -> Option<Ownership> {
        self.give_back()
    }
}

impl Drop for PayloadLease<'_> {
    fn drop(&mut self) {
        if let Some(ownership) = self.give_back() {
            warn!(ownership = ownership.as_str(), "Session cancelled mid-frame, payload released");
        }
    }
}

/// Session with its start reported; the stop is reported exactly once,
/// from [`close`](Self::close) or on drop if the session future is cancelled
struct ReportedSession<'a> {
    session: StreamSession,
    metrics: &'a dyn MetricsReporter,
    closed: bool,
}

impl<'a> ReportedSession<'a> {
    fn start(metrics: &'a dyn MetricsReporter) -> Self {
        let session = StreamSession::new();
        metrics.report_session_started(&session);
        Self {
            session,
            metrics,
            closed: false,
        }
    }

    fn close(mut self) -> StreamSession {
        self.closed = true;
        self.metrics.report_session_stopped(&self.session);
        self.session.clone()
    }
}

impl Deref for ReportedSession<'_> {
    type Target = StreamSession;

    fn deref(&self) -> &StreamSession {
        &self.session
    }
}

impl DerefMut for ReportedSession<'_> {
    fn deref_mut(&mut self) -> &mut StreamSession {
        &mut self.session
    }
}

impl Drop for ReportedSession<'_> {
    fn drop(&mut self) {
        if !self.closed {
            self.metrics.report_session_stopped(&self.session);
            warn!(session_id = %self.session.id(), state = %self.session.state(), "Session cancelled");
        }
    }
}

/// Outcome of a step raced against server shutdown
enum Step<T> {
    Completed(T),
    Shutdown,
}

/// Application service running MJPEG streaming sessions
pub struct StreamingService {
    source: Arc<dyn FrameSource>,
    encoder: EncoderAdapter,
    writer: MultipartWriter,
    quality: JpegQuality,
    metrics: Arc<dyn MetricsReporter>,
    shutdown: watch::Sender<bool>,
}

impl StreamingService {
    pub fn new(
        source: Arc<dyn FrameSource>,
        encoder: Arc<dyn FrameEncoder>,
        config: StreamConfig,
        metrics: Arc<dyn MetricsReporter>,
    ) -> Self {
        Self {
            source,
            encoder: EncoderAdapter::new(encoder),
            writer: MultipartWriter::new(config.boundary().clone()),
            quality: config.quality(),
            metrics,
            shutdown: watch::channel(false).0,
        }
    }

    /// End every running session at its next step and refuse new ones
    pub fn shutdown(&self) {
        if !self.shutdown.send_replace(true) {
            info!("Stopping streaming sessions");
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// `Content-Type` of the stream response
    pub fn content_type(&self) -> String {
        self.writer.boundary().content_type()
    }

    /// Stream frames onto `sink` until the client leaves, a step fails or
    /// the server shuts down.
    ///
    /// Every acquired buffer is released before this returns.
    pub async fn run_session(&self, sink: &mut dyn ChunkSink) -> StreamSession {
        let source = &*self.source;
        let metrics = &*self.metrics;
        let mut shutdown = self.shutdown.subscribe();
        let mut session = ReportedSession::start(metrics);
        info!(session_id = %session.id(), "Streaming session started");

        loop {
            if *shutdown.borrow_and_update() {
                session.finish(SessionEnd::ServerShutdown);
                break;
            }

            let acquired = tokio::select! {
                frame = source.acquire() => Step::Completed(frame),
                _ = shutdown.changed() => Step::Shutdown,
            };
            let frame = match acquired {
                Step::Completed(Some(frame)) => frame,
                Step::Completed(None) => {
                    warn!(session_id = %session.id(), "Camera capture failed");
                    session.finish(SessionEnd::PeripheralUnavailable);
                    break;
                }
                Step::Shutdown => {
                    session.finish(SessionEnd::ServerShutdown);
                    break;
                }
            };

            session.transition_to(SessionState::Encoding);
            let payload = match self.encoder.ensure_encoded(frame, self.quality, source) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(session_id = %session.id(), "JPEG conversion failed: {}", e);
                    session.finish(SessionEnd::EncodingFailed);
                    break;
                }
            };
            if payload.ownership() == Ownership::Heap {
                metrics.report_frame_converted();
            }

            session.transition_to(SessionState::Writing);
            let bytes: Bytes = payload.as_bytes().clone();
            let lease = PayloadLease::new(payload, source, metrics);
            let written = tokio::select! {
                written = self.writer.write_frame(sink, &bytes) => Step::Completed(written),
                _ = shutdown.changed() => Step::Shutdown,
            };

            session.transition_to(SessionState::Releasing);
            lease.release();

            match written {
                Step::Completed(Ok(n)) => {
                    session.record_frame(n);
                    metrics.report_frame_sent(n);
                    trace!(session_id = %session.id(), bytes = n, "Frame sent");
                }
                Step::Completed(Err(e)) => {
                    debug!(session_id = %session.id(), "Client gone: {}", e);
                    session.finish(SessionEnd::ClientDisconnected);
                    break;
                }
                Step::Shutdown => {
                    session.finish(SessionEnd::ServerShutdown);
                    break;
                }
            }

            session.transition_to(SessionState::Acquiring);
            tokio::task::yield_now().await;
        }

        let session = session.close();
        info!(
            session_id = %session.id(),
            state = %session.state(),
            frames = session.frames_sent(),
            bytes = session.bytes_sent(),
            uptime_ms = session.uptime().as_millis() as u64,
            "Streaming session ended"
        );

        session
    }
}
