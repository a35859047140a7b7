use std::fmt;
use std::time::Instant;
use uuid::Uuid;

use crate::domain::errors::{DomainError, Result};

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client went away; a normal end of stream
    ClientDisconnected,
    PeripheralUnavailable,
    EncodingFailed,
    /// The server is shutting down
    ServerShutdown,
}

impl SessionEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEnd::ClientDisconnected => "client_disconnected",
            SessionEnd::PeripheralUnavailable => "peripheral_unavailable",
            SessionEnd::EncodingFailed => "encoding_failed",
            SessionEnd::ServerShutdown => "server_shutdown",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(
            self,
            SessionEnd::ClientDisconnected | SessionEnd::ServerShutdown
        )
    }
}

/// Per-connection state, walked in order once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Acquiring,
    Encoding,
    Writing,
    Releasing,
    Done(SessionEnd),
}

impl SessionState {
    /// Legal successor states of the per-iteration state machine
    pub fn can_transition_to(&self, next: &SessionState) -> bool {
        use SessionState::*;

        match (self, next) {
            (Acquiring, Encoding) | (Encoding, Writing) | (Writing, Releasing) => true,
            (Releasing, Acquiring) => true,
            // Nothing is held while acquiring or after a failed conversion
            (Acquiring, Done(_)) | (Encoding, Done(_)) => true,
            (Releasing, Done(_)) => true,
            _ => false,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, SessionState::Done(_))
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acquiring => write!(f, "ACQUIRING"),
            Self::Encoding => write!(f, "ENCODING"),
            Self::Writing => write!(f, "WRITING"),
            Self::Releasing => write!(f, "RELEASING"),
            Self::Done(end) => write!(f, "DONE ({})", end.as_str()),
        }
    }
}

/// One client's streaming connection
#[derive(Debug, Clone)]
pub struct StreamSession {
    id: String,
    started_at: Instant,
    state: SessionState,
    transitions: u64,
    frames_sent: u64,
    bytes_sent: u64,
}

impl StreamSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: Instant::now(),
            state: SessionState::Acquiring,
            transitions: 0,
            frames_sent: 0,
            bytes_sent: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn uptime(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    pub fn end(&self) -> Option<SessionEnd> {
        match self.state {
            SessionState::Done(end) => Some(end),
            _ => None,
        }
    }

    /// Move to `next`, refusing anything outside the per-iteration order
    pub fn try_transition_to(&mut self, next: SessionState) -> Result<()> {
        if !self.state.can_transition_to(&next) {
            return Err(DomainError::IllegalTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        self.state = next;
        self.transitions += 1;
        Ok(())
    }

    /// Like [`try_transition_to`](Self::try_transition_to); an illegal move is
    /// logged and the state is left unchanged
    pub fn transition_to(&mut self, next: SessionState) {
        if let Err(e) = self.try_transition_to(next) {
            tracing::error!(session_id = %self.id, "{}", e);
        }
    }

    pub fn record_frame(&mut self, bytes: usize) {
        self.frames_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    pub fn finish(&mut self, end: SessionEnd) {
        self.transition_to(SessionState::Done(end));
    }
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}
