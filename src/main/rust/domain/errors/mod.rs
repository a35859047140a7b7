use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Camera peripheral unavailable: no frame buffer")]
    PeripheralUnavailable,

    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Malformed multipart stream: {0}")]
    MalformedStream(String),

    #[error("Invalid port: port cannot be zero")]
    InvalidPort,

    #[error("Server initialization failed: {0}")]
    ServerInitFailed(String),

    #[error("Invalid multipart boundary: {0}")]
    InvalidBoundary(String),

    #[error("Invalid JPEG quality {0}: must be within 1..=100")]
    InvalidQuality(u8),

    #[error("Invalid frame buffer count {0}: must be within 1..=32")]
    InvalidFrameBufferCount(usize),

    #[error("Invalid sensor frame rate {0}: must be within 1..=1000")]
    InvalidFrameRate(u32),

    #[error("Illegal session transition {from} -> {to}")]
    IllegalTransition { from: String, to: String },

    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    #[error("Unsupported frame size: {0}")]
    UnsupportedFrameSize(String),

    #[error("Invalid LED state: {0}")]
    InvalidLedState(String),

    #[error("Replay directory not found: {0}")]
    ReplayDirNotFound(PathBuf),

    #[error("Replay directory contains no JPEG files: {0}")]
    ReplayDirEmpty(PathBuf),
}

pub type Result<T> = std::result::Result<T, DomainError>;
