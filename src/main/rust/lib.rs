pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::{EncoderAdapter, LedService, MultipartWriter, StreamingService};
pub use config::Config;
pub use domain::entities::{
    EncodedPayload, Frame, LedState, Ownership, SessionEnd, SessionState, StreamSession,
};
pub use domain::errors::{DomainError, Result};
pub use domain::ports::{ChunkSink, FrameEncoder, FrameSource, LedDriver, MetricsReporter};
pub use domain::value_objects::{
    Boundary, CameraConfig, FrameSize, JpegQuality, LedCommand, PixelFormat, ServerConfig,
    StreamConfig, DEFAULT_BOUNDARY,
};
pub use infrastructure::camera::{load_replay_frames, SimulatedCamera, StoredFrame};
pub use infrastructure::codec::ImageJpegEncoder;
pub use infrastructure::http::{routes, serve_camera, AppContext, HyperChunkSink, MultipartReader, Part};
pub use infrastructure::led::LogLed;
pub use infrastructure::metrics::{metrics_routes, serve_metrics, PrometheusReporter};
