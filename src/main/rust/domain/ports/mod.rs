mod chunk_sink;
mod frame_encoder;
mod frame_source;
mod led_driver;
mod metrics_reporter;

pub use chunk_sink::ChunkSink;
pub use frame_encoder::FrameEncoder;
pub use frame_source::FrameSource;
pub use led_driver::LedDriver;
pub use metrics_reporter::MetricsReporter;
