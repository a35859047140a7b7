mod boundary;
mod camera_config;
mod frame_size;
mod jpeg_quality;
mod led_command;
mod pixel_format;
mod server_config;
mod stream_config;

pub use boundary::{Boundary, DEFAULT_BOUNDARY};
pub use camera_config::CameraConfig;
pub use frame_size::FrameSize;
pub use jpeg_quality::JpegQuality;
pub use led_command::LedCommand;
pub use pixel_format::PixelFormat;
pub use server_config::ServerConfig;
pub use stream_config::StreamConfig;
