mod encoder_adapter;
mod led_service;
mod multipart_writer;
mod streaming_service;

pub use encoder_adapter::EncoderAdapter;
pub use led_service::LedService;
pub use multipart_writer::MultipartWriter;
pub use streaming_service::StreamingService;
