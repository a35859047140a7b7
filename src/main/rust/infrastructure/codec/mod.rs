mod image_jpeg_encoder;
pub mod pixel;

pub use image_jpeg_encoder::ImageJpegEncoder;
