use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use super::pixel;
use crate::domain::entities::Frame;
use crate::domain::errors::{DomainError, Result};
use crate::domain::ports::FrameEncoder;
use crate::domain::value_objects::{JpegQuality, PixelFormat};

/// Software JPEG encoder backed by the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageJpegEncoder;

impl ImageJpegEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode packed pixels, `L8` for grayscale and `Rgb8` otherwise
    pub fn encode_pixels(
        pixels: &[u8],
        width: u32,
        height: u32,
        color: ExtendedColorType,
        quality: JpegQuality,
    ) -> Result<Bytes> {
        if width == 0 || height == 0 {
            return Err(DomainError::EncodingFailed(format!(
                "invalid frame dimensions {}x{}",
                width, height
            )));
        }

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, quality.value())
            .encode(pixels, width, height, color)
            .map_err(|e| DomainError::EncodingFailed(e.to_string()))?;

        Ok(Bytes::from(jpeg))
    }
}

impl FrameEncoder for ImageJpegEncoder {
    fn encode_jpeg(&self, frame: &Frame, quality: JpegQuality) -> Result<Bytes> {
        let (width, height) = (frame.width(), frame.height());

        match frame.format() {
            PixelFormat::Jpeg => Err(DomainError::EncodingFailed(
                "frame is already JPEG".to_string(),
            )),
            PixelFormat::Grayscale => {
                if frame.format().raw_len(width, height) != Some(frame.len()) {
                    return Err(DomainError::EncodingFailed(format!(
                        "grayscale buffer of {} bytes does not match {}x{}",
                        frame.len(),
                        width,
                        height
                    )));
                }
                Self::encode_pixels(frame.data(), width, height, ExtendedColorType::L8, quality)
            }
            format => {
                let rgb = pixel::to_rgb8(format, frame.data(), width, height)?;
                Self::encode_pixels(&rgb, width, height, ExtendedColorType::Rgb8, quality)
            }
        }
    }
}
