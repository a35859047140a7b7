use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Pixel layout produced by the camera sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Encoded by the sensor itself
    Jpeg,
    /// 16-bit RGB, high byte first
    Rgb565,
    Rgb888,
    Grayscale,
    /// Packed YUYV, two pixels per four bytes
    Yuv422,
}

impl PixelFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelFormat::Jpeg => "jpeg",
            PixelFormat::Rgb565 => "rgb565",
            PixelFormat::Rgb888 => "rgb888",
            PixelFormat::Grayscale => "grayscale",
            PixelFormat::Yuv422 => "yuv422",
        }
    }

    pub fn is_jpeg(&self) -> bool {
        matches!(self, PixelFormat::Jpeg)
    }

    /// Bytes per pixel for raw formats, `None` for encoded ones
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            PixelFormat::Jpeg => None,
            PixelFormat::Rgb565 | PixelFormat::Yuv422 => Some(2),
            PixelFormat::Rgb888 => Some(3),
            PixelFormat::Grayscale => Some(1),
        }
    }

    /// Expected buffer length for a raw frame of the given dimensions
    pub fn raw_len(&self, width: u32, height: u32) -> Option<usize> {
        self.bytes_per_pixel()
            .map(|bpp| width as usize * height as usize * bpp)
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        PixelFormat::Jpeg
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixelFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(PixelFormat::Jpeg),
            "rgb565" => Ok(PixelFormat::Rgb565),
            "rgb888" | "rgb" => Ok(PixelFormat::Rgb888),
            "grayscale" | "gray" => Ok(PixelFormat::Grayscale),
            "yuv422" | "yuyv" => Ok(PixelFormat::Yuv422),
            other => Err(DomainError::UnsupportedPixelFormat(other.to_string())),
        }
    }
}
