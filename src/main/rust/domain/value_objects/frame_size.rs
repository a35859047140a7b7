use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Sensor output resolutions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSize {
    Qqvga,
    Qvga,
    Cif,
    Vga,
    Svga,
    Xga,
    Hd,
    Uxga,
}

impl FrameSize {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            FrameSize::Qqvga => (160, 120),
            FrameSize::Qvga => (320, 240),
            FrameSize::Cif => (400, 296),
            FrameSize::Vga => (640, 480),
            FrameSize::Svga => (800, 600),
            FrameSize::Xga => (1024, 768),
            FrameSize::Hd => (1280, 720),
            FrameSize::Uxga => (1600, 1200),
        }
    }

    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.dimensions().1
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        FrameSize::Qvga
    }
}

impl FromStr for FrameSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "qqvga" => Ok(FrameSize::Qqvga),
            "qvga" => Ok(FrameSize::Qvga),
            "cif" => Ok(FrameSize::Cif),
            "vga" => Ok(FrameSize::Vga),
            "svga" => Ok(FrameSize::Svga),
            "xga" => Ok(FrameSize::Xga),
            "hd" => Ok(FrameSize::Hd),
            "uxga" => Ok(FrameSize::Uxga),
            other => Err(DomainError::UnsupportedFrameSize(other.to_string())),
        }
    }
}
