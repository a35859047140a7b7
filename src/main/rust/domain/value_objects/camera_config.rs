use std::time::Duration;

use super::{FrameSize, JpegQuality, PixelFormat};
use crate::domain::errors::{DomainError, Result};

/// Upper bound on driver frame buffers
pub const MAX_FRAME_BUFFERS: usize = 32;

/// Upper bound on the sensor frame rate
pub const MAX_SENSOR_FPS: u32 = 1000;

/// Camera peripheral settings applied once at initialization
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    frame_size: FrameSize,
    pixel_format: PixelFormat,
    fb_count: usize,
    capture_timeout: Duration,
    sensor_fps: u32,
    sensor_quality: JpegQuality,
}

impl CameraConfig {
    pub fn new(frame_size: FrameSize, pixel_format: PixelFormat, fb_count: usize) -> Result<Self> {
        if fb_count == 0 || fb_count > MAX_FRAME_BUFFERS {
            return Err(DomainError::InvalidFrameBufferCount(fb_count));
        }

        Ok(Self {
            frame_size,
            pixel_format,
            fb_count,
            ..Self::default()
        })
    }

    pub fn with_capture_timeout(mut self, timeout: Duration) -> Self {
        self.capture_timeout = timeout;
        self
    }

    pub fn with_sensor_fps(mut self, fps: u32) -> Result<Self> {
        if fps == 0 || fps > MAX_SENSOR_FPS {
            return Err(DomainError::InvalidFrameRate(fps));
        }
        self.sensor_fps = fps;
        Ok(self)
    }

    pub fn with_sensor_quality(mut self, quality: JpegQuality) -> Self {
        self.sensor_quality = quality;
        self
    }

    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    pub fn fb_count(&self) -> usize {
        self.fb_count
    }

    pub fn capture_timeout(&self) -> Duration {
        self.capture_timeout
    }

    pub fn sensor_fps(&self) -> u32 {
        self.sensor_fps
    }

    /// Time between two sensor exposures
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.sensor_fps
    }

    pub fn sensor_quality(&self) -> JpegQuality {
        self.sensor_quality
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            frame_size: FrameSize::default(),
            pixel_format: PixelFormat::default(),
            fb_count: 1,
            capture_timeout: Duration::from_secs(2),
            sensor_fps: 25,
            sensor_quality: JpegQuality::default(),
        }
    }
}
