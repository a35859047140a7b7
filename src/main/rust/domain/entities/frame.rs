use std::time::Instant;

use bytes::Bytes;

use crate::domain::value_objects::PixelFormat;

/// One captured image, owned by the camera peripheral until released.
///
/// A `Frame` is only ever handed back to the peripheral by value, so a
/// buffer cannot be returned twice.
#[derive(Debug)]
pub struct Frame {
    data: Bytes,
    format: PixelFormat,
    width: u32,
    height: u32,
    sequence: u64,
    captured_at: Instant,
}

impl Frame {
    pub fn new(data: Bytes, format: PixelFormat, width: u32, height: u32, sequence: u64) -> Self {
        Self {
            data,
            format,
            width,
            height,
            sequence,
            captured_at: Instant::now(),
        }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn age(&self) -> std::time::Duration {
        self.captured_at.elapsed()
    }
}
