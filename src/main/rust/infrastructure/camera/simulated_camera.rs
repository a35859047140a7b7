use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use super::{FrameBufferPool, SensorClock};
use crate::domain::entities::Frame;
use crate::domain::errors::{DomainError, Result};
use crate::domain::ports::{FrameEncoder, FrameSource};
use crate::domain::value_objects::CameraConfig;

/// One prepared sensor readout
#[derive(Debug, Clone)]
pub struct StoredFrame {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

/// Camera peripheral stand-in for hosts without a sensor.
///
/// Cycles through prepared readouts while enforcing the peripheral's
/// constraints: at most `fb_count` buffers out at once, one exposure per
/// frame interval.
pub struct SimulatedCamera {
    config: CameraConfig,
    frames: Vec<StoredFrame>,
    pool: FrameBufferPool,
    clock: SensorClock,
    next_frame: AtomicUsize,
    sequence: AtomicU64,
}

impl SimulatedCamera {
    pub fn new(config: CameraConfig, frames: Vec<StoredFrame>) -> Result<Self> {
        if frames.is_empty() {
            return Err(DomainError::PeripheralUnavailable);
        }

        let pool = FrameBufferPool::new(config.fb_count(), config.capture_timeout());
        let clock = SensorClock::new(config.frame_interval());

        tracing::info!(
            "Camera ready ({}x{}, {}, {} frame buffer(s))",
            frames[0].width,
            frames[0].height,
            config.pixel_format(),
            config.fb_count()
        );

        Ok(Self {
            config,
            frames,
            pool,
            clock,
            next_frame: AtomicUsize::new(0),
            sequence: AtomicU64::new(0),
        })
    }

    /// Camera producing a moving test pattern in the configured pixel format
    pub fn test_pattern(config: CameraConfig, encoder: &dyn FrameEncoder) -> Result<Self> {
        let frames = super::render_test_pattern(&config, encoder)?;
        Self::new(config, frames)
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Frame buffers currently held by callers
    pub fn buffers_outstanding(&self) -> usize {
        self.pool.outstanding()
    }
}

#[async_trait]
impl FrameSource for SimulatedCamera {
    async fn acquire(&self) -> Option<Frame> {
        let permit = self.pool.checkout().await?;
        self.clock.next_exposure().await;

        let index = self.next_frame.fetch_add(1, Ordering::Relaxed) % self.frames.len();
        let stored = &self.frames[index];
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);

        self.pool.commit(permit);
        Some(Frame::new(
            stored.data.clone(),
            self.config.pixel_format(),
            stored.width,
            stored.height,
            sequence,
        ))
    }

    fn release(&self, frame: Frame) {
        drop(frame);
        self.pool.give_back();
    }
}
