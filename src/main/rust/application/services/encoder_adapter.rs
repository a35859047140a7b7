use std::sync::Arc;

use crate::domain::entities::{EncodedPayload, Frame};
use crate::domain::errors::Result;
use crate::domain::ports::{FrameEncoder, FrameSource};
use crate::domain::value_objects::JpegQuality;

/// Makes sure every frame leaves as JPEG
pub struct EncoderAdapter {
    encoder: Arc<dyn FrameEncoder>,
}

impl EncoderAdapter {
    pub fn new(encoder: Arc<dyn FrameEncoder>) -> Self {
        Self { encoder }
    }

    /// Turn a captured frame into a JPEG payload.
    ///
    /// Sensor-encoded frames are passed through and stay peripheral-owned.
    /// Raw frames are converted into a heap buffer and the peripheral buffer
    /// is handed back before the new one is returned, whether or not the
    /// conversion succeeded.
    pub fn ensure_encoded(
        &self,
        frame: Frame,
        quality: JpegQuality,
        source: &dyn FrameSource,
    ) -> Result<EncodedPayload> {
        if frame.format().is_jpeg() {
            return Ok(EncodedPayload::Peripheral(frame));
        }

        let converted = self.encoder.encode_jpeg(&frame, quality);
        source.release(frame);

        converted.map(EncodedPayload::Heap)
    }
}
