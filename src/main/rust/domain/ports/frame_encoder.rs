use bytes::Bytes;

use crate::domain::entities::Frame;
use crate::domain::errors::Result;
use crate::domain::value_objects::JpegQuality;

/// Port for raw frame to JPEG conversion
pub trait FrameEncoder: Send + Sync {
    /// Encode a raw frame into a newly allocated JPEG buffer
    fn encode_jpeg(&self, frame: &Frame, quality: JpegQuality) -> Result<Bytes>;
}
