use async_trait::async_trait;

use crate::domain::entities::Frame;

/// Port for the camera peripheral's frame buffer pool
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Wait for the next frame. `None` when the peripheral has no buffer to
    /// hand out (busy, timed out or disconnected).
    async fn acquire(&self) -> Option<Frame>;

    /// Return a buffer to the peripheral's pool
    fn release(&self, frame: Frame);
}
