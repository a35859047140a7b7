use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::Result;

/// Port for an open chunked HTTP response body
#[async_trait]
pub trait ChunkSink: Send {
    /// Send one chunk; fails once the client is gone
    async fn send_chunk(&mut self, chunk: Bytes) -> Result<()>;
}
