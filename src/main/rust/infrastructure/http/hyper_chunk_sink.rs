use async_trait::async_trait;
use bytes::Bytes;
use warp::hyper::body::Sender;

use crate::domain::errors::{DomainError, Result};
use crate::domain::ports::ChunkSink;

/// Chunked response body fed through a hyper channel
pub struct HyperChunkSink {
    sender: Sender,
}

impl HyperChunkSink {
    pub fn new(sender: Sender) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl ChunkSink for HyperChunkSink {
    async fn send_chunk(&mut self, chunk: Bytes) -> Result<()> {
        self.sender
            .send_data(chunk)
            .await
            .map_err(|e| DomainError::TransportFailure(e.to_string()))
    }
}
