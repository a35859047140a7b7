use bytes::Bytes;

use crate::domain::errors::Result;
use crate::domain::ports::ChunkSink;
use crate::domain::value_objects::Boundary;

/// Serializes frames onto a `multipart/x-mixed-replace` body
pub struct MultipartWriter {
    boundary: Boundary,
}

impl MultipartWriter {
    pub fn new(boundary: Boundary) -> Self {
        Self { boundary }
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Write one part as three chunks: boundary, part header, JPEG bytes.
    ///
    /// Stops at the first failed chunk and returns its error. On success
    /// returns the number of bytes put on the wire.
    pub async fn write_frame(&self, sink: &mut dyn ChunkSink, payload: &Bytes) -> Result<usize> {
        let marker = self.boundary.marker();
        let header = Bytes::from(Boundary::part_header(payload.len()));
        let total = marker.len() + header.len() + payload.len();

        sink.send_chunk(marker).await?;
        sink.send_chunk(header).await?;
        sink.send_chunk(payload.clone()).await?;

        Ok(total)
    }
}
