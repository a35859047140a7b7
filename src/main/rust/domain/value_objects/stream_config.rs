use super::{Boundary, JpegQuality};

/// Settings shared by every streaming session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamConfig {
    boundary: Boundary,
    quality: JpegQuality,
}

impl StreamConfig {
    pub fn new(boundary: Boundary, quality: JpegQuality) -> Self {
        Self { boundary, quality }
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_quality(mut self, quality: JpegQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn quality(&self) -> JpegQuality {
        self.quality
    }
}
