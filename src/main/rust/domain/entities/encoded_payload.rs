use bytes::Bytes;

use super::Frame;
use crate::domain::ports::FrameSource;

/// Which release path a payload needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Still the peripheral's buffer, goes back to the frame source
    Peripheral,
    /// Produced by conversion, freed when dropped
    Heap,
}

impl Ownership {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ownership::Peripheral => "peripheral",
            Ownership::Heap => "heap",
        }
    }
}

/// JPEG bytes ready to be written for one iteration
#[derive(Debug)]
pub enum EncodedPayload {
    Peripheral(Frame),
    Heap(Bytes),
}

impl EncodedPayload {
    pub fn ownership(&self) -> Ownership {
        match self {
            EncodedPayload::Peripheral(_) => Ownership::Peripheral,
            EncodedPayload::Heap(_) => Ownership::Heap,
        }
    }

    pub fn as_bytes(&self) -> &Bytes {
        match self {
            EncodedPayload::Peripheral(frame) => frame.data(),
            EncodedPayload::Heap(buffer) => buffer,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Run the one release path matching how the payload is owned
    pub fn release(self, source: &dyn FrameSource) -> Ownership {
        match self {
            EncodedPayload::Peripheral(frame) => {
                source.release(frame);
                Ownership::Peripheral
            }
            EncodedPayload::Heap(buffer) => {
                drop(buffer);
                Ownership::Heap
            }
        }
    }
}
