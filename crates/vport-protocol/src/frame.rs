//! Completed frame payloads emitted by the decoder.

use bytes::Bytes;
use std::fmt;
use vport_core::constants::{END_BYTE, FRAME_OVERHEAD, START_BYTE};

/// A complete frame as observed on the wire, markers included.
///
/// The decoder guarantees every `Frame` starts with the start marker (0x02)
/// and ends with the end marker (0x03); nothing else is guaranteed — length
/// and content validation happen downstream in the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Bytes,
}

impl Frame {
    /// Wrap raw frame bytes. Callers must include both markers.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() >= FRAME_OVERHEAD);
        debug_assert_eq!(bytes.first(), Some(&START_BYTE));
        debug_assert_eq!(bytes.last(), Some(&END_BYTE));
        Self {
            data: Bytes::copy_from_slice(bytes),
        }
    }

    /// The full frame bytes, markers included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Total frame length in bytes, markers included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes between the markers.
    pub fn payload(&self) -> &[u8] {
        &self.data[1..self.data.len() - 1]
    }

    /// Space-separated uppercase hex rendering, for protocol-error logs.
    pub fn hex_dump(&self) -> String {
        self.data
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame[len={}, bytes={}]", self.len(), self.hex_dump())
    }
}
