//! Byte-level frame decoder for the serial card-reader protocol.
//!
//! The reader hardware emits fixed-size frames delimited by STX/ETX markers:
//!
//! ```text
//! STX  <payload>  ETX
//! 0x02 ........   0x03
//! ```
//!
//! The serial link delivers bytes one at a time with arbitrary gaps, noise
//! between frames, and occasionally a frame whose end marker never arrives.
//! The decoder therefore runs as a small state machine:
//!
//! ```text
//! ┌──────┐   STX byte     ┌──────┐    ETX byte    frame emitted,
//! │ Idle │───────────────>│ Open │──────────────> back to Idle
//! └──────┘                └──────┘
//!    ^  │ non-STX bytes      │  STX byte (restart: partial frame discarded)
//!    │  │ (discarded)        │  buffer > MAX_PENDING_FRAME (abandoned)
//!    │  └────────────────────┘
//! ```
//!
//! A start marker always pre-empts an incomplete frame: garbled or truncated
//! frames are recovered from by simply starting over at the next STX. No
//! input sequence is fatal — malformed data only ever resets local state.
//!
//! # Example
//!
//! ```
//! use vport_protocol::FrameDecoder;
//!
//! let mut decoder = FrameDecoder::new();
//! let mut frames = Vec::new();
//!
//! for &byte in b"\x02hello-world\x03".iter() {
//!     if let Some(frame) = decoder.push(byte) {
//!         frames.push(frame);
//!     }
//! }
//!
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].payload(), b"hello-world");
//! ```

use crate::frame::Frame;
use tracing::debug;
use vport_core::constants::{END_BYTE, MAX_PENDING_FRAME, START_BYTE};

/// Stateful one-byte-at-a-time frame decoder.
///
/// Emitted frames always carry both markers; the sequence of emitted frames
/// depends only on the positions of the marker bytes in the input stream,
/// never on how the stream was chunked by the serial driver.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// In-progress frame, start marker included. Empty while idle.
    buf: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(MAX_PENDING_FRAME),
        }
    }

    /// Whether a frame is currently open (start marker seen, end marker not).
    pub fn is_open(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Feed a single byte; returns a frame when this byte completes one.
    pub fn push(&mut self, byte: u8) -> Option<Frame> {
        match byte {
            START_BYTE => {
                if self.is_open() {
                    debug!(
                        discarded = self.buf.len(),
                        "start marker pre-empted partial frame"
                    );
                }
                self.buf.clear();
                self.buf.push(START_BYTE);
                None
            }
            END_BYTE if self.is_open() => {
                self.buf.push(END_BYTE);
                let frame = Frame::from_bytes(&self.buf);
                self.buf.clear();
                Some(frame)
            }
            _ if self.is_open() => {
                self.buf.push(byte);
                if self.buf.len() > MAX_PENDING_FRAME {
                    debug!(
                        length = self.buf.len(),
                        "abandoning unterminated frame past safety bound"
                    );
                    self.buf.clear();
                }
                None
            }
            // Noise between frames: ignored until the next start marker.
            _ => None,
        }
    }

    /// Feed a slice of bytes, collecting every frame completed along the way.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Frame> {
        bytes.iter().filter_map(|&b| self.push(b)).collect()
    }

    /// Discard any in-progress frame and return to idle.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(payload: &[u8]) -> Vec<u8> {
        let mut data = Vec::with_capacity(payload.len() + 2);
        data.push(START_BYTE);
        data.extend_from_slice(payload);
        data.push(END_BYTE);
        data
    }

    #[test]
    fn complete_frame_single_feed() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed(&framed(b"01234567890"));

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].payload(), b"01234567890");
        assert!(!decoder.is_open());
    }

    #[test]
    fn frame_split_across_feeds() {
        let mut decoder = FrameDecoder::new();

        assert!(decoder.feed(&[START_BYTE, b'A', b'B']).is_empty());
        assert!(decoder.is_open());

        let frames = decoder.feed(&[b'C', END_BYTE]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].payload(), b"ABC");
    }

    #[test]
    fn emitted_frames_carry_both_markers() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed(&framed(b"XY"));

        let bytes = frames[0].as_bytes();
        assert_eq!(bytes.first(), Some(&START_BYTE));
        assert_eq!(bytes.last(), Some(&END_BYTE));
    }

    #[test]
    fn garbage_before_start_marker_is_ignored() {
        let mut decoder = FrameDecoder::new();

        let mut data = b"noise!".to_vec();
        data.extend_from_slice(&framed(b"OK"));

        let frames = decoder.feed(&data);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].payload(), b"OK");
    }

    #[test]
    fn end_marker_without_open_frame_is_ignored() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(&[END_BYTE, END_BYTE, b'x']).is_empty());
        assert!(!decoder.is_open());
    }

    #[test]
    fn restart_discards_partial_frame() {
        let mut decoder = FrameDecoder::new();

        // First frame is pre-empted by a second start marker.
        let mut data = vec![START_BYTE, b'p', b'a', b'r', b't'];
        data.extend_from_slice(&framed(b"good"));

        let frames = decoder.feed(&data);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].payload(), b"good");
    }

    #[test]
    fn multiple_frames_in_one_feed() {
        let mut decoder = FrameDecoder::new();

        let mut data = framed(b"one");
        data.extend_from_slice(&framed(b"two"));

        let frames = decoder.feed(&data);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].payload(), b"one");
        assert_eq!(frames[1].payload(), b"two");
    }

    #[test]
    fn unterminated_frame_is_abandoned_past_bound() {
        let mut decoder = FrameDecoder::new();

        decoder.push(START_BYTE);
        for _ in 0..MAX_PENDING_FRAME + 5 {
            assert!(decoder.push(b'X').is_none());
        }
        assert!(!decoder.is_open());

        // A later well-formed frame still decodes.
        let frames = decoder.feed(&framed(b"after"));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].payload(), b"after");
    }

    #[test]
    fn empty_payload_frame() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed(&[START_BYTE, END_BYTE]);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].payload(), b"");
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut decoder = FrameDecoder::new();
        decoder.feed(&[START_BYTE, b'A']);
        assert!(decoder.is_open());

        decoder.reset();
        assert!(!decoder.is_open());

        let frames = decoder.feed(&framed(b"Z"));
        assert_eq!(frames.len(), 1);
    }
}
