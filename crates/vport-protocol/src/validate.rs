//! Card-identifier extraction and validation.
//!
//! A completed frame is only trusted after three checks: exact total length,
//! ASCII decodability of the identifier field, and the hex charset. Anything
//! that fails is dropped by the caller with a log line — a corrupted swipe
//! produces no event rather than a corrupted identifier.

use crate::frame::Frame;
use vport_core::constants::{CARD_ID_LENGTH, CARD_ID_OFFSET, FRAME_LENGTH};
use vport_core::{CardId, Error, Result};

/// Extract the card identifier from a completed frame.
///
/// Accepts only frames of exactly [`FRAME_LENGTH`] bytes, then decodes the
/// 8-byte field at offsets 3..=10 as ASCII, trims, upper-cases, and checks
/// the `0-9A-F` charset via [`CardId::parse`].
///
/// # Errors
///
/// - [`Error::InvalidFrameLength`] if the frame is not exactly 14 bytes.
/// - [`Error::NonAsciiPayload`] if the identifier field is not ASCII.
/// - [`Error::InvalidCardId`] if the decoded field is not 8 hex characters.
///
/// All of these are protocol errors in the sense of the error taxonomy:
/// recoverable locally, logged by the caller, never propagated further up.
pub fn extract_card_id(frame: &Frame) -> Result<CardId> {
    if frame.len() != FRAME_LENGTH {
        return Err(Error::InvalidFrameLength {
            expected: FRAME_LENGTH,
            actual: frame.len(),
        });
    }

    let field = &frame.as_bytes()[CARD_ID_OFFSET..CARD_ID_OFFSET + CARD_ID_LENGTH];

    let text = std::str::from_utf8(field)
        .ok()
        .filter(|s| s.is_ascii())
        .ok_or_else(|| Error::NonAsciiPayload(frame.hex_dump()))?;

    CardId::parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::FrameDecoder;
    use rstest::rstest;
    use vport_core::constants::{END_BYTE, START_BYTE};

    /// Build the reference 14-byte frame around an 8-byte identifier field.
    fn reference_frame(id_field: &[u8; 8]) -> Frame {
        let mut data = vec![START_BYTE, 0x30, 0x31]; // STX + 2 header bytes
        data.extend_from_slice(id_field);
        data.extend_from_slice(&[0x32, 0x33]); // trailing bytes before ETX
        data.push(END_BYTE);
        assert_eq!(data.len(), FRAME_LENGTH);

        let mut decoder = FrameDecoder::new();
        decoder.feed(&data).pop().expect("well-formed frame")
    }

    #[test]
    fn extracts_identifier_from_reference_frame() {
        let frame = reference_frame(b"ABCDEF78");
        let id = extract_card_id(&frame).unwrap();
        assert_eq!(id.as_str(), "ABCDEF78");
    }

    #[test]
    fn lowercase_field_is_canonicalized() {
        let frame = reference_frame(b"abcdef78");
        let id = extract_card_id(&frame).unwrap();
        assert_eq!(id.as_str(), "ABCDEF78");
    }

    #[rstest]
    #[case(b"\x02short\x03".as_slice())]
    #[case(b"\x020123456789abcdef\x03".as_slice())]
    fn wrong_length_is_rejected(#[case] raw: &[u8]) {
        let mut decoder = FrameDecoder::new();
        let frame = decoder.feed(raw).pop().unwrap();

        match extract_card_id(&frame) {
            Err(Error::InvalidFrameLength { expected, actual }) => {
                assert_eq!(expected, FRAME_LENGTH);
                assert_eq!(actual, frame.len());
            }
            other => panic!("expected length error, got {:?}", other),
        }
    }

    #[test]
    fn non_hex_field_is_rejected() {
        let frame = reference_frame(b"4Z414243");
        assert!(matches!(
            extract_card_id(&frame),
            Err(Error::InvalidCardId(_))
        ));
    }

    #[test]
    fn non_ascii_field_is_rejected() {
        let frame = reference_frame(&[0xFF, 0xFE, b'A', b'B', b'C', b'D', b'E', b'F']);
        assert!(matches!(
            extract_card_id(&frame),
            Err(Error::NonAsciiPayload(_))
        ));
    }
}
