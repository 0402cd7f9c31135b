//! Protocol and timing constants shared across the vport crates.
//!
//! The card reader speaks a fixed-size framed protocol over an asynchronous
//! serial link:
//!
//! ```text
//! <STX> <hdr:2> <uid:8 ASCII hex> <tail:2> <ETX>
//! 0x02  .. ..   30..46 x 8        .. ..    0x03    = 14 bytes total
//! ```
//!
//! Everything between the markers is ASCII. The 8-character identifier sits
//! at frame offsets 3..=10, counting the STX byte as offset 0.

use std::time::Duration;

// ============================================================================
// Frame markers
// ============================================================================

/// Start of text marker (STX, 0x02). Opens every frame.
pub const START_BYTE: u8 = 0x02;

/// End of text marker (ETX, 0x03). Closes every frame.
pub const END_BYTE: u8 = 0x03;

/// Bytes spent on the two frame markers.
pub const FRAME_OVERHEAD: usize = 2;

// ============================================================================
// Frame geometry
// ============================================================================

/// Exact length of a well-formed frame, markers included.
///
/// The reference reader hardware always emits 14-byte frames. Any frame that
/// completes with a different length is discarded without producing an event.
pub const FRAME_LENGTH: usize = 14;

/// Offset of the first identifier byte inside a frame (STX counted as 0).
pub const CARD_ID_OFFSET: usize = 3;

/// Length of the ASCII-hex card identifier field.
pub const CARD_ID_LENGTH: usize = 8;

/// Safety bound on an in-progress frame.
///
/// A frame that grows past this length never saw its end marker; the decoder
/// abandons it and waits for the next start marker. Comfortably above
/// [`FRAME_LENGTH`] so a valid frame can never trip it.
pub const MAX_PENDING_FRAME: usize = 20;

// ============================================================================
// Reader timing
// ============================================================================

/// Default window during which repeat reads of the same card are suppressed.
///
/// A card held near the reader produces dozens of frames per second; 1.5 s
/// collapses them into a single event without hurting legitimate re-swipes.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(1500);

/// Default sleep between polls when the serial link has no bytes pending.
///
/// Card presentations are infrequent relative to this interval, so the
/// low-CPU busy-poll is acceptable.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Default baud rate of the reference reader's serial link.
pub const DEFAULT_BAUD_RATE: u32 = 9600;
