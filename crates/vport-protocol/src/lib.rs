//! Wire protocol handling for the vport card reader.
//!
//! Turns the noisy serial byte stream into validated card identifiers in two
//! stages: [`FrameDecoder`] assembles marker-delimited frames byte by byte,
//! and [`extract_card_id`] validates a completed frame and pulls out the
//! 8-character hex identifier. Both stages drop malformed input locally and
//! never fail the stream.

pub mod decoder;
pub mod frame;
pub mod validate;

pub use decoder::FrameDecoder;
pub use frame::Frame;
pub use validate::extract_card_id;
