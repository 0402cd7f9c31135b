use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Protocol errors
    #[error("Invalid frame length: expected {expected} bytes, got {actual}")]
    InvalidFrameLength { expected: usize, actual: usize },

    #[error("Non-ASCII payload in frame: {0}")]
    NonAsciiPayload(String),

    #[error("Invalid card identifier: {0}")]
    InvalidCardId(String),

    // Transport errors
    #[error("Serial port error: {0}")]
    Serial(String),

    #[error("Serial port unavailable: {port}: {reason}")]
    SerialOpen { port: String, reason: String },

    // Collaborator errors
    #[error("Access gate error: {0}")]
    Gate(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
