//! # Error Types
//!
//! Custom error types for the EMOS decoder using `thiserror`.

use thiserror::Error;

/// Main error type for the decoder host application
#[derive(Debug, Error)]
pub enum DecoderError {
    /// Captured row text could not be parsed
    #[error("Row parse error: {0}")]
    RowParse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Output serialization errors
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the decoder
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Status code reported for a failed decode, in rtl_433 terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The transmission was rejected before any payload was read
    AbortEarly,
    /// The representative row has the wrong length
    AbortLength,
    /// The message integrity check failed
    FailMic,
}

/// Reasons a single transmission yields no reading
///
/// None of these are fatal: the caller logs them and moves on to the next
/// transmission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer than the required number of identical rows
    #[error("no row repeated at least {required} times among {rows} rows (best: {best})")]
    ConsensusFailure {
        required: usize,
        rows: usize,
        best: usize,
    },

    /// Representative row has the wrong bit length
    #[error("row {row}: expected {expected} bits, got {actual}")]
    LengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Leading bytes differ from the model signature
    #[error("row {row}: expected signature {expected:02X?}, got {actual:02X?}")]
    SignatureMismatch {
        row: usize,
        expected: [u8; 3],
        actual: [u8; 3],
    },

    /// Computed checksum disagrees with the transmitted byte
    #[error("row {row}: checksum mismatch: computed 0x{computed:02X}, received 0x{received:02X}")]
    ChecksumMismatch {
        row: usize,
        computed: u8,
        received: u8,
    },
}

impl DecodeError {
    /// Status code for this failure
    pub fn status(&self) -> DecodeStatus {
        match self {
            DecodeError::ConsensusFailure { .. } | DecodeError::SignatureMismatch { .. } => {
                DecodeStatus::AbortEarly
            }
            DecodeError::LengthMismatch { .. } => DecodeStatus::AbortLength,
            DecodeError::ChecksumMismatch { .. } => DecodeStatus::FailMic,
        }
    }

    /// Short pipeline stage name used in log records
    pub fn stage(&self) -> &'static str {
        match self {
            DecodeError::ConsensusFailure { .. } => "consensus",
            DecodeError::LengthMismatch { .. } => "length",
            DecodeError::SignatureMismatch { .. } => "signature",
            DecodeError::ChecksumMismatch { .. } => "checksum",
        }
    }
}
