//! Error types for meridian-db-wire

use thiserror::Error;

/// Result type alias using our WireError
pub type Result<T> = std::result::Result<T, WireError>;

/// Errors during value encoding/decoding
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WireError {
    /// Stream ended inside a field
    #[error("truncated at {context} (need {needed} bytes at offset {offset}, have {available})")]
    TooShort {
        /// What was being decoded
        context: &'static str,
        /// Stream offset of the read
        offset: usize,
        /// Bytes the field requires
        needed: usize,
        /// Bytes remaining
        available: usize,
    },

    /// Unknown kind tag byte
    #[error("unknown kind tag {0:#04x}")]
    InvalidTag(u8),

    /// Length-class or value-class byte outside its range
    #[error("invalid {context} class byte {value:#04x}")]
    InvalidClass {
        /// Which class byte was malformed
        context: &'static str,
        /// The offending byte
        value: u8,
    },

    /// String payload is not UTF-8
    #[error("invalid UTF-8 in string payload at offset {0}")]
    InvalidUtf8(usize),

    /// Value cannot be represented in the format
    #[error("oversized value: {0}")]
    Oversized(String),

    /// decode_value_exact found bytes after the value
    #[error("trailing bytes after value: consumed {consumed} of {total}")]
    TrailingBytes {
        /// Bytes the value occupied
        consumed: usize,
        /// Total input length
        total: usize,
    },

    /// Stream header does not start with the magic bytes
    #[error("invalid magic bytes")]
    InvalidMagic,

    /// Stream header carries an unknown format version
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
}
