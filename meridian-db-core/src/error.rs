//! Error types for meridian-db-core

use crate::kind::Kind;
use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Value is present but cannot become the target kind
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Compound value requested as an incompatible scalar (or vice versa)
    #[error("Cannot convert {from} to {to}: structurally incompatible")]
    StructuralConversion {
        /// Kind of the input value
        from: Kind,
        /// Requested target kind
        to: Kind,
    },

    /// Binary payload too short for a fixed-width numeric reinterpretation
    #[error("Insufficient bytes for {target}: need at least {needed}, have {actual}")]
    InsufficientBytes {
        /// Target kind of the reinterpretation
        target: Kind,
        /// Minimum byte count the target requires
        needed: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// Ordering between the two kinds is refused (Map vs Map, ambiguous sets)
    #[error("Indeterminate order between {left} and {right}")]
    IndeterminateOrder {
        /// Kind of the left operand
        left: Kind,
        /// Kind of the right operand
        right: Kind,
    },

    /// Target-specific text parse failure
    #[error("Cannot parse '{input}' as {target}: {detail}")]
    Parse {
        /// The offending input text (possibly truncated)
        input: String,
        /// Target kind of the parse
        target: Kind,
        /// Parser-specific detail
        detail: String,
    },
}

impl Error {
    /// Create a conversion error
    pub fn conversion(msg: impl Into<String>) -> Self {
        Error::Conversion(msg.into())
    }

    /// Create a conversion error for an incompatible kind pair
    pub fn incompatible(from: Kind, to: Kind) -> Self {
        Error::Conversion(format!("Cannot coerce {} to {}", from, to))
    }

    /// Create a structural conversion error
    pub fn structural(from: Kind, to: Kind) -> Self {
        Error::StructuralConversion { from, to }
    }

    /// Create an insufficient-bytes error
    pub fn insufficient_bytes(target: Kind, needed: usize, actual: usize) -> Self {
        Error::InsufficientBytes {
            target,
            needed,
            actual,
        }
    }

    /// Create an indeterminate-order error
    pub fn indeterminate(left: Kind, right: Kind) -> Self {
        Error::IndeterminateOrder { left, right }
    }

    /// Create a parse error
    ///
    /// The input is truncated to 64 characters so oversized payloads do not
    /// end up verbatim in logs.
    pub fn parse(input: &str, target: Kind, detail: impl Into<String>) -> Self {
        let mut input = input.to_string();
        if input.len() > 64 {
            let mut cut = 64;
            while !input.is_char_boundary(cut) {
                cut -= 1;
            }
            input.truncate(cut);
            input.push('…');
        }
        Error::Parse {
            input,
            target,
            detail: detail.into(),
        }
    }

    /// True if this error refuses an ordering rather than a conversion
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Error::IndeterminateOrder { .. })
    }
}
