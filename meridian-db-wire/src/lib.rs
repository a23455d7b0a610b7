//! # Meridian DB Wire
//!
//! Self-describing binary codec for Meridian values.
//!
//! Every encoded value is a `(kind-tag-byte, payload)` pair; compound
//! payloads nest recursively, so a decoder needs no external schema. The
//! format favors small encodings: strings and byte payloads lead with a
//! length-class byte selecting the smallest sufficient length prefix, and
//! integer-like payloads lead with a value-class byte selecting the
//! smallest width that round-trips the value.
//!
//! ## Example
//!
//! ```
//! use meridian_db_core::Value;
//! use meridian_db_wire::{decode_value_exact, encode_value};
//!
//! let value = Value::Long(Some(300));
//! let mut buf = Vec::new();
//! encode_value(&value, &mut buf).unwrap();
//! assert_eq!(decode_value_exact(&buf).unwrap(), value);
//! ```

pub mod codec;
pub mod error;
pub mod stream;

pub use codec::{decode_value, decode_value_exact, encode_value, encoded_value};
pub use error::{Result, WireError};
pub use stream::{decode_values, encode_values, is_value_stream};
