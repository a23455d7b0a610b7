//! Framed multi-value stream format
//!
//! Wraps a sequence of encoded values in a self-identifying container for
//! persistence and transport:
//!
//! ```text
//! +------+------+----------+-------+------------------+
//! | MVAL | ver  | reserved | count | value payloads   |
//! | 4B   | 1B   | 3B       | 4B    | variable         |
//! +------+------+----------+-------+------------------+
//! ```
//!
//! - Magic bytes: "MVAL" (Meridian VALues)
//! - Version: 1 byte (currently 1)
//! - Reserved: 3 bytes for alignment
//! - Count: u32 big-endian number of values
//! - Payloads: `count` values in the [`codec`](crate::codec) format

use crate::codec::{decode_value, encode_value};
use crate::error::{Result, WireError};
use meridian_db_core::Value;

/// Magic bytes: "MVAL" (Meridian VALues)
pub const MAGIC: &[u8; 4] = b"MVAL";
/// Format version
pub const VERSION: u8 = 1;
/// Header size: magic (4) + version (1) + reserved (3) + count (4)
pub const HEADER_SIZE: usize = 12;

/// Encode a value sequence into a framed stream.
pub fn encode_values(values: &[Value]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE + values.len() * 16);
    bytes.extend_from_slice(MAGIC);
    bytes.push(VERSION);
    bytes.extend_from_slice(&[0, 0, 0]); // reserved/padding for alignment
    bytes.extend_from_slice(&(values.len() as u32).to_be_bytes());
    for value in values {
        encode_value(value, &mut bytes)?;
    }
    Ok(bytes)
}

/// Decode a framed stream back into its values.
pub fn decode_values(bytes: &[u8]) -> Result<Vec<Value>> {
    if bytes.len() < HEADER_SIZE {
        return Err(WireError::TooShort {
            context: "stream header",
            offset: 0,
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }
    if &bytes[0..4] != MAGIC {
        return Err(WireError::InvalidMagic);
    }
    let version = bytes[4];
    if version != VERSION {
        return Err(WireError::UnsupportedVersion(version));
    }
    let count = u32::from_be_bytes(bytes[8..12].try_into().expect("length checked")) as usize;

    let mut values = Vec::with_capacity(count.min(65536));
    let mut pos = HEADER_SIZE;
    for _ in 0..count {
        let (value, used) = decode_value(&bytes[pos..])?;
        values.push(value);
        pos += used;
    }
    if pos != bytes.len() {
        tracing::debug!(consumed = pos, total = bytes.len(), "trailing bytes after stream");
        return Err(WireError::TrailingBytes {
            consumed: pos,
            total: bytes.len(),
        });
    }
    Ok(values)
}

/// Check whether bytes start with the MVAL stream header.
#[inline]
pub fn is_value_stream(bytes: &[u8]) -> bool {
    bytes.len() >= HEADER_SIZE && &bytes[0..4] == MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_roundtrip() {
        let values = vec![
            Value::Long(Some(42)),
            Value::from("hello"),
            Value::Null,
            Value::list_from(vec![1i64, 2]),
        ];
        let encoded = encode_values(&values).unwrap();
        assert_eq!(&encoded[0..4], b"MVAL");
        assert_eq!(encoded[4], VERSION);
        assert_eq!(decode_values(&encoded).unwrap(), values);
    }

    #[test]
    fn test_empty_stream() {
        let encoded = encode_values(&[]).unwrap();
        assert_eq!(encoded.len(), HEADER_SIZE);
        assert!(decode_values(&encoded).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_magic() {
        let bytes = b"XXXX\x01\x00\x00\x00\x00\x00\x00\x00";
        assert!(matches!(decode_values(bytes), Err(WireError::InvalidMagic)));
    }

    #[test]
    fn test_unsupported_version() {
        let bytes = b"MVAL\x99\x00\x00\x00\x00\x00\x00\x00";
        assert!(matches!(
            decode_values(bytes),
            Err(WireError::UnsupportedVersion(0x99))
        ));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            decode_values(b"MVAL"),
            Err(WireError::TooShort { .. })
        ));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut encoded = encode_values(&[Value::Long(Some(1))]).unwrap();
        encoded.push(0);
        assert!(matches!(
            decode_values(&encoded),
            Err(WireError::TrailingBytes { .. })
        ));
    }

    #[test]
    fn test_is_value_stream() {
        let encoded = encode_values(&[Value::Boolean(Some(true))]).unwrap();
        assert!(is_value_stream(&encoded));
        assert!(!is_value_stream(b"JSON"));
        assert!(!is_value_stream(b"MVAL")); // too short
    }
}
