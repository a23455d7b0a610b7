//! Binary value codec
//!
//! # Format
//!
//! Every value encodes as a kind tag byte (the stable `Kind` tag) followed
//! by a kind-specific payload:
//!
//! | Kind | Payload |
//! |------|---------|
//! | Null | none |
//! | Boolean | 1 byte: 0 null, 1 false, 2 true |
//! | Int / Long / Numeric / Date / Time / Timestamp | value-class byte + smallest-width big-endian two's complement |
//! | Float / Double | presence byte + 4/8-byte big-endian bit pattern |
//! | Complex | presence + 8-byte re + 8-byte im |
//! | ZonedTime / ZonedTimestamp | presence + 8-byte millis + 4-byte offset |
//! | Instant | presence + 8-byte seconds + 4-byte nanos |
//! | String / Binary | length-class byte + length prefix + bytes |
//! | Decimal | combinator byte + magnitude bytes + scale |
//! | List / Set | presence + u32 count + recursively tagged elements |
//! | Map | presence + u32 count + tagged key/value per entry |
//! | DenseVector | presence + u32 count + 8-byte elements |
//! | SparseVector | presence + u32 length + u32 nonzeros + index column + value column |
//!
//! **Length-class byte** (String/Binary): `0` NULL, `1` ZERO (no prefix),
//! `2`/`3`/`4` one/two/four-byte length prefix — the smallest that fits.
//!
//! **Value-class byte** (integer-like payloads): `0` NULL, `1` ZERO,
//! `2`/`3`/`4`/`5` one/two/four/eight-byte two's complement — the smallest
//! width that round-trips the value.
//!
//! **Decimal combinator byte**: `(magnitude-byte-length << 3) |
//! scale-length-class` — five bits of unscaled-magnitude byte length
//! (capped at 31), three bits selecting the scale width (`0` none/zero,
//! `1`/`2`/`3`/`4` one/two/four/eight bytes). `0xFF` (an otherwise
//! unreachable combination) marks the null Decimal. Magnitudes beyond 31
//! bytes fail to encode with [`WireError::Oversized`].

use crate::error::{Result, WireError};
use bigdecimal::BigDecimal;
use meridian_db_core::{DenseVector, Kind, SparseVectorBuilder, Value};
use num_bigint::BigInt;

// ============================================================================
// Encoding
// ============================================================================

/// Append the encoding of `value` to `buf`.
///
/// The only failure is a Decimal whose unscaled magnitude exceeds the
/// 31-byte format cap ([`WireError::Oversized`]).
pub fn encode_value(value: &Value, buf: &mut Vec<u8>) -> Result<()> {
    buf.push(value.kind().as_u8());
    match value {
        Value::Null => {}
        Value::Boolean(v) => buf.push(match v {
            None => 0,
            Some(false) => 1,
            Some(true) => 2,
        }),
        Value::Int(v) => write_class_int(v.map(|i| i as i64), buf),
        Value::Long(v) => write_class_int(*v, buf),
        Value::Numeric(v) => write_class_int(v.map(|n| n.scaled()), buf),
        Value::Date(v) => write_class_int(v.map(|d| d.millis()), buf),
        Value::Time(v) => write_class_int(v.map(|t| t.millis()), buf),
        Value::Timestamp(v) => write_class_int(v.map(|t| t.millis()), buf),
        Value::Float(v) => match v {
            None => buf.push(0),
            Some(f) => {
                buf.push(1);
                buf.extend_from_slice(&f.to_bits().to_be_bytes());
            }
        },
        Value::Double(v) => match v {
            None => buf.push(0),
            Some(f) => {
                buf.push(1);
                buf.extend_from_slice(&f.to_bits().to_be_bytes());
            }
        },
        Value::Complex(v) => match v {
            None => buf.push(0),
            Some(c) => {
                buf.push(1);
                buf.extend_from_slice(&c.re.to_bits().to_be_bytes());
                buf.extend_from_slice(&c.im.to_bits().to_be_bytes());
            }
        },
        Value::ZonedTime(v) => match v {
            None => buf.push(0),
            Some(t) => {
                buf.push(1);
                buf.extend_from_slice(&t.millis().to_be_bytes());
                buf.extend_from_slice(&t.offset_secs().to_be_bytes());
            }
        },
        Value::ZonedTimestamp(v) => match v {
            None => buf.push(0),
            Some(t) => {
                buf.push(1);
                buf.extend_from_slice(&t.millis().to_be_bytes());
                buf.extend_from_slice(&t.offset_secs().to_be_bytes());
            }
        },
        Value::Instant(v) => match v {
            None => buf.push(0),
            Some(i) => {
                buf.push(1);
                buf.extend_from_slice(&i.secs().to_be_bytes());
                buf.extend_from_slice(&i.nanos().to_be_bytes());
            }
        },
        Value::String(v) => write_len_prefixed(v.as_ref().map(|s| s.as_bytes()), buf),
        Value::Binary(v) => write_len_prefixed(v.as_deref(), buf),
        Value::Decimal(v) => write_decimal(v.as_deref(), buf)?,
        Value::List(items) | Value::Set(items) => {
            if items.is_empty() {
                buf.push(0);
            } else {
                buf.push(1);
                buf.extend_from_slice(&(items.len() as u32).to_be_bytes());
                for item in items {
                    encode_value(item, buf)?;
                }
            }
        }
        Value::Map(entries) => {
            if entries.is_empty() {
                buf.push(0);
            } else {
                buf.push(1);
                buf.extend_from_slice(&(entries.len() as u32).to_be_bytes());
                for (key, value) in entries {
                    encode_value(key, buf)?;
                    encode_value(value, buf)?;
                }
            }
        }
        Value::DenseVector(v) => {
            if v.is_empty() {
                buf.push(0);
            } else {
                buf.push(1);
                buf.extend_from_slice(&(v.len() as u32).to_be_bytes());
                for f in v.iter() {
                    buf.extend_from_slice(&f.to_bits().to_be_bytes());
                }
            }
        }
        Value::SparseVector(v) => {
            if v.is_empty() {
                buf.push(0);
            } else {
                buf.push(1);
                buf.extend_from_slice(&(v.len() as u32).to_be_bytes());
                buf.extend_from_slice(&(v.nonzero_count() as u32).to_be_bytes());
                // Columnar: the index array, then the value array
                for i in v.indices() {
                    buf.extend_from_slice(&i.to_be_bytes());
                }
                for f in v.values() {
                    buf.extend_from_slice(&f.to_bits().to_be_bytes());
                }
            }
        }
    }
    Ok(())
}

/// Encode into a fresh buffer.
pub fn encoded_value(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf)?;
    Ok(buf)
}

/// Value-class byte + smallest-width big-endian two's complement.
fn write_class_int(value: Option<i64>, buf: &mut Vec<u8>) {
    let Some(v) = value else {
        buf.push(0);
        return;
    };
    if v == 0 {
        buf.push(1);
    } else if let Ok(b) = i8::try_from(v) {
        buf.push(2);
        buf.extend_from_slice(&b.to_be_bytes());
    } else if let Ok(b) = i16::try_from(v) {
        buf.push(3);
        buf.extend_from_slice(&b.to_be_bytes());
    } else if let Ok(b) = i32::try_from(v) {
        buf.push(4);
        buf.extend_from_slice(&b.to_be_bytes());
    } else {
        buf.push(5);
        buf.extend_from_slice(&v.to_be_bytes());
    }
}

/// Length-class byte + smallest length prefix + raw bytes.
fn write_len_prefixed(bytes: Option<&[u8]>, buf: &mut Vec<u8>) {
    let Some(bytes) = bytes else {
        buf.push(0);
        return;
    };
    let len = bytes.len();
    if len == 0 {
        buf.push(1);
    } else if len <= u8::MAX as usize {
        buf.push(2);
        buf.push(len as u8);
    } else if len <= u16::MAX as usize {
        buf.push(3);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(4);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(bytes);
}

/// Null-decimal combinator marker (unreachable scale class 7).
const DECIMAL_NULL: u8 = 0xFF;

fn write_decimal(value: Option<&BigDecimal>, buf: &mut Vec<u8>) -> Result<()> {
    let Some(d) = value else {
        buf.push(DECIMAL_NULL);
        return Ok(());
    };
    let (unscaled, scale) = d.normalized().as_bigint_and_exponent();
    let magnitude = if unscaled == BigInt::from(0) {
        Vec::new()
    } else {
        unscaled.to_signed_bytes_be()
    };
    if magnitude.len() > 31 {
        return Err(WireError::Oversized(format!(
            "decimal magnitude of {} bytes exceeds the 31-byte format cap",
            magnitude.len()
        )));
    }
    let scale_class: u8 = if scale == 0 {
        0
    } else if i8::try_from(scale).is_ok() {
        1
    } else if i16::try_from(scale).is_ok() {
        2
    } else if i32::try_from(scale).is_ok() {
        3
    } else {
        4
    };
    buf.push(((magnitude.len() as u8) << 3) | scale_class);
    buf.extend_from_slice(&magnitude);
    match scale_class {
        0 => {}
        1 => buf.extend_from_slice(&(scale as i8).to_be_bytes()),
        2 => buf.extend_from_slice(&(scale as i16).to_be_bytes()),
        3 => buf.extend_from_slice(&(scale as i32).to_be_bytes()),
        _ => buf.extend_from_slice(&scale.to_be_bytes()),
    }
    Ok(())
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode one value from the front of `data`.
///
/// Returns the value and the number of bytes consumed; remaining bytes are
/// the caller's (streaming use).
pub fn decode_value(data: &[u8]) -> Result<(Value, usize)> {
    let mut pos = 0usize;
    let value = decode_at(data, &mut pos)?;
    Ok((value, pos))
}

/// Decode exactly one value; trailing bytes are an error.
pub fn decode_value_exact(data: &[u8]) -> Result<Value> {
    let (value, consumed) = decode_value(data)?;
    if consumed != data.len() {
        tracing::debug!(consumed, total = data.len(), "trailing bytes after value");
        return Err(WireError::TrailingBytes {
            consumed,
            total: data.len(),
        });
    }
    Ok(value)
}

fn decode_at(data: &[u8], pos: &mut usize) -> Result<Value> {
    let tag = read_u8(data, pos, "kind tag")?;
    let kind = Kind::from_u8(tag).ok_or(WireError::InvalidTag(tag))?;
    match kind {
        Kind::Null => Ok(Value::Null),
        Kind::Boolean => match read_u8(data, pos, "boolean")? {
            0 => Ok(Value::Boolean(None)),
            1 => Ok(Value::Boolean(Some(false))),
            2 => Ok(Value::Boolean(Some(true))),
            value => Err(WireError::InvalidClass {
                context: "boolean",
                value,
            }),
        },
        Kind::Int => {
            let raw = read_class_int(data, pos, "int")?;
            match raw {
                None => Ok(Value::Int(None)),
                Some(v) => {
                    let v = i32::try_from(v).map_err(|_| WireError::InvalidClass {
                        context: "int width",
                        value: 5,
                    })?;
                    Ok(Value::Int(Some(v)))
                }
            }
        }
        Kind::Long => Ok(Value::Long(read_class_int(data, pos, "long")?)),
        Kind::Numeric => Ok(Value::Numeric(
            read_class_int(data, pos, "numeric")?.map(meridian_db_core::Numeric::from_scaled),
        )),
        Kind::Date => Ok(Value::Date(
            read_class_int(data, pos, "date")?.map(meridian_db_core::Date::from_millis),
        )),
        Kind::Time => Ok(Value::Time(
            read_class_int(data, pos, "time")?.map(meridian_db_core::Time::from_millis),
        )),
        Kind::Timestamp => Ok(Value::Timestamp(
            read_class_int(data, pos, "timestamp")?.map(meridian_db_core::Timestamp::from_millis),
        )),
        Kind::Float => {
            if read_presence(data, pos, "float")? {
                let bits = read_u32(data, pos, "float bits")?;
                Ok(Value::Float(Some(f32::from_bits(bits))))
            } else {
                Ok(Value::Float(None))
            }
        }
        Kind::Double => {
            if read_presence(data, pos, "double")? {
                let bits = read_u64(data, pos, "double bits")?;
                Ok(Value::Double(Some(f64::from_bits(bits))))
            } else {
                Ok(Value::Double(None))
            }
        }
        Kind::Complex => {
            if read_presence(data, pos, "complex")? {
                let re = f64::from_bits(read_u64(data, pos, "complex re")?);
                let im = f64::from_bits(read_u64(data, pos, "complex im")?);
                Ok(Value::Complex(Some(meridian_db_core::Complex::new(re, im))))
            } else {
                Ok(Value::Complex(None))
            }
        }
        Kind::ZonedTime => {
            if read_presence(data, pos, "zonedtime")? {
                let millis = read_u64(data, pos, "zonedtime millis")? as i64;
                let offset = read_u32(data, pos, "zonedtime offset")? as i32;
                Ok(Value::ZonedTime(Some(meridian_db_core::ZonedTime::new(
                    millis, offset,
                ))))
            } else {
                Ok(Value::ZonedTime(None))
            }
        }
        Kind::ZonedTimestamp => {
            if read_presence(data, pos, "zonedtimestamp")? {
                let millis = read_u64(data, pos, "zonedtimestamp millis")? as i64;
                let offset = read_u32(data, pos, "zonedtimestamp offset")? as i32;
                Ok(Value::ZonedTimestamp(Some(
                    meridian_db_core::ZonedTimestamp::new(millis, offset),
                )))
            } else {
                Ok(Value::ZonedTimestamp(None))
            }
        }
        Kind::Instant => {
            if read_presence(data, pos, "instant")? {
                let secs = read_u64(data, pos, "instant secs")? as i64;
                let nanos = read_u32(data, pos, "instant nanos")?;
                Ok(Value::Instant(Some(meridian_db_core::Instant::new(
                    secs, nanos,
                ))))
            } else {
                Ok(Value::Instant(None))
            }
        }
        Kind::String => match read_len_prefixed(data, pos, "string")? {
            None => Ok(Value::String(None)),
            Some(bytes) => {
                let s = std::str::from_utf8(bytes).map_err(|_| WireError::InvalidUtf8(*pos))?;
                Ok(Value::String(Some(s.to_string())))
            }
        },
        Kind::Binary => Ok(Value::Binary(
            read_len_prefixed(data, pos, "binary")?.map(|b| b.to_vec()),
        )),
        Kind::Decimal => read_decimal(data, pos),
        Kind::List | Kind::Set => {
            if !read_presence(data, pos, "collection")? {
                return Ok(Value::null_of(kind));
            }
            let count = read_u32(data, pos, "collection count")? as usize;
            let mut items = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                items.push(decode_at(data, pos)?);
            }
            Ok(match kind {
                Kind::List => Value::List(items),
                _ => Value::Set(items),
            })
        }
        Kind::Map => {
            if !read_presence(data, pos, "map")? {
                return Ok(Value::Map(Vec::new()));
            }
            let count = read_u32(data, pos, "map count")? as usize;
            let mut entries = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                let key = decode_at(data, pos)?;
                let value = decode_at(data, pos)?;
                entries.push((key, value));
            }
            Ok(Value::Map(entries))
        }
        Kind::DenseVector => {
            if !read_presence(data, pos, "densevector")? {
                return Ok(Value::DenseVector(DenseVector::new(Vec::new())));
            }
            let count = read_u32(data, pos, "densevector count")? as usize;
            let mut values = Vec::with_capacity(count.min(65536));
            for _ in 0..count {
                values.push(f64::from_bits(read_u64(data, pos, "densevector element")?));
            }
            Ok(Value::DenseVector(DenseVector::new(values)))
        }
        Kind::SparseVector => {
            if !read_presence(data, pos, "sparsevector")? {
                return Ok(Value::null_of(Kind::SparseVector));
            }
            let length = read_u32(data, pos, "sparsevector length")?;
            let count = read_u32(data, pos, "sparsevector nonzeros")? as usize;
            let mut indices = Vec::with_capacity(count.min(65536));
            for _ in 0..count {
                indices.push(read_u32(data, pos, "sparsevector index")?);
            }
            let mut builder = SparseVectorBuilder::new(length);
            for index in indices {
                let value = f64::from_bits(read_u64(data, pos, "sparsevector value")?);
                builder.push(index, value);
            }
            Ok(Value::SparseVector(builder.finish()))
        }
    }
}

fn read_decimal(data: &[u8], pos: &mut usize) -> Result<Value> {
    let combinator = read_u8(data, pos, "decimal combinator")?;
    if combinator == DECIMAL_NULL {
        return Ok(Value::Decimal(None));
    }
    let mag_len = (combinator >> 3) as usize;
    let scale_class = combinator & 0b111;
    let magnitude = read_exact(data, pos, mag_len, "decimal magnitude")?;
    let unscaled = if magnitude.is_empty() {
        BigInt::from(0)
    } else {
        BigInt::from_signed_bytes_be(magnitude)
    };
    let scale: i64 = match scale_class {
        0 => 0,
        1 => i8::from_be_bytes([read_u8(data, pos, "decimal scale")?]) as i64,
        2 => {
            let b = read_exact(data, pos, 2, "decimal scale")?;
            i16::from_be_bytes([b[0], b[1]]) as i64
        }
        3 => read_u32(data, pos, "decimal scale")? as i32 as i64,
        4 => read_u64(data, pos, "decimal scale")? as i64,
        value => {
            return Err(WireError::InvalidClass {
                context: "decimal scale",
                value,
            })
        }
    };
    Ok(Value::Decimal(Some(Box::new(BigDecimal::new(
        unscaled, scale,
    )))))
}

// ---- Binary helpers ----

#[inline]
fn ensure_len(
    data: &[u8],
    pos: usize,
    need: usize,
    context: &'static str,
) -> Result<()> {
    if pos + need > data.len() {
        Err(WireError::TooShort {
            context,
            offset: pos,
            needed: need,
            available: data.len().saturating_sub(pos),
        })
    } else {
        Ok(())
    }
}

#[inline]
fn read_u8(data: &[u8], pos: &mut usize, context: &'static str) -> Result<u8> {
    ensure_len(data, *pos, 1, context)?;
    let v = data[*pos];
    *pos += 1;
    Ok(v)
}

#[inline]
fn read_u32(data: &[u8], pos: &mut usize, context: &'static str) -> Result<u32> {
    ensure_len(data, *pos, 4, context)?;
    let v = u32::from_be_bytes(data[*pos..*pos + 4].try_into().expect("length checked"));
    *pos += 4;
    Ok(v)
}

#[inline]
fn read_u64(data: &[u8], pos: &mut usize, context: &'static str) -> Result<u64> {
    ensure_len(data, *pos, 8, context)?;
    let v = u64::from_be_bytes(data[*pos..*pos + 8].try_into().expect("length checked"));
    *pos += 8;
    Ok(v)
}

#[inline]
fn read_exact<'a>(
    data: &'a [u8],
    pos: &mut usize,
    len: usize,
    context: &'static str,
) -> Result<&'a [u8]> {
    ensure_len(data, *pos, len, context)?;
    let slice = &data[*pos..*pos + len];
    *pos += len;
    Ok(slice)
}

fn read_presence(data: &[u8], pos: &mut usize, context: &'static str) -> Result<bool> {
    match read_u8(data, pos, context)? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(WireError::InvalidClass { context, value }),
    }
}

/// Value-class byte + payload at the selected width.
fn read_class_int(
    data: &[u8],
    pos: &mut usize,
    context: &'static str,
) -> Result<Option<i64>> {
    match read_u8(data, pos, context)? {
        0 => Ok(None),
        1 => Ok(Some(0)),
        2 => Ok(Some(i8::from_be_bytes([read_u8(data, pos, context)?]) as i64)),
        3 => {
            let b = read_exact(data, pos, 2, context)?;
            Ok(Some(i16::from_be_bytes([b[0], b[1]]) as i64))
        }
        4 => Ok(Some(read_u32(data, pos, context)? as i32 as i64)),
        5 => Ok(Some(read_u64(data, pos, context)? as i64)),
        value => Err(WireError::InvalidClass { context, value }),
    }
}

/// Length-class byte + prefix + payload slice.
fn read_len_prefixed<'a>(
    data: &'a [u8],
    pos: &mut usize,
    context: &'static str,
) -> Result<Option<&'a [u8]>> {
    let len = match read_u8(data, pos, context)? {
        0 => return Ok(None),
        1 => 0usize,
        2 => read_u8(data, pos, context)? as usize,
        3 => {
            let b = read_exact(data, pos, 2, context)?;
            u16::from_be_bytes([b[0], b[1]]) as usize
        }
        4 => read_u32(data, pos, context)? as usize,
        value => return Err(WireError::InvalidClass { context, value }),
    };
    Ok(Some(read_exact(data, pos, len, context)?))
}
