//! Conversion matrix: coerce any value into any target kind
//!
//! This module is the authoritative coercion logic — the single source of
//! truth consumed by the native getters, the predicate layer and ingest.
//!
//! ## General rules
//!
//! 1. **Null absorption**: a null input of any kind (including empty
//!    compounds) converts to the null of the target kind. Never an error.
//! 2. **Numeric family ↔ numeric family**: direct value transfer with the
//!    target's native truncation/rounding. To-integer truncates toward
//!    zero; to-Numeric rounds half away from zero at six decimals;
//!    temporal targets read the number as epoch milliseconds.
//! 3. **Any present value → String**: canonical formatting.
//! 4. **Text → scalar**: parse. Blank text converts to null; malformed
//!    non-blank text fails — except the best-effort Complex and Numeric
//!    literal parsers, which yield null.
//! 5. **Binary → Int/Long/Float/Double**: big-endian bit reinterpretation.
//!    Short payloads are left-zero-padded; the empty payload is null; a
//!    nonzero payload below the minimum float/double width fails with
//!    `InsufficientBytes`. For other scalar targets a UTF-8 payload is
//!    parsed as text.
//! 6. **Compound → scalar** (other than String): refused with
//!    `StructuralConversion`. **Scalar → compound** wraps the scalar as the
//!    sole element (Map: under the positional key `Long(0)`).
//! 7. **Compound ↔ compound**: reshape. Sparse→Dense expands zeros;
//!    Dense/List/Set→Sparse drops zeros; a compound whose elements are all
//!    null converts to the null vector; Map→anything enumerates values in
//!    insertion order, discarding keys.

use crate::compare::{family_repr, Repr};
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::numeric::Numeric;
use crate::temporal::{Date, Instant, Time, Timestamp, ZonedTime, ZonedTimestamp};
use crate::value::Value;
use crate::vector::{DenseVector, SparseVectorBuilder};
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Convert `value` into the target kind.
pub fn convert(value: &Value, target: Kind) -> Result<Value> {
    // Null absorption: null in, null of the target out
    if value.is_null() {
        return Ok(Value::null_of(target));
    }

    // Identity
    if value.kind() == target {
        return Ok(value.clone());
    }

    // Compound sources only reach String and compound targets
    if value.is_compound() && !target.is_compound() && target != Kind::String {
        return Err(Error::structural(value.kind(), target));
    }

    match target {
        Kind::Null => Ok(Value::Null),
        Kind::String => Ok(Value::String(Some(value.to_string()))),
        Kind::Boolean => to_boolean(value),
        Kind::Int | Kind::Long | Kind::Float | Kind::Double | Kind::Numeric | Kind::Decimal => {
            to_numeric_kind(value, target)
        }
        Kind::Complex => to_complex(value),
        Kind::Date | Kind::Time | Kind::Timestamp | Kind::ZonedTime | Kind::ZonedTimestamp
        | Kind::Instant => to_temporal(value, target),
        Kind::Binary => to_binary(value),
        Kind::List | Kind::Set | Kind::Map | Kind::DenseVector | Kind::SparseVector => {
            to_compound(value, target)
        }
    }
}

/// Coerce a JSON scalar (or array of numbers) into the target kind.
///
/// This is the ingest-side entry point: JSON values arrive untyped and the
/// caller supplies the schema's target kind. Collection literals other than
/// numeric arrays stay with the literal-parsing collaborators.
pub fn convert_json(json: &serde_json::Value, target: Kind) -> Result<Value> {
    match json {
        serde_json::Value::Null => Ok(Value::null_of(target)),
        serde_json::Value::Bool(b) => convert(&Value::Boolean(Some(*b)), target),
        serde_json::Value::Number(n) => {
            let value = if let Some(i) = n.as_i64() {
                Value::Long(Some(i))
            } else if let Some(f) = n.as_f64() {
                Value::Double(Some(f))
            } else {
                return Err(Error::conversion(format!("Unsupported number: {}", n)));
            };
            convert(&value, target)
        }
        serde_json::Value::String(s) => convert(&Value::String(Some(s.clone())), target),
        serde_json::Value::Array(items) if target.is_compound() => {
            let mut elements = Vec::with_capacity(items.len());
            for item in items {
                elements.push(json_scalar(item)?);
            }
            convert(&Value::List(elements), target)
        }
        serde_json::Value::Array(_) => Err(Error::conversion(format!(
            "Arrays are only supported for compound targets, not {}",
            target
        ))),
        serde_json::Value::Object(_) => Err(Error::conversion(format!(
            "Objects cannot be coerced to {}",
            target
        ))),
    }
}

/// Natural value of a JSON scalar (array elements).
fn json_scalar(json: &serde_json::Value) -> Result<Value> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(Some(*b))),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Long(Some(i)))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Double(Some(f)))
            } else {
                Err(Error::conversion(format!("Unsupported number: {}", n)))
            }
        }
        serde_json::Value::String(s) => Ok(Value::String(Some(s.clone()))),
        nested => Err(Error::conversion(format!(
            "Array elements must be scalars, got: {}",
            nested
        ))),
    }
}

// ============================================================================
// Scalar targets
// ============================================================================

/// The UTF-8 text of a String or Binary operand, for parse-based targets.
fn utf8_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(Some(s)) => Some(s),
        Value::Binary(Some(b)) => std::str::from_utf8(b).ok(),
        _ => None,
    }
}

fn to_boolean(value: &Value) -> Result<Value> {
    if let Some(s) = utf8_text(value) {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Value::Boolean(None));
        }
        return match s {
            "true" | "1" => Ok(Value::Boolean(Some(true))),
            "false" | "0" => Ok(Value::Boolean(Some(false))),
            _ => Err(Error::parse(
                s,
                Kind::Boolean,
                "expected 'true', 'false', '1', or '0'",
            )),
        };
    }
    if value.is_temporal() || value.kind() == Kind::Complex {
        return Err(Error::incompatible(value.kind(), Kind::Boolean));
    }
    match family_repr(value) {
        Some(Repr::Exact(i)) => Ok(Value::Boolean(Some(i != 0))),
        Some(Repr::Approx(f)) => Ok(Value::Boolean(Some(f != 0.0))),
        Some(Repr::Big(d)) => Ok(Value::Boolean(Some(!is_zero(&d)))),
        None => Err(Error::incompatible(value.kind(), Kind::Boolean)),
    }
}

fn is_zero(d: &BigDecimal) -> bool {
    use num_traits::Zero;
    d.is_zero()
}

fn to_complex(value: &Value) -> Result<Value> {
    if let Some(s) = utf8_text(value) {
        // Best-effort literal parser: malformed input yields null
        return Ok(crate::value::parse_complex_text(s));
    }
    match family_repr(value) {
        Some(repr) => Ok(Value::Complex(Some(crate::complex::Complex::from_real(
            repr_f64(&repr),
        )))),
        None => Err(Error::incompatible(value.kind(), Kind::Complex)),
    }
}

fn repr_f64(repr: &Repr) -> f64 {
    match repr {
        Repr::Exact(i) => *i as f64,
        Repr::Approx(f) => *f,
        Repr::Big(d) => d.to_f64().unwrap_or(f64::NAN),
    }
}

/// Conversions into the strict numeric kinds.
fn to_numeric_kind(value: &Value, target: Kind) -> Result<Value> {
    // Binary reinterpretation (Int/Long/Float/Double only)
    if let Value::Binary(Some(bytes)) = value {
        match target {
            Kind::Int | Kind::Long | Kind::Float | Kind::Double => {
                return binary_reinterpret(bytes, target);
            }
            _ => {
                // Numeric/Decimal read a UTF-8 payload as text
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::incompatible(Kind::Binary, target))?;
                return text_to_numeric_kind(s, target);
            }
        }
    }

    if let Some(s) = utf8_text(value) {
        return text_to_numeric_kind(s, target);
    }

    // Complex carries into the numeric kinds only when purely real
    if let Value::Complex(Some(c)) = value {
        if c.im != 0.0 {
            return Err(Error::conversion(format!(
                "Cannot convert complex {} with nonzero imaginary part to {}",
                c, target
            )));
        }
        return repr_to_numeric_kind(Repr::Approx(c.re), target);
    }

    match family_repr(value) {
        Some(repr) => repr_to_numeric_kind(repr, target),
        None => Err(Error::incompatible(value.kind(), target)),
    }
}

fn text_to_numeric_kind(s: &str, target: Kind) -> Result<Value> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Value::null_of(target));
    }
    match target {
        // Best-effort contract: malformed text yields the null Numeric
        Kind::Numeric => Ok(crate::value::parse_numeric_text(trimmed)),
        Kind::Decimal => crate::value::parse_decimal_text(trimmed),
        Kind::Double | Kind::Float => {
            let parsed = crate::value::parse_double_text(trimmed)?;
            if target == Kind::Float {
                return repr_to_numeric_kind(
                    Repr::Approx(match parsed {
                        Value::Double(Some(f)) => f,
                        _ => unreachable!("non-blank parse yields a payload"),
                    }),
                    Kind::Float,
                );
            }
            Ok(parsed)
        }
        Kind::Int | Kind::Long => {
            // Fast path: integer literal; fall back through f64 so "5.0"
            // and exponent forms take the numeric truncation rule
            if let Ok(i) = trimmed.parse::<i64>() {
                return repr_to_numeric_kind(Repr::Exact(i as i128), target);
            }
            let f: f64 = trimmed
                .parse()
                .map_err(|e: std::num::ParseFloatError| Error::parse(trimmed, target, e.to_string()))?;
            repr_to_numeric_kind(Repr::Approx(f), target)
        }
        _ => unreachable!("not a strict numeric target"),
    }
}

fn repr_to_numeric_kind(repr: Repr, target: Kind) -> Result<Value> {
    match target {
        Kind::Int => Ok(Value::Int(Some(repr_to_integer(repr, target, i32::MIN as i128, i32::MAX as i128)? as i32))),
        Kind::Long => Ok(Value::Long(Some(repr_to_integer(repr, target, i64::MIN as i128, i64::MAX as i128)? as i64))),
        Kind::Float => Ok(Value::Float(Some(repr_f64(&repr) as f32))),
        Kind::Double => Ok(Value::Double(Some(repr_f64(&repr)))),
        Kind::Numeric => match repr {
            Repr::Exact(i) => {
                let scaled = i
                    .checked_mul(crate::numeric::SCALE as i128)
                    .filter(|s| i64::try_from(*s).is_ok())
                    .ok_or_else(|| out_of_range(i, Kind::Numeric))?;
                Ok(Value::Numeric(Some(Numeric::from_scaled(scaled as i64))))
            }
            Repr::Approx(f) => {
                if !f.is_finite() {
                    return Err(Error::conversion(format!(
                        "Cannot convert non-finite {} to numeric",
                        f
                    )));
                }
                Ok(Value::Numeric(Some(Numeric::from_f64(f))))
            }
            Repr::Big(d) => {
                let scaled = (d * BigDecimal::from(crate::numeric::SCALE))
                    .with_scale_round(0, RoundingMode::HalfUp);
                let scaled = scaled
                    .to_i64()
                    .ok_or_else(|| Error::conversion("Decimal out of range for numeric"))?;
                Ok(Value::Numeric(Some(Numeric::from_scaled(scaled))))
            }
        },
        Kind::Decimal => match repr {
            Repr::Exact(i) => Ok(Value::Decimal(Some(Box::new(BigDecimal::from(
                BigInt::from(i),
            ))))),
            Repr::Approx(f) => BigDecimal::try_from(f)
                .map(|d| Value::Decimal(Some(Box::new(d))))
                .map_err(|_| {
                    Error::conversion(format!("Cannot convert non-finite {} to decimal", f))
                }),
            Repr::Big(d) => Ok(Value::Decimal(Some(Box::new(d)))),
        },
        _ => unreachable!("not a strict numeric target"),
    }
}

/// Reduce to an integer, truncating toward zero, with a range check.
fn repr_to_integer(repr: Repr, target: Kind, min: i128, max: i128) -> Result<i128> {
    let i = match repr {
        Repr::Exact(i) => i,
        Repr::Approx(f) => {
            if !f.is_finite() {
                return Err(Error::conversion(format!(
                    "Cannot convert non-finite {} to {}",
                    f, target
                )));
            }
            f.trunc() as i128
        }
        Repr::Big(d) => d
            .with_scale_round(0, RoundingMode::Down)
            .to_i128()
            .ok_or_else(|| Error::conversion(format!("Decimal out of range for {}", target)))?,
    };
    if i < min || i > max {
        return Err(out_of_range(i, target));
    }
    Ok(i)
}

fn out_of_range(value: impl std::fmt::Display, target: Kind) -> Error {
    Error::conversion(format!("Value {} is out of range for {}", value, target))
}

/// Big-endian reinterpretation of a byte payload as a fixed-width numeric.
///
/// Shorter payloads left-zero-pad (not sign-extend); the empty payload is
/// the null of the target; a nonzero payload below the float/double width
/// fails with `InsufficientBytes`; a payload wider than the target fails.
fn binary_reinterpret(bytes: &[u8], target: Kind) -> Result<Value> {
    if bytes.is_empty() {
        return Ok(Value::null_of(target));
    }
    let width = match target {
        Kind::Int | Kind::Float => 4,
        Kind::Long | Kind::Double => 8,
        _ => unreachable!("not a fixed-width target"),
    };
    if bytes.len() > width {
        return Err(Error::conversion(format!(
            "Binary payload of {} bytes is too wide for {}",
            bytes.len(),
            target
        )));
    }
    // Floats need the full width; integers adapt to the available count
    if matches!(target, Kind::Float | Kind::Double) && bytes.len() < width {
        return Err(Error::insufficient_bytes(target, width, bytes.len()));
    }
    let mut buf = [0u8; 8];
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    let raw = u64::from_be_bytes(buf);
    Ok(match target {
        Kind::Int => Value::Int(Some(raw as u32 as i32)),
        Kind::Long => Value::Long(Some(raw as i64)),
        Kind::Float => Value::Float(Some(f32::from_bits(raw as u32))),
        Kind::Double => Value::Double(Some(f64::from_bits(raw))),
        _ => unreachable!(),
    })
}

fn to_temporal(value: &Value, target: Kind) -> Result<Value> {
    if let Some(s) = utf8_text(value) {
        return text_to_temporal(s, target);
    }
    if matches!(value.kind(), Kind::Complex | Kind::Binary | Kind::Boolean) {
        // Binary reinterpretation is a fixed-width-numeric contract only (a
        // non-UTF-8 payload has no temporal reading), and booleans have no
        // instant
        return Err(Error::incompatible(value.kind(), target));
    }

    // Preserve the source offset when both sides are zone-aware
    let offset = match value {
        Value::ZonedTime(Some(t)) => t.offset_secs(),
        Value::ZonedTimestamp(Some(t)) => t.offset_secs(),
        _ => 0,
    };

    let millis = match family_repr(value) {
        Some(Repr::Exact(i)) => i64::try_from(i).map_err(|_| out_of_range(i, target))?,
        Some(Repr::Approx(f)) => {
            if !f.is_finite() {
                return Err(Error::conversion(format!(
                    "Cannot convert non-finite {} to {}",
                    f, target
                )));
            }
            f.trunc() as i64
        }
        Some(Repr::Big(d)) => d
            .with_scale_round(0, RoundingMode::Down)
            .to_i64()
            .ok_or_else(|| Error::conversion(format!("Decimal out of range for {}", target)))?,
        None => return Err(Error::incompatible(value.kind(), target)),
    };

    Ok(temporal_from_millis(millis, offset, target))
}

fn temporal_from_millis(millis: i64, offset_secs: i32, target: Kind) -> Value {
    match target {
        Kind::Date => Value::Date(Some(Date::from_millis(millis))),
        Kind::Time => Value::Time(Some(Time::from_millis(millis))),
        Kind::Timestamp => Value::Timestamp(Some(Timestamp::from_millis(millis))),
        Kind::ZonedTime => Value::ZonedTime(Some(ZonedTime::new(millis, offset_secs))),
        Kind::ZonedTimestamp => Value::ZonedTimestamp(Some(ZonedTimestamp::new(millis, offset_secs))),
        Kind::Instant => Value::Instant(Some(Instant::from_millis(millis))),
        _ => unreachable!("not a temporal target"),
    }
}

fn text_to_temporal(s: &str, target: Kind) -> Result<Value> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Value::null_of(target));
    }
    Ok(match target {
        Kind::Date => Value::Date(Date::parse(s)?),
        Kind::Time => Value::Time(Time::parse(s)?),
        Kind::Timestamp => Value::Timestamp(Timestamp::parse(s)?),
        Kind::ZonedTime => Value::ZonedTime(ZonedTime::parse(s)?),
        Kind::ZonedTimestamp => Value::ZonedTimestamp(ZonedTimestamp::parse(s)?),
        Kind::Instant => Value::Instant(Instant::parse(s)?),
        _ => unreachable!("not a temporal target"),
    })
}

fn to_binary(value: &Value) -> Result<Value> {
    match value {
        Value::String(Some(s)) => Ok(Value::Binary(Some(s.as_bytes().to_vec()))),
        Value::Int(Some(i)) => Ok(Value::Binary(Some(i.to_be_bytes().to_vec()))),
        Value::Long(Some(l)) => Ok(Value::Binary(Some(l.to_be_bytes().to_vec()))),
        Value::Float(Some(f)) => Ok(Value::Binary(Some(f.to_bits().to_be_bytes().to_vec()))),
        Value::Double(Some(f)) => Ok(Value::Binary(Some(f.to_bits().to_be_bytes().to_vec()))),
        other => Err(Error::incompatible(other.kind(), Kind::Binary)),
    }
}

// ============================================================================
// Compound targets
// ============================================================================

fn to_compound(value: &Value, target: Kind) -> Result<Value> {
    if !value.is_compound() {
        return wrap_scalar(value, target);
    }

    match target {
        Kind::List => Ok(Value::List(compound_values(value))),
        Kind::Set => Ok(Value::set_from(compound_values(value))),
        Kind::Map => {
            // Positional keys; an existing map hits the identity path first
            let entries = compound_values(value)
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Value::Long(Some(i as i64)), v))
                .collect();
            Ok(Value::Map(entries))
        }
        Kind::DenseVector => {
            if let Value::SparseVector(sv) = value {
                return Ok(Value::DenseVector(sv.to_dense()));
            }
            let (doubles, all_null) = compound_doubles(value)?;
            if all_null {
                return Ok(Value::null_of(Kind::DenseVector));
            }
            Ok(Value::DenseVector(DenseVector::new(doubles)))
        }
        Kind::SparseVector => {
            if let Value::DenseVector(dv) = value {
                return Ok(Value::SparseVector(dv.to_sparse()));
            }
            let (doubles, all_null) = compound_doubles(value)?;
            if all_null {
                return Ok(Value::null_of(Kind::SparseVector));
            }
            let mut builder = SparseVectorBuilder::new(doubles.len() as u32);
            for (i, d) in doubles.iter().enumerate() {
                builder.push(i as u32, *d);
            }
            Ok(Value::SparseVector(builder.finish()))
        }
        _ => unreachable!("not a compound target"),
    }
}

/// Wrap a present scalar as the sole element of the target compound.
fn wrap_scalar(value: &Value, target: Kind) -> Result<Value> {
    match target {
        Kind::List => Ok(Value::List(vec![value.clone()])),
        Kind::Set => Ok(Value::Set(vec![value.clone()])),
        Kind::Map => Ok(Value::Map(vec![(Value::Long(Some(0)), value.clone())])),
        Kind::DenseVector => {
            let d = require_double(value, target)?;
            Ok(Value::DenseVector(DenseVector::new(vec![d])))
        }
        Kind::SparseVector => {
            let d = require_double(value, target)?;
            let mut builder = SparseVectorBuilder::new(1);
            builder.push(0, d);
            Ok(Value::SparseVector(builder.finish()))
        }
        _ => unreachable!("not a compound target"),
    }
}

fn require_double(value: &Value, target: Kind) -> Result<f64> {
    match convert(value, Kind::Double)? {
        Value::Double(Some(d)) => Ok(d),
        // Blank text reduces to null, which contributes nothing numeric
        _ => Err(Error::incompatible(value.kind(), target)),
    }
}

/// The element sequence of a compound, discarding map keys.
fn compound_values(value: &Value) -> Vec<Value> {
    value.iter_elements().collect()
}

/// Convert every element to a double for the vector targets.
///
/// Null elements contribute 0.0; if all elements are null the caller
/// converts the whole value to the null vector.
fn compound_doubles(value: &Value) -> Result<(Vec<f64>, bool)> {
    let mut out = Vec::with_capacity(value.element_count());
    let mut all_null = true;
    for element in value.iter_elements() {
        if element.is_null() {
            out.push(0.0);
            continue;
        }
        all_null = false;
        out.push(require_double(&element, Kind::DenseVector)?);
    }
    Ok((out, all_null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ALL_KINDS;

    #[test]
    fn test_convert_json() {
        assert_eq!(
            convert_json(&serde_json::json!(42), Kind::Int).unwrap(),
            Value::Int(Some(42))
        );
        assert_eq!(
            convert_json(&serde_json::json!("2024-01-15"), Kind::Date).unwrap(),
            Value::Date(Some(crate::temporal::Date::from_ymd(2024, 1, 15).unwrap()))
        );
        assert!(convert_json(&serde_json::json!(null), Kind::Long)
            .unwrap()
            .is_null());
        let dense = convert_json(&serde_json::json!([1.0, 0.0, 2.5]), Kind::DenseVector).unwrap();
        assert_eq!(
            dense.as_dense_vector().unwrap().as_slice(),
            &[1.0, 0.0, 2.5]
        );
        assert!(convert_json(&serde_json::json!([1, 2]), Kind::Int).is_err());
        assert!(convert_json(&serde_json::json!({"k": 1}), Kind::Map).is_err());
    }

    #[test]
    fn test_null_absorption_full_matrix() {
        for from in ALL_KINDS {
            let null_in = Value::null_of(from);
            for to in ALL_KINDS {
                let out = convert(&null_in, to).unwrap();
                assert!(out.is_null(), "convert(null {}, {}) must be null", from, to);
                assert_eq!(out.kind(), to);
            }
        }
    }

    #[test]
    fn test_numeric_transfer_and_truncation() {
        assert_eq!(
            convert(&Value::Double(Some(2.9)), Kind::Int).unwrap(),
            Value::Int(Some(2))
        );
        assert_eq!(
            convert(&Value::Double(Some(-2.9)), Kind::Int).unwrap(),
            Value::Int(Some(-2))
        );
        assert_eq!(
            convert(&Value::Long(Some(7)), Kind::Double).unwrap(),
            Value::Double(Some(7.0))
        );
        assert_eq!(
            convert(&Value::Double(Some(1.2345675)), Kind::Numeric).unwrap(),
            Value::Numeric(Some(Numeric::from_scaled(1_234_568)))
        );
        // Decimal rounds half away from zero into Numeric
        let d = Value::Decimal(Some(Box::new("1.2345675".parse::<BigDecimal>().unwrap())));
        assert_eq!(
            convert(&d, Kind::Numeric).unwrap(),
            Value::Numeric(Some(Numeric::from_scaled(1_234_568)))
        );
    }

    #[test]
    fn test_numeric_range_checks() {
        assert!(convert(&Value::Long(Some(i64::MAX)), Kind::Int).is_err());
        assert!(convert(&Value::Double(Some(1e300)), Kind::Long).is_err());
        assert!(convert(&Value::Double(Some(f64::NAN)), Kind::Long).is_err());
        assert!(convert(&Value::Double(Some(f64::INFINITY)), Kind::Decimal).is_err());
    }

    #[test]
    fn test_text_parsing() {
        assert_eq!(
            convert(&Value::from("42"), Kind::Int).unwrap(),
            Value::Int(Some(42))
        );
        assert_eq!(
            convert(&Value::from("5.9"), Kind::Int).unwrap(),
            Value::Int(Some(5))
        );
        assert_eq!(
            convert(&Value::from("  "), Kind::Long).unwrap(),
            Value::Long(None)
        );
        assert!(convert(&Value::from("abc"), Kind::Long).is_err());
        // Best-effort targets yield null instead
        assert_eq!(
            convert(&Value::from("abc"), Kind::Numeric).unwrap(),
            Value::Numeric(None)
        );
        assert_eq!(
            convert(&Value::from("junk"), Kind::Complex).unwrap(),
            Value::Complex(None)
        );
        assert_eq!(
            convert(&Value::from("true"), Kind::Boolean).unwrap(),
            Value::Boolean(Some(true))
        );
        assert!(convert(&Value::from("yes"), Kind::Boolean).is_err());
    }

    #[test]
    fn test_binary_reinterpretation() {
        // Full width
        assert_eq!(
            convert(&Value::Binary(Some(vec![0, 0, 0, 5])), Kind::Int).unwrap(),
            Value::Int(Some(5))
        );
        // Left-zero-pad, not sign-extend
        assert_eq!(
            convert(&Value::Binary(Some(vec![0x05])), Kind::Int).unwrap(),
            Value::Int(Some(5))
        );
        assert_eq!(
            convert(&Value::Binary(Some(vec![0xFF])), Kind::Int).unwrap(),
            Value::Int(Some(255))
        );
        // Empty payload is null
        assert_eq!(
            convert(&Value::Binary(Some(vec![])), Kind::Double).unwrap(),
            Value::Double(None)
        );
        // Short nonzero payload for a float target fails
        let err = convert(&Value::Binary(Some(vec![0, 0])), Kind::Double).unwrap_err();
        assert!(matches!(err, Error::InsufficientBytes { needed: 8, actual: 2, .. }));
        // Round-trip through the fixed-width encoding
        let double = Value::Double(Some(-2.5));
        let bytes = convert(&double, Kind::Binary).unwrap();
        assert_eq!(convert(&bytes, Kind::Double).unwrap(), double);
        // Too-wide payloads are rejected
        assert!(convert(&Value::Binary(Some(vec![0; 5])), Kind::Int).is_err());
    }

    #[test]
    fn test_structural_errors() {
        let list = Value::list_from(vec![1i64]);
        for target in [Kind::Int, Kind::Double, Kind::Boolean, Kind::Timestamp] {
            let err = convert(&list, target).unwrap_err();
            assert!(
                matches!(err, Error::StructuralConversion { .. }),
                "List -> {} must refuse structurally",
                target
            );
        }
        // ...but compound -> String is the canonical literal
        assert_eq!(
            convert(&list, Kind::String).unwrap(),
            Value::String(Some("[1]".to_string()))
        );
    }

    #[test]
    fn test_scalar_wrapping() {
        assert_eq!(
            convert(&Value::Long(Some(5)), Kind::List).unwrap(),
            Value::List(vec![Value::Long(Some(5))])
        );
        assert_eq!(
            convert(&Value::Long(Some(5)), Kind::Map).unwrap(),
            Value::Map(vec![(Value::Long(Some(0)), Value::Long(Some(5)))])
        );
        let dense = convert(&Value::Long(Some(5)), Kind::DenseVector).unwrap();
        assert_eq!(dense.as_dense_vector().unwrap().as_slice(), &[5.0]);
        assert!(convert(&Value::from("abc"), Kind::DenseVector).is_err());
    }

    #[test]
    fn test_compound_reshapes() {
        // Sparse -> Dense expands zeros (scenario pin)
        let mut b = SparseVectorBuilder::new(5);
        b.push(1, 3.0);
        b.push(3, -2.0);
        let sv = Value::SparseVector(b.finish());
        let dense = convert(&sv, Kind::DenseVector).unwrap();
        assert_eq!(
            dense.as_dense_vector().unwrap().as_slice(),
            &[0.0, 3.0, 0.0, -2.0, 0.0]
        );
        // ...and back reproduces the runs
        let back = convert(&dense, Kind::SparseVector).unwrap();
        let back = back.as_sparse_vector().unwrap();
        assert_eq!(back.indices(), &[1, 3]);
        assert_eq!(back.values(), &[3.0, -2.0]);

        // List -> Set dedups, Map -> List discards keys
        let list = Value::list_from(vec![1i64, 1, 2]);
        let set = convert(&list, Kind::Set).unwrap();
        assert_eq!(set.as_set().unwrap().len(), 2);
        let map = Value::map_from(vec![
            (Value::from("a"), Value::Long(Some(1))),
            (Value::from("b"), Value::Long(Some(2))),
        ]);
        let from_map = convert(&map, Kind::List).unwrap();
        assert_eq!(
            from_map.as_list().unwrap(),
            &[Value::Long(Some(1)), Value::Long(Some(2))]
        );

        // List -> Map gains positional keys
        let to_map = convert(&Value::list_from(vec![9i64]), Kind::Map).unwrap();
        assert_eq!(
            to_map.as_map().unwrap(),
            &[(Value::Long(Some(0)), Value::Long(Some(9)))]
        );
    }

    #[test]
    fn test_all_null_elements_produce_null_vector() {
        let list = Value::List(vec![Value::Long(None), Value::Null]);
        let sv = convert(&list, Kind::SparseVector).unwrap();
        assert!(sv.is_null());
        let dv = convert(&list, Kind::DenseVector).unwrap();
        assert!(dv.is_null());
        // Mixed null/non-null: nulls contribute zeros
        let mixed = Value::List(vec![Value::Long(None), Value::Long(Some(2))]);
        let sv = convert(&mixed, Kind::SparseVector).unwrap();
        let sv = sv.as_sparse_vector().unwrap();
        assert_eq!(sv.len(), 2);
        assert_eq!(sv.indices(), &[1]);
    }

    #[test]
    fn test_temporal_conversions() {
        let ts = Value::Timestamp(Some(Timestamp::parse("2024-01-15T10:30:00Z").unwrap().unwrap()));
        // Timestamp -> Date truncates to midnight
        let date = convert(&ts, Kind::Date).unwrap();
        assert_eq!(
            date,
            Value::Date(Some(Date::parse("2024-01-15").unwrap().unwrap()))
        );
        // Timestamp -> Time keeps the time of day
        let time = convert(&ts, Kind::Time).unwrap();
        assert_eq!(
            time,
            Value::Time(Some(Time::parse("10:30:00").unwrap().unwrap()))
        );
        // Number -> Timestamp reads epoch millis
        assert_eq!(
            convert(&Value::Long(Some(0)), Kind::Timestamp).unwrap(),
            Value::Timestamp(Some(Timestamp::from_millis(0)))
        );
        // Zone-aware source keeps its offset
        let zts = Value::ZonedTimestamp(Some(
            ZonedTimestamp::parse("2024-01-15T05:30:00-05:00").unwrap().unwrap(),
        ));
        let zt = convert(&zts, Kind::ZonedTime).unwrap();
        match zt {
            Value::ZonedTime(Some(t)) => assert_eq!(t.offset_secs(), -5 * 3600),
            other => panic!("expected ZonedTime, got {:?}", other),
        }
        // Text parses per target; blank is null
        assert_eq!(
            convert(&Value::from(""), Kind::Date).unwrap(),
            Value::Date(None)
        );
        assert!(convert(&Value::from("bogus"), Kind::Date).is_err());
        // Instant <-> millis
        let inst = convert(&Value::Long(Some(1500)), Kind::Instant).unwrap();
        assert_eq!(inst, Value::Instant(Some(Instant::from_millis(1500))));
    }

    #[test]
    fn test_canonical_text_targets() {
        assert_eq!(
            convert(&Value::Complex(Some(crate::complex::Complex::new(1.5, -2.0))), Kind::String)
                .unwrap(),
            Value::String(Some("1.5-2i".to_string()))
        );
        assert_eq!(
            convert(&Value::Boolean(Some(true)), Kind::String).unwrap(),
            Value::String(Some("true".to_string()))
        );
        assert_eq!(
            convert(&Value::Binary(Some(vec![0xAB])), Kind::String).unwrap(),
            Value::String(Some("ab".to_string()))
        );
    }

    #[test]
    fn test_boolean_numeric_bridge() {
        assert_eq!(
            convert(&Value::Boolean(Some(true)), Kind::Long).unwrap(),
            Value::Long(Some(1))
        );
        assert_eq!(
            convert(&Value::Long(Some(0)), Kind::Boolean).unwrap(),
            Value::Boolean(Some(false))
        );
        assert_eq!(
            convert(&Value::Double(Some(0.25)), Kind::Boolean).unwrap(),
            Value::Boolean(Some(true))
        );
        // Temporal -> Boolean is refused
        assert!(convert(
            &Value::Timestamp(Some(Timestamp::from_millis(5))),
            Kind::Boolean
        )
        .is_err());
    }

    #[test]
    fn test_complex_conversions() {
        let pure_real = Value::Complex(Some(crate::complex::Complex::from_real(4.0)));
        assert_eq!(
            convert(&pure_real, Kind::Long).unwrap(),
            Value::Long(Some(4))
        );
        let with_imag = Value::Complex(Some(crate::complex::Complex::new(4.0, 1.0)));
        assert!(convert(&with_imag, Kind::Long).is_err());
        assert_eq!(
            convert(&Value::Long(Some(3)), Kind::Complex).unwrap(),
            Value::Complex(Some(crate::complex::Complex::from_real(3.0)))
        );
        assert_eq!(
            convert(&Value::from("1.5-2i"), Kind::Complex).unwrap(),
            Value::Complex(Some(crate::complex::Complex::new(1.5, -2.0)))
        );
    }
}
