//! Containment engine: membership tests layered on the comparison engine
//!
//! `contains(container, needle)` answers "does X contain D":
//!
//! - scalar container: engine equality (`compare == 0`)
//! - List/Set: any element equal to the needle
//! - Map: tests VALUES, not keys
//! - Dense/Sparse vector: the vector as a multiset of doubles; a sparse
//!   vector with any non-stored position implicitly contains 0.0
//!
//! An empty container contains nothing — not even null — unless an element
//! is literally null. Refused element comparisons (indeterminate pairs)
//! propagate as errors.

use crate::compare::cmp_values;
use crate::error::Result;
use crate::value::Value;
use std::cmp::Ordering;

/// True if `container` contains `needle`.
pub fn contains(container: &Value, needle: &Value) -> Result<bool> {
    match container {
        Value::List(items) | Value::Set(items) => any_equal(items.iter(), needle),
        Value::Map(entries) => any_equal(entries.iter().map(|(_, v)| v), needle),
        Value::DenseVector(v) => {
            let Some(target) = needle_as_f64(needle) else {
                return Ok(false);
            };
            Ok(v.iter().any(|f| double_eq(f, target)))
        }
        Value::SparseVector(v) => {
            let Some(target) = needle_as_f64(needle) else {
                return Ok(false);
            };
            // Implicit zero member when any position is non-stored
            if target == 0.0 {
                return Ok(v.nonzero_count() < v.len());
            }
            Ok(v.nonzeros().any(|(_, f)| double_eq(f, target)))
        }
        scalar => Ok(cmp_values(scalar, needle)? == Ordering::Equal),
    }
}

/// True if any item of `needles` (a scalar counts as a singleton) is
/// contained in `container`.
pub fn contains_any(container: &Value, needles: &Value) -> Result<bool> {
    for needle in needle_seq(needles) {
        if contains(container, &needle)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// True if every item of `needles` is contained in `container`.
pub fn contains_all(container: &Value, needles: &Value) -> Result<bool> {
    for needle in needle_seq(needles) {
        if !contains(container, &needle)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Needle sequences iterate compounds; scalars are singletons.
fn needle_seq(needles: &Value) -> crate::value::ElementIter<'_> {
    needles.iter_elements()
}

fn any_equal<'a>(items: impl Iterator<Item = &'a Value>, needle: &Value) -> Result<bool> {
    for item in items {
        if cmp_values(item, needle)? == Ordering::Equal {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Reduce a needle to a double for the vector containers.
fn needle_as_f64(needle: &Value) -> Option<f64> {
    match needle {
        Value::Double(Some(f)) => Some(*f),
        Value::Float(Some(f)) => Some(*f as f64),
        other => other.to_double().ok().flatten(),
    }
}

fn double_eq(a: f64, b: f64) -> bool {
    crate::complex::cmp_f64_total(a, b) == Ordering::Equal
}
