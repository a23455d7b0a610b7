//! Comparison engine: one total order across every value kind
//!
//! [`cmp_values`] orders any two values, whatever their kinds, so sorts and
//! joins over heterogeneous columns behave deterministically. Rules, in
//! priority order:
//!
//! 1. Null (including empty compounds) sorts below everything; two nulls
//!    are equal.
//! 2. Same kind compares natively: numeric sign, byte-wise binary,
//!    lexicographic text, element-wise compounds.
//! 3. Numeric-family kinds (the strict numerics plus boolean as 0/1 and
//!    the temporal kinds reduced to milliseconds) compare mathematically,
//!    promoting exactly: integers against integers stay in integer space,
//!    Decimal/Numeric force decimal space, floats meet integers in f64
//!    only when the integer is exactly representable.
//! 4. Complex compares real-then-imaginary; a non-Complex numeric operand
//!    is treated as having imaginary 0.
//! 5. Against text (or UTF-8 binary), a scalar first tries the text as a
//!    number; failing that, its canonical text form is compared
//!    lexicographically.
//! 6. Scalar vs nonempty compound: the scalar meets the compound's first
//!    element, and on a tie the compound outranks the scalar. A present
//!    Binary scalar always ranks below a nonempty compound.
//! 7. Compound vs compound walks elements in iteration order; the shorter
//!    side loses on a common prefix, and an exact tie falls back to the
//!    family rank List < Set < vectors < Map.
//! 8. Sparse vectors compare by their logical content: both sides are
//!    padded with implicit zeros to the longer length and the walk touches
//!    only stored runs (sparse-vs-sparse is O(nonzeros)).
//!
//! Map-vs-Map ordering is refused with
//! [`Error::IndeterminateOrder`](crate::error::Error); element walks that
//! hit a refused pair propagate the refusal.
//!
//! NaN sorts by the IEEE total order (`+NaN` above `+inf`, `-NaN` below
//! `-inf`), so the order stays total and transitive even for pathological
//! floats.

use crate::complex::{cmp_f64_total, Complex};
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::value::Value;
use crate::vector::{DenseVector, SparseVector};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::cmp::Ordering;

/// Largest integer magnitude exactly representable in f64.
const F64_SAFE_INT: i128 = 1 << 53;

/// Compare two values under the engine's total order.
///
/// Errs with `IndeterminateOrder` for Map-vs-Map (and any element walk
/// that reaches such a pair); total otherwise.
pub fn cmp_values(a: &Value, b: &Value) -> Result<Ordering> {
    // Rule 1: nulls (empty compounds included)
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ok(Ordering::Equal),
        (true, false) => return Ok(Ordering::Less),
        (false, true) => return Ok(Ordering::Greater),
        (false, false) => {}
    }

    // Rule 2: same kind
    if a.kind() == b.kind() {
        return same_kind_cmp(a, b);
    }

    match (a.is_compound(), b.is_compound()) {
        (true, true) => compound_cross_cmp(a, b),
        (false, true) => scalar_vs_compound(a, b),
        (true, false) => scalar_vs_compound(b, a).map(Ordering::reverse),
        (false, false) => cross_scalar_cmp(a, b),
    }
}

/// Engine equality: equal under [`cmp_values`]. Refused pairs are unequal.
pub fn values_eq(a: &Value, b: &Value) -> bool {
    matches!(cmp_values(a, b), Ok(Ordering::Equal))
}

// ============================================================================
// Numeric class
// ============================================================================

/// True for the strict numeric kinds (Int, Long, Float, Double, Numeric,
/// Decimal) — the class whose members can be `PartialEq`-equal across kinds.
pub(crate) fn is_strict_numeric(v: &Value) -> bool {
    matches!(
        v.kind(),
        Kind::Int | Kind::Long | Kind::Float | Kind::Double | Kind::Numeric | Kind::Decimal
    )
}

/// Canonical hash form of a present strict-numeric value.
///
/// Mathematically equal values must map to the same form: exact integers
/// collapse to `Integer`, everything else to the f64 bit pattern of its
/// numeric reduction.
pub(crate) enum CanonicalNumeric {
    /// Exact integer value.
    Integer(i128),
    /// Finite non-integer: canonical f64 bits.
    Bits(u64),
    /// Any NaN.
    Nan,
    /// Positive or negative infinity.
    Infinite(bool),
}

pub(crate) fn canonical_numeric_form(v: &Value) -> CanonicalNumeric {
    fn from_f64(f: f64) -> CanonicalNumeric {
        if f.is_nan() {
            CanonicalNumeric::Nan
        } else if f.is_infinite() {
            CanonicalNumeric::Infinite(f > 0.0)
        } else if f.fract() == 0.0 && f.abs() < 1e38 {
            CanonicalNumeric::Integer(f as i128)
        } else {
            CanonicalNumeric::Bits(f.to_bits())
        }
    }

    match v {
        Value::Int(Some(i)) => CanonicalNumeric::Integer(*i as i128),
        Value::Long(Some(l)) => CanonicalNumeric::Integer(*l as i128),
        Value::Float(Some(f)) => from_f64(*f as f64),
        Value::Double(Some(f)) => from_f64(*f),
        Value::Numeric(Some(n)) => {
            if n.scaled() % crate::numeric::SCALE == 0 {
                CanonicalNumeric::Integer((n.scaled() / crate::numeric::SCALE) as i128)
            } else {
                from_f64(n.to_f64())
            }
        }
        Value::Decimal(Some(d)) => {
            let normalized = d.normalized();
            if normalized.is_integer() {
                if let Some(i) = normalized.to_i128() {
                    return CanonicalNumeric::Integer(i);
                }
            }
            from_f64(normalized.to_f64().unwrap_or(f64::NAN))
        }
        _ => CanonicalNumeric::Nan,
    }
}

/// Numeric representation chosen for exact cross-kind comparison.
///
/// Also reused by the conversion matrix as the numeric-family reduction.
pub(crate) enum Repr {
    /// Exact integer space.
    Exact(i128),
    /// f64 space (floats).
    Approx(f64),
    /// Decimal space (Decimal and fixed-scale Numeric).
    Big(BigDecimal),
}

/// Reduce a present strict-numeric value.
fn strict_repr(v: &Value) -> Option<Repr> {
    match v {
        Value::Int(Some(i)) => Some(Repr::Exact(*i as i128)),
        Value::Long(Some(l)) => Some(Repr::Exact(*l as i128)),
        Value::Float(Some(f)) => Some(Repr::Approx(*f as f64)),
        Value::Double(Some(f)) => Some(Repr::Approx(*f)),
        Value::Numeric(Some(n)) => Some(Repr::Big(BigDecimal::new(BigInt::from(n.scaled()), 6))),
        Value::Decimal(Some(d)) => Some(Repr::Big((**d).clone())),
        _ => None,
    }
}

/// Reduce any present numeric-family value: the strict numerics plus
/// boolean as 0/1 and temporal kinds as (fractional) milliseconds.
pub(crate) fn family_repr(v: &Value) -> Option<Repr> {
    match v {
        Value::Boolean(Some(b)) => Some(Repr::Exact(*b as i128)),
        Value::Date(Some(d)) => Some(Repr::Exact(d.millis() as i128)),
        Value::Time(Some(t)) => Some(Repr::Exact(t.millis() as i128)),
        Value::Timestamp(Some(t)) => Some(Repr::Exact(t.millis() as i128)),
        Value::ZonedTime(Some(t)) => Some(Repr::Exact(t.millis() as i128)),
        Value::ZonedTimestamp(Some(t)) => Some(Repr::Exact(t.millis() as i128)),
        Value::Instant(Some(i)) => {
            if i.nanos() % 1_000_000 == 0 {
                Some(Repr::Exact(i.millis() as i128))
            } else {
                Some(Repr::Approx(i.millis_f64()))
            }
        }
        _ => strict_repr(v),
    }
}

fn repr_cmp(a: Repr, b: Repr) -> Ordering {
    match (a, b) {
        (Repr::Exact(x), Repr::Exact(y)) => x.cmp(&y),
        (Repr::Approx(x), Repr::Approx(y)) => cmp_f64_total(x, y),
        (Repr::Exact(x), Repr::Approx(y)) => exact_vs_f64(x, y),
        (Repr::Approx(x), Repr::Exact(y)) => exact_vs_f64(y, x).reverse(),
        (Repr::Big(x), Repr::Big(y)) => x.cmp(&y),
        (Repr::Big(x), Repr::Exact(y)) => x.cmp(&BigDecimal::from(BigInt::from(y))),
        (Repr::Exact(x), Repr::Big(y)) => BigDecimal::from(BigInt::from(x)).cmp(&y),
        (Repr::Big(x), Repr::Approx(y)) => big_vs_f64(&x, y),
        (Repr::Approx(x), Repr::Big(y)) => big_vs_f64(&y, x).reverse(),
    }
}

/// Exact integer against f64: stay exact.
fn exact_vs_f64(x: i128, y: f64) -> Ordering {
    if y.is_nan() {
        // IEEE total order: -NaN below everything, +NaN above
        return if y.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if y.is_infinite() {
        return if y > 0.0 { Ordering::Less } else { Ordering::Greater };
    }
    if x.abs() <= F64_SAFE_INT {
        cmp_f64_total(x as f64, y)
    } else {
        // Large integer: promote both into decimal space for exactness
        let x_dec = BigDecimal::from(BigInt::from(x));
        let y_dec = BigDecimal::try_from(y).expect("finite f64 converts");
        x_dec.cmp(&y_dec)
    }
}

fn big_vs_f64(x: &BigDecimal, y: f64) -> Ordering {
    if y.is_nan() {
        return if y.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if y.is_infinite() {
        return if y > 0.0 { Ordering::Less } else { Ordering::Greater };
    }
    let y_dec = BigDecimal::try_from(y).expect("finite f64 converts");
    x.cmp(&y_dec)
}

/// Cross-kind comparison over the strict numeric class only.
///
/// `None` when either side is null or outside the class. Used by `Value`'s
/// structural `PartialEq`.
pub(crate) fn numeric_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    Some(repr_cmp(strict_repr(a)?, strict_repr(b)?))
}

// ============================================================================
// Same-kind comparison
// ============================================================================

fn same_kind_cmp(a: &Value, b: &Value) -> Result<Ordering> {
    match (a, b) {
        (Value::Boolean(Some(x)), Value::Boolean(Some(y))) => Ok(x.cmp(y)),
        (Value::Int(Some(x)), Value::Int(Some(y))) => Ok(x.cmp(y)),
        (Value::Long(Some(x)), Value::Long(Some(y))) => Ok(x.cmp(y)),
        (Value::Float(Some(x)), Value::Float(Some(y))) => {
            Ok(cmp_f64_total(*x as f64, *y as f64))
        }
        (Value::Double(Some(x)), Value::Double(Some(y))) => Ok(cmp_f64_total(*x, *y)),
        (Value::Numeric(Some(x)), Value::Numeric(Some(y))) => Ok(x.cmp(y)),
        (Value::Decimal(Some(x)), Value::Decimal(Some(y))) => Ok(x.cmp(y)),
        (Value::Complex(Some(x)), Value::Complex(Some(y))) => Ok(x.total_cmp(*y)),
        (Value::Date(Some(x)), Value::Date(Some(y))) => Ok(x.cmp(y)),
        (Value::Time(Some(x)), Value::Time(Some(y))) => Ok(x.cmp(y)),
        (Value::Timestamp(Some(x)), Value::Timestamp(Some(y))) => Ok(x.cmp(y)),
        (Value::ZonedTime(Some(x)), Value::ZonedTime(Some(y))) => Ok(x.cmp(y)),
        (Value::ZonedTimestamp(Some(x)), Value::ZonedTimestamp(Some(y))) => Ok(x.cmp(y)),
        (Value::Instant(Some(x)), Value::Instant(Some(y))) => Ok(x.cmp(y)),
        (Value::Binary(Some(x)), Value::Binary(Some(y))) => Ok(x.cmp(y)),
        (Value::String(Some(x)), Value::String(Some(y))) => Ok(x.cmp(y)),
        (Value::List(x), Value::List(y)) | (Value::Set(x), Value::Set(y)) => {
            elementwise_cmp(x.iter(), x.len(), y.iter(), y.len())
        }
        (Value::Map(_), Value::Map(_)) => Err(Error::indeterminate(Kind::Map, Kind::Map)),
        (Value::DenseVector(x), Value::DenseVector(y)) => Ok(dense_dense_cmp(x, y)),
        (Value::SparseVector(x), Value::SparseVector(y)) => Ok(sparse_sparse_cmp(x, y)),
        // Nulls were peeled off in cmp_values
        _ => Ok(Ordering::Equal),
    }
}

// ============================================================================
// Cross-kind scalars
// ============================================================================

fn cross_scalar_cmp(a: &Value, b: &Value) -> Result<Ordering> {
    // Rule 3: both in the numeric family
    if a.is_numeric_family() && b.is_numeric_family() {
        if let (Some(x), Some(y)) = (family_repr(a), family_repr(b)) {
            return Ok(repr_cmp(x, y));
        }
    }

    // Rule 4: Complex against a numeric-family operand (imaginary 0)
    if let Value::Complex(Some(c)) = a {
        if let Some(repr) = family_repr(b) {
            let other = Complex::from_real(repr_to_f64(&repr));
            return Ok(c.total_cmp(other));
        }
    }
    if let Value::Complex(Some(c)) = b {
        if let Some(repr) = family_repr(a) {
            let other = Complex::from_real(repr_to_f64(&repr));
            return Ok(other.total_cmp(*c));
        }
    }

    // Rule 5: textual/binary fallback. Two textual operands (String vs
    // UTF-8 Binary) compare text-to-text so orientation cannot matter.
    if let (Some(x), Some(y)) = (textual_form(a), textual_form(b)) {
        return Ok(x.cmp(&y));
    }
    if let Some(text) = textual_form(b) {
        return Ok(scalar_vs_text(a, &text));
    }
    if let Some(text) = textual_form(a) {
        return Ok(scalar_vs_text(b, &text).reverse());
    }

    // Binary against non-textual scalars: canonical text bytes vs raw bytes
    if let Value::Binary(Some(bytes)) = b {
        return Ok(a.to_string().as_bytes().cmp(bytes.as_slice()));
    }
    if let Value::Binary(Some(bytes)) = a {
        return Ok(bytes.as_slice().cmp(b.to_string().as_bytes()).reverse());
    }

    // No remaining pairs: every scalar kind is numeric-family, Complex,
    // String or Binary. Deterministic fallback on the tag byte.
    Ok(a.kind().as_u8().cmp(&b.kind().as_u8()))
}

fn repr_to_f64(repr: &Repr) -> f64 {
    match repr {
        Repr::Exact(i) => *i as f64,
        Repr::Approx(f) => *f,
        Repr::Big(d) => d.to_f64().unwrap_or(f64::NAN),
    }
}

/// The text form of a String (or UTF-8 Binary) operand.
fn textual_form(v: &Value) -> Option<String> {
    match v {
        Value::String(Some(s)) => Some(s.clone()),
        Value::Binary(Some(b)) => std::str::from_utf8(b).ok().map(|s| s.to_string()),
        _ => None,
    }
}

/// A non-textual scalar against text: numeric parse first, then the
/// scalar's canonical text form lexicographically.
fn scalar_vs_text(scalar: &Value, text: &str) -> Ordering {
    if let Ok(parsed) = text.trim().parse::<f64>() {
        if let Value::Complex(Some(c)) = scalar {
            return c.total_cmp(Complex::from_real(parsed));
        }
        if let Some(repr) = family_repr(scalar) {
            return repr_cmp(repr, Repr::Approx(parsed));
        }
    }
    scalar.to_string().as_str().cmp(text)
}

// ============================================================================
// Scalar vs compound
// ============================================================================

/// Rule 6: a present scalar against a nonempty compound.
fn scalar_vs_compound(scalar: &Value, compound: &Value) -> Result<Ordering> {
    // A present Binary always ranks below a nonempty compound, whatever its
    // first element says. Historical asymmetry, pinned by tests.
    if matches!(scalar, Value::Binary(Some(_))) {
        return Ok(Ordering::Less);
    }

    let first = first_element(compound).expect("compound is nonempty");
    match cmp_values(scalar, &first)? {
        // Tie-break: a nonempty compound outranks an equal scalar
        Ordering::Equal => Ok(Ordering::Less),
        other => Ok(other),
    }
}

/// First element in iteration order: list/vector position 0, set/map
/// insertion order (map yields its first value).
fn first_element(compound: &Value) -> Option<Value> {
    match compound {
        Value::List(items) | Value::Set(items) => items.first().cloned(),
        Value::Map(entries) => entries.first().map(|(_, v)| v.clone()),
        Value::DenseVector(v) => v.get(0).map(|f| Value::Double(Some(f))),
        Value::SparseVector(v) => v.get(0).map(|f| Value::Double(Some(f))),
        _ => None,
    }
}

// ============================================================================
// Compound vs compound
// ============================================================================

/// Family rank used on exact element-wise ties across compound kinds.
fn family_rank(kind: Kind) -> u8 {
    match kind {
        Kind::List => 0,
        Kind::Set => 1,
        Kind::DenseVector | Kind::SparseVector => 2,
        Kind::Map => 3,
        _ => u8::MAX,
    }
}

fn compound_cross_cmp(a: &Value, b: &Value) -> Result<Ordering> {
    // Rule 8: any sparse side switches to padded logical-content semantics
    if a.kind() == Kind::SparseVector || b.kind() == Kind::SparseVector {
        if let Some(ordering) = padded_numeric_cmp(a, b) {
            return Ok(match ordering {
                Ordering::Equal => family_rank(a.kind()).cmp(&family_rank(b.kind())),
                other => other,
            });
        }
        // Non-numeric elements: fall through to the generic walk
    }

    let result = elementwise_cmp(
        a.iter_elements(),
        a.element_count(),
        b.iter_elements(),
        b.element_count(),
    )?;
    Ok(match result {
        Ordering::Equal => family_rank(a.kind()).cmp(&family_rank(b.kind())),
        other => other,
    })
}

/// Element-wise walk: first difference wins, then the shorter side loses.
fn elementwise_cmp<'a, A, B>(a: A, a_len: usize, b: B, b_len: usize) -> Result<Ordering>
where
    A: IntoIterator,
    B: IntoIterator,
    A::Item: std::borrow::Borrow<Value>,
    B::Item: std::borrow::Borrow<Value>,
{
    use std::borrow::Borrow;
    for (x, y) in a.into_iter().zip(b.into_iter()) {
        let c = cmp_values(x.borrow(), y.borrow())?;
        if c != Ordering::Equal {
            return Ok(c);
        }
    }
    Ok(a_len.cmp(&b_len))
}

fn dense_dense_cmp(a: &DenseVector, b: &DenseVector) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let c = cmp_f64_total(x, y);
        if c != Ordering::Equal {
            return c;
        }
    }
    a.len().cmp(&b.len())
}

/// Rule 8, sparse vs sparse: merge scan over the stored runs only.
///
/// Both sides pad with implicit zeros to the longer logical length, so the
/// first position where the stored values differ (from each other or from
/// zero) decides; equal runs mean equal content regardless of declared
/// lengths. O(nonzeros_a + nonzeros_b).
fn sparse_sparse_cmp(a: &SparseVector, b: &SparseVector) -> Ordering {
    let (ai, av) = (a.indices(), a.values());
    let (bi, bv) = (b.indices(), b.values());
    let mut i = 0usize;
    let mut j = 0usize;

    while i < ai.len() || j < bi.len() {
        // Next position where either side stores a value; everything
        // skipped in between is zero on both sides.
        let pos = match (ai.get(i), bi.get(j)) {
            (Some(&x), Some(&y)) => x.min(y),
            (Some(&x), None) => x,
            (None, Some(&y)) => y,
            (None, None) => unreachable!(),
        };
        let x = if ai.get(i) == Some(&pos) {
            let v = av[i];
            i += 1;
            v
        } else {
            0.0
        };
        let y = if bi.get(j) == Some(&pos) {
            let v = bv[j];
            j += 1;
            v
        } else {
            0.0
        };
        let c = cmp_f64_total(x, y);
        if c != Ordering::Equal {
            return c;
        }
    }
    Ordering::Equal
}

/// Padded numeric walk for rule 8 when one side is a list/set/dense vector.
///
/// Returns `None` if an element cannot reduce to a double (the caller falls
/// back to the generic walk).
fn padded_numeric_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Value::SparseVector(x), Value::SparseVector(y)) = (a, b) {
        return Some(sparse_sparse_cmp(x, y));
    }

    let len = a.element_count().max(b.element_count());
    let mut ax = PaddedSource::new(a);
    let mut bx = PaddedSource::new(b);
    for i in 0..len {
        let x = ax.value_at(i)?;
        let y = bx.value_at(i)?;
        let c = cmp_f64_total(x, y);
        if c != Ordering::Equal {
            return Some(c);
        }
    }
    Some(Ordering::Equal)
}

/// Forward cursor over a compound's elements as doubles, yielding implicit
/// zeros past its logical length.
struct PaddedSource<'a> {
    value: &'a Value,
    len: usize,
    // Sparse cursor: next stored slot
    slot: usize,
}

impl<'a> PaddedSource<'a> {
    fn new(value: &'a Value) -> Self {
        Self {
            value,
            len: value.element_count(),
            slot: 0,
        }
    }

    /// Element `i` as a double; positions are visited in increasing order.
    fn value_at(&mut self, i: usize) -> Option<f64> {
        if i >= self.len {
            return Some(0.0);
        }
        match self.value {
            Value::DenseVector(v) => v.get(i),
            Value::SparseVector(v) => {
                let indices = v.indices();
                if indices.get(self.slot) == Some(&(i as u32)) {
                    let out = v.values()[self.slot];
                    self.slot += 1;
                    Some(out)
                } else {
                    Some(0.0)
                }
            }
            Value::List(items) | Value::Set(items) => element_as_f64(&items[i]),
            Value::Map(entries) => element_as_f64(&entries[i].1),
            _ => None,
        }
    }
}

/// Reduce an element to a double for the padded walk. Non-numeric (and
/// null) elements abort the numeric path.
fn element_as_f64(v: &Value) -> Option<f64> {
    if v.is_null() {
        return None;
    }
    family_repr(v).map(|repr| repr_to_f64(&repr))
}

// ============================================================================
// Sorting surface
// ============================================================================

/// Wrapper that exposes the engine's order through `PartialOrd`.
///
/// This allows using standard-library comparison syntax with the engine's
/// semantics. Refused pairs (Map vs Map) yield `None`/unequal, which is why
/// the wrapper does not implement `Ord` — use [`sort_values`] to sort.
pub struct OrderedValue<'a>(pub &'a Value);

impl PartialEq for OrderedValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        values_eq(self.0, other.0)
    }
}

impl PartialOrd for OrderedValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        cmp_values(self.0, other.0).ok()
    }
}

/// Sort a slice under the engine's total order.
///
/// Fails with the first refused comparison the sort encounters; the slice
/// order is unspecified (but valid) after a failure.
pub fn sort_values(values: &mut [Value]) -> Result<()> {
    let mut refused: Option<Error> = None;
    values.sort_by(|a, b| match cmp_values(a, b) {
        Ok(ordering) => ordering,
        Err(e) => {
            refused.get_or_insert(e);
            Ordering::Equal
        }
    });
    match refused {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
