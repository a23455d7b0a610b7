//! Value - the polymorphic value type of the Meridian engine
//!
//! A `Value` is one of 21 concrete kinds plus the kindless `Null`. Every
//! scalar kind carries a nullable payload: `Long(None)` is "a null Long" —
//! it has no value but keeps its discriminant for exact-type checks.
//! Compound kinds have no separate null form; an empty list/set/map (or a
//! zero-length vector) is the null of that kind.
//!
//! ## Equality surfaces
//!
//! `Value` has two equality surfaces, deliberately distinct:
//!
//! - `PartialEq`/`Hash` — canonical structural equality. The strict numeric
//!   kinds (Int, Long, Float, Double, Numeric, Decimal) form a comparison
//!   class and are equal across kinds when mathematically equal
//!   (`Long(3) == Double(3.0)`); everything else is same-kind only.
//! - [`compare::cmp_values`](crate::compare::cmp_values) — the polymorphic
//!   total order used for sorting, joins and containment. It additionally
//!   coerces booleans, temporal kinds and numeric-looking text.
//!
//! Sorting and predicate surfaces must go through the comparison engine;
//! `PartialEq` is for collections and caches.

use crate::compare;
use crate::complex::Complex;
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::numeric::Numeric;
use crate::temporal::{Date, Instant, Time, Timestamp, ZonedTime, ZonedTimestamp};
use crate::vector::{DenseVector, LogicalIter, SparseVector};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Polymorphic value: 21 concrete kinds plus `Null`.
///
/// Scalar payloads are `Option`s — `None` is the null of that kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
    /// Boolean.
    Boolean(Option<bool>),
    /// 32-bit signed integer.
    Int(Option<i32>),
    /// 64-bit signed integer.
    Long(Option<i64>),
    /// IEEE 754 binary32.
    Float(Option<f32>),
    /// IEEE 754 binary64.
    Double(Option<f64>),
    /// Fixed-scale numeric (six implied decimals).
    Numeric(Option<Numeric>),
    /// Arbitrary-precision decimal. Boxed to keep the enum small.
    Decimal(Option<Box<BigDecimal>>),
    /// Complex number.
    Complex(Option<Complex>),
    /// Calendar date.
    Date(Option<Date>),
    /// Time of day.
    Time(Option<Time>),
    /// Epoch-millisecond timestamp.
    Timestamp(Option<Timestamp>),
    /// Offset-qualified time of day.
    ZonedTime(Option<ZonedTime>),
    /// Offset-qualified timestamp.
    ZonedTimestamp(Option<ZonedTimestamp>),
    /// Second + nanosecond instant.
    Instant(Option<Instant>),
    /// Raw bytes. `Some(vec![])` is present-and-empty, not null.
    Binary(Option<Vec<u8>>),
    /// UTF-8 text. `Some("")` is present-and-empty, not null.
    String(Option<String>),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Insertion-ordered set of values (deduplicated by construction).
    Set(Vec<Value>),
    /// Insertion-ordered key -> value mapping (keys unique by construction).
    Map(Vec<(Value, Value)>),
    /// Fixed-length array of doubles.
    DenseVector(DenseVector),
    /// Sparse fixed-length vector of doubles.
    SparseVector(SparseVector),
    /// Kindless null.
    Null,
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// The null value of the given kind.
    pub fn null_of(kind: Kind) -> Self {
        match kind {
            Kind::Null => Value::Null,
            Kind::Boolean => Value::Boolean(None),
            Kind::Int => Value::Int(None),
            Kind::Long => Value::Long(None),
            Kind::Float => Value::Float(None),
            Kind::Double => Value::Double(None),
            Kind::Numeric => Value::Numeric(None),
            Kind::Decimal => Value::Decimal(None),
            Kind::Complex => Value::Complex(None),
            Kind::Date => Value::Date(None),
            Kind::Time => Value::Time(None),
            Kind::Timestamp => Value::Timestamp(None),
            Kind::ZonedTime => Value::ZonedTime(None),
            Kind::ZonedTimestamp => Value::ZonedTimestamp(None),
            Kind::Instant => Value::Instant(None),
            Kind::Binary => Value::Binary(None),
            Kind::String => Value::String(None),
            Kind::List => Value::List(Vec::new()),
            Kind::Set => Value::Set(Vec::new()),
            Kind::Map => Value::Map(Vec::new()),
            Kind::DenseVector => Value::DenseVector(DenseVector::new(Vec::new())),
            Kind::SparseVector => Value::SparseVector(SparseVector::empty()),
        }
    }

    /// Build a list from owned items.
    pub fn list_from<T: Into<Value>>(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a set, deduplicating while preserving first-occurrence order.
    pub fn set_from<T: Into<Value>>(items: Vec<T>) -> Self {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            let value = item.into();
            if !out.iter().any(|existing| existing == &value) {
                out.push(value);
            }
        }
        Value::Set(out)
    }

    /// Build a map, keeping the first occurrence of each key.
    pub fn map_from(entries: Vec<(Value, Value)>) -> Self {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            if !out.iter().any(|(existing, _)| existing == &key) {
                out.push((key, value));
            }
        }
        Value::Map(out)
    }

    ///
    /// TYPES
    ///

    /// The kind discriminant of this value.
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Boolean(_) => Kind::Boolean,
            Value::Int(_) => Kind::Int,
            Value::Long(_) => Kind::Long,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::Numeric(_) => Kind::Numeric,
            Value::Decimal(_) => Kind::Decimal,
            Value::Complex(_) => Kind::Complex,
            Value::Date(_) => Kind::Date,
            Value::Time(_) => Kind::Time,
            Value::Timestamp(_) => Kind::Timestamp,
            Value::ZonedTime(_) => Kind::ZonedTime,
            Value::ZonedTimestamp(_) => Kind::ZonedTimestamp,
            Value::Instant(_) => Kind::Instant,
            Value::Binary(_) => Kind::Binary,
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Set(_) => Kind::Set,
            Value::Map(_) => Kind::Map,
            Value::DenseVector(_) => Kind::DenseVector,
            Value::SparseVector(_) => Kind::SparseVector,
            Value::Null => Kind::Null,
        }
    }

    /// True if this value carries no payload.
    ///
    /// Covers the kindless `Null`, null scalars, empty list/set/map and
    /// zero-length vectors. Empty text and empty bytes are NOT null — they
    /// are present-and-empty.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int(v) => v.is_none(),
            Value::Long(v) => v.is_none(),
            Value::Float(v) => v.is_none(),
            Value::Double(v) => v.is_none(),
            Value::Numeric(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Complex(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::ZonedTime(v) => v.is_none(),
            Value::ZonedTimestamp(v) => v.is_none(),
            Value::Instant(v) => v.is_none(),
            Value::Binary(v) => v.is_none(),
            Value::String(v) => v.is_none(),
            Value::List(items) => items.is_empty(),
            Value::Set(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::DenseVector(v) => v.is_empty(),
            Value::SparseVector(v) => v.is_empty(),
        }
    }

    /// True if this value is null or holds zero elements/bytes/chars.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::String(Some(s)) => s.is_empty(),
            Value::Binary(Some(b)) => b.is_empty(),
            _ => self.is_null(),
        }
    }

    /// True for the strict numeric kinds plus boolean/temporal coercions —
    /// everything the numeric comparison family covers.
    pub const fn is_numeric_family(&self) -> bool {
        self.kind().is_numeric_family()
    }

    /// True for the temporal kinds.
    pub const fn is_temporal(&self) -> bool {
        self.kind().is_temporal()
    }

    /// True for list/set/map/vector kinds.
    pub const fn is_compound(&self) -> bool {
        self.kind().is_compound()
    }

    /// True for the two vector kinds.
    pub const fn is_vector(&self) -> bool {
        self.kind().is_vector()
    }

    ///
    /// ACCESSORS
    ///

    /// Borrow the list elements, if this is a List.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the set elements, if this is a Set.
    pub fn as_set(&self) -> Option<&[Value]> {
        match self {
            Value::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the map entries, if this is a Map.
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Borrow the dense vector, if this is a DenseVector.
    pub fn as_dense_vector(&self) -> Option<&DenseVector> {
        match self {
            Value::DenseVector(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the sparse vector, if this is a SparseVector.
    pub fn as_sparse_vector(&self) -> Option<&SparseVector> {
        match self {
            Value::SparseVector(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the text, if this is a present String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(Some(s)) => Some(s),
            _ => None,
        }
    }

    /// Borrow the bytes, if this is a present Binary.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(Some(b)) => Some(b),
            _ => None,
        }
    }

    ///
    /// NATIVE GETTERS
    ///
    /// All getters route through the conversion matrix (the single source of
    /// truth for coercion). Null input yields `Ok(None)`; structurally
    /// invalid requests fail.
    ///

    /// Get as i32, converting if necessary.
    pub fn to_int(&self) -> Result<Option<i32>> {
        match crate::coerce::convert(self, Kind::Int)? {
            Value::Int(v) => Ok(v),
            _ => unreachable!("convert to Int returned another kind"),
        }
    }

    /// Get as i64, converting if necessary.
    pub fn to_long(&self) -> Result<Option<i64>> {
        match crate::coerce::convert(self, Kind::Long)? {
            Value::Long(v) => Ok(v),
            _ => unreachable!("convert to Long returned another kind"),
        }
    }

    /// Get as f32, converting if necessary.
    pub fn to_float(&self) -> Result<Option<f32>> {
        match crate::coerce::convert(self, Kind::Float)? {
            Value::Float(v) => Ok(v),
            _ => unreachable!("convert to Float returned another kind"),
        }
    }

    /// Get as f64, converting if necessary.
    pub fn to_double(&self) -> Result<Option<f64>> {
        match crate::coerce::convert(self, Kind::Double)? {
            Value::Double(v) => Ok(v),
            _ => unreachable!("convert to Double returned another kind"),
        }
    }

    /// Get as fixed-scale numeric, converting if necessary.
    pub fn to_numeric(&self) -> Result<Option<Numeric>> {
        match crate::coerce::convert(self, Kind::Numeric)? {
            Value::Numeric(v) => Ok(v),
            _ => unreachable!("convert to Numeric returned another kind"),
        }
    }

    /// Get as arbitrary-precision decimal, converting if necessary.
    pub fn to_decimal(&self) -> Result<Option<BigDecimal>> {
        match crate::coerce::convert(self, Kind::Decimal)? {
            Value::Decimal(v) => Ok(v.map(|b| *b)),
            _ => unreachable!("convert to Decimal returned another kind"),
        }
    }

    /// Get as boolean, converting if necessary.
    pub fn to_boolean(&self) -> Result<Option<bool>> {
        match crate::coerce::convert(self, Kind::Boolean)? {
            Value::Boolean(v) => Ok(v),
            _ => unreachable!("convert to Boolean returned another kind"),
        }
    }

    /// Get as date, converting if necessary.
    pub fn to_date(&self) -> Result<Option<Date>> {
        match crate::coerce::convert(self, Kind::Date)? {
            Value::Date(v) => Ok(v),
            _ => unreachable!("convert to Date returned another kind"),
        }
    }

    /// Get as time of day, converting if necessary.
    pub fn to_time(&self) -> Result<Option<Time>> {
        match crate::coerce::convert(self, Kind::Time)? {
            Value::Time(v) => Ok(v),
            _ => unreachable!("convert to Time returned another kind"),
        }
    }

    /// Get as timestamp, converting if necessary.
    pub fn to_timestamp(&self) -> Result<Option<Timestamp>> {
        match crate::coerce::convert(self, Kind::Timestamp)? {
            Value::Timestamp(v) => Ok(v),
            _ => unreachable!("convert to Timestamp returned another kind"),
        }
    }

    /// Get as instant, converting if necessary.
    pub fn to_instant(&self) -> Result<Option<Instant>> {
        match crate::coerce::convert(self, Kind::Instant)? {
            Value::Instant(v) => Ok(v),
            _ => unreachable!("convert to Instant returned another kind"),
        }
    }

    /// Get as raw bytes, converting if necessary.
    pub fn to_bytes(&self) -> Result<Option<Vec<u8>>> {
        match crate::coerce::convert(self, Kind::Binary)? {
            Value::Binary(v) => Ok(v),
            _ => unreachable!("convert to Binary returned another kind"),
        }
    }

    /// Get as text (canonical formatting), converting if necessary.
    pub fn to_text(&self) -> Result<Option<String>> {
        match crate::coerce::convert(self, Kind::String)? {
            Value::String(v) => Ok(v),
            _ => unreachable!("convert to String returned another kind"),
        }
    }

    ///
    /// ITERATION
    ///

    /// Iterate this value as a sequence of values.
    ///
    /// Scalars (including nulls) yield themselves once; lists and sets
    /// their elements; maps their values in insertion order; vectors their
    /// logical doubles (sparse vectors walk stored runs against the
    /// implicit zero fill, never materializing).
    pub fn iter_elements(&self) -> ElementIter<'_> {
        match self {
            Value::List(items) | Value::Set(items) => ElementIter::Slice(items.iter()),
            Value::Map(entries) => ElementIter::MapValues(entries.iter()),
            Value::DenseVector(v) => ElementIter::Dense(v.as_slice().iter()),
            Value::SparseVector(v) => ElementIter::Sparse(v.iter_logical()),
            scalar => ElementIter::Scalar(Some(scalar.clone())),
        }
    }

    /// Number of elements this value iterates as.
    pub fn element_count(&self) -> usize {
        match self {
            Value::List(items) | Value::Set(items) => items.len(),
            Value::Map(entries) => entries.len(),
            Value::DenseVector(v) => v.len(),
            Value::SparseVector(v) => v.len(),
            _ => 1,
        }
    }

    ///
    /// HASHING
    ///

    /// Canonical 64-bit hash, stable across processes.
    ///
    /// Kind-tag prefixed to prevent cross-kind collisions (string "true"
    /// vs boolean true). NaN collapses to one bit pattern and -0.0 hashes
    /// as +0.0 so equal doubles hash equal.
    pub fn canonical_hash(&self) -> u64 {
        use xxhash_rust::xxh64::Xxh64;

        const CANONICAL_NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

        fn canonical_f64_bits(f: f64) -> u64 {
            if f.is_nan() {
                CANONICAL_NAN_BITS
            } else if f == 0.0 {
                0
            } else {
                f.to_bits()
            }
        }

        fn feed(hasher: &mut Xxh64, value: &Value) {
            hasher.update(&[value.kind().as_u8()]);
            match value {
                Value::Null => hasher.update(b"null"),
                Value::Boolean(v) => match v {
                    None => hasher.update(b"null"),
                    Some(b) => hasher.update(&[*b as u8 + 1]),
                },
                Value::Int(v) => match v {
                    None => hasher.update(b"null"),
                    Some(i) => hasher.update(&i.to_le_bytes()),
                },
                Value::Long(v) => match v {
                    None => hasher.update(b"null"),
                    Some(i) => hasher.update(&i.to_le_bytes()),
                },
                Value::Float(v) => match v {
                    None => hasher.update(b"null"),
                    Some(f) => hasher.update(&canonical_f64_bits(*f as f64).to_le_bytes()),
                },
                Value::Double(v) => match v {
                    None => hasher.update(b"null"),
                    Some(f) => hasher.update(&canonical_f64_bits(*f).to_le_bytes()),
                },
                Value::Numeric(v) => match v {
                    None => hasher.update(b"null"),
                    Some(n) => hasher.update(&n.scaled().to_le_bytes()),
                },
                Value::Decimal(v) => match v {
                    None => hasher.update(b"null"),
                    Some(d) => {
                        let s = d.normalized().to_string();
                        hasher.update(&(s.len() as u64).to_le_bytes());
                        hasher.update(s.as_bytes());
                    }
                },
                Value::Complex(v) => match v {
                    None => hasher.update(b"null"),
                    Some(c) => {
                        hasher.update(&canonical_f64_bits(c.re).to_le_bytes());
                        hasher.update(&canonical_f64_bits(c.im).to_le_bytes());
                    }
                },
                Value::Date(v) => match v {
                    None => hasher.update(b"null"),
                    Some(d) => hasher.update(&d.millis().to_le_bytes()),
                },
                Value::Time(v) => match v {
                    None => hasher.update(b"null"),
                    Some(t) => hasher.update(&t.millis().to_le_bytes()),
                },
                Value::Timestamp(v) => match v {
                    None => hasher.update(b"null"),
                    Some(t) => hasher.update(&t.millis().to_le_bytes()),
                },
                Value::ZonedTime(v) => match v {
                    None => hasher.update(b"null"),
                    Some(t) => hasher.update(&t.millis().to_le_bytes()),
                },
                Value::ZonedTimestamp(v) => match v {
                    None => hasher.update(b"null"),
                    Some(t) => hasher.update(&t.millis().to_le_bytes()),
                },
                Value::Instant(v) => match v {
                    None => hasher.update(b"null"),
                    Some(i) => {
                        hasher.update(&i.secs().to_le_bytes());
                        hasher.update(&i.nanos().to_le_bytes());
                    }
                },
                Value::Binary(v) => match v {
                    None => hasher.update(b"null"),
                    Some(b) => {
                        hasher.update(&(b.len() as u64).to_le_bytes());
                        hasher.update(b);
                    }
                },
                Value::String(v) => match v {
                    None => hasher.update(b"null"),
                    Some(s) => {
                        hasher.update(&(s.len() as u64).to_le_bytes());
                        hasher.update(s.as_bytes());
                    }
                },
                Value::List(items) | Value::Set(items) => {
                    hasher.update(&(items.len() as u64).to_le_bytes());
                    for item in items {
                        feed(hasher, item);
                    }
                }
                Value::Map(entries) => {
                    hasher.update(&(entries.len() as u64).to_le_bytes());
                    for (key, value) in entries {
                        feed(hasher, key);
                        feed(hasher, value);
                    }
                }
                Value::DenseVector(v) => {
                    hasher.update(&(v.len() as u64).to_le_bytes());
                    for f in v.iter() {
                        hasher.update(&canonical_f64_bits(f).to_le_bytes());
                    }
                }
                Value::SparseVector(v) => {
                    // Hash the logical content so a sparse vector hashes
                    // identically to its dense expansion's sparse form
                    hasher.update(&(v.len() as u64).to_le_bytes());
                    for (i, f) in v.nonzeros() {
                        hasher.update(&i.to_le_bytes());
                        hasher.update(&canonical_f64_bits(f).to_le_bytes());
                    }
                }
            }
        }

        let mut hasher = Xxh64::new(0);
        feed(&mut hasher, self);
        hasher.digest()
    }
}

// === Structural equality with a numeric comparison class ===

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        // Strict numeric kinds compare mathematically across kinds
        if compare::is_strict_numeric(self) && compare::is_strict_numeric(other) {
            if self.is_null() || other.is_null() {
                return self.is_null() && other.is_null() && self.kind() == other.kind();
            }
            return compare::numeric_cmp(self, other) == Some(std::cmp::Ordering::Equal);
        }

        if self.kind() != other.kind() {
            return false;
        }

        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Complex(a), Value::Complex(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::ZonedTime(a), Value::ZonedTime(b)) => a == b,
            (Value::ZonedTimestamp(a), Value::ZonedTimestamp(b)) => a == b,
            (Value::Instant(a), Value::Instant(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::DenseVector(a), Value::DenseVector(b)) => a == b,
            (Value::SparseVector(a), Value::SparseVector(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Must stay consistent with PartialEq: the strict numeric kinds can
        // be equal across kinds, so present numerics hash via a canonical
        // numeric form instead of their kind discriminant.
        if compare::is_strict_numeric(self) && !self.is_null() {
            match compare::canonical_numeric_form(self) {
                compare::CanonicalNumeric::Integer(i) => {
                    0u8.hash(state);
                    i.hash(state);
                }
                compare::CanonicalNumeric::Bits(bits) => {
                    1u8.hash(state);
                    bits.hash(state);
                }
                compare::CanonicalNumeric::Nan => 2u8.hash(state),
                compare::CanonicalNumeric::Infinite(positive) => {
                    3u8.hash(state);
                    positive.hash(state);
                }
            }
            return;
        }
        self.canonical_hash().hash(state);
    }
}

// === Display: canonical text per kind ===

/// Write an element the way compound literals render it: strings quoted,
/// everything else canonical.
fn fmt_element(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(Some(s)) => write!(f, "\"{}\"", s),
        other => write!(f, "{}", other),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null()
            && !matches!(
                self,
                Value::List(_)
                    | Value::Set(_)
                    | Value::Map(_)
                    | Value::DenseVector(_)
                    | Value::SparseVector(_)
            )
        {
            return write!(f, "null");
        }
        match self {
            Value::Boolean(Some(b)) => write!(f, "{}", b),
            Value::Int(Some(i)) => write!(f, "{}", i),
            Value::Long(Some(l)) => write!(f, "{}", l),
            Value::Float(Some(x)) => write!(f, "{}", x),
            Value::Double(Some(x)) => write!(f, "{}", x),
            Value::Numeric(Some(n)) => write!(f, "{}", n),
            Value::Decimal(Some(d)) => write!(f, "{}", d),
            Value::Complex(Some(c)) => write!(f, "{}", c),
            Value::Date(Some(d)) => write!(f, "{}", d),
            Value::Time(Some(t)) => write!(f, "{}", t),
            Value::Timestamp(Some(t)) => write!(f, "{}", t),
            Value::ZonedTime(Some(t)) => write!(f, "{}", t),
            Value::ZonedTimestamp(Some(t)) => write!(f, "{}", t),
            Value::Instant(Some(i)) => write!(f, "{}", i),
            Value::Binary(Some(bytes)) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            Value::String(Some(s)) => write!(f, "{}", s),
            Value::List(items) | Value::Set(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    fmt_element(f, item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    fmt_element(f, key)?;
                    write!(f, ": ")?;
                    fmt_element(f, value)?;
                }
                write!(f, "}}")
            }
            Value::DenseVector(v) => write!(f, "{}", v),
            Value::SparseVector(v) => write!(f, "{}", v),
            // Null payloads handled above
            _ => write!(f, "null"),
        }
    }
}

// === Element iteration ===

/// Lazy element sequence over any value (see [`Value::iter_elements`]).
pub enum ElementIter<'a> {
    /// A scalar yields itself once.
    Scalar(Option<Value>),
    /// List/Set elements.
    Slice(std::slice::Iter<'a, Value>),
    /// Map values in insertion order.
    MapValues(std::slice::Iter<'a, (Value, Value)>),
    /// Dense vector elements.
    Dense(std::slice::Iter<'a, f64>),
    /// Sparse vector logical elements.
    Sparse(LogicalIter<'a>),
}

impl Iterator for ElementIter<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            ElementIter::Scalar(slot) => slot.take(),
            ElementIter::Slice(iter) => iter.next().cloned(),
            ElementIter::MapValues(iter) => iter.next().map(|(_, v)| v.clone()),
            ElementIter::Dense(iter) => iter.next().map(|f| Value::Double(Some(*f))),
            ElementIter::Sparse(iter) => iter.next().map(|f| Value::Double(Some(f))),
        }
    }
}

// === From implementations ===

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Value::$variant(Some(v.into()))
                }
            }
        )*
    };
}

impl_from_for! {
    bool           => Boolean,
    i32            => Int,
    i64            => Long,
    f32            => Float,
    f64            => Double,
    Numeric        => Numeric,
    Complex        => Complex,
    Date           => Date,
    Time           => Time,
    Timestamp      => Timestamp,
    ZonedTime      => ZonedTime,
    ZonedTimestamp => ZonedTimestamp,
    Instant        => Instant,
    String         => String,
    &str           => String,
    Vec<u8>        => Binary,
}

impl From<BigDecimal> for Value {
    fn from(d: BigDecimal) -> Self {
        Value::Decimal(Some(Box::new(d)))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<DenseVector> for Value {
    fn from(v: DenseVector) -> Self {
        Value::DenseVector(v)
    }
}

impl From<SparseVector> for Value {
    fn from(v: SparseVector) -> Self {
        Value::SparseVector(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::DenseVector(DenseVector::new(values))
    }
}

// === Text parsing entry points ===

/// Parse an i32 from text. Blank input yields the null Int.
pub fn parse_int_text(s: &str) -> Result<Value> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Value::Int(None));
    }
    s.parse::<i32>()
        .map(|i| Value::Int(Some(i)))
        .map_err(|e| Error::parse(s, Kind::Int, e.to_string()))
}

/// Parse an i64 from text. Blank input yields the null Long.
pub fn parse_long_text(s: &str) -> Result<Value> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Value::Long(None));
    }
    s.parse::<i64>()
        .map(|l| Value::Long(Some(l)))
        .map_err(|e| Error::parse(s, Kind::Long, e.to_string()))
}

/// Parse an f64 from text, accepting the `INF`/`-INF`/`NaN` spellings.
/// Blank input yields the null Double.
pub fn parse_double_text(s: &str) -> Result<Value> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Value::Double(None));
    }
    let parsed = match s {
        "INF" | "+INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        "NaN" => Ok(f64::NAN),
        _ => s.parse::<f64>(),
    };
    parsed
        .map(|d| Value::Double(Some(d)))
        .map_err(|e| Error::parse(s, Kind::Double, e.to_string()))
}

/// Parse a fixed-scale numeric from text.
///
/// Best-effort: blank OR malformed input yields the null Numeric (this
/// parser's failure contract is "return null", not "raise").
pub fn parse_numeric_text(s: &str) -> Value {
    Value::Numeric(Numeric::parse(s))
}

/// Parse an arbitrary-precision decimal from text. Blank input yields the
/// null Decimal.
pub fn parse_decimal_text(s: &str) -> Result<Value> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Value::Decimal(None));
    }
    BigDecimal::from_str(s)
        .map(|d| Value::Decimal(Some(Box::new(d))))
        .map_err(|e| Error::parse(s, Kind::Decimal, e.to_string()))
}

/// Parse a complex literal. Total: blank or malformed input yields the null
/// Complex.
pub fn parse_complex_text(s: &str) -> Value {
    Value::Complex(Complex::parse(s))
}
