//! # Meridian DB Core
//!
//! Value core of the Meridian data-processing engine.
//!
//! This crate provides:
//! - The polymorphic [`Value`] union (21 concrete kinds plus `Null`) and its
//!   [`Kind`] discriminants
//! - The comparison engine: one total order across heterogeneous kinds
//!   ([`cmp_values`])
//! - The conversion matrix: coerce any value into any target kind
//!   ([`convert`])
//! - Containment over scalar and compound containers ([`contains`])
//! - Dense/sparse fixed-length vectors with single-pass algorithms
//! - An injected interning cache for hot values ([`cache::ValueCache`])
//!
//! ## Design Principles
//!
//! 1. **Immutable values**: every value is immutable after construction;
//!    sharing across threads needs no locking
//! 2. **Exhaustive dispatch**: comparison and conversion are exhaustive
//!    `match`es over the kind union, so adding a kind breaks every dispatch
//!    site at compile time instead of at runtime
//! 3. **Pure and synchronous**: no I/O, no async, no global state — the
//!    cache is an explicit injected object
//!
//! ## Example
//!
//! ```
//! use meridian_db_core::{cmp_values, convert, Kind, Value};
//! use std::cmp::Ordering;
//!
//! let five = Value::Long(Some(5));
//! let text = Value::String(Some("5".to_string()));
//! assert_eq!(cmp_values(&five, &text).unwrap(), Ordering::Equal);
//!
//! let as_double = convert(&five, Kind::Double).unwrap();
//! assert_eq!(as_double, Value::Double(Some(5.0)));
//! ```

pub mod cache;
pub mod coerce;
pub mod compare;
pub mod complex;
pub mod contains;
pub mod error;
pub mod kind;
pub mod numeric;
pub mod temporal;
pub mod value;
pub mod vector;

// Re-export main types
pub use cache::{CacheStats, ValueCache, ValueCacheConfig};
pub use coerce::{convert, convert_json};
pub use compare::{cmp_values, sort_values, values_eq, OrderedValue};
pub use complex::Complex;
pub use contains::{contains, contains_all, contains_any};
pub use error::{Error, Result};
pub use kind::{Kind, ALL_KINDS};
pub use numeric::Numeric;
pub use temporal::{Date, Instant, Time, Timestamp, ZonedTime, ZonedTimestamp};
pub use value::{
    parse_complex_text, parse_decimal_text, parse_double_text, parse_int_text, parse_long_text,
    parse_numeric_text, ElementIter, Value,
};
pub use vector::{DenseVector, LogicalIter, SparseVector, SparseVectorBuilder};
