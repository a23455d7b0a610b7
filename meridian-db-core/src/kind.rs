//! Kind - the discriminant tag of the closed value union
//!
//! Every [`Value`](crate::value::Value) carries exactly one `Kind`. The raw
//! `u8` tag is stable and doubles as the wire discriminant for the binary
//! codec, so variants must never be renumbered.
//!
//! ## Classes
//!
//! Kinds group into comparison/conversion classes:
//!
//! | Class | Members |
//! |-------|---------|
//! | numeric family | Int, Long, Float, Double, Numeric, Decimal, Boolean, all temporal kinds |
//! | temporal | Date, Time, Timestamp, ZonedTime, ZonedTimestamp, Instant |
//! | compound | List, Set, Map, DenseVector, SparseVector |
//! | vector | DenseVector, SparseVector |
//!
//! Boolean participates in the numeric family as 0/1; temporal kinds reduce
//! to epoch milliseconds. Complex, String and Binary stand outside every
//! class and get dedicated comparison rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant tag for every value kind.
///
/// The `u8` representation is the canonical tag byte used by the binary
/// codec and by canonical hashing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Kind {
    /// Kindless null.
    Null = 0x00,
    /// Boolean.
    Boolean = 0x01,
    /// 32-bit signed integer.
    Int = 0x02,
    /// 64-bit signed integer.
    Long = 0x03,
    /// IEEE 754 binary32.
    Float = 0x04,
    /// IEEE 754 binary64.
    Double = 0x05,
    /// Fixed-scale numeric: 64-bit integer with 6 implied decimal digits.
    Numeric = 0x06,
    /// Arbitrary-precision decimal.
    Decimal = 0x07,
    /// Complex number (real + imaginary doubles).
    Complex = 0x08,
    /// Calendar date as an epoch-millisecond instant at midnight UTC.
    Date = 0x09,
    /// Time of day in milliseconds since midnight.
    Time = 0x0A,
    /// Point in time as epoch milliseconds.
    Timestamp = 0x0B,
    /// Time of day qualified by a fixed UTC offset.
    ZonedTime = 0x0C,
    /// Epoch-millisecond instant qualified by a fixed UTC offset.
    ZonedTimestamp = 0x0D,
    /// Epoch second + nanosecond-of-second pair.
    Instant = 0x0E,
    /// Raw byte sequence.
    Binary = 0x0F,
    /// UTF-8 text.
    String = 0x10,
    /// Ordered list of values.
    List = 0x11,
    /// Insertion-ordered set of values.
    Set = 0x12,
    /// Insertion-ordered key -> value mapping.
    Map = 0x13,
    /// Fixed-length array of doubles.
    DenseVector = 0x14,
    /// Sparse fixed-length vector of doubles (stored nonzero runs).
    SparseVector = 0x15,
}

/// All kinds, in tag order. Useful for exhaustive matrix tests.
pub const ALL_KINDS: [Kind; 22] = [
    Kind::Null,
    Kind::Boolean,
    Kind::Int,
    Kind::Long,
    Kind::Float,
    Kind::Double,
    Kind::Numeric,
    Kind::Decimal,
    Kind::Complex,
    Kind::Date,
    Kind::Time,
    Kind::Timestamp,
    Kind::ZonedTime,
    Kind::ZonedTimestamp,
    Kind::Instant,
    Kind::Binary,
    Kind::String,
    Kind::List,
    Kind::Set,
    Kind::Map,
    Kind::DenseVector,
    Kind::SparseVector,
];

impl Kind {
    /// Get the raw tag byte.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Construct from a raw tag byte.
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(Kind::Null),
            0x01 => Some(Kind::Boolean),
            0x02 => Some(Kind::Int),
            0x03 => Some(Kind::Long),
            0x04 => Some(Kind::Float),
            0x05 => Some(Kind::Double),
            0x06 => Some(Kind::Numeric),
            0x07 => Some(Kind::Decimal),
            0x08 => Some(Kind::Complex),
            0x09 => Some(Kind::Date),
            0x0A => Some(Kind::Time),
            0x0B => Some(Kind::Timestamp),
            0x0C => Some(Kind::ZonedTime),
            0x0D => Some(Kind::ZonedTimestamp),
            0x0E => Some(Kind::Instant),
            0x0F => Some(Kind::Binary),
            0x10 => Some(Kind::String),
            0x11 => Some(Kind::List),
            0x12 => Some(Kind::Set),
            0x13 => Some(Kind::Map),
            0x14 => Some(Kind::DenseVector),
            0x15 => Some(Kind::SparseVector),
            _ => None,
        }
    }

    /// True for members of the numeric comparison family.
    ///
    /// Boolean participates as 0/1; the temporal kinds participate via their
    /// millisecond reduction. Complex is NOT a member (it has its own
    /// real-then-imaginary rule).
    pub const fn is_numeric_family(self) -> bool {
        matches!(
            self,
            Kind::Int
                | Kind::Long
                | Kind::Float
                | Kind::Double
                | Kind::Numeric
                | Kind::Decimal
                | Kind::Boolean
                | Kind::Date
                | Kind::Time
                | Kind::Timestamp
                | Kind::ZonedTime
                | Kind::ZonedTimestamp
                | Kind::Instant
        )
    }

    /// True for the temporal kinds.
    pub const fn is_temporal(self) -> bool {
        matches!(
            self,
            Kind::Date
                | Kind::Time
                | Kind::Timestamp
                | Kind::ZonedTime
                | Kind::ZonedTimestamp
                | Kind::Instant
        )
    }

    /// True for compound kinds (list/set/map/vectors).
    pub const fn is_compound(self) -> bool {
        matches!(
            self,
            Kind::List | Kind::Set | Kind::Map | Kind::DenseVector | Kind::SparseVector
        )
    }

    /// True for the two vector kinds.
    pub const fn is_vector(self) -> bool {
        matches!(self, Kind::DenseVector | Kind::SparseVector)
    }

    /// Get the lowercase name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Int => "int",
            Kind::Long => "long",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::Numeric => "numeric",
            Kind::Decimal => "decimal",
            Kind::Complex => "complex",
            Kind::Date => "date",
            Kind::Time => "time",
            Kind::Timestamp => "timestamp",
            Kind::ZonedTime => "zonedtime",
            Kind::ZonedTimestamp => "zonedtimestamp",
            Kind::Instant => "instant",
            Kind::Binary => "binary",
            Kind::String => "string",
            Kind::List => "list",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::DenseVector => "densevector",
            Kind::SparseVector => "sparsevector",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "null" => Ok(Kind::Null),
            "boolean" | "bool" => Ok(Kind::Boolean),
            "int" | "integer" => Ok(Kind::Int),
            "long" => Ok(Kind::Long),
            "float" => Ok(Kind::Float),
            "double" => Ok(Kind::Double),
            "numeric" => Ok(Kind::Numeric),
            "decimal" => Ok(Kind::Decimal),
            "complex" => Ok(Kind::Complex),
            "date" => Ok(Kind::Date),
            "time" => Ok(Kind::Time),
            "timestamp" => Ok(Kind::Timestamp),
            "zonedtime" => Ok(Kind::ZonedTime),
            "zonedtimestamp" => Ok(Kind::ZonedTimestamp),
            "instant" => Ok(Kind::Instant),
            "binary" | "bytes" => Ok(Kind::Binary),
            "string" | "text" => Ok(Kind::String),
            "list" => Ok(Kind::List),
            "set" => Ok(Kind::Set),
            "map" => Ok(Kind::Map),
            "densevector" => Ok(Kind::DenseVector),
            "sparsevector" => Ok(Kind::SparseVector),
            _ => Err(format!("Unknown kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for kind in ALL_KINDS {
            assert_eq!(Kind::from_u8(kind.as_u8()), Some(kind));
        }
        assert_eq!(Kind::from_u8(0x16), None);
        assert_eq!(Kind::from_u8(0xFF), None);
    }

    #[test]
    fn test_classes() {
        assert!(Kind::Boolean.is_numeric_family());
        assert!(Kind::Instant.is_numeric_family());
        assert!(!Kind::Complex.is_numeric_family());
        assert!(!Kind::String.is_numeric_family());

        assert!(Kind::ZonedTime.is_temporal());
        assert!(!Kind::Numeric.is_temporal());

        assert!(Kind::SparseVector.is_compound());
        assert!(Kind::SparseVector.is_vector());
        assert!(Kind::Map.is_compound());
        assert!(!Kind::Map.is_vector());
        assert!(!Kind::Binary.is_compound());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("long".parse::<Kind>().unwrap(), Kind::Long);
        assert_eq!("DenseVector".parse::<Kind>().unwrap(), Kind::DenseVector);
        assert_eq!("bytes".parse::<Kind>().unwrap(), Kind::Binary);
        assert!("flake".parse::<Kind>().is_err());
    }

    #[test]
    fn test_all_kinds_complete() {
        // Every tag byte 0x00..=0x15 is covered, and names are unique
        let mut names = std::collections::HashSet::new();
        for (i, kind) in ALL_KINDS.iter().enumerate() {
            assert_eq!(kind.as_u8() as usize, i);
            assert!(names.insert(kind.name()));
        }
    }
}
