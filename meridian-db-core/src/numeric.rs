//! Fixed-scale numeric type
//!
//! `Numeric` stores `round(value * 1_000_000)` in a signed 64-bit integer:
//! six implied decimal digits, no floating-point drift. All arithmetic,
//! equality, hashing and ordering operate on the scaled integer, so two
//! values that round to the same six decimals are bit-identical — the
//! property the interning cache and hash joins rely on.
//!
//! This is a deliberate fixed-point trade: anything beyond the sixth
//! fractional digit is rounded away at construction (half away from zero).
//! Use the arbitrary-precision Decimal kind when full precision matters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Implied scale factor: six decimal digits.
pub const SCALE: i64 = 1_000_000;

/// Fixed-scale numeric value (six implied decimal digits).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Numeric(i64);

impl Numeric {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One.
    pub const ONE: Self = Self(SCALE);

    /// Construct from a raw scaled integer (`value * 1_000_000`).
    #[inline]
    pub const fn from_scaled(scaled: i64) -> Self {
        Self(scaled)
    }

    /// Construct from a double, rounding half away from zero at the sixth
    /// decimal digit.
    pub fn from_f64(value: f64) -> Self {
        Self((value * SCALE as f64).round() as i64)
    }

    /// Construct from a whole integer.
    pub const fn from_i64(value: i64) -> Self {
        Self(value * SCALE)
    }

    /// Best-effort text constructor.
    ///
    /// Blank or malformed input yields `None` (the literal-parser contract:
    /// total, never an error). Accepts an optional sign, digits, an optional
    /// fraction and an optional exponent.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        let value: f64 = s.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Self::from_f64(value))
    }

    /// The raw scaled integer.
    #[inline]
    pub const fn scaled(self) -> i64 {
        self.0
    }

    /// Reconstruct the double: `scaled / 1_000_000`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Truncate toward zero to a whole integer.
    #[inline]
    pub const fn trunc(self) -> i64 {
        self.0 / SCALE
    }

    /// True if the value is exactly zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    ///
    /// ARITHMETIC
    ///
    /// All arithmetic stays in the scaled-integer domain, so results are
    /// exact to the sixth decimal and equal results are bit-identical.
    /// Overflow yields `None`.
    ///

    /// Checked addition.
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(scaled) => Some(Self(scaled)),
            None => None,
        }
    }

    /// Checked subtraction.
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(scaled) => Some(Self(scaled)),
            None => None,
        }
    }

    /// Checked multiplication, rounding half away from zero at the sixth
    /// decimal. The product runs through i128 so intermediate overflow
    /// cannot occur.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        let wide = self.0 as i128 * other.0 as i128;
        let scaled = div_round_half_away(wide, SCALE as i128);
        i64::try_from(scaled).ok().map(Self)
    }

    /// Checked division, rounding half away from zero at the sixth decimal.
    /// Division by zero yields `None`.
    pub fn checked_div(self, other: Self) -> Option<Self> {
        if other.0 == 0 {
            return None;
        }
        let wide = self.0 as i128 * SCALE as i128;
        let scaled = div_round_half_away(wide, other.0 as i128);
        i64::try_from(scaled).ok().map(Self)
    }

    /// Negation. `None` only for the unrepresentable `i64::MIN` scale.
    pub const fn checked_neg(self) -> Option<Self> {
        match self.0.checked_neg() {
            Some(scaled) => Some(Self(scaled)),
            None => None,
        }
    }

    /// Absolute value, saturating at the representable maximum.
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }
}

/// Integer division rounding half away from zero.
fn div_round_half_away(num: i128, den: i128) -> i128 {
    let quotient = num / den;
    let remainder = num % den;
    if remainder.abs() * 2 >= den.abs() {
        quotient + num.signum() * den.signum()
    } else {
        quotient
    }
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Self::from_i64(v)
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Self::from_f64(v)
    }
}

impl fmt::Display for Numeric {
    /// Shortest decimal form that reproduces the scaled integer: trailing
    /// fraction zeros are trimmed, whole values print with no point.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = (self.0 % SCALE).abs();
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let sign = if self.0 < 0 && whole == 0 { "-" } else { "" };
        let mut digits = format!("{:06}", frac);
        while digits.ends_with('0') {
            digits.pop();
        }
        write!(f, "{}{}.{}", sign, whole, digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_at_sixth_decimal() {
        // Half rounds away from zero
        assert_eq!(Numeric::from_f64(1.2345675).scaled(), 1_234_568);
        assert!((Numeric::from_f64(1.2345675).to_f64() - 1.234568).abs() < 1e-12);
        assert_eq!(Numeric::from_f64(-1.2345675).scaled(), -1_234_568);
        // Below the half point truncates
        assert_eq!(Numeric::from_f64(1.2345674).scaled(), 1_234_567);
    }

    #[test]
    fn test_text_equality_after_rounding() {
        // Two lexically different inputs with the same rounded value are ==
        let a = Numeric::parse("1.23456749").unwrap();
        let b = Numeric::parse("1.2345675000001").unwrap();
        assert_ne!(a, b);
        let c = Numeric::parse("2.5000001").unwrap();
        let d = Numeric::parse("2.50000012").unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn test_parse_blank_and_malformed() {
        assert_eq!(Numeric::parse(""), None);
        assert_eq!(Numeric::parse("  "), None);
        assert_eq!(Numeric::parse("abc"), None);
        assert_eq!(Numeric::parse("1.2.3"), None);
        assert_eq!(Numeric::parse("inf"), None);
        assert_eq!(Numeric::parse("NaN"), None);
        assert_eq!(Numeric::parse("1e3"), Some(Numeric::from_i64(1000)));
    }

    #[test]
    fn test_display_trimming() {
        assert_eq!(Numeric::from_i64(42).to_string(), "42");
        assert_eq!(Numeric::from_f64(1.5).to_string(), "1.5");
        assert_eq!(Numeric::from_f64(1.230000).to_string(), "1.23");
        assert_eq!(Numeric::from_scaled(1_234_568).to_string(), "1.234568");
        assert_eq!(Numeric::from_f64(-0.25).to_string(), "-0.25");
        assert_eq!(Numeric::from_f64(-1.25).to_string(), "-1.25");
    }

    #[test]
    fn test_trunc_toward_zero() {
        assert_eq!(Numeric::from_f64(2.9).trunc(), 2);
        assert_eq!(Numeric::from_f64(-2.9).trunc(), -2);
    }

    #[test]
    fn test_ordering_on_scaled() {
        assert!(Numeric::from_f64(1.000001) > Numeric::from_i64(1));
        assert!(Numeric::from_f64(-0.000001) < Numeric::ZERO);
    }

    #[test]
    fn test_arithmetic_is_exact_in_scaled_domain() {
        let a = Numeric::from_f64(0.1);
        let b = Numeric::from_f64(0.2);
        // The classic float trap: 0.1 + 0.2 is exactly 0.3 here
        assert_eq!(a.checked_add(b), Some(Numeric::from_f64(0.3)));
        assert_eq!(
            Numeric::from_f64(0.3).checked_sub(b),
            Some(Numeric::from_f64(0.1))
        );
    }

    #[test]
    fn test_mul_div_rounding() {
        let a = Numeric::from_f64(1.5);
        let b = Numeric::from_f64(2.5);
        assert_eq!(a.checked_mul(b), Some(Numeric::from_f64(3.75)));
        assert_eq!(b.checked_div(a), Some(Numeric::parse("1.666667").unwrap()));
        // Half rounds away from zero in both signs
        assert_eq!(
            Numeric::from_scaled(3).checked_div(Numeric::from_i64(2)),
            Some(Numeric::from_scaled(2))
        );
        assert_eq!(
            Numeric::from_scaled(-3).checked_div(Numeric::from_i64(2)),
            Some(Numeric::from_scaled(-2))
        );
        assert_eq!(a.checked_div(Numeric::ZERO), None);
    }

    #[test]
    fn test_arithmetic_overflow() {
        let max = Numeric::from_scaled(i64::MAX);
        assert_eq!(max.checked_add(Numeric::from_scaled(1)), None);
        assert_eq!(max.checked_mul(Numeric::from_i64(2)), None);
        assert_eq!(Numeric::from_scaled(i64::MIN).checked_neg(), None);
        assert_eq!(Numeric::from_scaled(i64::MIN).abs().scaled(), i64::MAX);
    }
}
