//! Complex number type and its literal scanner
//!
//! A complex literal is `<real>` or `<real><sign><imag>i`, where each
//! component is an optional sign, a digit run, an optional single `.`
//! fraction and an optional `e`/`E` exponent. The separating sign may be
//! surrounded by spaces (`1.5 - 2i`); the imaginary part must terminate in
//! `i` or `I`.
//!
//! Parsing is total and best-effort: any character that is not valid in the
//! scanner's current state aborts to "invalid", and invalid input yields
//! `None` — the null Complex — never an error.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Complex number: real + imaginary doubles.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Complex {
    /// Real component.
    pub re: f64,
    /// Imaginary component.
    pub im: f64,
}

/// Scanner state for the complex literal state machine.
///
/// Any input character not accepted by the current state aborts the scan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ScanState {
    /// Before the real component: optional sign.
    Sign,
    /// Digit run of the real component (or of the imaginary body).
    Integer,
    /// After the single `.` of the current component.
    Fraction,
    /// Just consumed `e`/`E`: optional exponent sign.
    ExponentSign,
    /// Exponent digit run.
    ExponentDigits,
    /// Between the components: consumed the separator, expecting the
    /// imaginary sign (or spaces).
    ImaginarySign,
    /// Inside the imaginary component body.
    ImaginaryBody,
    /// Consumed the terminal `i`; only end-of-input is valid.
    TerminalI,
}

impl Complex {
    /// Zero.
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Construct from components.
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Construct a real-only complex.
    #[inline]
    pub const fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Best-effort literal scanner. Malformed input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        if s.is_empty() {
            return None;
        }

        let mut state = ScanState::Sign;
        // The component being scanned accumulates here; the real component
        // is moved out when the separator is reached.
        let mut real: Option<String> = None;
        let mut buf = String::new();
        // Set while scanning the imaginary body so shared states know which
        // component they are in.
        let mut in_imaginary = false;
        let mut saw_digit = false;

        for c in s.chars() {
            state = match (state, c) {
                (ScanState::Sign, '+' | '-') => {
                    buf.push(c);
                    ScanState::Integer
                }
                (ScanState::Sign, '0'..='9') => {
                    buf.push(c);
                    saw_digit = true;
                    ScanState::Integer
                }

                (ScanState::Integer, '0'..='9') => {
                    buf.push(c);
                    saw_digit = true;
                    ScanState::Integer
                }
                (ScanState::Integer, '.') if saw_digit => {
                    buf.push(c);
                    ScanState::Fraction
                }
                (ScanState::Integer | ScanState::Fraction, 'e' | 'E') if saw_digit => {
                    buf.push(c);
                    ScanState::ExponentSign
                }
                (ScanState::Fraction, '0'..='9') => {
                    buf.push(c);
                    ScanState::Fraction
                }

                (ScanState::ExponentSign, '+' | '-' | '0'..='9') => {
                    buf.push(c);
                    ScanState::ExponentDigits
                }
                (ScanState::ExponentDigits, '0'..='9') => {
                    buf.push(c);
                    ScanState::ExponentDigits
                }

                // Separator between real and imaginary: sign or space
                (
                    ScanState::Integer | ScanState::Fraction | ScanState::ExponentDigits,
                    '+' | '-',
                ) if !in_imaginary && saw_digit => {
                    real = Some(std::mem::take(&mut buf));
                    buf.push(c);
                    in_imaginary = true;
                    saw_digit = false;
                    ScanState::Integer
                }
                (
                    ScanState::Integer | ScanState::Fraction | ScanState::ExponentDigits,
                    ' ',
                ) if !in_imaginary && saw_digit => {
                    real = Some(std::mem::take(&mut buf));
                    in_imaginary = true;
                    saw_digit = false;
                    ScanState::ImaginarySign
                }
                (ScanState::ImaginarySign, ' ') => ScanState::ImaginarySign,
                (ScanState::ImaginarySign, '+' | '-') => {
                    buf.push(c);
                    ScanState::Integer
                }

                // Spaces after an explicit sign separator (`1.5- 2i` style)
                (ScanState::Integer, ' ') if in_imaginary && !saw_digit && buf.len() == 1 => {
                    ScanState::Integer
                }

                // Terminal i ends the imaginary body
                (
                    ScanState::Integer | ScanState::Fraction | ScanState::ExponentDigits,
                    'i' | 'I',
                ) if in_imaginary && saw_digit => ScanState::TerminalI,

                // Anything else is invalid in the current state
                _ => return None,
            };
        }

        match state {
            // Real-only literal
            ScanState::Integer | ScanState::Fraction | ScanState::ExponentDigits
                if !in_imaginary && saw_digit =>
            {
                let re: f64 = buf.parse().ok()?;
                Some(Self::from_real(re))
            }
            ScanState::TerminalI => {
                let re: f64 = real?.parse().ok()?;
                let im: f64 = buf.parse().ok()?;
                Some(Self::new(re, im))
            }
            _ => None,
        }
    }

    /// True if both components are zero.
    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    /// Total-order comparison: real part first, imaginary as tie-break.
    ///
    /// NaN components fall back to bit comparison so the order stays total.
    pub fn total_cmp(self, other: Self) -> Ordering {
        cmp_f64_total(self.re, other.re).then_with(|| cmp_f64_total(self.im, other.im))
    }
}

/// Total f64 comparison: numeric equality first (so `-0.0 == +0.0`), then
/// the IEEE total order for the NaN cases (`-NaN < -inf … +inf < +NaN`).
pub(crate) fn cmp_f64_total(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.total_cmp(*other) == Ordering::Equal
    }
}

impl Eq for Complex {}

impl fmt::Display for Complex {
    /// Canonical form `<real><sign><imag>i`, e.g. `1.5-2i`, `0+3i`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}
