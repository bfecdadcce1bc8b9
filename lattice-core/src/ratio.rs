//! # Ratio Module
//!
//! Parsing and formatting of just-intonation ratios.
//!
//! A ratio is written `n/d` where both sides are plain decimal digits. Signs,
//! whitespace, decimal points and empty sides are all rejected, as is a zero
//! on either side.

use std::fmt;
use std::str::FromStr;

use crate::error::{LatticeError, Result};

/// A musical interval as a pair of positive integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    pub numerator: u64,
    pub denominator: u64,
}

impl Ratio {
    /// The unison, `1/1`.
    pub const UNISON: Ratio = Ratio { numerator: 1, denominator: 1 };

    /// Creates a ratio, rejecting zero on either side.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        if denominator == 0 {
            return Err(LatticeError::ZeroDenominator {
                input: format!("{}/{}", numerator, denominator),
            });
        }
        if numerator == 0 {
            return Err(LatticeError::ZeroNumerator {
                input: format!("{}/{}", numerator, denominator),
            });
        }
        Ok(Self { numerator, denominator })
    }

    /// The interval as a frequency multiplier.
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Size of the interval in octaves (`log2` of its value).
    pub fn octaves(&self) -> f64 {
        // Computed as a difference so large components keep their precision.
        (self.numerator as f64).log2() - (self.denominator as f64).log2()
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Ratio {
    type Err = LatticeError;

    fn from_str(input: &str) -> Result<Self> {
        let malformed = || LatticeError::MalformedRatio { input: input.to_string() };

        let (num, den) = input.split_once('/').ok_or_else(malformed)?;
        let numerator = parse_digits(num).ok_or_else(malformed)?;
        let denominator = parse_digits(den).ok_or_else(malformed)?;

        if denominator == 0 {
            return Err(LatticeError::ZeroDenominator { input: input.to_string() });
        }
        if numerator == 0 {
            return Err(LatticeError::ZeroNumerator { input: input.to_string() });
        }
        Ok(Self { numerator, denominator })
    }
}

/// Parses a non-empty run of ASCII digits. `None` on anything else,
/// including values that overflow `u64`.
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
