//! Transaction amounts in minor currency units.
//!
//! Amounts are stored and summed as integers; `rust_decimal` is only used to
//! present them in major units, so no binary floating point is involved.

use crate::error::{ReportError, Result};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// An amount in minor currency units (cents, pence, kopecks).
///
/// # Examples
///
/// ```
/// use card_report::MinorUnits;
///
/// let amount = MinorUnits::from_field("000000000150").unwrap();
/// assert_eq!(amount.value(), 150);
/// assert_eq!(amount.to_string(), "1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct MinorUnits(u64);

impl MinorUnits {
    /// Number of minor units per major unit, as a decimal scale.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = MinorUnits(0);

    pub fn new(value: u64) -> Self {
        MinorUnits(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// Parses a zero-padded amount field.
    ///
    /// Leading `'0'` characters are stripped first; a field of only zeros
    /// (or an empty one) is zero. Anything left must be ASCII digits.
    pub fn from_field(field: &str) -> Result<Self> {
        let significant = strip_leading_zeros(field);
        if significant.is_empty() {
            return Ok(Self::ZERO);
        }
        parse_digits("amount", significant).map(MinorUnits)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(MinorUnits)
    }

    /// The amount in major units with trailing zeros dropped.
    ///
    /// Every digit is kept regardless of magnitude; there is no rounding to
    /// a fixed number of significant digits and no exponent notation.
    pub fn to_major(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), Self::SCALE).normalize()
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_major())
    }
}

pub(crate) fn strip_leading_zeros(field: &str) -> &str {
    field.trim_start_matches('0')
}

/// Parses a field that must consist of ASCII digits only.
///
/// Signs and whitespace are rejected even where `FromStr` would accept them.
pub(crate) fn parse_digits<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    let invalid = || ReportError::InvalidNumber {
        field,
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}
