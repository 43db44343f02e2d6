//! Price at the fixed wire exponent

use crate::decimal::{dtoa, Decimal, Decimal9};
use crate::error::DecimalError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Exponent every price is exchanged at
pub const PRICE_EXPONENT: i8 = Decimal9::EXPONENT;

/// Price with the exponent fixed at -9 (nanounit precision).
///
/// Ordering and equality compare the mantissa only; the exponent is fixed
/// at construction and never compared at runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Price {
    pub mantissa: i64,
    pub exponent: i8,
}

impl Price {
    /// Sentinel carrying a mantissa no real price can reach
    pub const NULL: Price = Price {
        mantissa: i64::MIN,
        exponent: PRICE_EXPONENT,
    };

    pub fn new(mantissa: i64) -> Self {
        Self {
            mantissa,
            exponent: PRICE_EXPONENT,
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::new(0)
    }
}

impl From<Decimal9> for Price {
    fn from(d: Decimal9) -> Self {
        Self::new(d.mantissa)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.mantissa == other.mantissa
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.mantissa.cmp(&other.mantissa)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", dtoa(self.mantissa, PRICE_EXPONENT))
    }
}

/// Parses a price string and rescales it to the fixed -9 exponent.
///
/// Propagates [`DecimalError::UnsupportedExponent`] for inputs with more
/// than nine fractional digits.
pub fn parse_price(px: &str) -> Result<Price, DecimalError> {
    let d9 = Decimal::parse(px).to_decimal9()?;
    Ok(Price::from(d9))
}
