//! Quantity at the fixed wire exponent

use crate::decimal::{dtoa, Decimal, Decimal8};
use crate::error::DecimalError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Exponent every quantity is exchanged at
pub const QUANTITY_EXPONENT: i8 = Decimal8::EXPONENT;

/// Quantity with the exponent fixed at -8.
///
/// Ordering and equality compare the mantissa only, like [`crate::Price`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quantity {
    pub mantissa: i64,
    pub exponent: i8,
}

impl Quantity {
    /// Sentinel carrying a mantissa no real quantity can reach
    pub const NULL: Quantity = Quantity {
        mantissa: i64::MIN,
        exponent: QUANTITY_EXPONENT,
    };

    pub fn new(mantissa: i64) -> Self {
        Self {
            mantissa,
            exponent: QUANTITY_EXPONENT,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::new(0)
    }
}

impl From<Decimal8> for Quantity {
    fn from(d: Decimal8) -> Self {
        Self::new(d.mantissa)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.mantissa == other.mantissa
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.mantissa.cmp(&other.mantissa)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", dtoa(self.mantissa, QUANTITY_EXPONENT))
    }
}

/// Parses a quantity string and rescales it to the fixed -8 exponent.
///
/// Propagates [`DecimalError::UnsupportedExponent`] for inputs with more
/// than eight fractional digits.
pub fn parse_quantity(qty: &str) -> Result<Quantity, DecimalError> {
    let d8 = Decimal::parse(qty).to_decimal8()?;
    Ok(Quantity::from(d8))
}
