//! Exact fixed-point decimal values
//!
//! Prices and quantities are carried as an integer mantissa scaled by a
//! power of ten. All conversions stay in integer arithmetic, so no
//! floating-point rounding can leak into downstream values.

use crate::error::DecimalError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Powers of ten used when widening a mantissa to a deeper exponent
const POW10: [i64; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Formats a mantissa/exponent pair as its exact digit sequence.
///
/// Digits are emitted least significant first, with the decimal point
/// inserted when the running exponent reaches zero and the sign emitted
/// last, then the buffer is reversed. For exponents in `[-18, 0]` this is
/// the exact inverse of [`Decimal::parse`].
pub fn dtoa(mantissa: i64, exponent: i8) -> String {
    let is_negative = mantissa < 0;
    let mut rest = mantissa.unsigned_abs();
    let mut exponent = i32::from(exponent);

    let mut buf: Vec<char> = Vec::new();
    loop {
        buf.push(char::from(b'0' + (rest % 10) as u8));
        rest /= 10;
        exponent += 1;
        if exponent == 0 {
            buf.push('.');
        }
        if !(rest > 0 || exponent < 1) {
            break;
        }
    }
    if is_negative {
        buf.push('-');
    }

    buf.iter().rev().collect()
}

/// Decimal value with arbitrary precision: `mantissa * 10^exponent`.
///
/// No normalization is applied; trailing zeros in the mantissa are kept
/// exactly as parsed, so `1.00000000` and `1` stay distinguishable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decimal {
    pub mantissa: i64,
    pub exponent: i8,
}

impl Decimal {
    /// Parses the ascii representation of a number.
    ///
    /// Scans an optional leading `-`, then digits with an optional `.`,
    /// decrementing the exponent once per digit after the point. Input is
    /// not validated: characters outside `-?digits[.digits]` are folded
    /// through the digit accumulator and yield an unspecified value.
    pub fn parse(value: &str) -> Decimal {
        let bytes = value.as_bytes();
        let (is_negative, digits) = match bytes.first() {
            Some(b'-') => (true, &bytes[1..]),
            _ => (false, bytes),
        };

        let mut mantissa: i64 = 0;
        let mut exponent: i8 = 0;
        let mut in_fraction = false;
        for &b in digits {
            if b == b'.' {
                in_fraction = true;
            } else {
                mantissa = mantissa
                    .wrapping_mul(10)
                    .wrapping_add(i64::from(b) - i64::from(b'0'));
                if in_fraction {
                    exponent -= 1;
                }
            }
        }

        if is_negative {
            mantissa = mantissa.wrapping_neg();
        }
        Decimal { mantissa, exponent }
    }

    /// Rescales to the fixed -9 exponent.
    ///
    /// Valid for source exponents in `[-9, 0]`; anything outside that
    /// range fails with [`DecimalError::UnsupportedExponent`]. Callers
    /// needing a placeholder for the failed conversion use
    /// [`Decimal9::NULL`], whose mantissa no real value can reach.
    pub fn to_decimal9(&self) -> Result<Decimal9, DecimalError> {
        rescale(self.mantissa, self.exponent, Decimal9::EXPONENT).map(Decimal9::new)
    }

    /// Rescales to the fixed -8 exponent; source exponents in `[-8, 0]`.
    pub fn to_decimal8(&self) -> Result<Decimal8, DecimalError> {
        rescale(self.mantissa, self.exponent, Decimal8::EXPONENT).map(Decimal8::new)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", dtoa(self.mantissa, self.exponent))
    }
}

fn rescale(mantissa: i64, exponent: i8, target: i8) -> Result<i64, DecimalError> {
    if exponent > 0 || exponent < target {
        return Err(DecimalError::UnsupportedExponent(exponent));
    }
    Ok(mantissa * POW10[(exponent - target) as usize])
}

/// Decimal with the exponent fixed at -9 (nanounit precision)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decimal9 {
    pub mantissa: i64,
    pub exponent: i8,
}

impl Decimal9 {
    pub const EXPONENT: i8 = -9;

    /// Sentinel for a failed or absent conversion
    pub const NULL: Decimal9 = Decimal9 {
        mantissa: i64::MIN,
        exponent: Self::EXPONENT,
    };

    pub fn new(mantissa: i64) -> Self {
        Self {
            mantissa,
            exponent: Self::EXPONENT,
        }
    }
}

impl Default for Decimal9 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Decimal9 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", dtoa(self.mantissa, Self::EXPONENT))
    }
}

/// Decimal with the exponent fixed at -8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decimal8 {
    pub mantissa: i64,
    pub exponent: i8,
}

impl Decimal8 {
    pub const EXPONENT: i8 = -8;

    /// Sentinel for a failed or absent conversion
    pub const NULL: Decimal8 = Decimal8 {
        mantissa: i64::MIN,
        exponent: Self::EXPONENT,
    };

    pub fn new(mantissa: i64) -> Self {
        Self {
            mantissa,
            exponent: Self::EXPONENT,
        }
    }
}

impl Default for Decimal8 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Decimal8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", dtoa(self.mantissa, Self::EXPONENT))
    }
}
