//! Error types for the market-by-price core

use thiserror::Error;

/// Errors from fixed-exponent decimal conversion
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalError {
    #[error("Unsupported exponent {0} for fixed-point conversion")]
    UnsupportedExponent(i8),
}

/// Errors from the level-array depth engine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthError {
    #[error("Level buffer is full")]
    CapacityExceeded,
}
