//! Error types for forge-spatial operations.
//!
//! Every distance operation checks operand dimensionality before touching any
//! coordinate, so a [`SpatialError::DimensionMismatch`] never comes with a
//! partially accumulated result.

use std::fmt;
use thiserror::Error;

/// Result type alias using [`SpatialError`].
pub type Result<T> = std::result::Result<T, SpatialError>;

/// The pairing of operands a distance call compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operands {
    /// Two vectors, as in `distance`.
    VectorVector,
    /// A region and a vector, as in `min_dist`.
    RegionVector,
    /// Two regions, as in `mbr_dist` and `center_distance`.
    RegionRegion,
}

impl fmt::Display for Operands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operands::VectorVector => "vector and vector",
            Operands::RegionVector => "region and vector",
            Operands::RegionRegion => "region and region",
        };
        f.write_str(s)
    }
}

/// Errors that can occur during forge-spatial operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    /// The two operands of a distance call have different dimensionality.
    #[error("dimension mismatch between {operands}: {left} != {right}")]
    DimensionMismatch {
        /// Which kinds of operands were compared.
        operands: Operands,
        /// Dimensionality of the first operand.
        left: usize,
        /// Dimensionality of the second operand.
        right: usize,
    },

    /// Exponent is below 1 or not finite; such norms are not metrics.
    #[error("invalid exponent: p = {0} (expected a finite value >= 1)")]
    InvalidExponent(f64),

    /// Bounding box could not be constructed from the given bounds.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// Operation requires at least one input vector.
    #[error("empty input: operation requires at least one vector")]
    EmptyInput,

    /// Invalid parameter value provided.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SpatialError {
    /// Creates a new `DimensionMismatch` error.
    pub fn dimension_mismatch(operands: Operands, left: usize, right: usize) -> Self {
        Self::DimensionMismatch {
            operands,
            left,
            right,
        }
    }

    /// Creates a new `InvalidRegion` error.
    pub fn invalid_region(msg: impl Into<String>) -> Self {
        Self::InvalidRegion(msg.into())
    }

    /// Creates a new `InvalidParameter` error.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Fails with `DimensionMismatch` unless `left == right`.
#[inline]
pub(crate) fn check_dimensions(operands: Operands, left: usize, right: usize) -> Result<usize> {
    if left == right {
        Ok(left)
    } else {
        Err(SpatialError::dimension_mismatch(operands, left, right))
    }
}
