//! Lp (Minkowski) norms and the distance bounds built on them.
//!
//! [`LpNorm`] is a closed set of variants: Manhattan (p = 1) and Euclidean
//! (p = 2) get dedicated kernels, every other finite `p >= 1` goes through the
//! general power/root path.

pub mod scalar;
pub mod spatial;

use crate::constants::norm::{EUCLIDEAN_EXPONENT, MANHATTAN_EXPONENT};
use crate::error::{check_dimensions, Operands, Result, SpatialError};
use crate::vector::NumberVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated Minkowski exponent: finite and at least 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Exponent(f64);

impl Exponent {
    /// Validate `p`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExponent` if `p` is NaN, infinite, or below 1.
    pub fn new(p: f64) -> Result<Self> {
        if p.is_finite() && p >= 1.0 {
            Ok(Self(p))
        } else {
            tracing::warn!(p, "rejecting exponent that does not define a metric");
            Err(SpatialError::InvalidExponent(p))
        }
    }

    /// The raw exponent value.
    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Supported Lp norms.
///
/// Serialized as the bare exponent (`1.0`, `2.0`, `3.5`, ...), and validated
/// again on deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum LpNorm {
    /// Manhattan (L1) distance: sum(|a[i] - b[i]|)
    Manhattan,
    /// Euclidean (L2) distance: sqrt(sum((a[i] - b[i])^2))
    #[default]
    Euclidean,
    /// General Minkowski distance: (sum(|a[i] - b[i]|^p))^(1/p)
    Minkowski(Exponent),
}

impl LpNorm {
    /// Build the norm for exponent `p`.
    ///
    /// `p == 1` and `p == 2` map to the specialized variants.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExponent` if `p` is NaN, infinite, or below 1.
    pub fn new(p: f64) -> Result<Self> {
        let exponent = Exponent::new(p)?;
        Ok(if p == MANHATTAN_EXPONENT {
            LpNorm::Manhattan
        } else if p == EUCLIDEAN_EXPONENT {
            LpNorm::Euclidean
        } else {
            LpNorm::Minkowski(exponent)
        })
    }

    /// The exponent `p` of this norm.
    #[inline]
    pub fn exponent(&self) -> f64 {
        match self {
            LpNorm::Manhattan => MANHATTAN_EXPONENT,
            LpNorm::Euclidean => EUCLIDEAN_EXPONENT,
            LpNorm::Minkowski(p) => p.get(),
        }
    }

    /// Fold per-axis differences into this norm's accumulated sum.
    ///
    /// For Euclidean this is the sum of squares, for Manhattan the sum of
    /// absolute values, otherwise sum(|delta|^p).
    #[inline]
    pub fn accumulate(&self, deltas: impl Iterator<Item = f64>) -> f64 {
        match self {
            LpNorm::Manhattan => scalar::sum_of_abs(deltas),
            LpNorm::Euclidean => scalar::sum_of_squares(deltas),
            LpNorm::Minkowski(p) => scalar::sum_of_powers(deltas, p.get()),
        }
    }

    /// Turn an accumulated sum into a distance by taking the p-th root.
    #[inline]
    pub fn finish(&self, accumulated: f64) -> f64 {
        match self {
            LpNorm::Manhattan => accumulated,
            LpNorm::Euclidean => accumulated.sqrt(),
            LpNorm::Minkowski(p) => accumulated.powf(p.get().recip()),
        }
    }

    /// Accumulated (root-free) distance between two vectors.
    pub fn accumulated_distance<V1, V2>(&self, v1: &V1, v2: &V2) -> Result<f64>
    where
        V1: NumberVector + ?Sized,
        V2: NumberVector + ?Sized,
    {
        let dim = check_dimensions(
            Operands::VectorVector,
            v1.dimensionality(),
            v2.dimensionality(),
        )?;
        Ok(self.accumulate((0..dim).map(|d| v1.value(d) - v2.value(d))))
    }
}

impl From<LpNorm> for f64 {
    fn from(norm: LpNorm) -> Self {
        norm.exponent()
    }
}

impl TryFrom<f64> for LpNorm {
    type Error = SpatialError;

    fn try_from(p: f64) -> Result<Self> {
        LpNorm::new(p)
    }
}

impl fmt::Display for LpNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LpNorm::Manhattan => f.write_str("manhattan"),
            LpNorm::Euclidean => f.write_str("euclidean"),
            LpNorm::Minkowski(p) => write!(f, "lp:{}", p.get()),
        }
    }
}

impl FromStr for LpNorm {
    type Err = SpatialError;

    /// Accepts `manhattan`/`l1`, `euclidean`/`l2`, `lp:<p>`, or a bare exponent.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "manhattan" | "l1" => Ok(LpNorm::Manhattan),
            "euclidean" | "l2" => Ok(LpNorm::Euclidean),
            other => {
                let raw = other.strip_prefix("lp:").unwrap_or(other);
                let p: f64 = raw.parse().map_err(|_| {
                    SpatialError::invalid_parameter(format!("unrecognized norm '{s}'"))
                })?;
                LpNorm::new(p)
            }
        }
    }
}
