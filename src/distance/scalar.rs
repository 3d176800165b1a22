//! Scalar accumulation kernels.
//!
//! Each norm is split in two steps: accumulate the per-axis differences into a
//! single sum, then finish that sum into a distance. The spatial bounds reuse
//! the same kernels on clamped or interval differences, so every operation
//! takes exactly one root at the end.

use crate::error::{check_dimensions, Operands, Result};

/// Sum of squared differences: sum(delta^2).
#[inline]
pub fn sum_of_squares(deltas: impl Iterator<Item = f64>) -> f64 {
    deltas.map(|delta| delta * delta).sum()
}

/// Sum of absolute differences: sum(|delta|).
#[inline]
pub fn sum_of_abs(deltas: impl Iterator<Item = f64>) -> f64 {
    deltas.map(f64::abs).sum()
}

/// Sum of powered absolute differences: sum(|delta|^p).
#[inline]
pub fn sum_of_powers(deltas: impl Iterator<Item = f64>, p: f64) -> f64 {
    deltas.map(|delta| delta.abs().powf(p)).sum()
}

#[inline]
fn deltas<'a>(a: &'a [f64], b: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
    a.iter().zip(b.iter()).map(|(x, y)| x - y)
}

/// Compute the Euclidean (L2) distance between two vectors.
///
/// Returns sqrt(sum((a[i] - b[i])^2))
#[inline]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    euclidean_distance_squared(a, b).map(f64::sqrt)
}

/// Compute the squared Euclidean distance between two vectors.
///
/// Returns sum((a[i] - b[i])^2)
///
/// Use this when only relative distances matter; it skips the sqrt.
#[inline]
pub fn euclidean_distance_squared(a: &[f64], b: &[f64]) -> Result<f64> {
    check_dimensions(Operands::VectorVector, a.len(), b.len())?;
    Ok(sum_of_squares(deltas(a, b)))
}

/// Compute the Manhattan (L1) distance between two vectors.
///
/// Returns sum(|a[i] - b[i]|)
#[inline]
pub fn manhattan_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    check_dimensions(Operands::VectorVector, a.len(), b.len())?;
    Ok(sum_of_abs(deltas(a, b)))
}

/// Compute the Minkowski (Lp) distance between two vectors.
///
/// Returns (sum(|a[i] - b[i]|^p))^(1/p). The exponent is not validated here;
/// use [`LpNorm::new`](super::LpNorm::new) for that.
#[inline]
pub fn minkowski_distance(a: &[f64], b: &[f64], p: f64) -> Result<f64> {
    check_dimensions(Operands::VectorVector, a.len(), b.len())?;
    Ok(sum_of_powers(deltas(a, b), p).powf(p.recip()))
}
