//! Distance bounds between points and axis-aligned regions.
//!
//! Each operation reduces to a per-axis difference which is then folded with
//! the norm's accumulation kernel and rooted once:
//!
//! | operation | per-axis difference |
//! |-----------|---------------------|
//! | [`min_dist`] | `value(d)` minus its clamp into `[min(d), max(d)]` |
//! | [`mbr_dist`] | gap between the two intervals, 0 if they overlap |
//! | [`center_distance`] | difference of the interval centers |
//!
//! `min_dist` and `mbr_dist` are lower bounds and safe for pruning.
//! `center_distance` is an ordering heuristic only.

use super::LpNorm;
use crate::error::{check_dimensions, Operands, Result};
use crate::region::SpatialComparable;
use crate::vector::NumberVector;

/// Difference between `value` and the nearest point of `[min, max]`.
#[inline]
pub fn clamp_delta(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        value - min
    } else if value > max {
        value - max
    } else {
        0.0
    }
}

/// Gap between `[min1, max1]` and `[min2, max2]`; zero when they overlap or touch.
#[inline]
pub fn interval_gap(min1: f64, max1: f64, min2: f64, max2: f64) -> f64 {
    if max1 < min2 {
        min2 - max1
    } else if min1 > max2 {
        min1 - max2
    } else {
        0.0
    }
}

/// Minimum distance from `vector` to any point of `region`.
///
/// Zero when the vector lies inside the region or on its boundary.
///
/// # Errors
///
/// Returns `DimensionMismatch` if region and vector differ in dimensionality.
pub fn min_dist<R, V>(norm: &LpNorm, region: &R, vector: &V) -> Result<f64>
where
    R: SpatialComparable + ?Sized,
    V: NumberVector + ?Sized,
{
    let dim = check_dimensions(
        Operands::RegionVector,
        region.dimensionality(),
        vector.dimensionality(),
    )?;
    let acc = norm.accumulate(
        (0..dim).map(|d| clamp_delta(vector.value(d), region.min(d), region.max(d))),
    );
    Ok(norm.finish(acc))
}

/// Minimum distance between any point of `region1` and any point of `region2`.
///
/// Zero exactly when the boxes intersect (touching counts).
///
/// # Errors
///
/// Returns `DimensionMismatch` if the regions differ in dimensionality.
pub fn mbr_dist<R1, R2>(norm: &LpNorm, region1: &R1, region2: &R2) -> Result<f64>
where
    R1: SpatialComparable + ?Sized,
    R2: SpatialComparable + ?Sized,
{
    let dim = check_dimensions(
        Operands::RegionRegion,
        region1.dimensionality(),
        region2.dimensionality(),
    )?;
    // Overlapping axes yield an explicit zero term; the others still count.
    let acc = norm.accumulate((0..dim).map(|d| {
        interval_gap(region1.min(d), region1.max(d), region2.min(d), region2.max(d))
    }));
    Ok(norm.finish(acc))
}

/// Distance between the centers of the two regions.
///
/// This is not a bound: overlapping regions can have a non-zero center
/// distance. Use it to order candidates, never to prune them.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the regions differ in dimensionality.
pub fn center_distance<R1, R2>(norm: &LpNorm, region1: &R1, region2: &R2) -> Result<f64>
where
    R1: SpatialComparable + ?Sized,
    R2: SpatialComparable + ?Sized,
{
    let dim = check_dimensions(
        Operands::RegionRegion,
        region1.dimensionality(),
        region2.dimensionality(),
    )?;
    let acc = norm.accumulate((0..dim).map(|d| region1.center(d) - region2.center(d)));
    Ok(norm.finish(acc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpatialError;
    use crate::region::BoundingBox;

    const EPS: f64 = 1e-12;

    fn bbox(min: &[f64], max: &[f64]) -> BoundingBox {
        BoundingBox::new(min.to_vec(), max.to_vec()).unwrap()
    }

    #[test]
    fn test_clamp_delta() {
        assert_eq!(clamp_delta(5.0, 0.0, 2.0), 3.0);
        assert_eq!(clamp_delta(-1.5, 0.0, 2.0), -1.5);
        assert_eq!(clamp_delta(1.0, 0.0, 2.0), 0.0);
        assert_eq!(clamp_delta(2.0, 0.0, 2.0), 0.0);
    }

    #[test]
    fn test_interval_gap() {
        assert_eq!(interval_gap(0.0, 1.0, 3.0, 4.0), 2.0);
        assert_eq!(interval_gap(3.0, 4.0, 0.0, 1.0), 2.0);
        assert_eq!(interval_gap(0.0, 2.0, 1.0, 3.0), 0.0);
        assert_eq!(interval_gap(0.0, 1.0, 1.0, 2.0), 0.0);
    }

    #[test]
    fn test_min_dist_outside_one_axis() {
        let region = bbox(&[0.0, 0.0], &[2.0, 2.0]);
        let d = min_dist(&LpNorm::Euclidean, &region, &[5.0, 1.0]).unwrap();
        assert!((d - 3.0).abs() < EPS);
    }

    #[test]
    fn test_min_dist_corner() {
        let region = bbox(&[0.0, 0.0], &[1.0, 1.0]);
        let d = min_dist(&LpNorm::Euclidean, &region, &[4.0, 5.0]).unwrap();
        assert!((d - 5.0).abs() < EPS);

        let l1 = min_dist(&LpNorm::Manhattan, &region, &[4.0, 5.0]).unwrap();
        assert!((l1 - 7.0).abs() < EPS);
    }

    #[test]
    fn test_min_dist_inside_is_zero() {
        let region = bbox(&[-1.0, -1.0, -1.0], &[1.0, 1.0, 1.0]);
        assert_eq!(
            min_dist(&LpNorm::Euclidean, &region, &[0.0, 1.0, -1.0]).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_mbr_dist_partial_overlap() {
        let r1 = bbox(&[0.0, 0.0], &[1.0, 1.0]);
        let r2 = bbox(&[3.0, 0.0], &[4.0, 1.0]);
        let d = mbr_dist(&LpNorm::Euclidean, &r1, &r2).unwrap();
        assert!((d - 2.0).abs() < EPS);
    }

    #[test]
    fn test_mbr_dist_disjoint_on_all_axes() {
        let r1 = bbox(&[0.0, 0.0], &[1.0, 1.0]);
        let r2 = bbox(&[4.0, 5.0], &[6.0, 6.0]);
        let d = mbr_dist(&LpNorm::Euclidean, &r1, &r2).unwrap();
        assert!((d - 5.0).abs() < EPS);
    }

    #[test]
    fn test_mbr_dist_overlap_and_center_distance() {
        let r1 = bbox(&[0.0, 0.0], &[2.0, 2.0]);
        let r2 = bbox(&[1.0, 1.0], &[3.0, 3.0]);
        assert_eq!(mbr_dist(&LpNorm::Euclidean, &r1, &r2).unwrap(), 0.0);
        let c = center_distance(&LpNorm::Euclidean, &r1, &r2).unwrap();
        assert!((c - std::f64::consts::SQRT_2).abs() < EPS);
    }

    #[test]
    fn test_dimension_mismatch_pairings() {
        let r2 = bbox(&[0.0, 0.0], &[1.0, 1.0]);
        let r3 = bbox(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0]);
        let norm = LpNorm::Euclidean;

        assert_eq!(
            min_dist(&norm, &r2, &[0.0, 0.0, 0.0]),
            Err(SpatialError::dimension_mismatch(Operands::RegionVector, 2, 3))
        );
        assert_eq!(
            mbr_dist(&norm, &r3, &r2),
            Err(SpatialError::dimension_mismatch(Operands::RegionRegion, 3, 2))
        );
        assert_eq!(
            center_distance(&norm, &r2, &r3),
            Err(SpatialError::dimension_mismatch(Operands::RegionRegion, 2, 3))
        );
    }
}
