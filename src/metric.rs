//! The distance facade an index is written against.
//!
//! [`SpatialPrimitiveDistance`] bundles the vector distance with the three
//! region operations. Indexes take `M: SpatialPrimitiveDistance` and work
//! unchanged across exponents.

use crate::distance::{spatial, LpNorm};
use crate::error::Result;
use crate::region::SpatialComparable;
use crate::vector::NumberVector;

/// The canonical shared Euclidean instance.
pub const EUCLIDEAN: LpNorm = LpNorm::Euclidean;

/// The canonical shared Manhattan instance.
pub const MANHATTAN: LpNorm = LpNorm::Manhattan;

/// A distance function that also bounds distances to bounding regions.
///
/// Implementations are stateless value types; one instance may be shared by
/// any number of threads.
pub trait SpatialPrimitiveDistance: Send + Sync {
    /// Distance between two vectors.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `v1` and `v2` differ in dimensionality.
    fn distance<V1, V2>(&self, v1: &V1, v2: &V2) -> Result<f64>
    where
        V1: NumberVector + ?Sized,
        V2: NumberVector + ?Sized;

    /// Lower bound on the distance from `vector` to any point of `region`.
    fn min_dist<R, V>(&self, region: &R, vector: &V) -> Result<f64>
    where
        R: SpatialComparable + ?Sized,
        V: NumberVector + ?Sized;

    /// Lower bound on the distance between any two points of the regions.
    fn mbr_dist<R1, R2>(&self, region1: &R1, region2: &R2) -> Result<f64>
    where
        R1: SpatialComparable + ?Sized,
        R2: SpatialComparable + ?Sized;

    /// Distance between region centers; an ordering key, not a bound.
    fn center_distance<R1, R2>(&self, region1: &R1, region2: &R2) -> Result<f64>
    where
        R1: SpatialComparable + ?Sized,
        R2: SpatialComparable + ?Sized;

    /// True if the triangle inequality holds for [`distance`](Self::distance).
    fn is_metric(&self) -> bool;
}

impl SpatialPrimitiveDistance for LpNorm {
    #[inline]
    fn distance<V1, V2>(&self, v1: &V1, v2: &V2) -> Result<f64>
    where
        V1: NumberVector + ?Sized,
        V2: NumberVector + ?Sized,
    {
        self.accumulated_distance(v1, v2).map(|acc| self.finish(acc))
    }

    #[inline]
    fn min_dist<R, V>(&self, region: &R, vector: &V) -> Result<f64>
    where
        R: SpatialComparable + ?Sized,
        V: NumberVector + ?Sized,
    {
        spatial::min_dist(self, region, vector)
    }

    #[inline]
    fn mbr_dist<R1, R2>(&self, region1: &R1, region2: &R2) -> Result<f64>
    where
        R1: SpatialComparable + ?Sized,
        R2: SpatialComparable + ?Sized,
    {
        spatial::mbr_dist(self, region1, region2)
    }

    #[inline]
    fn center_distance<R1, R2>(&self, region1: &R1, region2: &R2) -> Result<f64>
    where
        R1: SpatialComparable + ?Sized,
        R2: SpatialComparable + ?Sized,
    {
        spatial::center_distance(self, region1, region2)
    }

    /// Every constructible `LpNorm` has `p >= 1`.
    #[inline]
    fn is_metric(&self) -> bool {
        self.exponent() >= 1.0
    }
}
