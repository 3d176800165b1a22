//! Axis-aligned bounding regions.
//!
//! [`SpatialComparable`] is the read-only contract an index hands to the
//! distance bounds. [`BoundingBox`] is a minimal owned implementation for
//! callers that do not bring their own node representation.

use crate::error::{check_dimensions, Operands, Result, SpatialError};
use crate::vector::NumberVector;

/// Read-only access to an axis-aligned box.
///
/// For every `d < dimensionality()` the box spans the closed interval
/// `[min(d), max(d)]` with `min(d) <= max(d)`.
pub trait SpatialComparable {
    /// Number of coordinate axes.
    fn dimensionality(&self) -> usize;

    /// Lower bound along axis `d`.
    fn min(&self, d: usize) -> f64;

    /// Upper bound along axis `d`.
    fn max(&self, d: usize) -> f64;

    /// Center of the interval along axis `d`.
    #[inline]
    fn center(&self, d: usize) -> f64 {
        (self.min(d) + self.max(d)) / 2.0
    }
}

impl<T: SpatialComparable + ?Sized> SpatialComparable for &T {
    #[inline]
    fn dimensionality(&self) -> usize {
        (**self).dimensionality()
    }

    #[inline]
    fn min(&self, d: usize) -> f64 {
        (**self).min(d)
    }

    #[inline]
    fn max(&self, d: usize) -> f64 {
        (**self).max(d)
    }
}

/// Views a vector as the degenerate box containing only that point.
#[derive(Debug, Clone, Copy)]
pub struct PointRegion<'a, V: ?Sized>(pub &'a V);

impl<V: NumberVector + ?Sized> SpatialComparable for PointRegion<'_, V> {
    #[inline]
    fn dimensionality(&self) -> usize {
        self.0.dimensionality()
    }

    #[inline]
    fn min(&self, d: usize) -> f64 {
        self.0.value(d)
    }

    #[inline]
    fn max(&self, d: usize) -> f64 {
        self.0.value(d)
    }
}

/// An owned axis-aligned bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    min: Box<[f64]>,
    max: Box<[f64]>,
}

impl BoundingBox {
    /// Create a box from per-axis lower and upper bounds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegion` if the bound vectors differ in length, if any
    /// bound is NaN, or if `min[d] > max[d]` on some axis.
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Result<Self> {
        if min.len() != max.len() {
            return Err(SpatialError::invalid_region(format!(
                "min has {} dimensions but max has {}",
                min.len(),
                max.len()
            )));
        }
        for (d, (lo, hi)) in min.iter().zip(max.iter()).enumerate() {
            if lo.is_nan() || hi.is_nan() {
                return Err(SpatialError::invalid_region(format!(
                    "NaN bound on axis {d}"
                )));
            }
            if lo > hi {
                return Err(SpatialError::invalid_region(format!(
                    "min {lo} exceeds max {hi} on axis {d}"
                )));
            }
        }
        Ok(Self {
            min: min.into_boxed_slice(),
            max: max.into_boxed_slice(),
        })
    }

    /// The degenerate box containing exactly `point`.
    pub fn from_point<V: NumberVector + ?Sized>(point: &V) -> Self {
        let coords: Box<[f64]> = (0..point.dimensionality()).map(|d| point.value(d)).collect();
        Self {
            min: coords.clone(),
            max: coords,
        }
    }

    /// The tightest box enclosing every vector yielded by `vectors`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` when `vectors` yields nothing and
    /// `DimensionMismatch` when the vectors disagree on dimensionality.
    pub fn from_vectors<I>(vectors: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: NumberVector,
    {
        let mut iter = vectors.into_iter();
        let first = iter.next().ok_or(SpatialError::EmptyInput)?;
        let mut bbox = Self::from_point(&first);
        for v in iter {
            bbox.extend(&v)?;
        }
        Ok(bbox)
    }

    /// Lower corner.
    pub fn min_corner(&self) -> &[f64] {
        &self.min
    }

    /// Upper corner.
    pub fn max_corner(&self) -> &[f64] {
        &self.max
    }

    /// Per-axis centers.
    pub fn centroid(&self) -> Vec<f64> {
        (0..self.min.len()).map(|d| self.center(d)).collect()
    }

    /// True if `point` lies inside the box or on its boundary.
    pub fn contains<V: NumberVector + ?Sized>(&self, point: &V) -> Result<bool> {
        let dim = check_dimensions(Operands::RegionVector, self.min.len(), point.dimensionality())?;
        Ok((0..dim).all(|d| {
            let x = point.value(d);
            self.min[d] <= x && x <= self.max[d]
        }))
    }

    /// True if the two boxes share at least one point; touching counts.
    pub fn intersects<R: SpatialComparable + ?Sized>(&self, other: &R) -> Result<bool> {
        let dim = check_dimensions(Operands::RegionRegion, self.min.len(), other.dimensionality())?;
        Ok((0..dim).all(|d| self.min[d] <= other.max(d) && other.min(d) <= self.max[d]))
    }

    /// Grow the box so that it covers `point`.
    pub fn extend<V: NumberVector + ?Sized>(&mut self, point: &V) -> Result<()> {
        let dim = check_dimensions(Operands::RegionVector, self.min.len(), point.dimensionality())?;
        for d in 0..dim {
            let x = point.value(d);
            self.min[d] = self.min[d].min(x);
            self.max[d] = self.max[d].max(x);
        }
        Ok(())
    }

    /// The smallest box covering both `self` and `other`.
    pub fn union<R: SpatialComparable + ?Sized>(&self, other: &R) -> Result<Self> {
        let dim = check_dimensions(Operands::RegionRegion, self.min.len(), other.dimensionality())?;
        let min = (0..dim).map(|d| self.min[d].min(other.min(d))).collect();
        let max = (0..dim).map(|d| self.max[d].max(other.max(d))).collect();
        Ok(Self { min, max })
    }
}

impl SpatialComparable for BoundingBox {
    #[inline]
    fn dimensionality(&self) -> usize {
        self.min.len()
    }

    #[inline]
    fn min(&self, d: usize) -> f64 {
        self.min[d]
    }

    #[inline]
    fn max(&self, d: usize) -> f64 {
        self.max[d]
    }
}
