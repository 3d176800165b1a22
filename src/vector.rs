use rand::Rng;
use std::sync::Arc;

/// Read-only access to a fixed-dimensional numeric vector.
///
/// Dimensions are 0-indexed: `value(d)` is defined for `d < dimensionality()`.
pub trait NumberVector {
    /// Number of coordinate axes.
    fn dimensionality(&self) -> usize;

    /// Coordinate along axis `d`.
    fn value(&self, d: usize) -> f64;
}

impl NumberVector for [f64] {
    #[inline]
    fn dimensionality(&self) -> usize {
        self.len()
    }

    #[inline]
    fn value(&self, d: usize) -> f64 {
        self[d]
    }
}

impl<const N: usize> NumberVector for [f64; N] {
    #[inline]
    fn dimensionality(&self) -> usize {
        N
    }

    #[inline]
    fn value(&self, d: usize) -> f64 {
        self[d]
    }
}

impl NumberVector for Vec<f64> {
    #[inline]
    fn dimensionality(&self) -> usize {
        self.len()
    }

    #[inline]
    fn value(&self, d: usize) -> f64 {
        self[d]
    }
}

impl<T: NumberVector + ?Sized> NumberVector for &T {
    #[inline]
    fn dimensionality(&self) -> usize {
        (**self).dimensionality()
    }

    #[inline]
    fn value(&self, d: usize) -> f64 {
        (**self).value(d)
    }
}

/// A vector with an ID and floating-point data.
/// The data is stored in an Arc for cheap cloning.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    pub id: u64,
    pub data: Arc<[f64]>,
}

impl Vector {
    /// Create a new vector with the given ID and data.
    pub fn new(id: u64, data: Vec<f64>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }

    /// Create a random vector with values uniformly distributed in [-1.0, 1.0].
    pub fn random(id: u64, dim: usize) -> Self {
        let mut rng = rand::thread_rng();
        let data: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
        Self::new(id, data)
    }

    /// Return the dimensionality of this vector.
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    /// Return the coordinates as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl NumberVector for Vector {
    #[inline]
    fn dimensionality(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn value(&self, d: usize) -> f64 {
        self.data[d]
    }
}
