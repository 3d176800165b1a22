//! Common traits for index implementations.

use crate::error::Result;

/// A search result containing a vector ID and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// The ID of the matched vector.
    pub id: u64,
    /// The distance from the query.
    pub distance: f64,
}

impl SearchResult {
    /// Create a new SearchResult.
    #[inline]
    pub fn new(id: u64, distance: f64) -> Self {
        Self { id, distance }
    }

    /// Convert to a raw (u64, f64) tuple.
    #[inline]
    pub fn to_tuple(self) -> (u64, f64) {
        (self.id, self.distance)
    }
}

impl From<(u64, f64)> for SearchResult {
    fn from(tuple: (u64, f64)) -> Self {
        Self::new(tuple.0, tuple.1)
    }
}

/// Common interface for indices that answer nearest neighbor queries.
///
/// Implementations must be `Send + Sync`; search takes `&self` and may be
/// called from multiple threads.
pub trait VectorIndex: Send + Sync {
    /// Search for the k nearest neighbors to the query vector.
    ///
    /// Returns results sorted by distance (closest first).
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the query does not match the index.
    fn search(&self, query: &[f64], k: usize) -> Result<Vec<SearchResult>>;

    /// Return the number of vectors in the index.
    fn len(&self) -> usize;

    /// Return true if the index contains no vectors.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the dimensionality of vectors in this index, if known yet.
    fn dimension(&self) -> Option<usize>;
}
