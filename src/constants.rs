//! Named constants for configuration values.
//!
//! This module centralizes default values used throughout the codebase,
//! making them easier to find, document, and tune.

/// Constants for Lp norms.
pub mod norm {
    /// Exponent of the Manhattan (L1) norm.
    pub const MANHATTAN_EXPONENT: f64 = 1.0;

    /// Exponent of the Euclidean (L2) norm.
    pub const EUCLIDEAN_EXPONENT: f64 = 2.0;

    /// Exponent used when no norm is configured.
    pub const DEFAULT_EXPONENT: f64 = EUCLIDEAN_EXPONENT;
}

/// Constants for brute force scans.
pub mod search {
    /// Number of consecutive vectors grouped under one bounding box.
    pub const PAGE_SIZE: usize = 64;

    /// Upper bound on the capacity reserved up front for a top-k heap.
    /// Larger `k` still works; the heap grows as results arrive.
    pub const TOP_K_RESERVE: usize = 16 * PAGE_SIZE;

    /// Chunk size for parallel brute force search.
    /// Each rayon task scans this many vectors into a local heap.
    pub const PARALLEL_CHUNK_SIZE: usize = 1000;

    /// Below this many vectors `search_parallel` scans sequentially.
    pub const PARALLEL_THRESHOLD: usize = 4 * PARALLEL_CHUNK_SIZE;
}
