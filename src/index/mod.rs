//! Index implementations written against the distance facade.

pub mod brute_force;
pub mod traits;

pub use brute_force::BruteForceIndex;
pub use traits::{SearchResult, VectorIndex};
