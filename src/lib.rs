//! forge-spatial: Lp distances and bounding-box distance bounds.
//!
//! This crate provides the distance functions a spatial index needs to prune
//! its search: the distance between two vectors, and lower bounds on the
//! distance from a vector to a bounding box and between two bounding boxes.
//!
//! # Features
//!
//! - **Lp Norms**: Manhattan, Euclidean and general Minkowski `p >= 1`
//! - **Distance Bounds**: `min_dist` (box to point) and `mbr_dist` (box to box)
//! - **Center Distance**: ordering heuristic for best-first traversal
//! - **Facade Trait**: [`SpatialPrimitiveDistance`] lets an index be written once
//! - **Brute Force Index**: exact k-NN with page-level pruning, parallel with Rayon
//!
//! # Example
//!
//! ```
//! use forge_spatial::{BoundingBox, SpatialPrimitiveDistance, EUCLIDEAN};
//!
//! let region = BoundingBox::new(vec![0.0, 0.0], vec![2.0, 2.0]).unwrap();
//!
//! let d = EUCLIDEAN.distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
//! assert_eq!(d, 5.0);
//!
//! let bound = EUCLIDEAN.min_dist(&region, &[5.0, 1.0]).unwrap();
//! assert_eq!(bound, 3.0);
//! ```

pub mod constants;
pub mod distance;
pub mod error;
pub mod index;
pub mod metric;
pub mod region;
pub mod vector;

// Re-export commonly used types at crate root
pub use distance::{Exponent, LpNorm};
pub use error::{Operands, Result, SpatialError};
pub use index::{BruteForceIndex, SearchResult, VectorIndex};
pub use metric::{SpatialPrimitiveDistance, EUCLIDEAN, MANHATTAN};
pub use region::{BoundingBox, PointRegion, SpatialComparable};
pub use vector::{NumberVector, Vector};
