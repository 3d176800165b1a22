//! Brute force index for exact nearest neighbor search.
//!
//! Vectors are stored in insertion order and grouped into fixed-size pages,
//! each carrying the bounding box of its members. Queries visit pages in order
//! of their `min_dist` lower bound and stop as soon as that bound exceeds the
//! current k-th best distance, so results stay exact while far pages are
//! skipped.

use crate::constants::search::{PAGE_SIZE, PARALLEL_CHUNK_SIZE, PARALLEL_THRESHOLD, TOP_K_RESERVE};
use crate::distance::LpNorm;
use crate::error::{check_dimensions, Operands, Result};
use crate::index::traits::{SearchResult, VectorIndex};
use crate::metric::SpatialPrimitiveDistance;
use crate::region::{BoundingBox, PointRegion, SpatialComparable};
use crate::vector::Vector;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A vector with its computed distance, used for heap operations.
#[derive(Clone, Copy)]
struct ScoredVector {
    id: u64,
    distance: f64,
}

impl PartialEq for ScoredVector {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredVector {}

impl PartialOrd for ScoredVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredVector {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so peek() gives the current worst candidate.
        self.distance.total_cmp(&other.distance)
    }
}

/// Keeps the k smallest distances seen so far.
struct TopK {
    k: usize,
    heap: BinaryHeap<ScoredVector>,
}

impl TopK {
    fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.min(TOP_K_RESERVE)),
        }
    }

    /// Distance a candidate must beat, once k results are held.
    fn worst(&self) -> Option<f64> {
        if self.heap.len() < self.k {
            None
        } else {
            self.heap.peek().map(|sv| sv.distance)
        }
    }

    fn offer(&mut self, candidate: ScoredVector) {
        if self.heap.len() < self.k {
            self.heap.push(candidate);
        } else if self.worst().is_some_and(|worst| candidate.distance < worst) {
            self.heap.pop();
            self.heap.push(candidate);
        }
    }

    fn merge(mut self, other: TopK) -> Self {
        for item in other.heap {
            self.offer(item);
        }
        self
    }

    fn into_sorted(self) -> Vec<SearchResult> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|sv| SearchResult::new(sv.id, sv.distance))
            .collect()
    }
}

/// A run of consecutive vectors and the box enclosing them.
#[derive(Debug, Clone)]
struct Page {
    bounds: BoundingBox,
    start: usize,
    end: usize,
}

/// Brute force index that performs exact nearest neighbor search.
///
/// Generic over the distance facade; defaults to the Euclidean norm.
pub struct BruteForceIndex<M = LpNorm> {
    vectors: Vec<Vector>,
    pages: Vec<Page>,
    metric: M,
}

impl<M: SpatialPrimitiveDistance> BruteForceIndex<M> {
    /// Create a new empty brute force index with the given distance metric.
    pub fn new(metric: M) -> Self {
        Self {
            vectors: Vec::new(),
            pages: Vec::new(),
            metric,
        }
    }

    /// Build an index over `vectors`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the vectors disagree on dimensionality.
    pub fn from_vectors(metric: M, vectors: impl IntoIterator<Item = Vector>) -> Result<Self> {
        let mut index = Self::new(metric);
        for vector in vectors {
            index.add(vector)?;
        }
        Ok(index)
    }

    /// The distance facade used by this index.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Add a vector to the index.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the vector does not match the
    /// dimensionality of the vectors already stored.
    pub fn add(&mut self, vector: Vector) -> Result<()> {
        if let Some(dim) = self.dimension() {
            check_dimensions(Operands::VectorVector, dim, vector.dim())?;
        }

        let position = self.vectors.len();
        match self.pages.last_mut() {
            Some(page) if page.end - page.start < PAGE_SIZE => {
                page.bounds.extend(&vector)?;
                page.end = position + 1;
            }
            _ => self.pages.push(Page {
                bounds: BoundingBox::from_point(&vector),
                start: position,
                end: position + 1,
            }),
        }
        self.vectors.push(vector);
        Ok(())
    }

    /// Return the number of vectors in the index.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Return true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Return the dimensionality of the stored vectors, if any are stored.
    pub fn dimension(&self) -> Option<usize> {
        self.vectors.first().map(Vector::dim)
    }

    /// The bounding box of every stored vector.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let (first, rest) = self.pages.split_first()?;
        rest.iter()
            .try_fold(first.bounds.clone(), |acc, page| acc.union(&page.bounds))
            .ok()
    }

    fn check_query(&self, dim: usize) -> Result<()> {
        match self.dimension() {
            Some(expected) => check_dimensions(Operands::VectorVector, expected, dim).map(|_| ()),
            None => Ok(()),
        }
    }

    fn scan_into(&self, query: &[f64], vectors: &[Vector], top: &mut TopK) -> Result<()> {
        for vector in vectors {
            let distance = self.metric.distance(query, vector)?;
            top.offer(ScoredVector {
                id: vector.id,
                distance,
            });
        }
        Ok(())
    }

    /// Search for the k nearest neighbors, skipping pages that cannot
    /// contain a better answer than the current k-th best.
    ///
    /// Returns results sorted by distance.
    pub fn search(&self, query: &[f64], k: usize) -> Result<Vec<SearchResult>> {
        self.search_pages(query, k).map(|(results, _)| results)
    }

    /// Pruned k-NN scan; also returns the number of pages scanned.
    fn search_pages(&self, query: &[f64], k: usize) -> Result<(Vec<SearchResult>, usize)> {
        self.check_query(query.len())?;
        if k == 0 || self.is_empty() {
            return Ok((Vec::new(), 0));
        }

        // Pages ordered by lower bound, ties broken by center distance.
        let point = PointRegion(query);
        let mut order = self
            .pages
            .iter()
            .map(|page| {
                let bound = self.metric.min_dist(&page.bounds, query)?;
                let center = self.metric.center_distance(&page.bounds, &point)?;
                Ok((bound, center, page))
            })
            .collect::<Result<Vec<_>>>()?;
        order.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

        let mut top = TopK::new(k);
        let mut visited = 0;
        for (bound, _, page) in &order {
            if top.worst().is_some_and(|worst| *bound > worst) {
                break;
            }
            self.scan_into(query, &self.vectors[page.start..page.end], &mut top)?;
            visited += 1;
        }

        tracing::debug!(
            pages = self.pages.len(),
            visited,
            pruned = self.pages.len() - visited,
            k,
            "brute force search"
        );
        Ok((top.into_sorted(), visited))
    }

    /// Exhaustive search without page pruning.
    ///
    /// Serves as the ground truth for [`search`](Self::search).
    pub fn search_exhaustive(&self, query: &[f64], k: usize) -> Result<Vec<SearchResult>> {
        self.check_query(query.len())?;
        let mut top = TopK::new(k);
        if k > 0 {
            self.scan_into(query, &self.vectors, &mut top)?;
        }
        Ok(top.into_sorted())
    }

    /// Parallel exhaustive search using Rayon for multi-core scaling.
    ///
    /// Divides the vector set into chunks, processes each chunk in parallel,
    /// then merges results. Small indexes are scanned sequentially.
    pub fn search_parallel(&self, query: &[f64], k: usize) -> Result<Vec<SearchResult>> {
        if self.len() < PARALLEL_THRESHOLD {
            return self.search_exhaustive(query, k);
        }
        self.check_query(query.len())?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let top = self
            .vectors
            .par_chunks(PARALLEL_CHUNK_SIZE)
            .map(|chunk| -> Result<TopK> {
                let mut local = TopK::new(k);
                self.scan_into(query, chunk, &mut local)?;
                Ok(local)
            })
            .try_reduce(|| TopK::new(k), |a, b| Ok(a.merge(b)))?;

        Ok(top.into_sorted())
    }

    /// Batch search for multiple queries in parallel.
    ///
    /// Returns results for each query in the same order as the input.
    pub fn batch_search(&self, queries: &[Vector], k: usize) -> Result<Vec<Vec<SearchResult>>> {
        queries
            .par_iter()
            .map(|query| self.search(query.as_slice(), k))
            .collect()
    }

    /// All vectors within `radius` of `query`, sorted by distance.
    ///
    /// Pages whose lower bound exceeds `radius` are skipped.
    pub fn range_search(&self, query: &[f64], radius: f64) -> Result<Vec<SearchResult>> {
        self.check_query(query.len())?;

        let mut results = Vec::new();
        let mut pruned = 0;
        for page in &self.pages {
            if self.metric.min_dist(&page.bounds, query)? > radius {
                pruned += 1;
                continue;
            }
            for vector in &self.vectors[page.start..page.end] {
                let distance = self.metric.distance(query, vector)?;
                if distance <= radius {
                    results.push(SearchResult::new(vector.id, distance));
                }
            }
        }

        tracing::debug!(
            pages = self.pages.len(),
            pruned,
            returned = results.len(),
            radius,
            "range search"
        );
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(results)
    }

    /// All vectors within `radius` of `region`, measured with `min_dist`.
    ///
    /// With `radius == 0` this is a window query. Pages whose `mbr_dist` to
    /// the region exceeds `radius` are skipped. Results are sorted by
    /// distance to the region.
    pub fn region_search<R>(&self, region: &R, radius: f64) -> Result<Vec<SearchResult>>
    where
        R: SpatialComparable + ?Sized,
    {
        self.region_scan(region, radius).map(|(results, _)| results)
    }

    /// Region scan; also returns the number of pages skipped.
    fn region_scan<R>(&self, region: &R, radius: f64) -> Result<(Vec<SearchResult>, usize)>
    where
        R: SpatialComparable + ?Sized,
    {
        if let Some(dim) = self.dimension() {
            check_dimensions(Operands::RegionVector, region.dimensionality(), dim)?;
        }

        let mut results = Vec::new();
        let mut pruned = 0;
        for page in &self.pages {
            if self.metric.mbr_dist(&page.bounds, region)? > radius {
                pruned += 1;
                continue;
            }
            for vector in &self.vectors[page.start..page.end] {
                let distance = self.metric.min_dist(region, vector)?;
                if distance <= radius {
                    results.push(SearchResult::new(vector.id, distance));
                }
            }
        }

        tracing::debug!(
            pages = self.pages.len(),
            pruned,
            returned = results.len(),
            radius,
            "region search"
        );
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok((results, pruned))
    }
}

impl<M: SpatialPrimitiveDistance> VectorIndex for BruteForceIndex<M> {
    fn search(&self, query: &[f64], k: usize) -> Result<Vec<SearchResult>> {
        BruteForceIndex::search(self, query, k)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn dimension(&self) -> Option<usize> {
        BruteForceIndex::dimension(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpatialError;
    use crate::metric::{EUCLIDEAN, MANHATTAN};

    fn random_index(metric: LpNorm, n: u64, dim: usize) -> BruteForceIndex {
        BruteForceIndex::from_vectors(metric, (0..n).map(|i| Vector::random(i, dim))).unwrap()
    }

    fn ids(results: &[SearchResult]) -> Vec<u64> {
        results.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_basic_search() {
        let index = random_index(EUCLIDEAN, 100, 16);
        let query = Vector::random(1000, 16);
        let results = index.search(&query.data, 10).unwrap();

        assert_eq!(results.len(), 10);
        for i in 1..results.len() {
            assert!(results[i - 1].distance <= results[i].distance);
        }
    }

    #[test]
    fn test_search_variants_consistency() {
        for metric in [EUCLIDEAN, MANHATTAN, LpNorm::new(3.0).unwrap()] {
            let index = random_index(metric, 5000, 8);
            let query = Vector::random(9999, 8);

            let pruned = index.search(&query.data, 10).unwrap();
            let exhaustive = index.search_exhaustive(&query.data, 10).unwrap();
            let parallel = index.search_parallel(&query.data, 10).unwrap();

            assert_eq!(ids(&pruned), ids(&exhaustive));
            assert_eq!(ids(&pruned), ids(&parallel));
        }
    }

    #[test]
    fn test_search_skips_far_pages() {
        let mut index = BruteForceIndex::new(EUCLIDEAN);
        // Two clusters, each filling whole pages.
        for i in 0..PAGE_SIZE as u64 {
            index.add(Vector::new(i, vec![i as f64 * 0.01, 0.0])).unwrap();
        }
        for i in 0..PAGE_SIZE as u64 {
            let id = 1000 + i;
            index.add(Vector::new(id, vec![100.0 + i as f64 * 0.01, 0.0])).unwrap();
        }

        let (results, visited) = index.search_pages(&[0.0, 0.0], 3).unwrap();
        assert_eq!(ids(&results), vec![0, 1, 2]);
        assert_eq!(results[0].distance, 0.0);
        assert_eq!(index.pages.len(), 2);
        assert_eq!(visited, 1, "far cluster page should not be scanned");
    }

    #[test]
    fn test_unbounded_k_returns_everything() {
        let index = random_index(EUCLIDEAN, 5, 3);
        let query = [0.0; 3];

        assert_eq!(index.search(&query, usize::MAX).unwrap().len(), 5);
        assert_eq!(index.search_exhaustive(&query, usize::MAX).unwrap().len(), 5);
        assert_eq!(index.search_exhaustive(&query, usize::MAX / 64).unwrap().len(), 5);
        assert_eq!(index.search_parallel(&query, usize::MAX).unwrap().len(), 5);

        let queries = vec![Vector::new(0, vec![0.0; 3])];
        assert_eq!(index.batch_search(&queries, usize::MAX).unwrap()[0].len(), 5);
    }

    #[test]
    fn test_unbounded_k_parallel_merge() {
        let index = random_index(EUCLIDEAN, PARALLEL_THRESHOLD as u64, 2);
        let results = index.search_parallel(&[0.0, 0.0], usize::MAX).unwrap();
        assert_eq!(results.len(), PARALLEL_THRESHOLD);
        for i in 1..results.len() {
            assert!(results[i - 1].distance <= results[i].distance);
        }
    }

    #[test]
    fn test_search_edge_cases() {
        let empty: BruteForceIndex = BruteForceIndex::new(EUCLIDEAN);
        assert!(empty.search(&[1.0, 2.0], 5).unwrap().is_empty());
        assert_eq!(empty.dimension(), None);
        assert!(empty.bounds().is_none());

        let index = random_index(EUCLIDEAN, 10, 4);
        assert!(index.search(&[0.0; 4], 0).unwrap().is_empty());
        assert_eq!(index.search(&[0.0; 4], 50).unwrap().len(), 10);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = random_index(EUCLIDEAN, 10, 4);
        assert_eq!(
            index.search(&[0.0; 3], 1),
            Err(SpatialError::dimension_mismatch(Operands::VectorVector, 4, 3))
        );
        assert!(index.add(Vector::new(99, vec![0.0; 5])).is_err());
        assert_eq!(index.len(), 10);

        let region = BoundingBox::new(vec![0.0; 2], vec![1.0; 2]).unwrap();
        assert!(matches!(
            index.region_search(&region, 0.0),
            Err(SpatialError::DimensionMismatch {
                operands: Operands::RegionVector,
                ..
            })
        ));
    }

    #[test]
    fn test_range_search_matches_filter() {
        let index = random_index(EUCLIDEAN, 500, 3);
        let query = [0.25, -0.5, 0.0];
        let radius = 0.6;

        let results = index.range_search(&query, radius).unwrap();
        let mut expected: Vec<u64> = index
            .vectors
            .iter()
            .filter(|v| EUCLIDEAN.distance(&query, *v).unwrap() <= radius)
            .map(|v| v.id)
            .collect();
        let mut got = ids(&results);
        expected.sort_unstable();
        got.sort_unstable();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_region_search_window() {
        let mut index = BruteForceIndex::new(EUCLIDEAN);
        index.add(Vector::new(1, vec![0.5, 0.5])).unwrap();
        index.add(Vector::new(2, vec![3.0, 0.5])).unwrap();
        index.add(Vector::new(3, vec![1.0, 1.0])).unwrap();

        let window = BoundingBox::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let inside = index.region_search(&window, 0.0).unwrap();
        let mut got = ids(&inside);
        got.sort_unstable();
        assert_eq!(got, vec![1, 3]);

        let near = index.region_search(&window, 2.0).unwrap();
        assert_eq!(near.len(), 3);
        assert_eq!(near[2].id, 2);
        assert!((near[2].distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_region_search_skips_far_pages() {
        // Six clusters, one page each, spread along the first axis.
        let mut index = BruteForceIndex::new(EUCLIDEAN);
        for c in 0..6u64 {
            let offset = c as f64 * 10.0;
            index.add(Vector::new(c * 1000, vec![offset, 0.0, 0.0])).unwrap();
            for i in 1..PAGE_SIZE as u64 {
                let mut data = Vector::random(c * 1000 + i, 3).data.to_vec();
                data[0] += offset;
                index.add(Vector::new(c * 1000 + i, data)).unwrap();
            }
        }
        assert_eq!(index.pages.len(), 6);

        let window = BoundingBox::new(vec![19.8, -0.3, -0.3], vec![20.4, 0.3, 0.3]).unwrap();
        let radius = 0.25;
        let (results, pruned) = index.region_scan(&window, radius).unwrap();

        let mut expected: Vec<u64> = index
            .vectors
            .iter()
            .filter(|v| EUCLIDEAN.min_dist(&window, *v).unwrap() <= radius)
            .map(|v| v.id)
            .collect();
        let mut got = ids(&results);
        expected.sort_unstable();
        got.sort_unstable();
        assert_eq!(got, expected);
        assert!(got.contains(&2000));
        assert_eq!(pruned, 5, "only the page under the window should be scanned");

        for i in 1..results.len() {
            assert!(results[i - 1].distance <= results[i].distance);
        }
    }

    #[test]
    fn test_bounds_cover_all_vectors() {
        let index = random_index(EUCLIDEAN, 300, 5);
        let bounds = index.bounds().unwrap();
        for v in &index.vectors {
            assert!(bounds.contains(v).unwrap());
        }
    }

    #[test]
    fn test_batch_search() {
        let index = random_index(EUCLIDEAN, 200, 8);
        let queries: Vec<Vector> = (0..4).map(|i| Vector::random(500 + i, 8)).collect();
        let batch = index.batch_search(&queries, 5).unwrap();
        assert_eq!(batch.len(), 4);
        for (query, results) in queries.iter().zip(&batch) {
            assert_eq!(results, &index.search(&query.data, 5).unwrap());
        }
    }
}
