//! K-nearest-neighbor selection over user similarities.

use serde::{Deserialize, Serialize};

use crate::dataset::Ratings;
use crate::similarity::SimilarityMeasure;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A neighbor of a target user together with their similarity weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// The neighboring user
    pub user_id: u32,
    /// Similarity of this neighbor to the target, in [-1, 1]
    pub weight: f32,
}

/// Selects the `k` users most similar to `target`.
///
/// Every other user is a candidate, visited in enumeration order. Users whose
/// similarity to the target is undefined are skipped rather than scored zero.
/// Sorting is stable and descending by weight, so equal-weight neighbors keep
/// their enumeration order; negative-weight neighbors are eligible like any
/// other.
///
/// # Examples
///
/// ```
/// use recomendar::dataset::{RatingRecord, Ratings};
/// use recomendar::neighbors::top_k;
/// use recomendar::similarity::SimilarityMeasure;
///
/// let ratings = Ratings::from_records(&[
///     RatingRecord::new(1, 10, 5.0, 0),
///     RatingRecord::new(1, 20, 4.0, 0),
///     RatingRecord::new(1, 30, 1.0, 0),
///     RatingRecord::new(2, 10, 5.0, 0),
///     RatingRecord::new(2, 20, 4.0, 0),
///     RatingRecord::new(2, 30, 1.0, 0),
///     RatingRecord::new(3, 10, 1.0, 0),
///     RatingRecord::new(3, 20, 2.0, 0),
///     RatingRecord::new(3, 30, 5.0, 0),
/// ]);
///
/// let neighbors = top_k(&ratings, 1, SimilarityMeasure::Pearson, 10);
/// assert_eq!(neighbors.len(), 2);
/// assert_eq!(neighbors[0].user_id, 2);
/// assert_eq!(neighbors[1].user_id, 3);
/// ```
#[must_use]
pub fn top_k(
    ratings: &Ratings,
    target: u32,
    measure: SimilarityMeasure,
    k: usize,
) -> Vec<Neighbor> {
    #[cfg(feature = "parallel")]
    let mut neighbors: Vec<Neighbor> = ratings
        .users()
        .par_iter()
        .filter(|&&user| user != target)
        .filter_map(|&user| {
            measure.compute(ratings, target, user).map(|weight| Neighbor {
                user_id: user,
                weight,
            })
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let mut neighbors: Vec<Neighbor> = ratings
        .users()
        .iter()
        .filter(|&&user| user != target)
        .filter_map(|&user| {
            measure.compute(ratings, target, user).map(|weight| Neighbor {
                user_id: user,
                weight,
            })
        })
        .collect();

    neighbors.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    neighbors.truncate(k);
    neighbors
}
