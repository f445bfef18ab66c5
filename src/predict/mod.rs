//! Weighted-deviation rating prediction.
//!
//! The GroupLens estimator: start from the target's own mean and adjust it by
//! the similarity-weighted deviations the neighbors show on the item,
//!
//! ```text
//! pred(u, i) = mean(u) + sum(w_v * (r_vi - mean(v))) / sum(|w_v|)
//! ```
//!
//! summed over neighbors who actually rated the item. Predictions are left on
//! the deviation scale uncapped, so a value can fall outside the rating scale
//! when every neighbor deviates hard in one direction.

use crate::dataset::Ratings;
use crate::neighbors::Neighbor;

/// Predicts the rating `target` would give `item` from a neighborhood.
///
/// Neighbors without a rating for `item` drop out of both the numerator and
/// the denominator. Returns `None` when the prediction is undefined: the
/// target has no rating history, or no neighbor with nonzero weight rated
/// the item.
///
/// # Examples
///
/// ```
/// use recomendar::dataset::{RatingRecord, Ratings};
/// use recomendar::neighbors::top_k;
/// use recomendar::predict::predict_rating;
/// use recomendar::similarity::SimilarityMeasure;
///
/// let ratings = Ratings::from_records(&[
///     RatingRecord::new(1, 10, 5.0, 0),
///     RatingRecord::new(1, 20, 4.0, 0),
///     RatingRecord::new(1, 30, 1.0, 0),
///     RatingRecord::new(2, 10, 5.0, 0),
///     RatingRecord::new(2, 20, 4.0, 0),
///     RatingRecord::new(2, 30, 1.0, 0),
///     RatingRecord::new(2, 40, 4.5, 0),
/// ]);
///
/// let neighbors = top_k(&ratings, 1, SimilarityMeasure::Pearson, 10);
/// let pred = predict_rating(&ratings, 1, 40, &neighbors).unwrap();
/// // mean(1) + (4.5 - mean(2)) = 10/3 + 0.875
/// assert!((pred - 4.2083).abs() < 1e-3);
/// ```
#[must_use]
pub fn predict_rating(
    ratings: &Ratings,
    target: u32,
    item: u32,
    neighbors: &[Neighbor],
) -> Option<f32> {
    let target_mean = ratings.mean_rating(target)?;

    let mut num = 0.0;
    let mut den = 0.0;
    for neighbor in neighbors {
        let Some(rating) = ratings.rating(neighbor.user_id, item) else {
            continue;
        };
        let Some(neighbor_mean) = ratings.mean_rating(neighbor.user_id) else {
            continue;
        };
        num += neighbor.weight * (rating - neighbor_mean);
        den += neighbor.weight.abs();
    }

    if den == 0.0 {
        return None;
    }
    Some(target_mean + num / den)
}
