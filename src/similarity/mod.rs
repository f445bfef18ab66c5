//! User-user similarity measures.
//!
//! Pearson correlation follows the GroupLens convention: deviations are taken
//! from each user's mean over their *entire* rating history, not just the
//! co-rated subset, so a user who rates everything high stays distinguishable
//! from one who genuinely agrees. Cosine compares raw ratings. Both measures
//! require [`MIN_OVERLAP`] co-rated items and return `None` where the value
//! is undefined (thin overlap or a zero denominator) instead of inventing a
//! score. Every measure is symmetric in its two users.

use serde::{Deserialize, Serialize};

use crate::dataset::Ratings;

/// Minimum number of co-rated items for a similarity to be defined.
pub const MIN_OVERLAP: usize = 3;

/// Which user-user similarity a recommender computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimilarityMeasure {
    /// Whole-history mean-centered Pearson correlation (default)
    #[default]
    Pearson,
    /// Cosine over raw co-ratings
    Cosine,
}

impl SimilarityMeasure {
    /// Computes this measure between two users.
    #[must_use]
    pub fn compute(self, ratings: &Ratings, a: u32, b: u32) -> Option<f32> {
        match self {
            SimilarityMeasure::Pearson => pearson(ratings, a, b),
            SimilarityMeasure::Cosine => cosine(ratings, a, b),
        }
    }
}

/// Ratings both users gave, paired item by item in ascending item order.
fn shared_ratings(ratings: &Ratings, a: u32, b: u32) -> Vec<(f32, f32)> {
    let (Some(ra), Some(rb)) = (ratings.user_ratings(a), ratings.user_ratings(b)) else {
        return Vec::new();
    };
    ra.iter()
        .filter_map(|(item, &x)| rb.get(item).map(|&y| (x, y)))
        .collect()
}

/// Pearson correlation between two users, centered on whole-history means.
///
/// Returns `None` when the users share fewer than [`MIN_OVERLAP`] items or
/// either user's shared ratings carry no deviation from their mean (a
/// constant rater correlates with nobody). The result is clamped to
/// `[-1, 1]` against floating-point drift.
///
/// # Examples
///
/// ```
/// use recomendar::similarity::pearson;
/// use recomendar::dataset::{RatingRecord, Ratings};
///
/// let ratings = Ratings::from_records(&[
///     RatingRecord::new(1, 10, 5.0, 0),
///     RatingRecord::new(1, 20, 4.0, 0),
///     RatingRecord::new(1, 30, 1.0, 0),
///     RatingRecord::new(3, 10, 1.0, 0),
///     RatingRecord::new(3, 20, 2.0, 0),
///     RatingRecord::new(3, 30, 5.0, 0),
/// ]);
///
/// // Mirror-image tastes: perfect negative correlation.
/// let sim = pearson(&ratings, 1, 3).unwrap();
/// assert!((sim + 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn pearson(ratings: &Ratings, a: u32, b: u32) -> Option<f32> {
    let shared = shared_ratings(ratings, a, b);
    if shared.len() < MIN_OVERLAP {
        return None;
    }
    let mean_a = ratings.mean_rating(a)?;
    let mean_b = ratings.mean_rating(b)?;

    let mut num = 0.0;
    let mut den_a = 0.0;
    let mut den_b = 0.0;
    for &(ra, rb) in &shared {
        let da = ra - mean_a;
        let db = rb - mean_b;
        num += da * db;
        den_a += da * da;
        den_b += db * db;
    }

    let den = den_a.sqrt() * den_b.sqrt();
    if den == 0.0 {
        return None;
    }
    Some((num / den).clamp(-1.0, 1.0))
}

/// Cosine similarity between two users over their raw co-ratings.
///
/// Returns `None` when the users share fewer than [`MIN_OVERLAP`] items or
/// either shared vector has zero norm. The result is clamped to `[-1, 1]`.
///
/// # Examples
///
/// ```
/// use recomendar::similarity::cosine;
/// use recomendar::dataset::{RatingRecord, Ratings};
///
/// let ratings = Ratings::from_records(&[
///     RatingRecord::new(1, 10, 5.0, 0),
///     RatingRecord::new(1, 20, 3.0, 0),
///     RatingRecord::new(1, 30, 1.0, 0),
///     RatingRecord::new(2, 10, 5.0, 0),
///     RatingRecord::new(2, 20, 3.0, 0),
///     RatingRecord::new(2, 30, 1.0, 0),
/// ]);
///
/// let sim = cosine(&ratings, 1, 2).unwrap();
/// assert!((sim - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn cosine(ratings: &Ratings, a: u32, b: u32) -> Option<f32> {
    let shared = shared_ratings(ratings, a, b);
    if shared.len() < MIN_OVERLAP {
        return None;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for &(ra, rb) in &shared {
        dot += ra * rb;
        norm_a += ra * ra;
        norm_b += rb * rb;
    }

    let den = norm_a.sqrt() * norm_b.sqrt();
    if den == 0.0 {
        return None;
    }
    Some((dot / den).clamp(-1.0, 1.0))
}

#[cfg(test)]
#[path = "tests_similarity_contract.rs"]
mod tests_similarity_contract;
