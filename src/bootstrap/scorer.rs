//! Distinguishing score for candidate splitter items.
//!
//! A good splitter separates a cohort into groups that agree with themselves:
//! after splitting on an item, the ratings each group gives the *other*
//! candidates should be tight. The score D(item) sums the sample variances of
//! those within-group ratings; a low sum means the split produced homogeneous
//! tastes, so lower D = more distinguishing.

use crate::bootstrap::attitude::{Attitude, AttitudeTable};
use crate::dataset::Ratings;

/// Bessel-corrected sample variance, `None` below two observations.
///
/// # Examples
///
/// ```
/// use recomendar::bootstrap::sample_variance;
///
/// assert_eq!(sample_variance(&[1.0, 5.0]), Some(8.0));
/// assert_eq!(sample_variance(&[4.0]), None);
/// assert_eq!(sample_variance(&[]), None);
/// ```
#[must_use]
pub fn sample_variance(values: &[f32]) -> Option<f32> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let sum_sq: f32 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(sum_sq / (n - 1.0))
}

/// Computes the distinguishing score D(`item`) over a cohort.
///
/// Partitions `cohort` into lover / hater / unknown groups by each member's
/// attitude toward `item` (read from the table, independent of any prior
/// split), then for every group and every *other* in-scope item sums the
/// sample variance of the raw ratings given by group members who actually
/// rated that item. Members without a rating are excluded from the sample,
/// not counted as zero; samples with fewer than two ratings contribute 0.
///
/// The aggregate is a sum of variances, not standard deviations — the
/// historically observed behavior of this scorer, kept deliberately.
///
/// # Examples
///
/// ```
/// use recomendar::bootstrap::{distinguishing_score, AttitudeTable};
/// use recomendar::dataset::{RatingRecord, Ratings};
///
/// // Lovers of item 1 disagree wildly about item 2: D(1) is high.
/// let ratings = Ratings::from_records(&[
///     RatingRecord::new(1, 1, 5.0, 0),
///     RatingRecord::new(1, 2, 5.0, 0),
///     RatingRecord::new(2, 1, 5.0, 0),
///     RatingRecord::new(2, 2, 1.0, 0),
/// ]);
/// let table = AttitudeTable::from_ratings(&ratings, &[1, 2], 3.5);
///
/// let d = distinguishing_score(&ratings, &table, &[1, 2], &[1, 2], 1);
/// assert!((d - 8.0).abs() < 1e-6); // var([5, 1]) = 8
/// ```
#[must_use]
pub fn distinguishing_score(
    ratings: &Ratings,
    table: &AttitudeTable,
    cohort: &[u32],
    in_scope: &[u32],
    item: u32,
) -> f32 {
    let (lovers, haters, unknowns) = partition_by_attitude(table, cohort, item);

    let mut score = 0.0;
    for group in [&lovers, &haters, &unknowns] {
        for &other in in_scope {
            if other == item {
                continue;
            }
            let sample: Vec<f32> = group
                .iter()
                .filter_map(|&user| ratings.rating(user, other))
                .collect();
            score += sample_variance(&sample).unwrap_or(0.0);
        }
    }
    score
}

/// Splits `cohort` into (lovers, haters, unknowns) of `item`, preserving
/// cohort order within each part.
///
/// Users outside the table's cross product cannot have rated a candidate and
/// land in the unknown part.
pub(crate) fn partition_by_attitude(
    table: &AttitudeTable,
    cohort: &[u32],
    item: u32,
) -> (Vec<u32>, Vec<u32>, Vec<u32>) {
    let mut lovers = Vec::new();
    let mut haters = Vec::new();
    let mut unknowns = Vec::new();
    for &user in cohort {
        match table.attitude(user, item) {
            Some(Attitude::Lover) => lovers.push(user),
            Some(Attitude::Hater) => haters.push(user),
            Some(Attitude::Unknown) | None => unknowns.push(user),
        }
    }
    (lovers, haters, unknowns)
}
