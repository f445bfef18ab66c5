//! User-based collaborative filtering.

use serde::{Deserialize, Serialize};

use crate::dataset::{RatingRecord, Ratings};
use crate::error::{RecomendarError, Result};
use crate::neighbors::{top_k, Neighbor};
use crate::predict::predict_rating;
use crate::similarity::SimilarityMeasure;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default neighborhood size.
pub const DEFAULT_NEIGHBORS: usize = 10;

/// Default number of recommendations returned per user.
pub const DEFAULT_TOP_N: usize = 10;

/// One recommended item with its predicted rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommended item
    pub item_id: u32,
    /// Predicted rating for the target user
    pub score: f32,
}

/// User-based collaborative filtering recommender.
///
/// Fit it with rating records, then ask for per-user top-N recommendations.
/// For each request the engine selects the target's most similar users,
/// scores every item the target has not rated with the weighted-deviation
/// estimator, drops items whose prediction is undefined, and returns the
/// highest-scoring remainder (ties toward the smaller item id).
///
/// # Examples
///
/// ```
/// use recomendar::recommend::UserBasedRecommender;
/// use recomendar::dataset::RatingRecord;
///
/// let records = vec![
///     RatingRecord::new(1, 10, 5.0, 0),
///     RatingRecord::new(1, 20, 4.0, 0),
///     RatingRecord::new(1, 30, 1.0, 0),
///     RatingRecord::new(2, 10, 5.0, 0),
///     RatingRecord::new(2, 20, 4.0, 0),
///     RatingRecord::new(2, 30, 1.0, 0),
///     RatingRecord::new(2, 40, 4.5, 0),
///     RatingRecord::new(3, 10, 1.0, 0),
///     RatingRecord::new(3, 20, 2.0, 0),
///     RatingRecord::new(3, 30, 5.0, 0),
/// ];
///
/// let mut recommender = UserBasedRecommender::new();
/// recommender.fit(&records).unwrap();
///
/// let recs = recommender.recommend(1).unwrap();
/// assert_eq!(recs.len(), 1);
/// assert_eq!(recs[0].item_id, 40);
/// assert!((recs[0].score - 4.2083).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct UserBasedRecommender {
    measure: SimilarityMeasure,
    n_neighbors: usize,
    top_n: usize,
    ratings: Option<Ratings>,
}

impl Default for UserBasedRecommender {
    fn default() -> Self {
        Self::new()
    }
}

impl UserBasedRecommender {
    /// Creates an unfitted recommender with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            measure: SimilarityMeasure::default(),
            n_neighbors: DEFAULT_NEIGHBORS,
            top_n: DEFAULT_TOP_N,
            ratings: None,
        }
    }

    /// Sets the similarity measure used for neighborhoods.
    #[must_use]
    pub fn with_measure(mut self, measure: SimilarityMeasure) -> Self {
        self.measure = measure;
        self
    }

    /// Sets the neighborhood size.
    #[must_use]
    pub fn with_neighbors(mut self, k: usize) -> Self {
        self.n_neighbors = k;
        self
    }

    /// Sets how many recommendations a request returns.
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Similarity measure in use.
    #[must_use]
    pub fn measure(&self) -> SimilarityMeasure {
        self.measure
    }

    /// Neighborhood size in use.
    #[must_use]
    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    /// Recommendation list length in use.
    #[must_use]
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Fits the recommender on rating records.
    ///
    /// # Errors
    ///
    /// Returns an error if `records` is empty.
    pub fn fit(&mut self, records: &[RatingRecord]) -> Result<()> {
        if records.is_empty() {
            return Err(RecomendarError::empty_input("rating records"));
        }
        self.ratings = Some(Ratings::from_records(records));
        Ok(())
    }

    /// Returns true once the recommender has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.ratings.is_some()
    }

    /// The fitted rating store, `None` before fitting.
    #[must_use]
    pub fn ratings(&self) -> Option<&Ratings> {
        self.ratings.as_ref()
    }

    /// Selects `user`'s neighborhood under the configured measure and size.
    ///
    /// An unknown user gets an empty neighborhood.
    ///
    /// # Errors
    ///
    /// Returns an error if the recommender is unfitted.
    pub fn neighborhood(&self, user: u32) -> Result<Vec<Neighbor>> {
        let ratings = self.fitted()?;
        Ok(top_k(ratings, user, self.measure, self.n_neighbors))
    }

    /// Predicts the rating `user` would give `item`.
    ///
    /// `Ok(None)` means the prediction is undefined for this pair: the user
    /// is unknown or no weighted neighbor rated the item.
    ///
    /// # Errors
    ///
    /// Returns an error if the recommender is unfitted.
    pub fn predict(&self, user: u32, item: u32) -> Result<Option<f32>> {
        let ratings = self.fitted()?;
        let neighbors = top_k(ratings, user, self.measure, self.n_neighbors);
        Ok(predict_rating(ratings, user, item, &neighbors))
    }

    /// Recommends up to `top_n` unseen items for `user`, best first.
    ///
    /// Items the user already rated are never candidates, and candidates
    /// whose prediction is undefined are dropped instead of scored. A user
    /// with no rating history gets an empty list. Ordering is by descending
    /// predicted score, then ascending item id.
    ///
    /// # Errors
    ///
    /// Returns an error if the recommender is unfitted.
    pub fn recommend(&self, user: u32) -> Result<Vec<Recommendation>> {
        let ratings = self.fitted()?;
        let Some(rated) = ratings.user_ratings(user) else {
            return Ok(Vec::new());
        };

        let neighbors = top_k(ratings, user, self.measure, self.n_neighbors);
        let candidates: Vec<u32> = ratings
            .items()
            .iter()
            .copied()
            .filter(|item| !rated.contains_key(item))
            .collect();

        #[cfg(feature = "parallel")]
        let mut recs: Vec<Recommendation> = candidates
            .par_iter()
            .filter_map(|&item| {
                predict_rating(ratings, user, item, &neighbors).map(|score| Recommendation {
                    item_id: item,
                    score,
                })
            })
            .collect();

        #[cfg(not(feature = "parallel"))]
        let mut recs: Vec<Recommendation> = candidates
            .iter()
            .filter_map(|&item| {
                predict_rating(ratings, user, item, &neighbors).map(|score| Recommendation {
                    item_id: item,
                    score,
                })
            })
            .collect();

        recs.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.item_id.cmp(&b.item_id))
        });
        recs.truncate(self.top_n);
        Ok(recs)
    }

    fn fitted(&self) -> Result<&Ratings> {
        self.ratings
            .as_ref()
            .ok_or_else(|| RecomendarError::from("model not fitted: call fit() first"))
    }
}
