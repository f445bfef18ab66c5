//! In-memory rating store: the immutable snapshot every engine reads from.
//!
//! `Ratings` indexes a flat sequence of [`RatingRecord`]s for the access
//! patterns the recommenders need: per-user rating lookup, commonly-rated-item
//! intersection, and per-user mean ratings. Input is assumed pre-validated by
//! the ingestion collaborator (ratings in range, ids resolved); this module
//! does not re-validate it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A single (user, item, rating, timestamp) observation.
///
/// Externally supplied and immutable. The timestamp is carried for
/// completeness of the input schema; the core algorithms never read it.
///
/// # Examples
///
/// ```
/// use recomendar::dataset::RatingRecord;
///
/// let r = RatingRecord::new(1, 50, 4.5, 978_300_760);
/// assert_eq!(r.user_id, 1);
/// assert_eq!(r.rating, 4.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    /// User identifier
    pub user_id: u32,
    /// Item identifier
    pub item_id: u32,
    /// Rating value in [0.5, 5.0]
    pub rating: f32,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

impl RatingRecord {
    /// Creates a new rating record.
    #[must_use]
    pub fn new(user_id: u32, item_id: u32, rating: f32, timestamp: i64) -> Self {
        Self {
            user_id,
            item_id,
            rating,
            timestamp,
        }
    }
}

/// Read-only, indexed snapshot of the rating store.
///
/// Users are enumerated in order of first appearance in the input sequence;
/// that order is what makes every downstream tie-break deterministic. Each
/// user's ratings live in a `BTreeMap` keyed by item id, so per-user item
/// iteration is deterministic too (ascending item id).
///
/// # Examples
///
/// ```
/// use recomendar::dataset::{RatingRecord, Ratings};
///
/// let ratings = Ratings::from_records(&[
///     RatingRecord::new(1, 10, 5.0, 0),
///     RatingRecord::new(1, 20, 3.0, 0),
///     RatingRecord::new(2, 10, 1.0, 0),
/// ]);
///
/// assert_eq!(ratings.n_users(), 2);
/// assert_eq!(ratings.rating(1, 20), Some(3.0));
/// assert_eq!(ratings.rating(2, 20), None);
/// assert_eq!(ratings.mean_rating(1), Some(4.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ratings {
    /// Users in first-appearance order.
    user_order: Vec<u32>,
    /// Per-user item → rating.
    by_user: HashMap<u32, BTreeMap<u32, f32>>,
    /// Per-user mean rating over the user's entire history.
    means: HashMap<u32, f32>,
    /// Distinct item ids seen in the input.
    items: BTreeSet<u32>,
    /// Total number of stored ratings.
    n_ratings: usize,
}

impl Ratings {
    /// Builds the indexed snapshot from a flat record sequence.
    ///
    /// Duplicate (user, item) pairs resolve last-write-wins; deduplication is
    /// the ingestion collaborator's job.
    #[must_use]
    pub fn from_records(records: &[RatingRecord]) -> Self {
        let mut user_order = Vec::new();
        let mut by_user: HashMap<u32, BTreeMap<u32, f32>> = HashMap::new();
        let mut items = BTreeSet::new();

        for r in records {
            let entry = by_user.entry(r.user_id).or_insert_with(|| {
                user_order.push(r.user_id);
                BTreeMap::new()
            });
            entry.insert(r.item_id, r.rating);
            items.insert(r.item_id);
        }

        let mut means = HashMap::with_capacity(by_user.len());
        let mut n_ratings = 0;
        for (&user, ratings) in &by_user {
            n_ratings += ratings.len();
            let sum: f32 = ratings.values().sum();
            means.insert(user, sum / ratings.len() as f32);
        }

        Self {
            user_order,
            by_user,
            means,
            items,
            n_ratings,
        }
    }

    /// Users in first-appearance order.
    #[must_use]
    pub fn users(&self) -> &[u32] {
        &self.user_order
    }

    /// Number of distinct users.
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.user_order.len()
    }

    /// Number of distinct items.
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// All distinct item ids, ascending.
    #[must_use]
    pub fn items(&self) -> &BTreeSet<u32> {
        &self.items
    }

    /// Total number of stored ratings.
    #[must_use]
    pub fn n_ratings(&self) -> usize {
        self.n_ratings
    }

    /// True when the store holds no ratings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_ratings == 0
    }

    /// True when `user` has at least one rating.
    #[must_use]
    pub fn contains_user(&self, user: u32) -> bool {
        self.by_user.contains_key(&user)
    }

    /// The rating `user` gave `item`, if any.
    #[must_use]
    pub fn rating(&self, user: u32, item: u32) -> Option<f32> {
        self.by_user.get(&user).and_then(|m| m.get(&item)).copied()
    }

    /// All of `user`'s ratings, keyed by item id (ascending iteration order).
    #[must_use]
    pub fn user_ratings(&self, user: u32) -> Option<&BTreeMap<u32, f32>> {
        self.by_user.get(&user)
    }

    /// Mean rating over `user`'s entire history, `None` for unknown users.
    ///
    /// This is the baseline both Pearson centering and weighted-deviation
    /// prediction are anchored to.
    #[must_use]
    pub fn mean_rating(&self, user: u32) -> Option<f32> {
        self.means.get(&user).copied()
    }
}
