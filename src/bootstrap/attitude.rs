//! Three-valued attitude classification of ratings.
//!
//! The bootstrapping tree does not partition on raw rating values; it
//! partitions on a coarse attitude: did the user love the item, hate it, or
//! never rate it. Absence of a rating is a first-class value here, not a gap.
//! "Hasn't seen it" is exactly the signal the unknown branch of the tree
//! routes on.

use crate::dataset::Ratings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default rating threshold separating lovers from haters.
pub const LOVER_THRESHOLD: f32 = 3.5;

/// A user's stance toward an item.
///
/// # Examples
///
/// ```
/// use recomendar::bootstrap::Attitude;
///
/// assert_eq!(Attitude::from_rating(Some(4.0), 3.5), Attitude::Lover);
/// assert_eq!(Attitude::from_rating(Some(3.0), 3.5), Attitude::Hater);
/// assert_eq!(Attitude::from_rating(None, 3.5), Attitude::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attitude {
    /// Rated at or above the threshold.
    Lover,
    /// Rated below the threshold.
    Hater,
    /// Never rated the item.
    Unknown,
}

impl Attitude {
    /// Classifies a (possibly absent) rating against `threshold`.
    ///
    /// Total and pure: every input maps to exactly one attitude.
    #[must_use]
    pub fn from_rating(rating: Option<f32>, threshold: f32) -> Self {
        match rating {
            Some(r) if r >= threshold => Attitude::Lover,
            Some(_) => Attitude::Hater,
            None => Attitude::Unknown,
        }
    }
}

/// One derived (user, item, attitude) row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttitudeRecord {
    /// User identifier
    pub user_id: u32,
    /// Candidate item identifier
    pub item_id: u32,
    /// Derived stance
    pub attitude: Attitude,
}

/// Dense user × candidate-item attitude materialization.
///
/// Covers the full cross product of every user who rated at least one
/// candidate item with every candidate item; absent-rating pairs are
/// synthesized explicitly as [`Attitude::Unknown`] so downstream partitioning
/// can treat them as a branch of their own.
///
/// # Examples
///
/// ```
/// use recomendar::bootstrap::{Attitude, AttitudeTable};
/// use recomendar::dataset::{RatingRecord, Ratings};
///
/// let ratings = Ratings::from_records(&[
///     RatingRecord::new(1, 10, 5.0, 0),
///     RatingRecord::new(2, 20, 2.0, 0),
///     RatingRecord::new(3, 99, 4.0, 0), // no candidate rating: not in table
/// ]);
/// let table = AttitudeTable::from_ratings(&ratings, &[10, 20], 3.5);
///
/// assert_eq!(table.users(), &[1, 2]);
/// assert_eq!(table.attitude(1, 10), Some(Attitude::Lover));
/// assert_eq!(table.attitude(1, 20), Some(Attitude::Unknown));
/// assert_eq!(table.attitude(2, 20), Some(Attitude::Hater));
/// assert_eq!(table.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct AttitudeTable {
    threshold: f32,
    /// Deduplicated candidate items, first occurrence order.
    items: Vec<u32>,
    item_index: HashMap<u32, usize>,
    /// Users with at least one candidate rating, store enumeration order.
    users: Vec<u32>,
    /// Per user, one attitude per entry of `items` (same order).
    rows: HashMap<u32, Vec<Attitude>>,
}

impl AttitudeTable {
    /// Materializes the dense attitude cross product.
    ///
    /// Duplicate candidate ids are dropped (first occurrence wins). Users who
    /// rated none of the candidates do not appear: they carry no signal the
    /// tree could split on.
    #[must_use]
    pub fn from_ratings(ratings: &Ratings, candidates: &[u32], threshold: f32) -> Self {
        let mut items = Vec::new();
        let mut item_index = HashMap::new();
        for &item in candidates {
            if !item_index.contains_key(&item) {
                item_index.insert(item, items.len());
                items.push(item);
            }
        }

        let mut users = Vec::new();
        let mut rows = HashMap::new();
        for &user in ratings.users() {
            let row: Vec<Attitude> = items
                .iter()
                .map(|&item| Attitude::from_rating(ratings.rating(user, item), threshold))
                .collect();
            if row.iter().any(|&a| a != Attitude::Unknown) {
                users.push(user);
                rows.insert(user, row);
            }
        }

        Self {
            threshold,
            items,
            item_index,
            users,
            rows,
        }
    }

    /// The threshold the table was classified with.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Candidate items, deduplicated, in input order.
    #[must_use]
    pub fn items(&self) -> &[u32] {
        &self.items
    }

    /// Users covered by the table, in store enumeration order.
    #[must_use]
    pub fn users(&self) -> &[u32] {
        &self.users
    }

    /// The materialized attitude for (user, item).
    ///
    /// `None` means the pair lies outside the cross product (user rated no
    /// candidate, or the item is not a candidate) — distinct from
    /// [`Attitude::Unknown`], which is a real table entry.
    #[must_use]
    pub fn attitude(&self, user: u32, item: u32) -> Option<Attitude> {
        let idx = *self.item_index.get(&item)?;
        self.rows.get(&user).map(|row| row[idx])
    }

    /// Number of materialized (user, item) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len() * self.items.len()
    }

    /// True when the cross product is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates every materialized row as an [`AttitudeRecord`].
    ///
    /// Rows come out user-major, users in enumeration order, items in
    /// candidate order, so iteration is fully deterministic.
    pub fn records(&self) -> impl Iterator<Item = AttitudeRecord> + '_ {
        self.users.iter().flat_map(move |&user| {
            let row = &self.rows[&user];
            self.items
                .iter()
                .zip(row.iter())
                .map(move |(&item_id, &attitude)| AttitudeRecord {
                    user_id: user,
                    item_id,
                    attitude,
                })
        })
    }
}
