//! Ternary interview tree construction and traversal.
//!
//! The tree drives an adaptive cold-start interview: each internal node asks
//! the newcomer about one item, and the answer (lover / unknown / hater)
//! selects the subtree holding the next question. Construction is greedy and
//! top-down. At every node the builder scores each in-scope candidate with
//! [`distinguishing_score`] against the node's user cohort and splits on the
//! minimum, breaking ties toward the smallest item id. The chosen item is
//! removed from scope along its own path only, so sibling branches may reuse
//! it. Building is fully deterministic: the same ratings, candidates, and
//! hyperparameters always produce the same tree.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::bootstrap::attitude::{Attitude, AttitudeTable, LOVER_THRESHOLD};
use crate::bootstrap::scorer::{distinguishing_score, partition_by_attitude};
use crate::dataset::Ratings;
use crate::error::{RecomendarError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Internal node: one interview question.
///
/// Holds the item to ask about and the three subtrees selected by the
/// newcomer's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitNode {
    /// Item the interview asks about at this node
    pub item_id: u32,
    /// Subtree for users who love the item
    pub lover: Box<TernaryNode>,
    /// Subtree for users who have not rated the item
    pub unknown: Box<TernaryNode>,
    /// Subtree for users who dislike the item
    pub hater: Box<TernaryNode>,
}

impl SplitNode {
    /// Returns the subtree selected by an answer.
    #[must_use]
    pub fn child(&self, attitude: Attitude) -> &TernaryNode {
        match attitude {
            Attitude::Lover => &self.lover,
            Attitude::Unknown => &self.unknown,
            Attitude::Hater => &self.hater,
        }
    }
}

/// A node in the interview tree (either a question or a stopping point).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TernaryNode {
    /// Internal question node with three answer branches
    Node(SplitNode),
    /// Terminal node: the interview asks nothing further
    Leaf,
}

impl TernaryNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth
    /// 1 + the maximum over their three children.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            TernaryNode::Leaf => 0,
            TernaryNode::Node(split) => {
                let children = [&split.lover, &split.unknown, &split.hater];
                1 + children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
        }
    }

    /// Returns the item asked about at this node, `None` for a leaf.
    #[must_use]
    pub fn item_id(&self) -> Option<u32> {
        match self {
            TernaryNode::Leaf => None,
            TernaryNode::Node(split) => Some(split.item_id),
        }
    }

    /// Returns true if this node ends the interview.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, TernaryNode::Leaf)
    }

    /// Counts the question nodes in the subtree rooted here.
    #[must_use]
    pub fn n_splits(&self) -> usize {
        match self {
            TernaryNode::Leaf => 0,
            TernaryNode::Node(split) => {
                1 + split.lover.n_splits() + split.unknown.n_splits() + split.hater.n_splits()
            }
        }
    }
}

/// Depth-bounded ternary tree for bootstrapping new users.
///
/// Follows the fit/inspect convention: construct with hyperparameters, call
/// [`fit`](BootstrapTree::fit) with training ratings and candidate items,
/// then traverse with [`next_item`](BootstrapTree::next_item) or export with
/// [`level_order`](BootstrapTree::level_order).
///
/// # Examples
///
/// ```
/// use recomendar::bootstrap::{Attitude, BootstrapTree};
/// use recomendar::dataset::{RatingRecord, Ratings};
///
/// let ratings = Ratings::from_records(&[
///     RatingRecord::new(1, 10, 5.0, 0),
///     RatingRecord::new(1, 20, 1.0, 0),
///     RatingRecord::new(2, 10, 4.0, 0),
///     RatingRecord::new(2, 30, 2.0, 0),
/// ]);
///
/// let mut tree = BootstrapTree::new(2);
/// tree.fit(&ratings, &[10, 20, 30]).unwrap();
///
/// assert!(tree.is_fitted());
/// assert_eq!(tree.next_item(&[]), Some(10));
/// assert_eq!(tree.next_item(&[Attitude::Lover]), Some(20));
/// assert_eq!(tree.next_item(&[Attitude::Lover, Attitude::Lover]), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapTree {
    levels: usize,
    threshold: f32,
    root: Option<TernaryNode>,
}

impl BootstrapTree {
    /// Creates an unfitted tree asking at most `levels` questions per user.
    ///
    /// The attitude threshold defaults to [`LOVER_THRESHOLD`].
    #[must_use]
    pub fn new(levels: usize) -> Self {
        Self {
            levels,
            threshold: LOVER_THRESHOLD,
            root: None,
        }
    }

    /// Sets the rating threshold separating lovers from haters.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Maximum number of questions a single interview may ask.
    #[must_use]
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Rating threshold separating lovers from haters.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Builds the interview tree from training ratings.
    ///
    /// `candidates` lists the items eligible as interview questions;
    /// duplicates are dropped, keeping the first occurrence. The root cohort
    /// is every user in `ratings`, in enumeration order. Recursion stops at
    /// the level bound, on an empty cohort, or when the path has consumed
    /// every candidate.
    ///
    /// # Errors
    ///
    /// Returns an error if `candidates` is empty or the threshold is not
    /// finite.
    pub fn fit(&mut self, ratings: &Ratings, candidates: &[u32]) -> Result<()> {
        if candidates.is_empty() {
            return Err(RecomendarError::empty_input("candidate items"));
        }
        if !self.threshold.is_finite() {
            return Err(RecomendarError::invalid_hyperparameter(
                "threshold",
                self.threshold,
                "must be finite",
            ));
        }

        let table = AttitudeTable::from_ratings(ratings, candidates, self.threshold);
        let cohort: Vec<u32> = ratings.users().to_vec();
        let items: Vec<u32> = table.items().to_vec();

        self.root = Some(build_node(ratings, &table, &cohort, &items, self.levels));
        Ok(())
    }

    /// Returns the fitted root, `None` before [`fit`](BootstrapTree::fit).
    #[must_use]
    pub fn root(&self) -> Option<&TernaryNode> {
        self.root.as_ref()
    }

    /// Returns true once the tree has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Counts the question nodes in the fitted tree.
    #[must_use]
    pub fn n_splits(&self) -> usize {
        self.root.as_ref().map_or(0, TernaryNode::n_splits)
    }

    /// Walks the tree along a sequence of answers and returns the next item
    /// to ask about.
    ///
    /// Returns `None` when the interview is over: the walk reached a leaf,
    /// the answers overran a leaf, or the tree is unfitted.
    #[must_use]
    pub fn next_item(&self, answers: &[Attitude]) -> Option<u32> {
        let mut node = self.root.as_ref()?;
        for &attitude in answers {
            match node {
                TernaryNode::Node(split) => node = split.child(attitude),
                TernaryNode::Leaf => return None,
            }
        }
        node.item_id()
    }

    /// Serializes the tree level by level.
    ///
    /// Row `k` holds exactly `3^k` slots, one per potential node at that
    /// level, ordered lover, unknown, hater under each parent. A slot is
    /// `Some(item_id)` for a question node and `None` where the tree has a
    /// leaf or no node at all. Returns one row per configured level; an
    /// unfitted tree yields no rows.
    #[must_use]
    pub fn level_order(&self) -> Vec<Vec<Option<u32>>> {
        let Some(root) = &self.root else {
            return Vec::new();
        };
        let mut rows: Vec<Vec<Option<u32>>> = vec![Vec::new(); self.levels];
        bucket_levels(root, 0, &mut rows);
        rows
    }

    /// Number of levels that contain at least one question node.
    ///
    /// At most [`levels`](BootstrapTree::levels); smaller when cohorts empty
    /// out or the candidate pool runs dry first.
    #[must_use]
    pub fn populated_levels(&self) -> usize {
        self.root.as_ref().map_or(0, TernaryNode::depth)
    }

    /// Exports [`level_order`](BootstrapTree::level_order) as a JSON array of
    /// arrays, encoding empty slots as `-1`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails.
    pub fn level_order_json(&self) -> Result<String> {
        let rows: Vec<Vec<i64>> = self
            .level_order()
            .into_iter()
            .map(|row| row.into_iter().map(|slot| slot.map_or(-1, i64::from)).collect())
            .collect();
        serde_json::to_string(&rows).map_err(|e| RecomendarError::Serialization(e.to_string()))
    }

    /// Saves the tree to a binary file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes =
            bincode::serialize(self).map_err(|e| RecomendarError::Serialization(e.to_string()))?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Loads a tree from a binary file.
    ///
    /// # Errors
    ///
    /// Returns an error if file reading or deserialization fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        let tree =
            bincode::deserialize(&bytes).map_err(|e| RecomendarError::Serialization(e.to_string()))?;
        Ok(tree)
    }
}

/// Recursively builds one node over the given cohort and in-scope items.
fn build_node(
    ratings: &Ratings,
    table: &AttitudeTable,
    cohort: &[u32],
    items: &[u32],
    levels_left: usize,
) -> TernaryNode {
    if levels_left == 0 || cohort.is_empty() || items.is_empty() {
        return TernaryNode::Leaf;
    }

    let splitter = best_splitter(ratings, table, cohort, items);
    let (lovers, haters, unknowns) = partition_by_attitude(table, cohort, splitter);
    let remaining: Vec<u32> = items.iter().copied().filter(|&i| i != splitter).collect();

    TernaryNode::Node(SplitNode {
        item_id: splitter,
        lover: Box::new(build_node(ratings, table, &lovers, &remaining, levels_left - 1)),
        unknown: Box::new(build_node(
            ratings,
            table,
            &unknowns,
            &remaining,
            levels_left - 1,
        )),
        hater: Box::new(build_node(ratings, table, &haters, &remaining, levels_left - 1)),
    })
}

/// Scores every in-scope item and returns the one with the minimum
/// distinguishing score, ties broken toward the smallest item id.
///
/// `items` must be non-empty.
fn best_splitter(ratings: &Ratings, table: &AttitudeTable, cohort: &[u32], items: &[u32]) -> u32 {
    #[cfg(feature = "parallel")]
    let scored: Vec<(u32, f32)> = items
        .par_iter()
        .map(|&item| (item, distinguishing_score(ratings, table, cohort, items, item)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let scored: Vec<(u32, f32)> = items
        .iter()
        .map(|&item| (item, distinguishing_score(ratings, table, cohort, items, item)))
        .collect();

    let mut best = scored[0];
    for &(item, score) in &scored[1..] {
        if score < best.1 || (score == best.1 && item < best.0) {
            best = (item, score);
        }
    }
    best.0
}

/// Walks the subtree depth-first, appending each node to its level's row.
///
/// Fixed lover, unknown, hater child order makes the depth-first visit fill
/// each row in breadth-first order.
fn bucket_levels(node: &TernaryNode, level: usize, rows: &mut Vec<Vec<Option<u32>>>) {
    if level >= rows.len() {
        return;
    }
    match node {
        TernaryNode::Leaf => {
            rows[level].push(None);
            fill_absent(level + 1, 3, rows);
        }
        TernaryNode::Node(split) => {
            rows[level].push(Some(split.item_id));
            bucket_levels(&split.lover, level + 1, rows);
            bucket_levels(&split.unknown, level + 1, rows);
            bucket_levels(&split.hater, level + 1, rows);
        }
    }
}

/// Fills the slots a missing subtree would have occupied with `None`.
fn fill_absent(level: usize, count: usize, rows: &mut Vec<Vec<Option<u32>>>) {
    if level >= rows.len() {
        return;
    }
    rows[level].extend(std::iter::repeat(None).take(count));
    fill_absent(level + 1, count * 3, rows);
}
