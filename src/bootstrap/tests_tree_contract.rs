// =========================================================================
// FALSIFY-BT: bootstrap-tree-v1.yaml contract (recomendar BootstrapTree)
//
// Five-Whys (PMAT-354):
//   Why 1: recomendar had no inline FALSIFY-BT-* tests
//   Why 2: tree tests exist but lack contract-mapped FALSIFY naming
//   Why 3: no mapping from bootstrap-tree-v1.yaml to inline test names
//   Why 4: recomendar predates the inline FALSIFY convention
//   Why 5: greedy min-variance splitting was "obviously correct" (textbook
//          algorithm)
//
// References:
//   - provable-contracts/contracts/bootstrap-tree-v1.yaml
//   - Golbandi et al. (2011) "Adaptive Bootstrapping of Recommender Systems
//     Using Decision Trees"
// =========================================================================

use super::*;
use crate::dataset::{RatingRecord, Ratings};

/// Deterministic synthetic ratings: user u rates item i iff
/// (u + i + seed) % 3 != 0, with a modular rating in [0.5, 5.0].
fn synthetic_ratings(n_users: u32, n_items: u32, seed: u32) -> Ratings {
    let mut records = Vec::new();
    for user in 1..=n_users {
        for item in 1..=n_items {
            if (user + item + seed) % 3 == 0 {
                continue;
            }
            let rating = ((user * 7 + item * 13 + seed) % 10) as f32 * 0.5 + 0.5;
            records.push(RatingRecord::new(user, item, rating, 0));
        }
    }
    Ratings::from_records(&records)
}

/// Returns true if any root-to-leaf path asks about the same item twice.
fn path_repeats_item(node: &TernaryNode, seen: &mut Vec<u32>) -> bool {
    match node {
        TernaryNode::Leaf => false,
        TernaryNode::Node(split) => {
            if seen.contains(&split.item_id) {
                return true;
            }
            seen.push(split.item_id);
            let repeat = path_repeats_item(&split.lover, seen)
                || path_repeats_item(&split.unknown, seen)
                || path_repeats_item(&split.hater, seen);
            seen.pop();
            repeat
        }
    }
}

/// FALSIFY-BT-001: Deterministic — same ratings and candidates, same tree
#[test]
fn falsify_bt_001_deterministic() {
    let ratings = synthetic_ratings(6, 5, 42);
    let candidates: Vec<u32> = (1..=5).collect();

    let mut a = BootstrapTree::new(3);
    let mut b = BootstrapTree::new(3);
    a.fit(&ratings, &candidates).expect("fit a");
    b.fit(&ratings, &candidates).expect("fit b");

    assert_eq!(
        a.level_order(),
        b.level_order(),
        "FALSIFIED BT-001: identical fits produced different trees"
    );
}

/// FALSIFY-BT-002: Depth bounded — interview never exceeds the level budget
#[test]
fn falsify_bt_002_depth_bounded() {
    for levels in 0..4 {
        let ratings = synthetic_ratings(8, 6, 7);
        let candidates: Vec<u32> = (1..=6).collect();
        let mut tree = BootstrapTree::new(levels);
        tree.fit(&ratings, &candidates).expect("fit");

        assert!(
            tree.populated_levels() <= levels,
            "FALSIFIED BT-002: populated_levels {} > levels {}",
            tree.populated_levels(),
            levels
        );
        let over_budget = vec![Attitude::Lover; levels];
        assert_eq!(
            tree.next_item(&over_budget),
            None,
            "FALSIFIED BT-002: question asked past the level budget"
        );
    }
}

/// FALSIFY-BT-003: Level-order rows hold exactly 3^k slots
#[test]
fn falsify_bt_003_level_order_width() {
    let ratings = synthetic_ratings(6, 4, 3);
    let candidates: Vec<u32> = (1..=4).collect();
    let mut tree = BootstrapTree::new(3);
    tree.fit(&ratings, &candidates).expect("fit");

    let rows = tree.level_order();
    assert_eq!(rows.len(), 3, "FALSIFIED BT-003: expected one row per level");
    for (k, row) in rows.iter().enumerate() {
        assert_eq!(
            row.len(),
            3_usize.pow(k as u32),
            "FALSIFIED BT-003: row {k} has {} slots, expected 3^{k}",
            row.len()
        );
    }
}

/// FALSIFY-BT-004: No root-to-leaf path repeats an item
#[test]
fn falsify_bt_004_no_repeats_on_path() {
    let ratings = synthetic_ratings(10, 6, 11);
    let candidates: Vec<u32> = (1..=6).collect();
    let mut tree = BootstrapTree::new(4);
    tree.fit(&ratings, &candidates).expect("fit");

    let root = tree.root().expect("fitted");
    assert!(
        !path_repeats_item(root, &mut Vec::new()),
        "FALSIFIED BT-004: an interview path asks about the same item twice"
    );
}

/// FALSIFY-BT-005: Score ties resolve toward the smallest item id
///
/// The textbook degenerate cohort (every per-group sample has at most one
/// rating) scores every candidate 0 regardless of candidate order.
#[test]
fn falsify_bt_005_tie_break_smallest_id() {
    let ratings = Ratings::from_records(&[
        RatingRecord::new(1, 7, 5.0, 0),
        RatingRecord::new(1, 9, 5.0, 0),
        RatingRecord::new(2, 7, 1.0, 0),
        RatingRecord::new(2, 9, 1.0, 0),
        RatingRecord::new(3, 7, 5.0, 0),
    ]);

    for candidates in [[7, 9], [9, 7]] {
        let mut tree = BootstrapTree::new(1);
        tree.fit(&ratings, &candidates).expect("fit");
        assert_eq!(
            tree.next_item(&[]),
            Some(7),
            "FALSIFIED BT-005: tie not broken toward item 7 for {candidates:?}"
        );
    }
}

/// FALSIFY-BT-006: Empty cohort terminates the branch
#[test]
fn falsify_bt_006_empty_cohort_is_leaf() {
    // Every user has rated item 1, so nobody follows the unknown branch.
    let ratings = Ratings::from_records(&[
        RatingRecord::new(1, 1, 5.0, 0),
        RatingRecord::new(1, 2, 2.0, 0),
        RatingRecord::new(2, 1, 1.0, 0),
        RatingRecord::new(2, 2, 4.0, 0),
    ]);
    let mut tree = BootstrapTree::new(2);
    tree.fit(&ratings, &[1, 2]).expect("fit");

    assert_eq!(tree.next_item(&[]), Some(1));
    assert_eq!(
        tree.next_item(&[Attitude::Unknown]),
        None,
        "FALSIFIED BT-006: empty unknown cohort still asked a question"
    );
}

/// FALSIFY-BT-007: JSON export encodes exactly the level-order slots
#[test]
fn falsify_bt_007_json_matches_level_order() {
    let ratings = synthetic_ratings(6, 5, 19);
    let candidates: Vec<u32> = (1..=5).collect();
    let mut tree = BootstrapTree::new(3);
    tree.fit(&ratings, &candidates).expect("fit");

    let json = tree.level_order_json().expect("json");
    let decoded: Vec<Vec<i64>> = serde_json::from_str(&json).expect("parse");
    let rows = tree.level_order();

    assert_eq!(decoded.len(), rows.len());
    for (row, decoded_row) in rows.iter().zip(&decoded) {
        assert_eq!(row.len(), decoded_row.len());
        for (slot, &code) in row.iter().zip(decoded_row) {
            match slot {
                Some(item) => assert_eq!(
                    code,
                    i64::from(*item),
                    "FALSIFIED BT-007: question slot encoded as {code}"
                ),
                None => assert_eq!(code, -1, "FALSIFIED BT-007: empty slot not -1"),
            }
        }
    }
}

/// FALSIFY-BT-008: Save and load preserve every interview path
#[test]
fn falsify_bt_008_save_load_preserves_traversal() {
    let ratings = synthetic_ratings(8, 5, 23);
    let candidates: Vec<u32> = (1..=5).collect();
    let mut tree = BootstrapTree::new(2);
    tree.fit(&ratings, &candidates).expect("fit");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tree.bin");
    tree.save(&path).expect("save");
    let loaded = BootstrapTree::load(&path).expect("load");

    let answers = [Attitude::Lover, Attitude::Unknown, Attitude::Hater];
    for &first in &answers {
        assert_eq!(
            loaded.next_item(&[first]),
            tree.next_item(&[first]),
            "FALSIFIED BT-008: traversal changed after reload"
        );
        for &second in &answers {
            assert_eq!(
                loaded.next_item(&[first, second]),
                tree.next_item(&[first, second]),
                "FALSIFIED BT-008: traversal changed after reload"
            );
        }
    }
}

mod bt_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    /// FALSIFY-BT-001-prop: Determinism over generated ratings
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn falsify_bt_001_prop_deterministic(
            n_users in 2..8u32,
            n_items in 2..6u32,
            seed in 0..500u32,
        ) {
            let ratings = synthetic_ratings(n_users, n_items, seed);
            let candidates: Vec<u32> = (1..=n_items).collect();

            let mut a = BootstrapTree::new(3);
            let mut b = BootstrapTree::new(3);
            a.fit(&ratings, &candidates).expect("fit a");
            b.fit(&ratings, &candidates).expect("fit b");

            prop_assert_eq!(
                a.level_order(),
                b.level_order(),
                "FALSIFIED BT-001-prop: nondeterministic tree for seed {}",
                seed
            );
        }
    }

    /// FALSIFY-BT-002-prop: Depth and scope bounds over generated ratings
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn falsify_bt_002_prop_bounds(
            n_users in 2..8u32,
            n_items in 2..6u32,
            levels in 0..4usize,
            seed in 0..500u32,
        ) {
            let ratings = synthetic_ratings(n_users, n_items, seed);
            let candidates: Vec<u32> = (1..=n_items).collect();

            let mut tree = BootstrapTree::new(levels);
            tree.fit(&ratings, &candidates).expect("fit");

            prop_assert!(
                tree.populated_levels() <= levels,
                "FALSIFIED BT-002-prop: depth {} over budget {}",
                tree.populated_levels(), levels
            );
            if let Some(root) = tree.root() {
                prop_assert!(
                    !path_repeats_item(root, &mut Vec::new()),
                    "FALSIFIED BT-002-prop: item repeated along a path"
                );
            }
        }
    }
}
