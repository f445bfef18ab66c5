//! Cold-start bootstrapping via ternary interview trees.
//!
//! Includes the lover/hater/unknown attitude classification
//! ([`Attitude`], [`AttitudeTable`]), the distinguishing score that ranks
//! candidate questions ([`distinguishing_score`]), and the depth-bounded
//! interview tree itself ([`BootstrapTree`]).

pub mod attitude;
pub mod scorer;
pub mod tree;

pub use attitude::{Attitude, AttitudeRecord, AttitudeTable, LOVER_THRESHOLD};
pub use scorer::{distinguishing_score, sample_variance};
pub use tree::{BootstrapTree, SplitNode, TernaryNode};

#[cfg(test)]
#[path = "tests_tree_contract.rs"]
mod tests_tree_contract;
