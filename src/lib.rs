//! Recomendar: rating-based recommendation with cold-start bootstrapping in pure Rust.
//!
//! Recomendar builds adaptive interview trees that learn what to ask brand-new
//! users, and serves neighborhood-based rating predictions and top-N
//! recommendations for everyone else. Every pipeline stage is deterministic:
//! the same ratings always produce the same tree, the same neighborhoods, and
//! the same recommendation lists.
//!
//! # Quick Start
//!
//! ```
//! use recomendar::prelude::*;
//!
//! let records = vec![
//!     RatingRecord::new(1, 10, 5.0, 0),
//!     RatingRecord::new(1, 20, 4.0, 0),
//!     RatingRecord::new(1, 30, 1.0, 0),
//!     RatingRecord::new(2, 10, 5.0, 0),
//!     RatingRecord::new(2, 20, 4.0, 0),
//!     RatingRecord::new(2, 30, 1.0, 0),
//!     RatingRecord::new(2, 40, 4.5, 0),
//!     RatingRecord::new(3, 10, 1.0, 0),
//!     RatingRecord::new(3, 20, 2.0, 0),
//!     RatingRecord::new(3, 30, 5.0, 0),
//! ];
//!
//! // Interview tree for cold-start users: two questions, starting at item 10.
//! let mut tree = BootstrapTree::new(2);
//! tree.fit(&Ratings::from_records(&records), &[10, 20, 30]).unwrap();
//! assert_eq!(tree.next_item(&[]), Some(10));
//!
//! // Top-N recommendations for known users.
//! let mut recommender = UserBasedRecommender::new();
//! recommender.fit(&records).unwrap();
//! let recs = recommender.recommend(1).unwrap();
//! assert_eq!(recs[0].item_id, 40);
//! ```
//!
//! # Modules
//!
//! - [`dataset`]: Rating records and the indexed rating store
//! - [`bootstrap`]: Attitude classification, distinguishing scores, and interview trees
//! - [`similarity`]: Pearson and cosine user-user similarity
//! - [`neighbors`]: Top-K neighborhood selection
//! - [`predict`]: Weighted-deviation rating prediction
//! - [`recommend`]: User-based top-N recommendation engine
//! - [`error`]: Crate-wide error type

pub mod bootstrap;
pub mod dataset;
pub mod error;
pub mod neighbors;
pub mod predict;
pub mod prelude;
pub mod recommend;
pub mod similarity;

pub use error::{RecomendarError, Result};
