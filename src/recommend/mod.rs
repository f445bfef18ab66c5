//! Recommendation engines.
//!
//! # Algorithms
//!
//! - **User-based collaborative filtering**: neighborhood selection over
//!   user-user similarity plus weighted-deviation rating prediction
//!
//! # Quick Start
//!
//! ```
//! use recomendar::recommend::UserBasedRecommender;
//! use recomendar::dataset::RatingRecord;
//!
//! let records = vec![
//!     RatingRecord::new(1, 10, 5.0, 0),
//!     RatingRecord::new(1, 20, 4.0, 0),
//!     RatingRecord::new(1, 30, 1.0, 0),
//!     RatingRecord::new(2, 10, 5.0, 0),
//!     RatingRecord::new(2, 20, 4.0, 0),
//!     RatingRecord::new(2, 30, 1.0, 0),
//!     RatingRecord::new(2, 40, 4.5, 0),
//! ];
//!
//! let mut recommender = UserBasedRecommender::new();
//! recommender.fit(&records).unwrap();
//!
//! // Item 40 is the one item user 1 has not seen.
//! let recommendations = recommender.recommend(1).unwrap();
//! assert_eq!(recommendations[0].item_id, 40);
//! ```

pub mod user_based;

pub use user_based::{Recommendation, UserBasedRecommender, DEFAULT_NEIGHBORS, DEFAULT_TOP_N};
