//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use recomendar::prelude::*;
//! ```

pub use crate::bootstrap::{Attitude, AttitudeTable, BootstrapTree, LOVER_THRESHOLD};
pub use crate::dataset::{RatingRecord, Ratings};
pub use crate::error::{RecomendarError, Result};
pub use crate::neighbors::{top_k, Neighbor};
pub use crate::predict::predict_rating;
pub use crate::recommend::{Recommendation, UserBasedRecommender};
pub use crate::similarity::{cosine, pearson, SimilarityMeasure, MIN_OVERLAP};
