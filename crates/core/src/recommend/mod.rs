//! Rule-based product recommendations
//!
//! Turns the mined rule set into ranked cross-sell candidates for a product
//! name, extracts related add-on services, and falls back to catalog
//! similarity when no rule applies.

mod engine;
mod fallback;
mod scoring;
mod stats;
mod terms;
mod types;
pub mod view;

pub use engine::Recommender;
pub use fallback::{price_bonus, rank_by_similarity, similarity_score};
pub use scoring::{match_score, strip_kind_prefix};
pub use terms::{SearchTerms, KIND_PREFIXES};
pub use types::*;
pub use view::{ProductMatch, ProductView};

/// Prefix of add-on service items; never recommended as products
pub const SERVICE_PREFIX: &str = "Service_";

/// Recommendations returned when the caller gives no limit
pub const DEFAULT_LIMIT: usize = 4;

/// Rules averaged by the stats reporter
pub const STATS_WINDOW: usize = 10;

/// Popularity is the matching-transaction fraction times this scale...
pub const POPULARITY_SCALE: f64 = 10.0;

/// ...capped at this value
pub const MAX_POPULARITY: f64 = 5.0;
