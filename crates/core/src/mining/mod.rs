//! Pattern mining over the transaction store.
//!
//! Discovers frequent itemsets level by level and expands them into
//! association rules scored by support, confidence and lift.
//!
//! # Example
//!
//! ```
//! use cobuy_core::mining::{ItemsetMiner, RuleGenerator, TransactionStore};
//!
//! let mut store = TransactionStore::new();
//! store.add(["Car_Toyota", "Category_Car", "Price_Luxury"]);
//! store.add(["Car_Toyota", "Category_Car", "Price_Luxury", "Phone_iPhone"]);
//! store.add(["Car_Honda", "Category_Car", "Price_MidRange"]);
//!
//! let itemsets = ItemsetMiner::new(0.3).mine(&store);
//! let rules = RuleGenerator::new(0.3).generate(&store, &itemsets).unwrap();
//! for rule in &rules {
//!     println!("{} => {} (conf={:.2}, lift={:.2})",
//!         rule.antecedent, rule.consequent, rule.confidence, rule.lift);
//! }
//! ```

mod apriori;
mod itemset;
mod rules;
mod store;

pub use apriori::{FrequentItemset, ItemsetMiner, MAX_ITEMSET_SIZE};
pub use itemset::{Itemset, Transaction};
pub use rules::{AssociationRule, RuleGenerator};
pub use store::TransactionStore;

use crate::errors::DomainError;

/// Default minimum support (10% of transactions).
pub const DEFAULT_MIN_SUPPORT: f64 = 0.1;

/// Default minimum confidence.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

/// Validated mining thresholds for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningThresholds {
    min_support: f64,
    min_confidence: f64,
}

impl MiningThresholds {
    /// `min_support` must lie in `(0, 1]` and `min_confidence` in `[0, 1]`.
    ///
    /// A strictly positive support floor is what keeps every antecedent of a
    /// frequent itemset at non-zero support.
    pub fn new(min_support: f64, min_confidence: f64) -> Result<Self, DomainError> {
        if !(min_support > 0.0 && min_support <= 1.0) {
            return Err(DomainError::InvalidThreshold { name: "min_support", value: min_support });
        }
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(DomainError::InvalidThreshold {
                name: "min_confidence",
                value: min_confidence,
            });
        }
        Ok(Self { min_support, min_confidence })
    }

    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }
}

impl Default for MiningThresholds {
    fn default() -> Self {
        Self { min_support: DEFAULT_MIN_SUPPORT, min_confidence: DEFAULT_MIN_CONFIDENCE }
    }
}
