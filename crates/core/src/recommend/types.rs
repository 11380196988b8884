//! Types for the recommendation engine

use serde::Serialize;

use crate::domain::product::Product;

/// A consequent item aggregated across every matching rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Recommended item identifier, e.g. `Phone_iPhone`
    pub name: String,
    /// Sum of `confidence * lift * match_score` over contributing rules
    pub total_score: f64,
    /// Highest confidence among contributing rules
    pub confidence: f64,
    /// Highest support among contributing rules
    pub support: f64,
    /// Lift of the last contributing rule
    pub lift: f64,
    /// Number of contributing rules
    pub occurrences: u32,
}

impl Recommendation {
    pub(crate) fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_score: 0.0,
            confidence: 0.0,
            support: 0.0,
            lift: 0.0,
            occurrences: 0,
        }
    }
}

/// Add-on service associated with a query product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedService {
    pub service: String,
    pub confidence: f64,
}

/// Catalog product scored by similarity when no rule matched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackRecommendation {
    #[serde(flatten)]
    pub product: Product,
    pub score: f64,
    pub confidence: f64,
    pub is_fallback: bool,
}

/// Catalog product resolved from a rule-based recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProduct {
    #[serde(flatten)]
    pub product: Product,
    /// Item identifier the product was resolved from
    pub matched_item: String,
    pub score: f64,
    pub confidence: f64,
    pub lift: f64,
}

/// Rule-set health summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStats {
    pub total_transactions: usize,
    pub total_itemsets: usize,
    pub total_rules: usize,
    /// Mean confidence of the top rules, two decimals
    pub avg_confidence: f64,
    /// Mean lift of the top rules, two decimals
    pub avg_lift: f64,
    /// Rules with lift > 1.5 and confidence > 0.5
    pub strong_rules: usize,
}
