//! Association rule generation from frequent itemsets.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use super::apriori::FrequentItemset;
use super::itemset::Itemset;
use super::store::TransactionStore;
use crate::errors::DomainError;

/// Antecedent supports at or below this are treated as zero.
const MIN_ANTECEDENT_SUPPORT: f64 = f64::EPSILON;

/// Association rule: antecedent => consequent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationRule {
    /// Items in the antecedent (left side)
    pub antecedent: Itemset,
    /// Items in the consequent (right side)
    pub consequent: Itemset,
    /// Support: P(antecedent ∪ consequent)
    pub support: f64,
    /// Confidence: P(consequent | antecedent) = support / P(antecedent)
    pub confidence: f64,
    /// Lift: confidence / P(consequent)
    pub lift: f64,
}

impl AssociationRule {
    pub fn is_strong(&self) -> bool {
        self.lift > 1.5 && self.confidence > 0.5
    }
}

/// Expands frequent itemsets into scored, filtered and ordered rules.
#[derive(Debug, Clone, Copy)]
pub struct RuleGenerator {
    min_confidence: f64,
}

impl RuleGenerator {
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Every rule with `confidence >= min_confidence` and `lift > 1`, sorted by
    /// lift then confidence, both descending. Ties keep generation order.
    pub fn generate(
        &self,
        store: &TransactionStore,
        itemsets: &[FrequentItemset],
    ) -> Result<Vec<AssociationRule>, DomainError> {
        let mut supports = SupportMemo::new(store);
        let mut rules = Vec::new();

        for itemset in itemsets.iter().filter(|itemset| itemset.len() >= 2) {
            for antecedent in itemset.items.proper_subsets() {
                let consequent = itemset.items.difference(&antecedent);
                if consequent.is_empty() {
                    continue;
                }

                let support = supports.get(&itemset.items);
                let antecedent_support = supports.get(&antecedent);
                if antecedent_support <= MIN_ANTECEDENT_SUPPORT {
                    warn!(
                        event_name = "engine.rules.zero_antecedent_support",
                        antecedent = %antecedent,
                        itemset = %itemset.items,
                        "antecedent of a frequent itemset has no support"
                    );
                    return Err(DomainError::InvariantViolation(format!(
                        "antecedent {antecedent} of frequent itemset {} has zero support",
                        itemset.items
                    )));
                }

                let confidence = support / antecedent_support;
                let consequent_support = supports.get(&consequent);
                let lift =
                    if consequent_support > 0.0 { confidence / consequent_support } else { 0.0 };

                if confidence >= self.min_confidence && lift > 1.0 {
                    rules.push(AssociationRule { antecedent, consequent, support, confidence, lift });
                }
            }
        }

        rules.sort_by(|a, b| {
            b.lift.total_cmp(&a.lift).then_with(|| b.confidence.total_cmp(&a.confidence))
        });

        Ok(rules)
    }
}

/// Per-recomputation cache in front of the store's full-scan support query.
struct SupportMemo<'a> {
    store: &'a TransactionStore,
    cache: HashMap<Itemset, f64>,
}

impl<'a> SupportMemo<'a> {
    fn new(store: &'a TransactionStore) -> Self {
        Self { store, cache: HashMap::new() }
    }

    fn get(&mut self, itemset: &Itemset) -> f64 {
        if let Some(support) = self.cache.get(itemset) {
            return *support;
        }
        let support = self.store.support(itemset);
        self.cache.insert(itemset.clone(), support);
        support
    }
}
