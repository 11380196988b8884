//! Recommendation engine owning the transaction store and mined rule set.

use tracing::{debug, info};

use super::fallback::rank_by_similarity;
use super::scoring::{related_services, score_rules};
use super::stats::summarize;
use super::terms::SearchTerms;
use super::types::{FallbackRecommendation, Recommendation, RelatedService, RuleStats};
use super::{MAX_POPULARITY, POPULARITY_SCALE};
use crate::domain::product::Product;
use crate::errors::DomainError;
use crate::mining::{
    AssociationRule, FrequentItemset, Itemset, ItemsetMiner, MiningThresholds, RuleGenerator,
    TransactionStore,
};

/// Market-basket recommender.
///
/// Queries read the itemsets and rules from the last recomputation; call
/// [`Recommender::recompute`] after adding transactions whose effect should be
/// visible.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    thresholds: MiningThresholds,
    store: TransactionStore,
    frequent_itemsets: Vec<FrequentItemset>,
    rules: Vec<AssociationRule>,
}

impl Recommender {
    pub fn new(thresholds: MiningThresholds) -> Self {
        Self {
            thresholds,
            store: TransactionStore::new(),
            frequent_itemsets: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn thresholds(&self) -> MiningThresholds {
        self.thresholds
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn transaction_count(&self) -> usize {
        self.store.len()
    }

    pub fn frequent_itemsets(&self) -> &[FrequentItemset] {
        &self.frequent_itemsets
    }

    pub fn rules(&self) -> &[AssociationRule] {
        &self.rules
    }

    pub fn support(&self, itemset: &Itemset) -> f64 {
        self.store.support(itemset)
    }

    /// Appends one basket. Not visible to queries until the next recomputation.
    pub fn add_transaction<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.store.add(items);
    }

    /// Re-mines frequent itemsets from the whole store.
    pub fn find_frequent_itemsets(&mut self) -> &[FrequentItemset] {
        self.frequent_itemsets = ItemsetMiner::new(self.thresholds.min_support()).mine(&self.store);
        &self.frequent_itemsets
    }

    /// Regenerates rules from the current itemsets. On error the previous rules
    /// are kept.
    pub fn generate_rules(&mut self) -> Result<&[AssociationRule], DomainError> {
        self.rules = RuleGenerator::new(self.thresholds.min_confidence())
            .generate(&self.store, &self.frequent_itemsets)?;
        Ok(&self.rules)
    }

    /// Mines itemsets and rules, then swaps both in together. Nothing changes
    /// if rule generation fails.
    pub fn recompute(&mut self) -> Result<(), DomainError> {
        let itemsets = ItemsetMiner::new(self.thresholds.min_support()).mine(&self.store);
        let rules = RuleGenerator::new(self.thresholds.min_confidence())
            .generate(&self.store, &itemsets)?;

        info!(
            event_name = "engine.rules.generated",
            transactions = self.store.len(),
            itemsets = itemsets.len(),
            rules = rules.len(),
            "recomputed association rules"
        );

        self.frequent_itemsets = itemsets;
        self.rules = rules;
        Ok(())
    }

    /// Records a product view or purchase as a basket of the product's
    /// attributes plus the chosen services, then recomputes.
    pub fn record_purchase<S: AsRef<str>>(
        &mut self,
        attributes: &[S],
        services: &[S],
    ) -> Result<(), DomainError> {
        let basket: Vec<String> = attributes
            .iter()
            .chain(services.iter())
            .map(|item| item.as_ref().to_owned())
            .collect();

        debug!(event_name = "engine.purchase.recorded", items = basket.len(), "recording purchase");
        self.store.add(basket);
        self.recompute()
    }

    /// Rule-based cross-sell candidates for `product_name`, best first.
    pub fn get_recommendations(&self, product_name: &str, limit: usize) -> Vec<Recommendation> {
        score_rules(&self.rules, &SearchTerms::expand(product_name), limit)
    }

    /// Add-on services implied by rules about `product_name`, by confidence.
    pub fn get_related_services(&self, product_name: &str) -> Vec<RelatedService> {
        related_services(&self.rules, &SearchTerms::expand(product_name))
    }

    /// Share of transactions mentioning the product, scaled to `[0, 5]`.
    pub fn product_popularity(&self, product_name: &str) -> f64 {
        if self.store.is_empty() {
            return 0.0;
        }

        let terms = SearchTerms::expand(product_name);
        let count = self
            .store
            .iter()
            .filter(|transaction| transaction.items().iter().any(|item| terms.matched_by(item)))
            .count();

        (count as f64 / self.store.len() as f64 * POPULARITY_SCALE).min(MAX_POPULARITY)
    }

    /// Similarity ranking of `products` against `current`, used when
    /// [`Recommender::get_recommendations`] comes back empty.
    pub fn get_fallback_recommendations(
        &self,
        products: &[Product],
        current: &Product,
        limit: usize,
    ) -> Vec<FallbackRecommendation> {
        rank_by_similarity(products, current, |name| self.product_popularity(name), limit)
    }

    pub fn get_stats(&self) -> RuleStats {
        summarize(self.store.len(), self.frequent_itemsets.len(), &self.rules)
    }
}
