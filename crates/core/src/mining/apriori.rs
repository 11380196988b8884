//! Level-wise frequent itemset search.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::itemset::Itemset;
use super::store::TransactionStore;

/// Largest basket size explored. Bigger itemsets are not mined.
pub const MAX_ITEMSET_SIZE: usize = 4;

/// An itemset whose support cleared the miner's threshold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrequentItemset {
    pub items: Itemset,
    pub support: f64,
}

impl FrequentItemset {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Apriori-style miner.
///
/// # Algorithm
///
/// 1. Every distinct item is a 1-itemset candidate; keep those with
///    support >= `min_support`.
/// 2. Candidates of size k+1 are unions of pairs of surviving k-itemsets whose
///    union has exactly k+1 items. Candidates are de-duplicated on their
///    canonical form before the support scan.
/// 3. Stop when a level yields nothing or k would exceed [`MAX_ITEMSET_SIZE`].
#[derive(Debug, Clone, Copy)]
pub struct ItemsetMiner {
    min_support: f64,
}

impl ItemsetMiner {
    pub fn new(min_support: f64) -> Self {
        Self { min_support }
    }

    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    /// Concatenation of the surviving itemsets of every level, smallest first.
    pub fn mine(&self, store: &TransactionStore) -> Vec<FrequentItemset> {
        if store.is_empty() {
            return Vec::new();
        }

        let singles = store.distinct_items().into_iter().map(Itemset::single).collect();
        let mut current = self.retain_frequent(store, singles);
        debug!(
            event_name = "engine.itemsets.level",
            level = 1,
            surviving = current.len(),
            "frequent itemset level mined"
        );

        let mut frequent = current.clone();
        let mut k = 2;

        while !current.is_empty() && k <= MAX_ITEMSET_SIZE {
            let candidates = generate_candidates(&current, k);
            let candidate_count = candidates.len();
            current = self.retain_frequent(store, candidates);
            debug!(
                event_name = "engine.itemsets.level",
                level = k,
                candidates = candidate_count,
                surviving = current.len(),
                "frequent itemset level mined"
            );

            frequent.extend(current.iter().cloned());
            k += 1;
        }

        frequent
    }

    fn retain_frequent(
        &self,
        store: &TransactionStore,
        candidates: Vec<Itemset>,
    ) -> Vec<FrequentItemset> {
        candidates
            .into_iter()
            .filter_map(|items| {
                let support = store.support(&items);
                (support >= self.min_support).then_some(FrequentItemset { items, support })
            })
            .collect()
    }
}

/// Pairwise unions of the previous level that have exactly `k` items, in
/// first-generated order with repeats removed.
fn generate_candidates(previous: &[FrequentItemset], k: usize) -> Vec<Itemset> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for (i, left) in previous.iter().enumerate() {
        for right in &previous[i + 1..] {
            let union = left.items.union(&right.items);
            if union.len() == k && seen.insert(union.clone()) {
                candidates.push(union);
            }
        }
    }

    candidates
}
