use std::collections::HashSet;

use super::itemset::{Itemset, Transaction};

/// Append-only log of observed transactions. Every statistic the engine
/// reports is derived from this store.
#[derive(Clone, Debug, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the de-duplicated set of `items`. Tokens are not validated.
    pub fn add<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transactions.push(Transaction::new(items));
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    /// Fraction of stored transactions that contain every item of `itemset`.
    ///
    /// Full scan on every call; callers in hot loops should memoize.
    pub fn support(&self, itemset: &Itemset) -> f64 {
        if self.transactions.is_empty() {
            return 0.0;
        }

        let count =
            self.transactions.iter().filter(|transaction| transaction.contains_all(itemset)).count();

        count as f64 / self.transactions.len() as f64
    }

    /// Every distinct item in first-appearance order.
    pub fn distinct_items(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for transaction in &self.transactions {
            for item in transaction.items() {
                if seen.insert(item.as_str()) {
                    items.push(item.clone());
                }
            }
        }
        items
    }
}
