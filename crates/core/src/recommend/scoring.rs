//! Rule-to-query matching and per-item score aggregation

use std::collections::HashMap;

use super::terms::{SearchTerms, KIND_PREFIXES};
use super::types::{Recommendation, RelatedService};
use super::SERVICE_PREFIX;
use crate::mining::{AssociationRule, Itemset};

/// Removes a leading `Car_`, `Phone_` or `Laptop_` from an item identifier.
pub fn strip_kind_prefix(item: &str) -> &str {
    KIND_PREFIXES.iter().find_map(|prefix| item.strip_prefix(prefix)).unwrap_or(item)
}

/// Fraction of search terms matched by some antecedent item.
///
/// A term matches an item when the item contains the term, or when the term
/// contains the item with its kind prefix removed.
pub fn match_score(antecedent: &Itemset, terms: &SearchTerms) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }

    let matches = terms
        .iter()
        .filter(|term| {
            antecedent.iter().any(|item| item.contains(term) || term.contains(strip_kind_prefix(item)))
        })
        .count();

    matches as f64 / terms.len() as f64
}

/// Accumulates weighted rule contributions per consequent item, keeping the
/// order in which items were first seen.
#[derive(Debug, Default)]
pub struct CandidateAccumulator {
    candidates: Vec<Recommendation>,
    index: HashMap<String, usize>,
}

impl CandidateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: &str, rule: &AssociationRule, match_score: f64) {
        let position = match self.index.get(item) {
            Some(position) => *position,
            None => {
                self.candidates.push(Recommendation::empty(item));
                self.index.insert(item.to_owned(), self.candidates.len() - 1);
                self.candidates.len() - 1
            }
        };

        let candidate = &mut self.candidates[position];
        candidate.total_score += rule.confidence * rule.lift * match_score;
        candidate.confidence = candidate.confidence.max(rule.confidence);
        candidate.support = candidate.support.max(rule.support);
        candidate.lift = rule.lift;
        candidate.occurrences += 1;
    }

    /// Candidates by total score descending; equal scores keep first-seen order.
    pub fn into_ranked(self, limit: usize) -> Vec<Recommendation> {
        let mut ranked = self.candidates;
        ranked.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
        ranked.truncate(limit);
        ranked
    }
}

/// Scores `rules` (already in canonical order) against `terms`.
pub fn score_rules(rules: &[AssociationRule], terms: &SearchTerms, limit: usize) -> Vec<Recommendation> {
    let mut accumulator = CandidateAccumulator::new();

    for rule in rules {
        let score = match_score(&rule.antecedent, terms);
        if score <= 0.0 {
            continue;
        }

        for item in rule.consequent.iter() {
            // Services are reported separately; items naming the query product
            // would recommend the product to itself.
            if item.starts_with(SERVICE_PREFIX) || terms.matched_by(item) {
                continue;
            }
            accumulator.add(item, rule, score);
        }
    }

    accumulator.into_ranked(limit)
}

/// Services following from rules whose antecedent names the query product,
/// by confidence descending.
pub fn related_services(rules: &[AssociationRule], terms: &SearchTerms) -> Vec<RelatedService> {
    let mut services: Vec<RelatedService> = rules
        .iter()
        .filter(|rule| rule.antecedent.iter().any(|item| terms.matched_by(item)))
        .filter_map(|rule| {
            rule.consequent.iter().find(|item| item.starts_with(SERVICE_PREFIX)).map(|service| {
                RelatedService { service: service.to_owned(), confidence: rule.confidence }
            })
        })
        .collect();

    services.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    services
}
