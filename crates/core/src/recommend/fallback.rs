//! Similarity scoring used when no association rule matches a product.

use super::types::FallbackRecommendation;
use crate::domain::product::Product;

const SAME_CATEGORY_BONUS: f64 = 50.0;
const OTHER_BRAND_BONUS: f64 = 15.0;
const POPULARITY_WEIGHT: f64 = 5.0;
const MAX_FALLBACK_CONFIDENCE: f64 = 0.9;

/// (price difference upper bound, bonus), checked in order.
const PRICE_BUCKETS: [(f64, f64); 3] = [(5_000.0, 30.0), (15_000.0, 20.0), (30_000.0, 10.0)];

pub fn price_bonus(price_difference: f64) -> f64 {
    PRICE_BUCKETS
        .iter()
        .find(|(bound, _)| price_difference < *bound)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0.0)
}

/// Raw similarity of `candidate` to `current`.
pub fn similarity_score(candidate: &Product, current: &Product, popularity: f64) -> f64 {
    let mut score = 0.0;

    if candidate.category == current.category {
        score += SAME_CATEGORY_BONUS;
    }

    score += price_bonus((candidate.price_value() - current.price_value()).abs());

    // Prefer a different brand for diversity.
    if candidate.name_brand() != current.name_brand() {
        score += OTHER_BRAND_BONUS;
    }

    score + popularity * POPULARITY_WEIGHT
}

/// Ranks every product except `current` by similarity.
pub fn rank_by_similarity<F>(
    products: &[Product],
    current: &Product,
    popularity: F,
    limit: usize,
) -> Vec<FallbackRecommendation>
where
    F: Fn(&str) -> f64,
{
    let mut scored: Vec<FallbackRecommendation> = products
        .iter()
        .filter(|product| product.name != current.name)
        .map(|product| {
            let score = similarity_score(product, current, popularity(&product.name));
            FallbackRecommendation {
                product: product.clone(),
                score,
                confidence: (score / 100.0).min(MAX_FALLBACK_CONFIDENCE),
                is_fallback: true,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_buckets_are_exclusive_upper_bounds() {
        assert_eq!(price_bonus(0.0), 30.0);
        assert_eq!(price_bonus(4_999.0), 30.0);
        assert_eq!(price_bonus(5_000.0), 20.0);
        assert_eq!(price_bonus(15_000.0), 10.0);
        assert_eq!(price_bonus(30_000.0), 0.0);
    }

    #[test]
    fn same_category_close_price_other_brand_scores_highest() {
        let current = Product::new("Toyota Camry 2023", "$25,000", "car");
        let honda = Product::new("Honda Civic 2023", "$22,500", "car");
        let toyota = Product::new("Toyota Corolla", "$21,000", "car");
        let phone = Product::new("iPhone 15 Pro", "$999", "phone");

        assert_eq!(similarity_score(&honda, &current, 0.0), 50.0 + 30.0 + 15.0);
        assert_eq!(similarity_score(&toyota, &current, 0.0), 50.0 + 30.0);
        // $24,001 apart still lands in the widest price bucket.
        assert_eq!(similarity_score(&phone, &current, 0.0), 10.0 + 15.0);
        assert_eq!(similarity_score(&phone, &current, 2.0), 10.0 + 15.0 + 10.0);
    }

    #[test]
    fn ranking_excludes_current_and_caps_confidence() {
        let current = Product::new("Toyota Camry 2023", "$25,000", "car");
        let products = vec![
            current.clone(),
            Product::new("iPhone 15 Pro", "$999", "phone"),
            Product::new("Honda Civic 2023", "$22,500", "car"),
            Product::new("Ford Mustang", "$35,000", "car"),
        ];

        let ranked = rank_by_similarity(&products, &current, |_| 5.0, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].product.name, "Honda Civic 2023");
        assert_eq!(ranked[0].score, 50.0 + 30.0 + 15.0 + 25.0);
        assert_eq!(ranked[0].confidence, 0.9);
        assert_eq!(ranked[1].product.name, "Ford Mustang");
        assert!(ranked.iter().all(|r| r.is_fallback && r.product.name != current.name));
    }

    #[test]
    fn low_scores_map_linearly_to_confidence() {
        let current = Product::new("Dell XPS 15", "$1,799", "laptop");
        let products = vec![Product::new("Dell Inspiron", 90_000.0, "desktop")];

        let ranked = rank_by_similarity(&products, &current, |_| 0.0, 4);

        assert_eq!(ranked[0].score, 0.0);
        assert_eq!(ranked[0].confidence, 0.0);
    }
}
