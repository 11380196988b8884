//! Recommendations for one catalog product, as shown on a product page.

use serde::Serialize;
use tracing::debug;

use super::engine::Recommender;
use super::types::{FallbackRecommendation, RelatedService, ResolvedProduct};
use crate::catalog::Catalog;
use crate::domain::product::Product;

/// A recommended catalog product, from rules or from similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductMatch {
    Rule(ResolvedProduct),
    Similar(FallbackRecommendation),
}

impl ProductMatch {
    pub fn product(&self) -> &Product {
        match self {
            Self::Rule(resolved) => &resolved.product,
            Self::Similar(similar) => &similar.product,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::Rule(resolved) => resolved.confidence,
            Self::Similar(similar) => similar.confidence,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Self::Rule(resolved) => resolved.score,
            Self::Similar(similar) => similar.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub product: Product,
    pub recommendations: Vec<ProductMatch>,
    pub services: Vec<RelatedService>,
    /// Set when no rule candidate resolved to a catalog product other than
    /// the one being viewed.
    pub used_fallback: bool,
}

impl ProductView {
    pub fn build(
        recommender: &Recommender,
        catalog: &Catalog,
        product: &Product,
        limit: usize,
    ) -> Self {
        let candidates = recommender.get_recommendations(&product.name, limit);
        let resolved: Vec<ResolvedProduct> = catalog
            .resolve(&candidates)
            .into_iter()
            .filter(|resolved| resolved.product.name != product.name)
            .collect();
        let used_fallback = resolved.is_empty();

        let recommendations: Vec<ProductMatch> = if used_fallback {
            recommender
                .get_fallback_recommendations(catalog.products(), product, limit)
                .into_iter()
                .map(ProductMatch::Similar)
                .collect()
        } else {
            resolved.into_iter().map(ProductMatch::Rule).collect()
        };

        debug!(
            event_name = "engine.view.built",
            product = %product.name,
            candidates = candidates.len(),
            recommendations = recommendations.len(),
            used_fallback,
            "built product view"
        );

        Self {
            product: product.clone(),
            recommendations,
            services: recommender.get_related_services(&product.name),
            used_fallback,
        }
    }
}
