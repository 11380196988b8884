//! Product catalog
//!
//! Loads products from a JSON file (or the built-in set), derives the item
//! identifiers each product contributes to a basket, and maps rule-based
//! recommendation candidates back to concrete products.

mod builtin;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::product::{first_token, PriceTier, Product};
use crate::recommend::{Recommendation, ResolvedProduct, KIND_PREFIXES};

/// Name words at or below this length are too generic to match on.
const MIN_MATCH_WORD_LEN: usize = 3;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
    #[error("catalog file `{0}` contains no products")]
    Empty(PathBuf),
}

/// Basket item prefix for a catalog category, if the category takes part in
/// mining.
pub fn kind_for_category(category: &str) -> Option<&'static str> {
    match category.to_ascii_lowercase().as_str() {
        "car" => Some("Car"),
        "phone" => Some("Phone"),
        "laptop" => Some("Laptop"),
        _ => None,
    }
}

/// Item identifiers a product contributes to a basket.
///
/// Cars, phones and laptops get `<Kind>_<brand>`, `Category_<Kind>`, a price
/// tier and `Status_Available`; cars also get `Location_<loc>`. Other
/// categories contribute nothing.
pub fn derive_attributes(product: &Product) -> Vec<String> {
    let Some(kind) = kind_for_category(&product.category) else {
        return Vec::new();
    };

    let brand = product_brand(product);
    let mut attributes = vec![format!("{kind}_{brand}"), format!("Category_{kind}")];

    if kind == "Car" {
        let mut location: String =
            product.location.as_deref().unwrap_or_default().split_whitespace().collect();
        if location.is_empty() {
            location = "Unknown".to_owned();
        }
        attributes.push(format!("Location_{location}"));
    }

    attributes.push(PriceTier::from_value(product.price_value()).item());
    attributes.push("Status_Available".to_owned());
    attributes
}

/// Explicit brand, else the first token of the name.
pub fn product_brand(product: &Product) -> &str {
    product.brand.as_deref().unwrap_or_else(|| first_token(&product.name))
}

fn with_derived_attributes(mut product: Product) -> Product {
    if product.attributes.is_empty() {
        product.attributes = derive_attributes(&product);
    }
    product
}

/// How a recommended item identifier refers to a product, strongest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum MatchStrength {
    Attribute,
    Brand,
    NameWord,
    Category,
}

fn match_strength(candidate: &str, product: &Product) -> Option<MatchStrength> {
    if product.attributes.iter().any(|attribute| attribute == candidate) {
        return Some(MatchStrength::Attribute);
    }

    let brand = product.name_brand();
    if !brand.is_empty() && candidate.contains(brand) {
        return Some(MatchStrength::Brand);
    }

    let lower = candidate.to_lowercase();
    let stripped = KIND_PREFIXES
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix.to_ascii_lowercase().as_str()))
        .unwrap_or(&lower);
    if product
        .name
        .to_lowercase()
        .split(' ')
        .any(|word| word.len() > MIN_MATCH_WORD_LEN && stripped.contains(word))
    {
        return Some(MatchStrength::NameWord);
    }

    let category = product.category.to_lowercase();
    if !category.is_empty() && lower.contains(&category) {
        return Some(MatchStrength::Category);
    }

    None
}

#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Products are kept in the given order; missing attributes are derived.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products: products.into_iter().map(with_derived_attributes).collect() }
    }

    /// Four cars, phones, laptops and accessories.
    pub fn builtin() -> Self {
        Self::new(builtin::products())
    }

    /// Reads a JSON array of products.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let products: Vec<Product> = serde_json::from_str(&contents)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;

        if products.is_empty() {
            return Err(CatalogError::Empty(path.to_path_buf()));
        }

        debug!(
            event_name = "catalog.loaded",
            path = %path.display(),
            products = products.len(),
            "loaded product catalog"
        );
        Ok(Self::new(products))
    }

    /// [`Catalog::load`] when a path is given, falling back to the built-in
    /// products on any failure.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(error) => {
                warn!(
                    event_name = "catalog.fallback",
                    path = %path.display(),
                    error = %error,
                    "using built-in catalog"
                );
                Self::builtin()
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Exact name match first, then a case-insensitive one.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let name = name.trim();
        self.products
            .iter()
            .find(|product| product.name == name)
            .or_else(|| self.products.iter().find(|product| product.name.eq_ignore_ascii_case(name)))
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |product| product.category.eq_ignore_ascii_case(category))
    }

    /// Product a recommended item refers to most strongly; catalog order
    /// breaks ties.
    pub fn resolve_item(&self, item: &str) -> Option<&Product> {
        self.products
            .iter()
            .filter_map(|product| match_strength(item, product).map(|strength| (strength, product)))
            .min_by_key(|(strength, _)| *strength)
            .map(|(_, product)| product)
    }

    /// Maps each candidate to the product it refers to. Unmatched candidates
    /// are dropped; several candidates may resolve to one product.
    pub fn resolve(&self, recommendations: &[Recommendation]) -> Vec<ResolvedProduct> {
        recommendations
            .iter()
            .filter_map(|recommendation| {
                self.resolve_item(&recommendation.name).map(|product| ResolvedProduct {
                        product: product.clone(),
                        matched_item: recommendation.name.clone(),
                        score: recommendation.total_score,
                        confidence: recommendation.confidence,
                        lift: recommendation.lift,
                    })
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
