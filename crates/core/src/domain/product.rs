use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Price used when a label carries no number at all.
pub const DEFAULT_PRICE: f64 = 10_000.0;

/// Catalog prices arrive either as plain numbers or as display labels such as
/// `"$25,000"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Label(String),
}

impl Price {
    /// Numeric value of the price, falling back to [`DEFAULT_PRICE`].
    pub fn value(&self) -> f64 {
        match self {
            Self::Amount(amount) => *amount,
            Self::Label(label) => parse_price(label).unwrap_or(DEFAULT_PRICE),
        }
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self::Amount(value)
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Self::Label(value.to_owned())
    }
}

const PRICE_PATTERN: &str = r"\d[\d,]*(?:\.\d+)?";

fn price_pattern() -> Result<&'static Regex, &'static regex::Error> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PRICE_PATTERN)).as_ref()
}

/// First number in `label`, thousands separators removed.
pub fn parse_price(label: &str) -> Option<f64> {
    let pattern = match price_pattern() {
        Ok(pattern) => pattern,
        Err(error) => {
            warn!(event_name = "price.pattern.invalid", error = %error, "price pattern failed to compile");
            return None;
        }
    };
    let matched = pattern.find(label)?;
    matched.as_str().replace(',', "").parse::<f64>().ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    Budget,
    MidRange,
    Premium,
    Luxury,
}

impl PriceTier {
    pub fn from_value(value: f64) -> Self {
        if value < 10_000.0 {
            Self::Budget
        } else if value < 30_000.0 {
            Self::MidRange
        } else if value < 60_000.0 {
            Self::Premium
        } else {
            Self::Luxury
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::MidRange => "MidRange",
            Self::Premium => "Premium",
            Self::Luxury => "Luxury",
        }
    }

    /// Item identifier, e.g. `Price_MidRange`.
    pub fn item(&self) -> String {
        format!("Price_{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: Price,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: impl Into<Price>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            category: category.into(),
            brand: None,
            location: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// First whitespace-delimited token of the name.
    pub fn name_brand(&self) -> &str {
        first_token(&self.name)
    }

    pub fn price_value(&self) -> f64 {
        self.price.value()
    }
}

pub fn first_token(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_pattern_compiles() {
        let pattern = price_pattern().expect("price pattern should compile");
        assert_eq!(pattern.find("from $1,299.99").map(|m| m.as_str()), Some("1,299.99"));
    }

    #[test]
    fn currency_label_parses_with_separator_stripped() {
        assert_eq!(Price::from("$25,000").value(), 25_000.0);
        assert_eq!(Price::from("$2,499").value(), 2_499.0);
        assert_eq!(Price::from("$1,234,567.50").value(), 1_234_567.5);
    }

    #[test]
    fn numeric_price_is_used_directly() {
        assert_eq!(Price::from(42.0).value(), 42.0);
    }

    #[test]
    fn label_without_digits_defaults() {
        assert_eq!(Price::from("N/A").value(), DEFAULT_PRICE);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn price_deserializes_from_number_or_string() {
        let amount: Price = serde_json::from_str("42").expect("number price");
        let label: Price = serde_json::from_str("\"$999\"").expect("string price");

        assert_eq!(amount, Price::Amount(42.0));
        assert_eq!(label.value(), 999.0);
    }

    #[test]
    fn price_tiers_follow_bucket_edges() {
        assert_eq!(PriceTier::from_value(9_999.0), PriceTier::Budget);
        assert_eq!(PriceTier::from_value(10_000.0), PriceTier::MidRange);
        assert_eq!(PriceTier::from_value(30_000.0), PriceTier::Premium);
        assert_eq!(PriceTier::from_value(60_000.0), PriceTier::Luxury);
        assert_eq!(PriceTier::MidRange.item(), "Price_MidRange");
    }

    #[test]
    fn name_brand_is_first_token() {
        let product = Product::new("Toyota Camry 2023", "$25,000", "car");
        assert_eq!(product.name_brand(), "Toyota");
        assert_eq!(first_token("   "), "");
    }
}
