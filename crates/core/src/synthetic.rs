//! Seeded synthetic market-basket generator.
//!
//! Produces dealership-style baskets (a car, phone or laptop plus buyer,
//! payment, location, status and price-tier tags and a few services) with
//! built-in co-occurrence patterns, so a fresh engine has rules to mine.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::product::PriceTier;

const CAR_BRANDS: &[&str] =
    &["Toyota", "Honda", "Ford", "BMW", "Mercedes", "Audi", "Tesla", "Nissan", "Mazda", "Chevrolet"];
const PHONE_BRANDS: &[&str] =
    &["iPhone", "Samsung", "Google", "Xiaomi", "OnePlus", "Oppo", "Vivo", "Realme"];
const LAPTOP_BRANDS: &[&str] =
    &["MacBook", "Dell", "HP", "Lenovo", "Asus", "Acer", "Microsoft", "MSI"];

const BUYER_TYPES: &[&str] = &["Individual", "Dealer", "Corporate"];
const PAYMENT_METHODS: &[&str] = &["Cash", "Credit", "Financing", "Lease"];
const LOCATIONS: &[&str] = &["NewYork", "California", "Texas", "Florida", "Illinois"];
const STATUSES: &[&str] = &["Completed", "Pending", "Negotiation"];

const SERVICES: &[&str] =
    &["Insurance", "Warranty", "Financing", "Delivery", "Maintenance", "Detailing"];
const PURCHASE_SERVICES: &[&str] = &["Insurance", "Warranty", "Financing", "Delivery"];
const MAX_SERVICES: usize = 4;

/// Chance that each associated item of a firing pattern is added.
const ASSOCIATED_ITEM_PROBABILITY: f64 = 0.7;

struct Pattern {
    primary: &'static str,
    associated: &'static [&'static str],
    weight: f64,
}

const PATTERNS: &[Pattern] = &[
    Pattern { primary: "Price_Luxury", associated: &["Phone_iPhone", "Laptop_MacBook"], weight: 0.7 },
    Pattern { primary: "Price_Premium", associated: &["Phone_Samsung", "Laptop_Dell"], weight: 0.6 },
    Pattern { primary: "Price_Budget", associated: &["Phone_Xiaomi", "Laptop_Lenovo"], weight: 0.5 },
    Pattern {
        primary: "BuyerType_Corporate",
        associated: &["Service_Insurance", "Service_Warranty", "Service_Maintenance"],
        weight: 0.8,
    },
    Pattern {
        primary: "Payment_Financing",
        associated: &["Service_Insurance", "Service_Warranty"],
        weight: 0.65,
    },
];

/// Product kind of a basket with its share of generated baskets and its
/// price range.
struct Kind {
    prefix: &'static str,
    brands: &'static [&'static str],
    share: f64,
    min_price: f64,
    price_span: f64,
}

const KINDS: &[Kind] = &[
    Kind { prefix: "Car", brands: CAR_BRANDS, share: 0.4, min_price: 15_000.0, price_span: 70_000.0 },
    Kind { prefix: "Phone", brands: PHONE_BRANDS, share: 0.3, min_price: 200.0, price_span: 1_500.0 },
    Kind { prefix: "Laptop", brands: LAPTOP_BRANDS, share: 0.3, min_price: 400.0, price_span: 3_000.0 },
];

#[derive(Debug, Clone)]
pub struct SyntheticBasketGenerator {
    rng: StdRng,
}

impl SyntheticBasketGenerator {
    /// Same seed, same baskets.
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn generate(&mut self, count: usize) -> Vec<Vec<String>> {
        (0..count).map(|_| self.basket()).collect()
    }

    /// Two distinct services attached to a recorded product view.
    pub fn purchase_services(&mut self) -> Vec<String> {
        PURCHASE_SERVICES
            .choose_multiple(&mut self.rng, 2)
            .map(|service| format!("Service_{service}"))
            .collect()
    }

    fn pick(&mut self, values: &'static [&'static str]) -> &'static str {
        values.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn kind(&mut self) -> &'static Kind {
        let roll: f64 = self.rng.gen();
        let mut threshold = 0.0;
        for kind in KINDS {
            threshold += kind.share;
            if roll < threshold {
                return kind;
            }
        }
        &KINDS[KINDS.len() - 1]
    }

    fn basket(&mut self) -> Vec<String> {
        let kind = self.kind();
        let brand = self.pick(kind.brands);
        let price = kind.min_price + self.rng.gen::<f64>() * kind.price_span;

        let buyer_type = self.pick(BUYER_TYPES);
        let payment = self.pick(PAYMENT_METHODS);
        let location = self.pick(LOCATIONS);
        let status = self.pick(STATUSES);

        let mut basket = vec![
            format!("{}_{brand}", kind.prefix),
            format!("Category_{}", kind.prefix),
            format!("BuyerType_{buyer_type}"),
            format!("Payment_{payment}"),
            format!("Location_{location}"),
            format!("Status_{status}"),
            PriceTier::from_value(price).item(),
        ];

        let firing: Vec<&Pattern> = PATTERNS
            .iter()
            .filter(|pattern| {
                basket.iter().any(|item| item.contains(pattern.primary))
                    && self.rng.gen_bool(pattern.weight)
            })
            .collect();

        for pattern in firing {
            for item in pattern.associated {
                if self.rng.gen_bool(ASSOCIATED_ITEM_PROBABILITY)
                    && !basket.iter().any(|existing| existing.as_str() == *item)
                {
                    basket.push((*item).to_owned());
                }
            }
        }

        let mut service_count = self.rng.gen_range(1..=2);
        if buyer_type == "Corporate" {
            service_count += 1;
        }
        if payment == "Financing" {
            service_count += 1;
        }

        for service in SERVICES.choose_multiple(&mut self.rng, service_count.min(MAX_SERVICES)) {
            let item = format!("Service_{service}");
            if !basket.contains(&item) {
                basket.push(item);
            }
        }

        basket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixed<'a>(basket: &'a [String], prefix: &str) -> Vec<&'a String> {
        basket.iter().filter(|item| item.starts_with(prefix)).collect()
    }

    #[test]
    fn same_seed_yields_same_baskets() {
        let first = SyntheticBasketGenerator::new(42).generate(50);
        let second = SyntheticBasketGenerator::new(42).generate(50);
        let other = SyntheticBasketGenerator::new(7).generate(50);

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn every_basket_has_one_product_and_its_tags() {
        for basket in SyntheticBasketGenerator::new(1).generate(200) {
            assert_eq!(prefixed(&basket, "Category_").len(), 1, "{basket:?}");
            assert_eq!(prefixed(&basket, "BuyerType_").len(), 1);
            assert_eq!(prefixed(&basket, "Payment_").len(), 1);
            assert_eq!(prefixed(&basket, "Location_").len(), 1);
            assert_eq!(prefixed(&basket, "Status_").len(), 1);
            assert_eq!(prefixed(&basket, "Price_").len(), 1);

            let kind = basket[1].trim_start_matches("Category_");
            assert!(basket[0].starts_with(&format!("{kind}_")), "{basket:?}");

            let services = prefixed(&basket, "Service_").len();
            assert!((1..=SERVICES.len()).contains(&services), "{basket:?}");
        }
    }

    #[test]
    fn car_prices_never_fall_into_budget_tier() {
        for basket in SyntheticBasketGenerator::new(3).generate(300) {
            if basket[1] == "Category_Car" {
                assert!(!basket.contains(&"Price_Budget".to_owned()));
            } else {
                assert!(basket.contains(&"Price_Budget".to_owned()), "{basket:?}");
            }
        }
    }

    #[test]
    fn all_three_kinds_appear() {
        let baskets = SyntheticBasketGenerator::new(42).generate(300);
        for category in ["Category_Car", "Category_Phone", "Category_Laptop"] {
            assert!(baskets.iter().any(|basket| basket[1] == category), "{category}");
        }
    }

    #[test]
    fn purchase_services_are_two_distinct_services() {
        let mut generator = SyntheticBasketGenerator::new(9);
        for _ in 0..20 {
            let services = generator.purchase_services();
            assert_eq!(services.len(), 2);
            assert_ne!(services[0], services[1]);
            assert!(services.iter().all(|service| service.starts_with("Service_")));
        }
    }
}
