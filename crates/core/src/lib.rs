pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod mining;
pub mod recommend;
pub mod synthetic;

pub use catalog::{Catalog, CatalogError};
pub use domain::product::{Price, PriceTier, Product};
pub use errors::{ApplicationError, DomainError};
pub use mining::{
    AssociationRule, FrequentItemset, Itemset, ItemsetMiner, MiningThresholds, RuleGenerator,
    Transaction, TransactionStore,
};
pub use recommend::{
    FallbackRecommendation, ProductMatch, ProductView, Recommendation, Recommender,
    RelatedService, ResolvedProduct, RuleStats, SearchTerms,
};
pub use synthetic::SyntheticBasketGenerator;
