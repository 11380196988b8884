//! Query term expansion.

use crate::domain::product::first_token;

const PHONE_KEYWORDS: [&str; 3] = ["phone", "iphone", "galaxy"];
const LAPTOP_KEYWORDS: [&str; 3] = ["laptop", "macbook", "notebook"];
const PREMIUM_KEYWORDS: [&str; 3] = ["pro", "premium", "luxury"];
const BUDGET_KEYWORDS: [&str; 3] = ["budget", "basic", "lite"];

/// Brand prefixes used by rule antecedents. The expander cannot tell which one
/// applies to a brand, so it emits all of them.
pub const KIND_PREFIXES: [&str; 3] = ["Car_", "Phone_", "Laptop_"];

/// Duplicate-free search terms derived from a product name.
///
/// Terms keep insertion order so results built from them are deterministic,
/// but callers must treat them as a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms(Vec<String>);

impl SearchTerms {
    pub fn expand(product_name: &str) -> Self {
        let mut terms = Self(Vec::new());
        terms.push(product_name.to_owned());

        let brand = first_token(product_name);
        if !brand.is_empty() {
            terms.push(brand.to_owned());
            for prefix in KIND_PREFIXES {
                terms.push(format!("{prefix}{brand}"));
            }
        }

        let lower = product_name.to_lowercase();
        let contains_any = |keywords: &[&str]| keywords.iter().any(|word| lower.contains(word));

        let category = if contains_any(&PHONE_KEYWORDS) {
            "Category_Phone"
        } else if contains_any(&LAPTOP_KEYWORDS) {
            "Category_Laptop"
        } else {
            "Category_Car"
        };
        terms.push(category.to_owned());

        if contains_any(&PREMIUM_KEYWORDS) {
            terms.push("Price_Premium".to_owned());
            terms.push("Price_Luxury".to_owned());
        } else if contains_any(&BUDGET_KEYWORDS) {
            terms.push("Price_Budget".to_owned());
        } else {
            terms.push("Price_MidRange".to_owned());
        }

        terms
    }

    fn push(&mut self, term: String) {
        if !self.0.contains(&term) {
            self.0.push(term);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.iter().any(|candidate| candidate == term)
    }

    /// Whether `item` contains any term as a substring.
    pub fn matched_by(&self, item: &str) -> bool {
        self.iter().any(|term| item.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::SearchTerms;

    fn sorted(terms: &SearchTerms) -> Vec<&str> {
        let mut terms: Vec<&str> = terms.iter().collect();
        terms.sort_unstable();
        terms
    }

    #[test]
    fn car_name_expands_to_brand_variants_and_defaults() {
        let terms = SearchTerms::expand("Toyota Camry 2023");

        assert_eq!(
            sorted(&terms),
            vec![
                "Car_Toyota",
                "Category_Car",
                "Laptop_Toyota",
                "Phone_Toyota",
                "Price_MidRange",
                "Toyota",
                "Toyota Camry 2023",
            ]
        );
    }

    #[test]
    fn premium_phone_gets_both_price_tags() {
        let terms = SearchTerms::expand("iPhone 15 Pro");

        assert!(terms.contains("Category_Phone"));
        assert!(terms.contains("Price_Premium"));
        assert!(terms.contains("Price_Luxury"));
        assert!(terms.contains("Phone_iPhone"));
        assert!(!terms.contains("Price_MidRange"));
    }

    #[test]
    fn phone_keywords_win_over_laptop_keywords() {
        let terms = SearchTerms::expand("Galaxy Notebook");
        assert!(terms.contains("Category_Phone"));
        assert!(!terms.contains("Category_Laptop"));
    }

    #[test]
    fn laptop_and_budget_keywords_are_detected() {
        let terms = SearchTerms::expand("Lenovo Basic Laptop");
        assert!(terms.contains("Category_Laptop"));
        assert!(terms.contains("Price_Budget"));
    }

    #[test]
    fn single_word_name_collapses_duplicates() {
        let terms = SearchTerms::expand("Tesla");
        // Raw name and brand are the same token.
        assert_eq!(terms.len(), 6);
    }

    #[test]
    fn blank_name_still_yields_category_and_price() {
        let terms = SearchTerms::expand("");
        assert_eq!(sorted(&terms), vec!["", "Category_Car", "Price_MidRange"]);
    }

    #[test]
    fn matched_by_is_substring_containment() {
        let terms = SearchTerms::expand("Honda Civic");
        assert!(terms.matched_by("Car_Honda"));
        assert!(!terms.matched_by("Phone_Samsung"));
    }
}
