use serde::Serialize;

/// A duplicate-free set of item identifiers kept in canonical (sorted) order.
///
/// Canonical ordering makes two itemsets built from the same items in a
/// different order compare and hash equal, which is what candidate
/// de-duplication and support memoization key on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Itemset(Vec<String>);

impl Itemset {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn single(item: impl Into<String>) -> Self {
        Self(vec![item.into()])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.binary_search_by(|probe| probe.as_str().cmp(item)).is_ok()
    }

    pub fn union(&self, other: &Itemset) -> Itemset {
        Itemset::new(self.0.iter().chain(other.0.iter()).cloned())
    }

    /// Items of `self` that are not in `other`.
    pub fn difference(&self, other: &Itemset) -> Itemset {
        Itemset(self.0.iter().filter(|item| !other.contains(item)).cloned().collect())
    }

    pub fn is_disjoint(&self, other: &Itemset) -> bool {
        self.iter().all(|item| !other.contains(item))
    }

    pub fn is_subset_of(&self, other: &Itemset) -> bool {
        self.iter().all(|item| other.contains(item))
    }

    /// All non-empty proper subsets, grouped by size ascending.
    pub fn proper_subsets(&self) -> Vec<Itemset> {
        let mut subsets = Vec::new();
        for size in 1..self.len() {
            let mut current = Vec::with_capacity(size);
            collect_combinations(&self.0, size, 0, &mut current, &mut subsets);
        }
        subsets
    }
}

fn collect_combinations(
    items: &[String],
    size: usize,
    start: usize,
    current: &mut Vec<String>,
    output: &mut Vec<Itemset>,
) {
    if current.len() == size {
        // Drawn from a sorted slice in index order, so already canonical.
        output.push(Itemset(current.clone()));
        return;
    }

    for index in start..items.len() {
        current.push(items[index].clone());
        collect_combinations(items, size, index + 1, current, output);
        current.pop();
    }
}

impl std::fmt::Display for Itemset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.join(", "))
    }
}

/// One observed purchase context. Items keep first-seen order with duplicates
/// removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transaction(Vec<String>);

impl Transaction {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for item in items {
            let item = item.into();
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Self(unique)
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.iter().any(|candidate| candidate == item)
    }

    pub fn contains_all(&self, itemset: &Itemset) -> bool {
        itemset.iter().all(|item| self.contains(item))
    }
}

#[cfg(test)]
mod tests {
    use super::{Itemset, Transaction};

    #[test]
    fn itemset_is_canonical_regardless_of_input_order() {
        let left = Itemset::new(["Price_Luxury", "Car_Toyota", "Car_Toyota"]);
        let right = Itemset::new(["Car_Toyota", "Price_Luxury"]);

        assert_eq!(left, right);
        assert_eq!(left.items(), ["Car_Toyota", "Price_Luxury"]);
    }

    #[test]
    fn union_and_difference_stay_canonical() {
        let a = Itemset::new(["Car_Toyota", "Category_Car"]);
        let b = Itemset::new(["Category_Car", "Phone_iPhone"]);

        let union = a.union(&b);
        assert_eq!(union.items(), ["Car_Toyota", "Category_Car", "Phone_iPhone"]);
        assert_eq!(union.difference(&a).items(), ["Phone_iPhone"]);
        assert!(a.is_subset_of(&union));
        assert!(!a.is_disjoint(&b));
        assert!(Itemset::single("Car_Toyota").is_disjoint(&Itemset::single("Car_Honda")));
    }

    #[test]
    fn proper_subsets_cover_every_size_below_full() {
        let itemset = Itemset::new(["A_1", "B_2", "C_3"]);
        let subsets = itemset.proper_subsets();

        // 2^3 - 2 non-empty proper subsets
        assert_eq!(subsets.len(), 6);
        assert!(subsets.iter().all(|subset| !subset.is_empty() && subset.len() < 3));
        assert_eq!(subsets[0], Itemset::single("A_1"));
        assert_eq!(subsets[3], Itemset::new(["A_1", "B_2"]));
    }

    #[test]
    fn single_item_has_no_proper_subsets() {
        assert!(Itemset::single("Car_Toyota").proper_subsets().is_empty());
    }

    #[test]
    fn transaction_drops_duplicates_and_keeps_first_seen_order() {
        let transaction =
            Transaction::new(["Service_Insurance", "Car_BMW", "Service_Insurance", "Category_Car"]);

        assert_eq!(transaction.items(), ["Service_Insurance", "Car_BMW", "Category_Car"]);
        assert!(transaction.contains_all(&Itemset::new(["Car_BMW", "Category_Car"])));
        assert!(!transaction.contains_all(&Itemset::new(["Car_BMW", "Car_Audi"])));
    }

    #[test]
    fn display_lists_items_in_braces() {
        assert_eq!(Itemset::new(["B_2", "A_1"]).to_string(), "{A_1, B_2}");
    }
}
