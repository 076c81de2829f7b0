//! Search, category filter, and sort over the product list.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Name, ascending.
    #[default]
    #[serde(rename = "name")]
    Name,
    /// Price, low to high.
    #[serde(rename = "price-low")]
    PriceLow,
    /// Price, high to low.
    #[serde(rename = "price-high")]
    PriceHigh,
}

impl SortOrder {
    pub const ALL: [Self; 3] = [Self::Name, Self::PriceLow, Self::PriceHigh];

    /// Wire name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Sort by Name",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
        }
    }
}

/// Returned when a sort key is not one of the wire names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s.trim())
            .ok_or_else(|| UnknownSortOrder(s.to_string()))
    }
}

/// Active search, filter, and sort parameters for a listing.
///
/// `category` and `selected_categories` are independent filters and both
/// apply when set, so a product has to satisfy each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against name and description.
    #[serde(default)]
    pub search_term: String,
    /// Single category, exact match. Empty is the same as unset.
    #[serde(default)]
    pub category: Option<String>,
    /// Multi-select categories. Empty means no restriction.
    #[serde(default)]
    pub selected_categories: BTreeSet<String>,
    #[serde(default)]
    pub sort_by: SortOrder,
}

impl CatalogQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn sort_by(mut self, order: SortOrder) -> Self {
        self.sort_by = order;
        self
    }

    #[must_use]
    pub fn select_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories
            .extend(categories.into_iter().map(Into::into));
        self
    }

    /// Flip membership of `category` in the multi-select set, as the
    /// category chips do. Returns `true` if the category is now selected.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        if self.selected_categories.remove(category) {
            false
        } else {
            self.selected_categories.insert(category.to_string());
            true
        }
    }

    /// The single-category filter, treating an empty value as unset.
    #[must_use]
    pub fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Returns `true` if no search term or category filter is active.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty()
            && self.active_category().is_none()
            && self.selected_categories.is_empty()
    }

    fn matches(&self, product: &Product, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let hit = product.name.to_lowercase().contains(needle)
                || product.description.to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }
        if let Some(category) = self.active_category() {
            if product.category != category {
                return false;
            }
        }
        self.selected_categories.is_empty() || self.selected_categories.contains(&product.category)
    }
}

/// Filter then sort `products` according to `query`.
///
/// The input order is kept for ties because the sort is stable. An empty
/// result is a valid answer, not an error.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    let needle = (!query.search_term.is_empty()).then(|| query.search_term.to_lowercase());

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| query.matches(p, needle.as_deref()))
        .collect();

    match query.sort_by {
        SortOrder::Name => matched.sort_by_cached_key(|p| p.name.to_lowercase()),
        SortOrder::PriceLow => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceHigh => matched.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    matched
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::product::fixtures::product;
    use crate::types::ProductId;

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    fn sample() -> Vec<Product> {
        let mut kaftan = product(1, "Elegant Silk Kaftan", 15_999, "kaftans");
        kaftan.description = "Flowing silk for summer evenings".to_string();
        vec![
            kaftan,
            product(2, "Traditional Abaya", 8_999, "abayas"),
            product(3, "Wedding Lehnga", 45_000, "wedding"),
            product(4, "Sequin Party Gown", 12_500, "party"),
            product(5, "Beach Kaftan", 6_500, "kaftans"),
        ]
    }

    #[test]
    fn test_two_product_example() {
        let products = vec![
            product(10, "A", 1_000, "kaftans"),
            product(20, "B", 2_000, "party"),
        ];

        let all = CatalogQuery::new().category("").sort_by(SortOrder::PriceLow);
        assert_eq!(ids(&filter_products(&products, &all)), vec![10, 20]);

        let party = CatalogQuery::new().category("party");
        assert_eq!(ids(&filter_products(&products, &party)), vec![20]);
    }

    #[test]
    fn test_default_sorts_by_name() {
        let products = sample();
        let result = filter_products(&products, &CatalogQuery::new());
        assert_eq!(ids(&result), vec![5, 1, 4, 2, 3]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let products = vec![
            product(1, "Zari Shawl", 100, "party"),
            product(2, "abaya classic", 100, "abayas"),
            product(3, "Beach Kaftan", 100, "kaftans"),
        ];
        let result = filter_products(&products, &CatalogQuery::new());
        assert_eq!(ids(&result), vec![2, 3, 1]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let products = sample();

        let by_name = CatalogQuery::new().search("KAFTAN");
        assert_eq!(ids(&filter_products(&products, &by_name)), vec![5, 1]);

        let by_description = CatalogQuery::new().search("summer");
        assert_eq!(ids(&filter_products(&products, &by_description)), vec![1]);
    }

    #[test]
    fn test_category_and_selected_categories_are_conjunctive() {
        let products = sample();

        let overlapping = CatalogQuery::new()
            .category("kaftans")
            .select_categories(["kaftans", "party"]);
        assert_eq!(ids(&filter_products(&products, &overlapping)), vec![5, 1]);

        let disjoint = CatalogQuery::new()
            .category("wedding")
            .select_categories(["party"]);
        assert!(filter_products(&products, &disjoint).is_empty());
    }

    #[test]
    fn test_unknown_category_yields_empty_result() {
        let products = sample();
        let none = CatalogQuery::new().category("menswear");
        assert!(filter_products(&products, &none).is_empty());
        assert_eq!(filter_products(&products, &CatalogQuery::new()).len(), 5);
    }

    #[test]
    fn test_price_orders_are_reversed() {
        let products = sample();
        let low = filter_products(&products, &CatalogQuery::new().sort_by(SortOrder::PriceLow));
        let mut high =
            filter_products(&products, &CatalogQuery::new().sort_by(SortOrder::PriceHigh));
        high.reverse();
        assert_eq!(ids(&low), ids(&high));
        assert_eq!(ids(&low), vec![5, 2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let products = vec![
            product(1, "Zed", 500, "party"),
            product(2, "Amy", 500, "party"),
            product(3, "Bea", 100, "party"),
        ];
        let result = filter_products(&products, &CatalogQuery::new().sort_by(SortOrder::PriceLow));
        assert_eq!(ids(&result), vec![3, 1, 2]);
    }

    #[test]
    fn test_toggle_category() {
        let mut query = CatalogQuery::new();
        assert!(query.toggle_category("party"));
        assert!(query.selected_categories.contains("party"));
        assert!(!query.toggle_category("party"));
        assert!(query.is_unfiltered());
    }

    #[test]
    fn test_sort_order_wire_names() {
        assert_eq!("price-high".parse::<SortOrder>().unwrap(), SortOrder::PriceHigh);
        assert_eq!(
            "cheapest".parse::<SortOrder>(),
            Err(UnknownSortOrder("cheapest".to_string()))
        );
        let json = serde_json::to_string(&SortOrder::PriceLow).unwrap();
        assert_eq!(json, "\"price-low\"");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let products = sample();
        let _ = filter_products(&products, &CatalogQuery::new().sort_by(SortOrder::PriceHigh));
        assert_eq!(products.first().unwrap().id, ProductId::new(1));
    }
}
