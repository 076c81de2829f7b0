//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use boutique_core::catalog::category_label;
use boutique_core::{CatalogQuery, Product, ProductId, Quantity, SortOrder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub price_display: String,
    pub category: String,
    pub category_label: String,
    pub image: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub description: String,
    pub purchasable: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            price_display: product.unit_price().display(),
            category: product.category.clone(),
            category_label: category_label(&product.category),
            image: product.image.clone(),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            description: product.description.clone(),
            purchasable: product.is_purchasable(),
        }
    }
}

/// Category chip display data.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub tag: String,
    pub label: String,
    pub selected: bool,
}

/// Sort option display data.
#[derive(Debug, Clone, Serialize)]
pub struct SortOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Whether a listing found anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingState {
    Results,
    NoResults,
}

/// Product listing response.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub state: ListingState,
    pub count: usize,
    pub products: Vec<ProductView>,
    pub query: CatalogQuery,
    pub categories: Vec<CategoryView>,
    pub sort_options: Vec<SortOptionView>,
}

/// Product detail response.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetailView {
    pub product: ProductView,
    pub default_size: Option<String>,
    pub default_color: Option<String>,
    pub max_quantity: u32,
}

/// Listing query parameters.
///
/// `categories` is a comma-separated multi-select, e.g. `kaftans,party`.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub categories: Option<String>,
    pub sort: Option<String>,
}

impl ListingParams {
    fn into_query(self) -> Result<CatalogQuery> {
        let mut query = CatalogQuery::new();
        if let Some(term) = self.search {
            query = query.search(term);
        }
        if let Some(category) = self.category.filter(|c| !c.trim().is_empty()) {
            query = query.category(category.trim());
        }
        if let Some(list) = self.categories {
            query = query.select_categories(
                list.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from),
            );
        }
        if let Some(sort) = self.sort.filter(|s| !s.trim().is_empty()) {
            let order = sort
                .parse::<SortOrder>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            query = query.sort_by(order);
        }
        Ok(query)
    }
}

/// Category chips for every category in the catalog.
pub fn category_views(state: &AppState, query: Option<&CatalogQuery>) -> Vec<CategoryView> {
    state
        .catalog()
        .categories()
        .into_iter()
        .map(|tag| CategoryView {
            tag: tag.to_string(),
            label: category_label(tag),
            selected: query.is_some_and(|q| {
                q.selected_categories.contains(tag) || q.active_category() == Some(tag)
            }),
        })
        .collect()
}

/// Product listing with search, category filters, and sort.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingView>> {
    let query = params.into_query()?;
    let products: Vec<ProductView> = state
        .catalog()
        .search(&query)
        .into_iter()
        .map(ProductView::from)
        .collect();

    tracing::debug!(matches = products.len(), "Catalog listing");

    let listing_state = if products.is_empty() {
        ListingState::NoResults
    } else {
        ListingState::Results
    };
    let sort_options = SortOrder::ALL
        .into_iter()
        .map(|order| SortOptionView {
            value: order.as_str(),
            label: order.label(),
            selected: order == query.sort_by,
        })
        .collect();

    Ok(Json(ListingView {
        state: listing_state,
        count: products.len(),
        categories: category_views(&state, Some(&query)),
        products,
        query,
        sort_options,
    }))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetailView>> {
    let product = id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().get(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let defaults = product.default_options();
    Ok(Json(ProductDetailView {
        product: ProductView::from(product),
        default_size: defaults.map(|(size, _)| size.to_string()),
        default_color: defaults.map(|(_, color)| color.to_string()),
        max_quantity: Quantity::MAX_SELECTABLE,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_params_build_query() {
        let params = ListingParams {
            search: Some("silk".to_string()),
            category: Some(" ".to_string()),
            categories: Some("kaftans, party,,".to_string()),
            sort: Some("price-high".to_string()),
        };
        let query = params.into_query().unwrap();

        assert_eq!(query.search_term, "silk");
        assert_eq!(query.active_category(), None);
        assert_eq!(query.selected_categories.len(), 2);
        assert!(query.selected_categories.contains("party"));
        assert_eq!(query.sort_by, SortOrder::PriceHigh);
    }

    #[test]
    fn test_unknown_sort_is_bad_request() {
        let params = ListingParams {
            sort: Some("newest".to_string()),
            ..ListingParams::default()
        };
        assert!(matches!(params.into_query(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_empty_params_are_unfiltered() {
        let query = ListingParams::default().into_query().unwrap();
        assert!(query.is_unfiltered());
        assert_eq!(query.sort_by, SortOrder::Name);
    }
}
