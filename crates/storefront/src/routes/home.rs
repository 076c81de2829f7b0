//! Home page route handler.

use axum::{Json, extract::State};
use boutique_core::catalog::FEATURED_COUNT;
use serde::Serialize;
use tracing::instrument;

use super::products::{CategoryView, ProductView, category_views};
use crate::state::AppState;

/// Home page data: the featured strip and the category menu.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub featured: Vec<ProductView>,
    pub categories: Vec<CategoryView>,
}

/// Display home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    Json(HomeView {
        featured: state
            .catalog()
            .featured(FEATURED_COUNT)
            .iter()
            .map(ProductView::from)
            .collect(),
        categories: category_views(&state, None),
    })
}
