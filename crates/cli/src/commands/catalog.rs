//! Catalog query commands.

use std::path::Path;

use boutique_core::catalog::category_label;
use boutique_core::{CatalogQuery, Product, ProductId, SortOrder};
use boutique_storefront::data::load_catalog;
use tracing::info;

use super::CliError;

fn log_product(product: &Product) {
    info!(
        id = %product.id,
        category = %category_label(&product.category),
        price = %product.unit_price().display(),
        "{}",
        product.name
    );
}

/// List products matching a query, in the listing's sort order.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the sort key is unknown.
pub fn list(
    file: &Path,
    search: String,
    category: Option<String>,
    categories: Vec<String>,
    sort: &str,
) -> Result<(), CliError> {
    let catalog = load_catalog(file)?;

    let mut query = CatalogQuery::new()
        .search(search)
        .select_categories(categories)
        .sort_by(sort.parse::<SortOrder>()?);
    if let Some(category) = category {
        query = query.category(category);
    }

    let products = catalog.search(&query);
    if products.is_empty() {
        info!("No products found");
        return Ok(());
    }

    for product in &products {
        log_product(product);
    }
    info!(
        matches = products.len(),
        sort = query.sort_by.label(),
        "Listed products"
    );
    Ok(())
}

/// Show one product with its options.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the id is unknown.
pub fn show(file: &Path, id: i32) -> Result<(), CliError> {
    let catalog = load_catalog(file)?;
    let id = ProductId::new(id);
    let product = catalog.get(id).ok_or(CliError::UnknownProduct(id))?;

    log_product(product);
    info!(sizes = %product.sizes.join(", "), colors = %product.colors.join(", "), "Options");
    if !product.description.is_empty() {
        info!("{}", product.description);
    }
    Ok(())
}
