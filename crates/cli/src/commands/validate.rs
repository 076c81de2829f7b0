//! Dataset validation command.
//!
//! Loading already rejects malformed JSON, duplicate ids, and negative
//! prices. On top of that a product is flagged when it cannot be sold:
//! no sizes or colours, or a blank name or image.

use std::path::Path;

use boutique_core::Product;
use boutique_core::catalog::{KNOWN_CATEGORIES, category_label};
use boutique_storefront::data::{load_catalog, load_tracking};
use tracing::{info, warn};

use super::CliError;

/// Problems with a single product record.
fn product_problems(product: &Product) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if product.name.trim().is_empty() {
        problems.push("blank name");
    }
    if product.image.trim().is_empty() {
        problems.push("blank image");
    }
    if product.sizes.is_empty() {
        problems.push("no sizes");
    }
    if product.colors.is_empty() {
        problems.push("no colours");
    }
    problems
}

/// Validate both datasets and summarize them.
///
/// # Errors
///
/// Returns an error if either dataset fails to load or any product has
/// problems.
pub fn run(catalog_file: &Path, tracking_file: &Path) -> Result<(), CliError> {
    let catalog = load_catalog(catalog_file)?;
    let tracking = load_tracking(tracking_file)?;

    let mut problem_count = 0;
    for product in catalog.products() {
        let problems = product_problems(product);
        if !problems.is_empty() {
            warn!(id = %product.id, problems = %problems.join(", "), "{}", product.name);
            problem_count += problems.len();
        }
    }

    for tag in catalog.categories() {
        let count = catalog
            .products()
            .iter()
            .filter(|p| p.category == tag)
            .count();
        let curated = KNOWN_CATEGORIES.iter().any(|(known, _)| *known == tag);
        info!(category = %category_label(tag), count, curated, "Category");
    }

    info!(
        products = catalog.len(),
        tracking_records = tracking.len(),
        problems = problem_count,
        "Validation finished"
    );

    if problem_count > 0 {
        return Err(CliError::Invalid(problem_count));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(json: &str) -> Product {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_complete_product_has_no_problems() {
        let p = product(
            r#"{"id":1,"name":"Kaftan","price":100,"category":"kaftans",
                "image":"/k.jpg","sizes":["M"],"colors":["Red"]}"#,
        );
        assert!(product_problems(&p).is_empty());
    }

    #[test]
    fn test_unsellable_product_is_flagged() {
        let p = product(r#"{"id":2,"name":" ","price":100,"category":"party","image":""}"#);
        assert_eq!(
            product_problems(&p),
            vec!["blank name", "blank image", "no sizes", "no colours"]
        );
    }
}
