//! Start-up loading of the static datasets.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use boutique_core::{Catalog, CatalogError, TrackingBook};
use thiserror::Error;

/// Errors loading a dataset file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid product dataset {}: {source}", path.display())]
    Catalog { path: PathBuf, source: CatalogError },
    #[error("invalid tracking dataset {}: {source}", path.display())]
    Tracking {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load and validate the product dataset.
///
/// # Errors
///
/// Returns `DataError` if the file cannot be read or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, DataError> {
    let json = std::fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json(&json).map_err(|source| DataError::Catalog {
        path: path.to_path_buf(),
        source,
    })?;

    for product in catalog.unpurchasable() {
        tracing::warn!(
            product_id = %product.id,
            name = %product.name,
            "Product has no sizes or colours and cannot be added to the cart"
        );
    }
    tracing::info!(
        path = %path.display(),
        products = catalog.len(),
        categories = catalog.categories().len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

/// Load the tracking dataset. A missing file yields an empty book.
///
/// # Errors
///
/// Returns `DataError` if the file exists but cannot be read or parsed.
pub fn load_tracking(path: &Path) -> Result<TrackingBook, DataError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(
                path = %path.display(),
                "No tracking dataset, lookups will find nothing"
            );
            return Ok(TrackingBook::default());
        }
        Err(source) => {
            return Err(DataError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let book = TrackingBook::from_json(&json).map_err(|source| DataError::Tracking {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = book.len(), "Tracking records loaded");
    Ok(book)
}
