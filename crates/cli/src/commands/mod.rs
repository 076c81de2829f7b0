//! CLI command implementations.

pub mod catalog;
pub mod quote;
pub mod track;
pub mod validate;

use boutique_core::catalog::UnknownSortOrder;
use boutique_core::{CartError, ProductId};
use boutique_storefront::config::ConfigError;
use boutique_storefront::data::DataError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Sort(#[from] UnknownSortOrder),

    #[error("No product with id {0}")]
    UnknownProduct(ProductId),

    #[error("No tracking record for {0:?}")]
    UnknownOrder(String),

    #[error("Dataset has {0} problem(s)")]
    Invalid(usize),
}
