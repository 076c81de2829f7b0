//! Tracking lookup command.

use std::path::Path;

use boutique_storefront::data::load_tracking;
use tracing::info;

use super::CliError;

/// Log a tracking record and its timeline.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the order is unknown.
pub fn run(file: &Path, order_id: &str) -> Result<(), CliError> {
    let book = load_tracking(file)?;
    let record = book
        .find(order_id)
        .ok_or_else(|| CliError::UnknownOrder(order_id.trim().to_string()))?;

    info!(
        status = record.status.label(),
        placed = %record.date,
        estimated_delivery = %record.estimated_delivery,
        address = %record.address,
        "{}",
        record.id
    );
    for item in &record.items {
        info!(item = %item, "Item");
    }
    for entry in record.timeline() {
        let mark = if entry.current {
            "current"
        } else if entry.completed {
            "done"
        } else {
            "pending"
        };
        info!(stage = entry.label, mark, "{}", entry.description);
    }
    Ok(())
}
