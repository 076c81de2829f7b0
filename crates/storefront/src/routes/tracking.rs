//! Order tracking route handler.

use axum::{
    Json,
    extract::{Path, State},
};
use boutique_core::tracking::{TimelineEntry, TrackingRecord};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Tracking lookup result.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingView {
    pub id: String,
    pub status: &'static str,
    pub delivered: bool,
    pub date: NaiveDate,
    pub estimated_delivery: NaiveDate,
    pub items: Vec<String>,
    pub address: String,
    pub timeline: Vec<TimelineEntry>,
}

impl From<&TrackingRecord> for TrackingView {
    fn from(record: &TrackingRecord) -> Self {
        Self {
            id: record.id.clone(),
            status: record.status.label(),
            delivered: record.is_delivered(),
            date: record.date,
            estimated_delivery: record.estimated_delivery,
            items: record.items.clone(),
            address: record.address.clone(),
            timeline: record.timeline(),
        }
    }
}

/// Look up an order by id. Case and surrounding spaces are ignored.
#[instrument(skip(state))]
pub async fn track(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<TrackingView>> {
    state
        .tracking()
        .find(&order_id)
        .map(|record| Json(TrackingView::from(record)))
        .ok_or_else(|| AppError::NotFound(format!("order {}", order_id.trim())))
}
