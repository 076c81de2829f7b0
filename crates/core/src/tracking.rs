//! Static order-tracking records.
//!
//! Orders placed through the storefront are not tracked; the book holds a
//! fixed set of sample shipments loaded at start-up.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a shipment is in its journey. Stored as its zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TrackingStage {
    Placed,
    Processing,
    Shipped,
    OutForDelivery,
    Delivered,
}

impl TrackingStage {
    pub const ALL: [Self; 5] = [
        Self::Placed,
        Self::Processing,
        Self::Shipped,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Placed => "Order Placed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Placed => "Your order has been received",
            Self::Processing => "Your order is being prepared",
            Self::Shipped => "Your order is on its way",
            Self::OutForDelivery => "Your order is out for delivery",
            Self::Delivered => "Your order has been delivered",
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tracking stage {0} is out of range (0-4)")]
pub struct UnknownStage(pub u8);

impl TryFrom<u8> for TrackingStage {
    type Error = UnknownStage;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(UnknownStage(value))
    }
}

impl From<TrackingStage> for u8 {
    fn from(stage: TrackingStage) -> Self {
        stage.index()
    }
}

/// One row of a shipment timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub stage: TrackingStage,
    pub label: &'static str,
    pub description: &'static str,
    pub completed: bool,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub id: String,
    pub status: TrackingStage,
    pub date: NaiveDate,
    pub estimated_delivery: NaiveDate,
    pub items: Vec<String>,
    pub address: String,
}

impl TrackingRecord {
    /// Every stage, marked completed up to and including the current one.
    #[must_use]
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        TrackingStage::ALL
            .iter()
            .map(|&stage| TimelineEntry {
                stage,
                label: stage.label(),
                description: stage.description(),
                completed: stage <= self.status,
                current: stage == self.status,
            })
            .collect()
    }

    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.status == TrackingStage::Delivered
    }
}

/// Lookup table of tracking records keyed by order id.
#[derive(Debug, Clone, Default)]
pub struct TrackingBook {
    records: Vec<TrackingRecord>,
}

impl TrackingBook {
    #[must_use]
    pub const fn new(records: Vec<TrackingRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a stage is out of range.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    /// Find a record by order id.
    ///
    /// The query is trimmed and upper-cased, so `" ord-2024-001 "` matches
    /// `ORD-2024-001`. A blank query finds nothing.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<&TrackingRecord> {
        let needle = query.trim().to_uppercase();
        if needle.is_empty() {
            return None;
        }
        self.records.iter().find(|r| r.id == needle)
    }

    #[must_use]
    pub fn records(&self) -> &[TrackingRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "id": "ORD-2024-001",
            "status": 4,
            "date": "2024-01-15",
            "estimated_delivery": "2024-01-20",
            "items": ["Elegant Silk Kaftan", "Traditional Abaya"],
            "address": "123 Fashion Street, Karachi"
        },
        {
            "id": "ORD-2024-002",
            "status": 2,
            "date": "2024-01-16",
            "estimated_delivery": "2024-01-22",
            "items": ["Wedding Lehnga"],
            "address": "456 Style Avenue, Lahore"
        }
    ]"#;

    #[test]
    fn test_lookup_normalizes_query() {
        let book = TrackingBook::from_json(SAMPLE).unwrap();
        assert_eq!(book.len(), 2);

        let record = book.find("  ord-2024-002 ").unwrap();
        assert_eq!(record.status, TrackingStage::Shipped);
        assert_eq!(record.items, vec!["Wedding Lehnga"]);

        assert!(book.find("ORD-2024-001").unwrap().is_delivered());
        assert!(book.find("ORD-1999-999").is_none());
    }

    #[test]
    fn test_blank_query_finds_nothing() {
        let book = TrackingBook::from_json(SAMPLE).unwrap();
        assert!(book.find("").is_none());
        assert!(book.find("   ").is_none());
    }

    #[test]
    fn test_timeline_marks_progress() {
        let book = TrackingBook::from_json(SAMPLE).unwrap();
        let timeline = book.find("ORD-2024-002").unwrap().timeline();

        assert_eq!(timeline.len(), 5);
        let completed: Vec<bool> = timeline.iter().map(|e| e.completed).collect();
        assert_eq!(completed, vec![true, true, true, false, false]);
        let current: Vec<&str> = timeline
            .iter()
            .filter(|e| e.current)
            .map(|e| e.label)
            .collect();
        assert_eq!(current, vec!["Shipped"]);
    }

    #[test]
    fn test_out_of_range_stage_is_rejected() {
        let json = r#"[{"id":"X","status":7,"date":"2024-01-01",
            "estimated_delivery":"2024-01-02","items":[],"address":""}]"#;
        assert!(TrackingBook::from_json(json).is_err());
        assert_eq!(TrackingStage::try_from(7), Err(UnknownStage(7)));
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(TrackingStage::OutForDelivery.label(), "Out for Delivery");
        assert_eq!(u8::from(TrackingStage::Delivered), 4);
    }
}
