//! Record Table Module
//! In-memory representation of the loaded order export.

use super::schema::Capabilities;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;
use std::sync::Arc;

/// One order line item. Absent or null cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRecord {
    pub order_id: Option<String>,
    pub purchased_at: Option<NaiveDateTime>,
    pub payment_value: Option<f64>,
    pub category: Option<String>,
    pub price: Option<f64>,
    /// Display text for every column of the source file, in header order.
    /// Shared so filtered views copy a pointer, not the whole row.
    pub cells: Arc<[String]>,
}

impl OrderRecord {
    /// Calendar date of the purchase timestamp.
    pub fn purchase_date(&self) -> Option<NaiveDate> {
        self.purchased_at.map(|ts| ts.date())
    }
}

/// Immutable, ordered collection of order records plus the schema they came with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    column_names: Arc<[String]>,
    capabilities: Capabilities,
    records: Vec<OrderRecord>,
}

impl RecordTable {
    pub fn new(column_names: Vec<String>, records: Vec<OrderRecord>) -> Self {
        let capabilities = Capabilities::from_headers(&column_names);
        Self {
            column_names: column_names.into(),
            capabilities,
            records,
        }
    }

    /// New table with the same schema holding `records`.
    pub fn with_records(&self, records: Vec<OrderRecord>) -> Self {
        Self {
            column_names: self.column_names.clone(),
            capabilities: self.capabilities.clone(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Earliest and latest purchase dates.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(OrderRecord::purchase_date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    pub fn max_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.iter().filter_map(|r| r.purchased_at).max()
    }

    /// Largest payment value, or 0 when the column is absent or empty.
    pub fn max_payment_value(&self) -> f64 {
        self.records
            .iter()
            .filter_map(|r| r.payment_value)
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
            .unwrap_or(0.0)
    }

    /// Distinct non-null categories, sorted.
    pub fn categories(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .filter_map(|r| r.category.clone())
            .collect()
    }
}
