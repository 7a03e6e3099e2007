//! Filter Engine
//! Applies the sidebar criteria to the record table, producing a filtered view.

use super::schema::Capabilities;
use super::table::{OrderRecord, RecordTable};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Combined date / revenue / category filter state.
///
/// Rebuilt from the controls on every interaction. Each predicate is skipped
/// when the table lacks its column.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Inclusive date bounds. The date predicate only applies when both are set.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Inclusive revenue bounds on `payment_value`.
    pub min_revenue: f64,
    pub max_revenue: f64,
    /// Allowed categories. Empty means no category filter.
    pub categories: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria that keep every row: full date range, revenue `[0, max]`,
    /// every category selected.
    pub fn defaults_for(table: &RecordTable) -> Self {
        let bounds = table.date_bounds();
        Self {
            start_date: bounds.map(|(lo, _)| lo),
            end_date: bounds.map(|(_, hi)| hi),
            min_revenue: 0.0,
            max_revenue: table.max_payment_value(),
            categories: table.categories(),
        }
    }

    /// Date range when both bounds are supplied.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date.zip(self.end_date)
    }
}

/// Whether `record` passes every predicate whose column exists.
pub fn matches(record: &OrderRecord, criteria: &FilterCriteria, capabilities: &Capabilities) -> bool {
    if capabilities.date_filter() {
        if let Some((start, end)) = criteria.date_range() {
            match record.purchase_date() {
                Some(date) if date >= start && date <= end => {}
                _ => return false,
            }
        }
    }

    if capabilities.revenue_filter() {
        match record.payment_value {
            Some(v) if v >= criteria.min_revenue && v <= criteria.max_revenue => {}
            _ => return false,
        }
    }

    if capabilities.category_filter() && !criteria.categories.is_empty() {
        match &record.category {
            Some(c) if criteria.categories.contains(c) => {}
            _ => return false,
        }
    }

    true
}

/// Return a new table holding the rows of `table` that satisfy `criteria`,
/// in their original order. The source table is left untouched.
pub fn apply(table: &RecordTable, criteria: &FilterCriteria) -> RecordTable {
    let capabilities = table.capabilities();
    let rows: Vec<OrderRecord> = table
        .records()
        .iter()
        .filter(|r| matches(r, criteria, capabilities))
        .cloned()
        .collect();

    log::debug!("Filter kept {} of {} rows", rows.len(), table.len());
    table.with_records(rows)
}
