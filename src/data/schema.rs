//! Dataset Schema Module
//! Known columns of the order export and the capability record derived from them.

use std::collections::BTreeSet;
use std::fmt;

/// Columns the dashboard knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatasetColumn {
    OrderPurchaseTimestamp,
    PaymentValue,
    ProductCategory,
    Price,
    OrderId,
}

impl DatasetColumn {
    pub const ALL: [DatasetColumn; 5] = [
        DatasetColumn::OrderPurchaseTimestamp,
        DatasetColumn::PaymentValue,
        DatasetColumn::ProductCategory,
        DatasetColumn::Price,
        DatasetColumn::OrderId,
    ];

    /// Header name as it appears in the CSV file.
    pub fn name(self) -> &'static str {
        match self {
            DatasetColumn::OrderPurchaseTimestamp => "order_purchase_timestamp",
            DatasetColumn::PaymentValue => "payment_value",
            DatasetColumn::ProductCategory => "product_category_name_english",
            DatasetColumn::Price => "price",
            DatasetColumn::OrderId => "order_id",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for DatasetColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which known columns the loaded file carries.
///
/// Built once at load time; every filter and chart asks this record instead of
/// probing the table for column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    present: BTreeSet<DatasetColumn>,
}

impl Capabilities {
    /// Derive capabilities from a header row. Unknown headers are ignored.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let present = headers
            .iter()
            .filter_map(|h| DatasetColumn::from_name(h.as_ref()))
            .collect();
        Self { present }
    }

    pub fn has(&self, column: DatasetColumn) -> bool {
        self.present.contains(&column)
    }

    /// Columns from `required` that the file lacks, in the order given.
    pub fn missing(&self, required: &[DatasetColumn]) -> Vec<DatasetColumn> {
        required.iter().copied().filter(|c| !self.has(*c)).collect()
    }

    pub fn date_filter(&self) -> bool {
        self.has(DatasetColumn::OrderPurchaseTimestamp)
    }

    pub fn revenue_filter(&self) -> bool {
        self.has(DatasetColumn::PaymentValue)
    }

    pub fn category_filter(&self) -> bool {
        self.has(DatasetColumn::ProductCategory)
    }
}
