//! CSV Data Loader Module
//! Reads the order export with Polars and validates it into a typed `RecordTable`.

use super::schema::DatasetColumn;
use super::table::{OrderRecord, RecordTable};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Accepted layouts for `order_purchase_timestamp`, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Csv(#[from] PolarsError),
    #[error("row {row}: cannot parse '{value}' as a timestamp")]
    Timestamp { row: usize, value: String },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File '{}' not found. Please ensure the file exists in the specified path.", .0.display())]
    FileNotFound(PathBuf),
    #[error("An error occurred while reading the file: {0}")]
    Parse(#[from] ParseError),
}

impl From<PolarsError> for LoadError {
    fn from(err: PolarsError) -> Self {
        LoadError::Parse(ParseError::Csv(err))
    }
}

/// Loads the order export once at startup.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars and convert it into a `RecordTable`.
    pub fn load_csv(file_path: &Path) -> Result<RecordTable, LoadError> {
        if !file_path.is_file() {
            return Err(LoadError::FileNotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .with_schema_modify(Self::pin_known_dtypes)?
            .finish()?
            .collect()?;

        log::info!(
            "Read {} rows, {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );

        Self::from_dataframe(&df)
    }

    /// Known columns keep a fixed dtype whatever the sampled rows look like.
    /// Inference only sees the first rows, and an integer guess would null
    /// out later decimals under `ignore_errors`.
    fn pin_known_dtypes(mut schema: Schema) -> PolarsResult<Schema> {
        for column in DatasetColumn::ALL {
            let dtype = match column {
                DatasetColumn::PaymentValue | DatasetColumn::Price => DataType::Float64,
                DatasetColumn::OrderId
                | DatasetColumn::OrderPurchaseTimestamp
                | DatasetColumn::ProductCategory => DataType::String,
            };
            schema.set_dtype(column.name(), dtype);
        }
        Ok(schema)
    }

    /// Validate a DataFrame against the known columns and extract typed records.
    pub fn from_dataframe(df: &DataFrame) -> Result<RecordTable, LoadError> {
        let column_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for column in DatasetColumn::ALL {
            if !column_names.iter().any(|n| n == column.name()) {
                log::warn!("Column '{}' not found; dependent views are disabled", column);
            }
        }

        let has = |column: DatasetColumn| column_names.iter().any(|n| n == column.name());

        let order_ids = if has(DatasetColumn::OrderId) {
            Some(Self::string_values(df, DatasetColumn::OrderId.name())?)
        } else {
            None
        };
        let categories = if has(DatasetColumn::ProductCategory) {
            Some(Self::string_values(df, DatasetColumn::ProductCategory.name())?)
        } else {
            None
        };
        let payments = if has(DatasetColumn::PaymentValue) {
            Some(Self::float_values(df, DatasetColumn::PaymentValue.name())?)
        } else {
            None
        };
        let prices = if has(DatasetColumn::Price) {
            Some(Self::float_values(df, DatasetColumn::Price.name())?)
        } else {
            None
        };
        let timestamps = if has(DatasetColumn::OrderPurchaseTimestamp) {
            Some(Self::timestamp_values(df)?)
        } else {
            None
        };

        // Display text for the raw table view, one vector per column.
        let display: Vec<Vec<Option<String>>> = column_names
            .iter()
            .map(|name| Self::string_values(df, name))
            .collect::<Result<_, _>>()?;

        let pick = |values: &Option<Vec<Option<String>>>, i: usize| {
            values.as_ref().and_then(|v| v.get(i).cloned().flatten())
        };
        let pick_f64 = |values: &Option<Vec<Option<f64>>>, i: usize| {
            values.as_ref().and_then(|v| v.get(i).copied().flatten())
        };

        let records: Vec<OrderRecord> = (0..df.height())
            .map(|i| OrderRecord {
                order_id: pick(&order_ids, i),
                purchased_at: timestamps.as_ref().and_then(|v| v.get(i).copied().flatten()),
                payment_value: pick_f64(&payments, i),
                category: pick(&categories, i),
                price: pick_f64(&prices, i),
                cells: display
                    .iter()
                    .map(|col| col.get(i).cloned().flatten().unwrap_or_default())
                    .collect(),
            })
            .collect();

        Ok(RecordTable::new(column_names, records))
    }

    fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, PolarsError> {
        let casted = df.column(name)?.cast(&DataType::String)?;
        let ca = casted.as_materialized_series().str()?;
        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }

    fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, PolarsError> {
        let casted = df.column(name)?.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        Ok(ca.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
    }

    fn timestamp_values(df: &DataFrame) -> Result<Vec<Option<NaiveDateTime>>, LoadError> {
        let raw = Self::string_values(df, DatasetColumn::OrderPurchaseTimestamp.name())?;
        raw.into_iter()
            .enumerate()
            .map(|(i, cell)| match cell.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(value) => parse_timestamp(value).map(Some).ok_or_else(|| {
                    LoadError::Parse(ParseError::Timestamp {
                        row: i + 1,
                        value: value.to_string(),
                    })
                }),
            })
            .collect()
    }
}

/// Parse a purchase timestamp; a bare date means midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
