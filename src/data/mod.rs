//! Data module - CSV loading, schema validation, and filtering

pub mod filter;
mod loader;
mod schema;
mod table;

pub use filter::FilterCriteria;
pub use loader::{parse_timestamp, DataLoader, LoadError, ParseError};
pub use schema::{Capabilities, DatasetColumn};
pub use table::{OrderRecord, RecordTable};
