//! Sales Dashboard - filter and chart an e-commerce order export.
//!
//! The CSV is loaded once into an immutable [`data::RecordTable`]; every
//! interaction rebuilds the filtered view and the chart report from it.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
