//! Stats module - aggregation and trend fitting

mod calculator;
mod trend;

pub use calculator::{MonthWindow, StatsCalculator, DEFAULT_RANKING_SIZE};
pub use trend::LinearFit;
