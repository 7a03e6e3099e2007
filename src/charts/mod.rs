//! Charts module - chart data, commentary, and rendering

pub mod commentary;
mod plotter;
mod report;

pub use plotter::{ChartPlotter, BOTTOM_COLOR, REVENUE_COLOR, SALES_COLOR, TOP_COLOR};
pub use report::{
    CategoryRanking, ChartError, ChartKind, ChartSource, DailySales, DashboardReport,
    MonthlyTrend, PriceRevenue,
};
