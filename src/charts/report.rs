//! Dashboard Report Module
//! Computes every chart section independently from the full and filtered tables.
//!
//! Each section is a `Result`: a missing column or empty window turns that one
//! section into a warning while the rest still render.

use crate::config::DashboardConfig;
use crate::data::{DatasetColumn, RecordTable};
use crate::stats::{LinearFit, MonthWindow, StatsCalculator};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("The dataset needs {} to create this chart.", join_columns(.0))]
    MissingColumns(Vec<DatasetColumn>),
    #[error("No purchase timestamps are available to build the monthly window.")]
    NoTimestamps,
}

fn join_columns(columns: &[DatasetColumn]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{}'", c)).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [one] => format!("a {one} column"),
        [init @ .., last] => format!("{} and {} columns", init.join(", "), last),
    }
}

/// Which table a chart reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    Filtered,
    Full,
}

/// The dashboard's chart sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    DailySales,
    MonthlyTrend,
    PriceRevenue,
    CategoryRanking,
}

impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::DailySales => "Daily Sales (Filtered)",
            ChartKind::MonthlyTrend => "Sales & Revenue Performance (Last Month)",
            ChartKind::PriceRevenue => "Product Performance vs. Price",
            ChartKind::CategoryRanking => "Top / Bottom Selling Product Categories",
        }
    }

    /// Only the daily sales chart follows the sidebar filters; every other
    /// chart summarises the whole dataset.
    pub fn source(self) -> ChartSource {
        match self {
            ChartKind::DailySales => ChartSource::Filtered,
            _ => ChartSource::Full,
        }
    }

    pub fn required_columns(self) -> &'static [DatasetColumn] {
        match self {
            ChartKind::DailySales | ChartKind::MonthlyTrend => {
                &[DatasetColumn::OrderPurchaseTimestamp, DatasetColumn::OrderId]
            }
            ChartKind::PriceRevenue => &[DatasetColumn::Price, DatasetColumn::PaymentValue],
            ChartKind::CategoryRanking => {
                &[DatasetColumn::ProductCategory, DatasetColumn::OrderId]
            }
        }
    }

    fn check(self, table: &RecordTable) -> Result<(), ChartError> {
        let missing = table.capabilities().missing(self.required_columns());
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ChartError::MissingColumns(missing))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySales {
    pub counts: BTreeMap<NaiveDate, usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTrend {
    pub window: MonthWindow,
    pub daily_sales: BTreeMap<NaiveDate, usize>,
    /// Fails on its own when `payment_value` is missing.
    pub daily_revenue: Result<BTreeMap<NaiveDate, f64>, ChartError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceRevenue {
    /// `[price, payment_value]` for every row carrying both.
    pub points: Vec<[f64; 2]>,
    pub fit: Option<LinearFit>,
    /// Revenue per category, when the category column exists.
    pub category_revenue: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRanking {
    pub top: Vec<(String, usize)>,
    pub bottom: Vec<(String, usize)>,
    pub distinct_categories: usize,
}

/// All chart sections for one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub daily_sales: Result<DailySales, ChartError>,
    pub monthly_trend: Result<MonthlyTrend, ChartError>,
    pub price_revenue: Result<PriceRevenue, ChartError>,
    pub category_ranking: Result<CategoryRanking, ChartError>,
}

impl DashboardReport {
    pub fn build(full: &RecordTable, filtered: &RecordTable, config: &DashboardConfig) -> Self {
        let report = Self {
            daily_sales: Self::daily_sales(filtered),
            monthly_trend: Self::monthly_trend(full),
            price_revenue: Self::price_revenue(full),
            category_ranking: Self::category_ranking(full, config.ranking_size),
        };

        for (kind, message) in report.failures() {
            log::warn!("{}: {}", kind.title(), message);
        }
        report
    }

    /// Sections that could not be built, with their user-facing message.
    pub fn failures(&self) -> Vec<(ChartKind, String)> {
        let mut out = Vec::new();
        if let Err(e) = &self.daily_sales {
            out.push((ChartKind::DailySales, e.to_string()));
        }
        match &self.monthly_trend {
            Err(e) => out.push((ChartKind::MonthlyTrend, e.to_string())),
            Ok(trend) => {
                if let Err(e) = &trend.daily_revenue {
                    out.push((ChartKind::MonthlyTrend, e.to_string()));
                }
            }
        }
        if let Err(e) = &self.price_revenue {
            out.push((ChartKind::PriceRevenue, e.to_string()));
        }
        if let Err(e) = &self.category_ranking {
            out.push((ChartKind::CategoryRanking, e.to_string()));
        }
        out
    }

    fn daily_sales(filtered: &RecordTable) -> Result<DailySales, ChartError> {
        ChartKind::DailySales.check(filtered)?;
        Ok(DailySales {
            counts: StatsCalculator::daily_order_counts(filtered.records()),
        })
    }

    fn monthly_trend(full: &RecordTable) -> Result<MonthlyTrend, ChartError> {
        ChartKind::MonthlyTrend.check(full)?;
        let window =
            StatsCalculator::last_month_window(full.records()).ok_or(ChartError::NoTimestamps)?;
        let rows = StatsCalculator::within_window(full.records(), &window);

        let daily_revenue = if full.capabilities().has(DatasetColumn::PaymentValue) {
            Ok(StatsCalculator::daily_revenue(rows.iter().copied()))
        } else {
            Err(ChartError::MissingColumns(vec![DatasetColumn::PaymentValue]))
        };

        Ok(MonthlyTrend {
            window,
            daily_sales: StatsCalculator::daily_order_counts(rows.iter().copied()),
            daily_revenue,
        })
    }

    fn price_revenue(full: &RecordTable) -> Result<PriceRevenue, ChartError> {
        ChartKind::PriceRevenue.check(full)?;
        let points: Vec<[f64; 2]> = full
            .records()
            .iter()
            .filter_map(|r| Some([r.price?, r.payment_value?]))
            .collect();
        let fit = LinearFit::fit(&points);
        let category_revenue = full
            .capabilities()
            .has(DatasetColumn::ProductCategory)
            .then(|| StatsCalculator::category_revenue(full.records()));

        Ok(PriceRevenue {
            points,
            fit,
            category_revenue,
        })
    }

    fn category_ranking(full: &RecordTable, n: usize) -> Result<CategoryRanking, ChartError> {
        ChartKind::CategoryRanking.check(full)?;
        let counts = StatsCalculator::category_order_counts(full.records());
        Ok(CategoryRanking {
            top: StatsCalculator::top_n(&counts, n),
            bottom: StatsCalculator::bottom_n(&counts, n),
            distinct_categories: counts.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{self, FilterCriteria};
    use crate::data::OrderRecord;
    use chrono::NaiveDateTime;

    fn row(id: &str, ts: &str, payment: f64, price: f64, category: &str) -> OrderRecord {
        OrderRecord {
            order_id: Some(id.to_string()),
            purchased_at: Some(NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap()),
            payment_value: Some(payment),
            category: Some(category.to_string()),
            price: Some(price),
            cells: Default::default(),
        }
    }

    fn table(columns: &[&str]) -> RecordTable {
        RecordTable::new(
            columns.iter().map(|s| s.to_string()).collect(),
            vec![
                row("o1", "2018-06-01 10:00:00", 30.0, 25.0, "toys"),
                row("o2", "2018-08-01 10:00:00", 50.0, 40.0, "toys"),
                row("o2", "2018-08-01 11:00:00", 20.0, 15.0, "books"),
                row("o3", "2018-08-02 09:00:00", 80.0, 70.0, "garden_tools"),
            ],
        )
    }

    const ALL: [&str; 5] = [
        "order_id",
        "order_purchase_timestamp",
        "payment_value",
        "product_category_name_english",
        "price",
    ];

    #[test]
    fn full_report_builds_every_section() {
        let full = table(&ALL);
        let report = DashboardReport::build(&full, &full, &DashboardConfig::default());
        assert!(report.failures().is_empty());

        let trend = report.monthly_trend.unwrap();
        // 2018-06-01 falls outside one month before 2018-08-02 09:00.
        assert_eq!(trend.daily_sales.values().sum::<usize>(), 3);
        assert_eq!(trend.daily_revenue.unwrap().values().sum::<f64>(), 150.0);

        let scatter = report.price_revenue.unwrap();
        assert_eq!(scatter.points.len(), 4);
        assert!(scatter.fit.is_some());
        assert_eq!(scatter.category_revenue.unwrap()["toys"], 80.0);

        let ranking = report.category_ranking.unwrap();
        assert_eq!(ranking.top[0], ("toys".to_string(), 2));
        assert_eq!(ranking.distinct_categories, 3);
    }

    #[test]
    fn ranking_size_comes_from_config() {
        let full = table(&ALL);
        let config = DashboardConfig {
            ranking_size: 1,
            ..Default::default()
        };
        let ranking = DashboardReport::build(&full, &full, &config)
            .category_ranking
            .unwrap();
        assert_eq!(ranking.top, vec![("toys".to_string(), 2)]);
        assert_eq!(ranking.bottom, vec![("books".to_string(), 1)]);
    }

    #[test]
    fn only_daily_sales_follows_the_filter() {
        let full = table(&ALL);
        let mut criteria = FilterCriteria::defaults_for(&full);
        criteria.categories = ["books".to_string()].into_iter().collect();
        let filtered = filter::apply(&full, &criteria);

        let report = DashboardReport::build(&full, &filtered, &DashboardConfig::default());
        let daily = report.daily_sales.unwrap();
        assert_eq!(daily.counts.values().sum::<usize>(), 1);
        assert_eq!(report.category_ranking.unwrap().distinct_categories, 3);
        assert_eq!(report.price_revenue.unwrap().points.len(), 4);
    }

    #[test]
    fn missing_payment_column_degrades_to_warnings() {
        let full = table(&["order_id", "order_purchase_timestamp", "product_category_name_english", "price"]);
        let report = DashboardReport::build(&full, &full, &DashboardConfig::default());

        assert!(report.daily_sales.is_ok());
        assert!(report.category_ranking.is_ok());
        assert_eq!(
            report.price_revenue,
            Err(ChartError::MissingColumns(vec![DatasetColumn::PaymentValue]))
        );
        let trend = report.monthly_trend.as_ref().unwrap();
        assert!(trend.daily_revenue.is_err());

        let failures = report.failures();
        assert_eq!(failures.len(), 2);
        assert!(failures
            .iter()
            .all(|(_, msg)| msg.contains("'payment_value'")));
    }

    #[test]
    fn missing_columns_message_names_each_column() {
        let err = ChartError::MissingColumns(vec![
            DatasetColumn::OrderPurchaseTimestamp,
            DatasetColumn::OrderId,
        ]);
        assert_eq!(
            err.to_string(),
            "The dataset needs 'order_purchase_timestamp' and 'order_id' columns to create this chart."
        );
        assert_eq!(
            ChartError::MissingColumns(vec![DatasetColumn::Price]).to_string(),
            "The dataset needs a 'price' column to create this chart."
        );
    }

    #[test]
    fn chart_sources_are_explicit() {
        assert_eq!(ChartKind::DailySales.source(), ChartSource::Filtered);
        assert_eq!(ChartKind::MonthlyTrend.source(), ChartSource::Full);
        assert_eq!(ChartKind::PriceRevenue.source(), ChartSource::Full);
        assert_eq!(ChartKind::CategoryRanking.source(), ChartSource::Full);
    }
}
