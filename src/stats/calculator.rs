//! Statistics Calculator Module
//! Grouped reductions over order records: per-day and per-category counts and sums.

use crate::data::OrderRecord;
use chrono::{Months, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Default number of categories shown in each ranking.
pub const DEFAULT_RANKING_SIZE: usize = 5;

/// Time window ending at the latest purchase in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl MonthWindow {
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start
    }
}

/// Stateless aggregation helpers.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Count of orders per purchase date.
    ///
    /// Rows without a timestamp are dropped; rows without an `order_id` belong
    /// to their day but are not counted.
    pub fn daily_order_counts<'a, I>(records: I) -> BTreeMap<NaiveDate, usize>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for record in records {
            if let Some(date) = record.purchase_date() {
                let entry = counts.entry(date).or_default();
                if record.order_id.is_some() {
                    *entry += 1;
                }
            }
        }
        counts
    }

    /// Sum of `payment_value` per purchase date. Missing amounts add nothing.
    pub fn daily_revenue<'a, I>(records: I) -> BTreeMap<NaiveDate, f64>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            if let Some(date) = record.purchase_date() {
                *totals.entry(date).or_default() += record.payment_value.unwrap_or(0.0);
            }
        }
        totals
    }

    /// One calendar month back from the table's own latest timestamp.
    ///
    /// The day is clamped to the end of the earlier month, so a latest purchase
    /// on March 31st opens the window on the last day of February.
    pub fn last_month_window<'a, I>(records: I) -> Option<MonthWindow>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let end = records.into_iter().filter_map(|r| r.purchased_at).max()?;
        let start = end.checked_sub_months(Months::new(1))?;
        Some(MonthWindow { start, end })
    }

    /// Rows purchased inside `window`.
    pub fn within_window<'a>(records: &'a [OrderRecord], window: &MonthWindow) -> Vec<&'a OrderRecord> {
        records
            .iter()
            .filter(|r| r.purchased_at.is_some_and(|ts| window.contains(ts)))
            .collect()
    }

    /// Count of orders per category. Rows without a category are dropped.
    pub fn category_order_counts<'a, I>(records: I) -> BTreeMap<String, usize>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            if let Some(category) = &record.category {
                let entry = counts.entry(category.clone()).or_default();
                if record.order_id.is_some() {
                    *entry += 1;
                }
            }
        }
        counts
    }

    /// Sum of `payment_value` per category.
    pub fn category_revenue<'a, I>(records: I) -> BTreeMap<String, f64>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for record in records {
            if let Some(category) = &record.category {
                *totals.entry(category.clone()).or_default() += record.payment_value.unwrap_or(0.0);
            }
        }
        totals
    }

    /// The `n` largest counts, descending. Ties keep category name order.
    pub fn top_n(counts: &BTreeMap<String, usize>, n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> =
            counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// The `n` smallest counts, ascending. Ties keep category name order.
    pub fn bottom_n(counts: &BTreeMap<String, usize>, n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> =
            counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
        ranked.sort_by(|a, b| a.1.cmp(&b.1));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn at(ts: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn order(id: Option<&str>, ts: Option<&str>, payment: Option<f64>, category: Option<&str>) -> OrderRecord {
        OrderRecord {
            order_id: id.map(str::to_string),
            purchased_at: ts.map(at),
            payment_value: payment,
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_counts_group_by_calendar_date() {
        let records = vec![
            order(Some("a"), Some("2018-08-01 08:00:00"), None, None),
            order(Some("b"), Some("2018-08-01 22:10:00"), None, None),
            order(Some("c"), Some("2018-08-02 00:00:01"), None, None),
        ];
        let counts = StatsCalculator::daily_order_counts(&records);
        let expected: BTreeMap<_, _> = [(date(2018, 8, 1), 2), (date(2018, 8, 2), 1)].into();
        assert_eq!(counts, expected);
    }

    #[test]
    fn daily_counts_skip_missing_ids_and_timestamps() {
        let records = vec![
            order(None, Some("2018-08-01 08:00:00"), None, None),
            order(Some("a"), None, None, None),
        ];
        let counts = StatsCalculator::daily_order_counts(&records);
        assert_eq!(counts.get(&date(2018, 8, 1)), Some(&0));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn daily_revenue_sums_amounts() {
        let records = vec![
            order(Some("a"), Some("2018-08-01 08:00:00"), Some(10.0), None),
            order(Some("b"), Some("2018-08-01 09:00:00"), Some(2.5), None),
            order(Some("c"), Some("2018-08-03 09:00:00"), None, None),
        ];
        let totals = StatsCalculator::daily_revenue(&records);
        assert_eq!(totals[&date(2018, 8, 1)], 12.5);
        assert_eq!(totals[&date(2018, 8, 3)], 0.0);
    }

    #[test]
    fn month_window_uses_table_max_and_clamps_day() {
        let records = vec![
            order(Some("a"), Some("2018-02-20 10:00:00"), None, None),
            order(Some("b"), Some("2018-03-31 18:30:00"), None, None),
            order(Some("c"), Some("2018-02-28 18:29:59"), None, None),
            order(Some("d"), Some("2018-02-28 18:30:00"), None, None),
        ];
        let window = StatsCalculator::last_month_window(&records).unwrap();
        assert_eq!(window.end, at("2018-03-31 18:30:00"));
        assert_eq!(window.start, at("2018-02-28 18:30:00"));

        let inside: Vec<_> = StatsCalculator::within_window(&records, &window)
            .into_iter()
            .map(|r| r.order_id.clone().unwrap())
            .collect();
        assert_eq!(inside, vec!["b", "d"]);
    }

    #[test]
    fn month_window_requires_a_timestamp() {
        let records = vec![order(Some("a"), None, None, None)];
        assert!(StatsCalculator::last_month_window(&records).is_none());
    }

    fn category_counts(sizes: &[(&str, usize)]) -> BTreeMap<String, usize> {
        let mut records = Vec::new();
        for (name, n) in sizes {
            for i in 0..*n {
                records.push(order(Some(format!("{name}-{i}").as_str()), None, None, Some(*name)));
            }
        }
        StatsCalculator::category_order_counts(&records)
    }

    #[test]
    fn rankings_order_and_break_ties_by_name() {
        let counts = category_counts(&[("c", 3), ("a", 3), ("b", 1), ("d", 7), ("e", 1)]);
        assert_eq!(
            StatsCalculator::top_n(&counts, 3),
            vec![("d".to_string(), 7), ("a".to_string(), 3), ("c".to_string(), 3)]
        );
        assert_eq!(
            StatsCalculator::bottom_n(&counts, 3),
            vec![("b".to_string(), 1), ("e".to_string(), 1), ("a".to_string(), 3)]
        );
    }

    #[test]
    fn rankings_are_disjoint_with_ten_or_more_categories() {
        let sizes: Vec<(String, usize)> = (0..12).map(|i| (format!("cat{i:02}"), i + 1)).collect();
        let sizes_ref: Vec<(&str, usize)> = sizes.iter().map(|(n, c)| (n.as_str(), *c)).collect();
        let counts = category_counts(&sizes_ref);

        let top: BTreeSet<_> = StatsCalculator::top_n(&counts, 5).into_iter().map(|(n, _)| n).collect();
        let bottom: BTreeSet<_> = StatsCalculator::bottom_n(&counts, 5).into_iter().map(|(n, _)| n).collect();
        assert!(top.is_disjoint(&bottom));
    }

    #[test]
    fn rankings_overlap_with_fewer_than_ten_categories() {
        let counts = category_counts(&[("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5), ("f", 6)]);
        let top: BTreeSet<_> = StatsCalculator::top_n(&counts, 5).into_iter().map(|(n, _)| n).collect();
        let bottom: BTreeSet<_> = StatsCalculator::bottom_n(&counts, 5).into_iter().map(|(n, _)| n).collect();
        assert_eq!(top.intersection(&bottom).count(), 4);
    }

    #[test]
    fn category_revenue_ignores_uncategorised_rows() {
        let records = vec![
            order(Some("a"), None, Some(4.0), Some("toys")),
            order(Some("b"), None, Some(6.0), Some("toys")),
            order(Some("c"), None, Some(100.0), None),
        ];
        let totals = StatsCalculator::category_revenue(&records);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["toys"], 10.0);
    }
}
