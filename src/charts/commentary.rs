//! Descriptive text shown under each chart, derived from the chart's own numbers.

use super::report::{CategoryRanking, DailySales, MonthlyTrend, PriceRevenue};
use crate::data::DatasetColumn;
use chrono::NaiveDate;
use std::collections::BTreeMap;

const DATE_FMT: &str = "%d %b %Y";

fn peak<K: Copy, V: Copy + PartialOrd>(series: &BTreeMap<K, V>) -> Option<(K, V)> {
    series
        .iter()
        .map(|(k, v)| (*k, *v))
        .fold(None, |best: Option<(K, V)>, (k, v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((k, v)),
        })
}

fn span(series_start: Option<&NaiveDate>, series_end: Option<&NaiveDate>) -> String {
    match (series_start, series_end) {
        (Some(a), Some(b)) => format!("{} to {}", a.format(DATE_FMT), b.format(DATE_FMT)),
        _ => "no dates".to_string(),
    }
}

pub fn daily_sales(sales: &DailySales) -> String {
    let Some((day, count)) = peak(&sales.counts) else {
        return "No orders match the current filters.".to_string();
    };
    let total: usize = sales.counts.values().sum();
    format!(
        "Orders per day for the filtered selection, {}.\n\
         • {} orders across {} days.\n\
         • Busiest day: {} with {} orders.",
        span(sales.counts.keys().next(), sales.counts.keys().next_back()),
        total,
        sales.counts.len(),
        day.format(DATE_FMT),
        count
    )
}

pub fn monthly_sales(trend: &MonthlyTrend) -> String {
    let counts = &trend.daily_sales;
    let mut text = format!(
        "Daily sales over the last month of data, {} to {}.",
        trend.window.start.format(DATE_FMT),
        trend.window.end.format(DATE_FMT)
    );
    if let Some((day, count)) = peak(counts) {
        text.push_str(&format!("\n• Peak: {} orders on {}.", count, day.format(DATE_FMT)));
    }
    if let (Some((first_day, first)), Some((last_day, last))) =
        (counts.iter().next(), counts.iter().next_back())
    {
        let direction = match last.cmp(first) {
            std::cmp::Ordering::Greater => "rose",
            std::cmp::Ordering::Less => "fell",
            std::cmp::Ordering::Equal => "held steady",
        };
        text.push_str(&format!(
            "\n• Sales {} from {} on {} to {} on {}.",
            direction,
            first,
            first_day.format(DATE_FMT),
            last,
            last_day.format(DATE_FMT)
        ));
    }
    text
}

pub fn monthly_revenue(revenue: &BTreeMap<NaiveDate, f64>) -> String {
    let Some((day, amount)) = peak(revenue) else {
        return "No revenue recorded in the last month.".to_string();
    };
    let total: f64 = revenue.values().sum();
    format!(
        "Daily revenue over the same window.\n\
         • Total: {:.2}.\n\
         • Peak: {:.2} on {}.\n\
         • Average per day: {:.2}.",
        total,
        amount,
        day.format(DATE_FMT),
        total / revenue.len() as f64
    )
}

pub fn price_revenue(data: &PriceRevenue) -> String {
    if data.points.is_empty() {
        return "No rows carry both a price and a payment value.".to_string();
    }
    let (mut max_price, mut max_revenue) = (f64::MIN, f64::MIN);
    let (mut min_price, mut min_revenue) = (f64::MAX, f64::MAX);
    for [p, r] in &data.points {
        min_price = min_price.min(*p);
        max_price = max_price.max(*p);
        min_revenue = min_revenue.min(*r);
        max_revenue = max_revenue.max(*r);
    }

    let mut text = format!(
        "Price against payment value for all {} line items.\n\
         • Price ranges from {:.2} to {:.2}.\n\
         • Revenue ranges from {:.2} to {:.2}.",
        data.points.len(),
        min_price,
        max_price,
        min_revenue,
        max_revenue
    );

    match &data.fit {
        Some(fit) => {
            let trend = if fit.slope > 0.0 {
                "Higher prices tend to bring higher revenue"
            } else if fit.slope < 0.0 {
                "Higher prices tend to bring lower revenue"
            } else {
                "Revenue does not move with price"
            };
            text.push_str(&format!(
                "\n• {} (trendline slope {:.3}, intercept {:.2}).",
                trend, fit.slope, fit.intercept
            ));
            if let Some(r) = fit.correlation {
                text.push_str(&format!("\n• Correlation r = {:.3}.", r));
            }
        }
        None => text.push_str("\n• Not enough price variation to fit a trendline."),
    }
    text
}

/// Note shown in place of the per-category revenue table when the file has
/// no category column.
pub fn category_revenue_note(data: &PriceRevenue) -> Option<String> {
    data.category_revenue.is_none().then(|| {
        format!(
            "No '{}' column: revenue by category is unavailable.",
            DatasetColumn::ProductCategory
        )
    })
}

pub fn top_categories(ranking: &CategoryRanking) -> String {
    ranking_text("most", &ranking.top)
}

pub fn bottom_categories(ranking: &CategoryRanking) -> String {
    ranking_text("fewest", &ranking.bottom)
}

fn ranking_text(which: &str, entries: &[(String, usize)]) -> String {
    if entries.is_empty() {
        return "No categorised orders.".to_string();
    }
    let mut text = format!("The {} categories with the {} orders:", entries.len(), which);
    for (name, count) in entries {
        text.push_str(&format!("\n• {} ({} orders)", name, count));
    }
    text
}

pub fn category_summary(ranking: &CategoryRanking) -> String {
    let overlap = ranking.distinct_categories < ranking.top.len() + ranking.bottom.len();
    let mut text = format!(
        "{} categories in total. Comparing both ends shows where demand concentrates.",
        ranking.distinct_categories
    );
    if overlap {
        text.push_str(" With this few categories the two lists share entries.");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::LinearFit;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 8, d).unwrap()
    }

    #[test]
    fn daily_sales_names_busiest_day() {
        let sales = DailySales {
            counts: [(date(1), 2), (date(2), 5), (date(3), 5)].into(),
        };
        let text = daily_sales(&sales);
        assert!(text.contains("12 orders across 3 days"));
        assert!(text.contains("02 Aug 2018 with 5 orders"));
    }

    #[test]
    fn empty_daily_sales_says_so() {
        let sales = DailySales { counts: BTreeMap::new() };
        assert_eq!(daily_sales(&sales), "No orders match the current filters.");
    }

    #[test]
    fn price_revenue_reports_direction() {
        let points = vec![[1.0, 2.0], [2.0, 4.0], [3.0, 6.5]];
        let data = PriceRevenue {
            fit: LinearFit::fit(&points),
            points,
            category_revenue: None,
        };
        let text = price_revenue(&data);
        assert!(text.contains("Higher prices tend to bring higher revenue"));
        assert!(text.contains("all 3 line items"));
        assert!(category_revenue_note(&data)
            .unwrap()
            .contains("'product_category_name_english'"));

        let with_categories = PriceRevenue {
            category_revenue: Some([("toys".to_string(), 12.5)].into()),
            ..data
        };
        assert_eq!(category_revenue_note(&with_categories), None);
    }

    #[test]
    fn ranking_lists_every_entry() {
        let ranking = CategoryRanking {
            top: vec![("bed_bath_table".into(), 9), ("toys".into(), 4)],
            bottom: vec![("toys".into(), 4), ("bed_bath_table".into(), 9)],
            distinct_categories: 2,
        };
        let text = top_categories(&ranking);
        assert!(text.contains("bed_bath_table (9 orders)"));
        assert!(category_summary(&ranking).contains("share entries"));
    }
}
