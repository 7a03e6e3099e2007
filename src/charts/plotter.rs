//! Chart Plotter Module
//! Draws the dashboard's interactive charts using egui_plot.

use super::report::PriceRevenue;
use chrono::{Datelike, NaiveDate};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

pub const SALES_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const REVENUE_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green
pub const TREND_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const TOP_COLOR: Color32 = Color32::from_rgb(26, 188, 156); // Teal
pub const BOTTOM_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange

const CHART_HEIGHT: f32 = 280.0;
const BAR_CHART_HEIGHT: f32 = 240.0;

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Plot x coordinate for a calendar date (days since 0001-01-01).
    pub fn date_to_x(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    /// Inverse of [`Self::date_to_x`], rounding to the nearest day.
    pub fn x_to_date(x: f64) -> Option<NaiveDate> {
        if !x.is_finite() || x < i32::MIN as f64 || x > i32::MAX as f64 {
            return None;
        }
        NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
    }

    fn date_label(x: f64) -> String {
        // Only label whole days so zoomed-in grid lines stay readable.
        if (x - x.round()).abs() > 1e-6 {
            return String::new();
        }
        Self::x_to_date(x)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Line chart of a per-day series.
    pub fn draw_daily_line<I>(ui: &mut egui::Ui, id: &str, series: I, y_label: &str, color: Color32)
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let points: PlotPoints = series
            .into_iter()
            .map(|(d, v)| [Self::date_to_x(d), v])
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label(y_label)
            .x_axis_formatter(|mark, _range| Self::date_label(mark.value))
            .label_formatter(|_name, value| {
                format!("{}\n{:.2}", Self::date_label(value.x.round()), value.y)
            })
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).color(color).width(2.0).name(y_label));
            });
    }

    /// Scatter of price against revenue with the least squares trendline.
    pub fn draw_price_scatter(ui: &mut egui::Ui, data: &PriceRevenue) {
        Plot::new("price_vs_revenue")
            .height(CHART_HEIGHT + 60.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Price")
            .y_axis_label("Revenue")
            .show(ui, |plot_ui| {
                let points: PlotPoints = data.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(2.0)
                        .color(SALES_COLOR.gamma_multiply(0.5))
                        .name("Line items"),
                );

                if let Some(fit) = &data.fit {
                    let (lo, hi) = data
                        .points
                        .iter()
                        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
                    let line: PlotPoints = vec![[lo, fit.predict(lo)], [hi, fit.predict(hi)]].into();
                    plot_ui.line(
                        Line::new(line)
                            .color(TREND_COLOR)
                            .width(1.5)
                            .style(egui_plot::LineStyle::dashed_loose())
                            .name("Trendline"),
                    );
                }
            });
    }

    /// Vertical bar chart of category order counts, labelled by category.
    pub fn draw_category_bars(
        ui: &mut egui::Ui,
        id: &str,
        entries: &[(String, usize)],
        color: Color32,
    ) {
        let labels: Vec<String> = entries.iter().map(|(name, _)| name.clone()).collect();
        let bars: Vec<Bar> = entries
            .iter()
            .enumerate()
            .map(|(i, (name, count))| {
                Bar::new(i as f64, *count as f64)
                    .name(name)
                    .width(0.6)
                    .fill(color)
            })
            .collect();

        Plot::new(id)
            .height(BAR_CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Product Category")
            .y_axis_label("Number of Sales")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_axis_round_trips_whole_days() {
        let date = NaiveDate::from_ymd_opt(2018, 8, 29).unwrap();
        let x = ChartPlotter::date_to_x(date);
        assert_eq!(ChartPlotter::x_to_date(x), Some(date));
        assert_eq!(ChartPlotter::x_to_date(x + 0.4), Some(date));
        assert_eq!(ChartPlotter::date_label(x), "2018-08-29");
        assert_eq!(ChartPlotter::date_label(x + 0.5), "");
    }

    #[test]
    fn consecutive_days_are_one_unit_apart() {
        let a = NaiveDate::from_ymd_opt(2018, 2, 28).unwrap();
        let b = NaiveDate::from_ymd_opt(2018, 3, 1).unwrap();
        assert_eq!(ChartPlotter::date_to_x(b) - ChartPlotter::date_to_x(a), 1.0);
        assert_eq!(ChartPlotter::x_to_date(f64::NAN), None);
    }
}
