//! Chart Viewer Widget
//! Central scrollable panel: dataset views, chart sections, and their commentary.

use super::data_table;
use crate::charts::{
    commentary, CategoryRanking, ChartError, ChartKind, ChartPlotter, ChartSource, DailySales,
    DashboardReport, MonthlyTrend, PriceRevenue, BOTTOM_COLOR, REVENUE_COLOR, SALES_COLOR,
    TOP_COLOR,
};
use crate::data::RecordTable;
use egui::{Color32, RichText, ScrollArea};

const WARNING_COLOR: Color32 = Color32::from_rgb(243, 156, 18);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const TABLE_HEIGHT: f32 = 260.0;
const SECTION_SPACING: f32 = 20.0;

/// Everything the central panel needs for one frame.
pub struct ViewerInput<'a> {
    pub title: &'a str,
    /// Row height for both table previews.
    pub row_height: f32,
    pub full: &'a RecordTable,
    pub filtered: &'a RecordTable,
    pub report: &'a DashboardReport,
    pub filter_warnings: &'a [String],
}

#[derive(Default)]
pub struct ChartViewer {
    /// "Show Dataset" toggle for the raw table.
    pub show_dataset: bool,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, input: &ViewerInput<'_>) {
        ScrollArea::vertical()
            .id_salt("chart_viewer")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new(input.title).size(26.0).strong());
                ui.add_space(8.0);

                ui.checkbox(&mut self.show_dataset, "Show Dataset");
                if self.show_dataset {
                    data_table::show_records(ui, "raw_table", input.full, input.row_height, TABLE_HEIGHT);
                }
                ui.add_space(8.0);

                for warning in input.filter_warnings {
                    warning_label(ui, warning);
                }

                ui.label(
                    RichText::new(format!(
                        "Filtered data: {} of {} rows",
                        input.filtered.len(),
                        input.full.len()
                    ))
                    .strong(),
                );
                data_table::show_records(
                    ui,
                    "filtered_table",
                    input.filtered,
                    input.row_height,
                    TABLE_HEIGHT,
                );

                ui.add_space(SECTION_SPACING);
                Self::section(ui, ChartKind::DailySales, &input.report.daily_sales, Self::daily_sales);
                Self::section(ui, ChartKind::MonthlyTrend, &input.report.monthly_trend, Self::monthly_trend);
                Self::section(ui, ChartKind::PriceRevenue, &input.report.price_revenue, Self::price_revenue);
                Self::section(
                    ui,
                    ChartKind::CategoryRanking,
                    &input.report.category_ranking,
                    Self::category_ranking,
                );
            });
    }

    /// Header, source note, then either the chart body or its warning.
    fn section<T>(
        ui: &mut egui::Ui,
        kind: ChartKind,
        result: &Result<T, ChartError>,
        body: fn(&mut egui::Ui, &T),
    ) {
        ui.separator();
        ui.label(RichText::new(kind.title()).size(20.0).strong());
        let source = match kind.source() {
            ChartSource::Filtered => "Follows the sidebar filters.",
            ChartSource::Full => "Computed from the full dataset.",
        };
        ui.label(RichText::new(source).size(11.0).color(Color32::GRAY));
        ui.add_space(6.0);

        match result {
            Ok(data) => body(ui, data),
            Err(err) => chart_error(ui, err),
        }
        ui.add_space(SECTION_SPACING);
    }

    fn daily_sales(ui: &mut egui::Ui, data: &DailySales) {
        ChartPlotter::draw_daily_line(
            ui,
            "daily_sales_filtered",
            data.counts.iter().map(|(d, c)| (*d, *c as f64)),
            "Number of Sales",
            SALES_COLOR,
        );
        commentary_block(ui, &commentary::daily_sales(data));
    }

    fn monthly_trend(ui: &mut egui::Ui, data: &MonthlyTrend) {
        ui.label(RichText::new("Daily Sales Performance (Last Month)").size(15.0).strong());
        ChartPlotter::draw_daily_line(
            ui,
            "monthly_sales",
            data.daily_sales.iter().map(|(d, c)| (*d, *c as f64)),
            "Number of Sales",
            SALES_COLOR,
        );
        commentary_block(ui, &commentary::monthly_sales(data));
        ui.add_space(12.0);

        ui.label(RichText::new("Daily Revenue Performance (Last Month)").size(15.0).strong());
        match &data.daily_revenue {
            Ok(revenue) => {
                ChartPlotter::draw_daily_line(
                    ui,
                    "monthly_revenue",
                    revenue.iter().map(|(d, v)| (*d, *v)),
                    "Revenue",
                    REVENUE_COLOR,
                );
                commentary_block(ui, &commentary::monthly_revenue(revenue));
            }
            Err(err) => chart_error(ui, err),
        }
    }

    fn price_revenue(ui: &mut egui::Ui, data: &PriceRevenue) {
        ChartPlotter::draw_price_scatter(ui, data);
        commentary_block(ui, &commentary::price_revenue(data));

        let Some(totals) = &data.category_revenue else {
            if let Some(note) = commentary::category_revenue_note(data) {
                ui.label(RichText::new(note).size(11.0).color(Color32::GRAY));
            }
            return;
        };
        egui::CollapsingHeader::new("Revenue by product category")
            .id_salt("category_revenue")
            .default_open(false)
            .show(ui, |ui| {
                let mut ranked: Vec<(&String, &f64)> = totals.iter().collect();
                ranked.sort_by(|a, b| b.1.total_cmp(a.1));
                egui::Grid::new("category_revenue_grid")
                    .striped(true)
                    .min_col_width(120.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new("Category").strong());
                        ui.label(RichText::new("Revenue").strong());
                        ui.end_row();
                        for (name, total) in ranked {
                            ui.label(name);
                            ui.label(format!("{:.2}", total));
                            ui.end_row();
                        }
                    });
            });
    }

    fn category_ranking(ui: &mut egui::Ui, data: &CategoryRanking) {
        ui.columns(2, |cols| {
            cols[0].label(RichText::new("Top Selling Products").size(15.0).strong());
            ChartPlotter::draw_category_bars(&mut cols[0], "top_categories", &data.top, TOP_COLOR);
            commentary_block(&mut cols[0], &commentary::top_categories(data));

            cols[1].label(RichText::new("Bottom Selling Products").size(15.0).strong());
            ChartPlotter::draw_category_bars(
                &mut cols[1],
                "bottom_categories",
                &data.bottom,
                BOTTOM_COLOR,
            );
            commentary_block(&mut cols[1], &commentary::bottom_categories(data));
        });
        ui.add_space(8.0);
        commentary_block(ui, &commentary::category_summary(data));
    }
}

fn commentary_block(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(5.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(text).size(12.0));
        });
}

fn warning_label(ui: &mut egui::Ui, message: &str) {
    ui.label(RichText::new(format!("⚠ {message}")).color(WARNING_COLOR));
}

fn chart_error(ui: &mut egui::Ui, err: &ChartError) {
    match err {
        ChartError::MissingColumns(_) => warning_label(ui, &err.to_string()),
        ChartError::NoTimestamps => {
            ui.label(RichText::new(format!("Error: {err}")).color(ERROR_COLOR));
        }
    }
}
