//! Control Panel Widget
//! Left side panel with the date, revenue, and category filters.

use crate::data::{Capabilities, DatasetColumn, FilterCriteria, RecordTable};
use chrono::NaiveDate;
use egui::{Color32, RichText, ScrollArea};
use egui_extras::DatePickerButton;
use std::collections::BTreeSet;

/// Sidebar state. Everything here is rebuilt into a [`FilterCriteria`] on
/// each change.
pub struct ControlPanel {
    capabilities: Capabilities,
    date_bounds: Option<(NaiveDate, NaiveDate)>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Unchecking a bound removes it from the criteria.
    pub use_start: bool,
    pub use_end: bool,
    pub min_revenue: f64,
    pub max_revenue: f64,
    pub categories: Vec<String>,
    pub selected: BTreeSet<String>,
}

impl ControlPanel {
    /// Controls initialised to the "no filter" defaults for `table`.
    pub fn new(table: &RecordTable) -> Self {
        let defaults = FilterCriteria::defaults_for(table);
        let date_bounds = table.date_bounds();
        let fallback = NaiveDate::default();
        Self {
            capabilities: table.capabilities().clone(),
            date_bounds,
            start_date: defaults.start_date.unwrap_or(fallback),
            end_date: defaults.end_date.unwrap_or(fallback),
            use_start: date_bounds.is_some(),
            use_end: date_bounds.is_some(),
            min_revenue: defaults.min_revenue,
            max_revenue: defaults.max_revenue,
            categories: defaults.categories.iter().cloned().collect(),
            selected: defaults.categories,
        }
    }

    /// Current criteria as seen by the filter engine.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            start_date: self.use_start.then_some(self.start_date),
            end_date: self.use_end.then_some(self.end_date),
            min_revenue: self.min_revenue,
            max_revenue: self.max_revenue,
            categories: self.selected.clone(),
        }
    }

    /// One message per filter whose column the file lacks.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.capabilities.date_filter() {
            out.push(format!(
                "The dataset needs a '{}' column to create the date filter.",
                DatasetColumn::OrderPurchaseTimestamp
            ));
        }
        if !self.capabilities.revenue_filter() {
            out.push(format!(
                "The dataset needs a '{}' column to create revenue filters.",
                DatasetColumn::PaymentValue
            ));
        }
        if !self.capabilities.category_filter() {
            out.push(format!(
                "The dataset needs a '{}' column to create the category filter.",
                DatasetColumn::ProductCategory
            ));
        }
        out
    }

    pub fn select_all(&mut self) {
        self.selected = self.categories.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    pub fn toggle_category(&mut self, category: &str) {
        if !self.selected.remove(category) {
            self.selected.insert(category.to_string());
        }
    }

    /// Reset every control to its default.
    pub fn reset(&mut self, table: &RecordTable) {
        *self = Self::new(table);
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let before = self.criteria();
        let mut action = ControlPanelAction::None;

        ui.add_space(5.0);
        ui.label(
            RichText::new("Filters")
                .size(20.0)
                .color(Color32::from_rgb(100, 149, 237)),
        );
        ui.add_space(5.0);
        ui.separator();

        // ===== Date Range =====
        if self.capabilities.date_filter() {
            ui.label(RichText::new("📅 Date range").size(14.0).strong());
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.use_start, "From");
                ui.add_enabled_ui(self.use_start, |ui| {
                    ui.add(DatePickerButton::new(&mut self.start_date).id_salt("start_date"));
                });
            });
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.use_end, "To");
                ui.add_enabled_ui(self.use_end, |ui| {
                    ui.add(DatePickerButton::new(&mut self.end_date).id_salt("end_date"));
                });
            });
            if let Some((lo, hi)) = self.date_bounds {
                ui.label(
                    RichText::new(format!("Data covers {lo} to {hi}"))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            }
            if self.use_start != self.use_end {
                ui.label(
                    RichText::new("Both bounds are needed for the date filter to apply.")
                        .size(11.0)
                        .color(Color32::from_rgb(243, 156, 18)),
                );
            }
            ui.add_space(10.0);
            ui.separator();
        }

        // ===== Revenue =====
        if self.capabilities.revenue_filter() {
            ui.label(RichText::new("💰 Revenue").size(14.0).strong());
            ui.add_space(4.0);
            let label_width = 110.0;
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Minimum Revenue"));
                ui.add(
                    egui::DragValue::new(&mut self.min_revenue)
                        .range(0.0..=f64::MAX)
                        .speed(1.0)
                        .max_decimals(2),
                );
            });
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Maximum Revenue"));
                ui.add(
                    egui::DragValue::new(&mut self.max_revenue)
                        .range(0.0..=f64::MAX)
                        .speed(1.0)
                        .max_decimals(2),
                );
            });
            ui.add_space(10.0);
            ui.separator();
        }

        // ===== Categories =====
        if self.capabilities.category_filter() {
            ui.label(
                RichText::new(format!(
                    "🏷 Product categories ({}/{})",
                    self.selected.len(),
                    self.categories.len()
                ))
                .size(14.0)
                .strong(),
            );
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.small_button("Select All").clicked() {
                    self.select_all();
                }
                if ui.small_button("Clear All").clicked() {
                    self.select_none();
                }
            });
            if self.selected.is_empty() {
                ui.label(
                    RichText::new("Nothing selected: showing every category.")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            }

            let mut toggled: Option<String> = None;
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(5.0)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("category_list")
                        .max_height(260.0)
                        .show(ui, |ui| {
                            for category in &self.categories {
                                let mut checked = self.selected.contains(category);
                                if ui.checkbox(&mut checked, category).changed() {
                                    toggled = Some(category.clone());
                                }
                            }
                        });
                });
            if let Some(category) = toggled {
                self.toggle_category(&category);
            }
            ui.add_space(10.0);
            ui.separator();
        }

        ui.vertical_centered(|ui| {
            if ui.button("↺ Reset filters").clicked() {
                action = ControlPanelAction::Reset;
            }
        });

        if action == ControlPanelAction::None && self.criteria() != before {
            action = ControlPanelAction::FiltersChanged;
        }
        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    FiltersChanged,
    Reset,
}
