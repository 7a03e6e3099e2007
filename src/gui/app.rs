//! Sales Dashboard Main Application
//! Main window with the filter panel and the chart viewer.

use crate::charts::DashboardReport;
use crate::config::DashboardConfig;
use crate::data::{filter, DataLoader, LoadError, RecordTable};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, ViewerInput};
use egui::{RichText, SidePanel};

/// A loaded dataset together with the controls and views derived from it.
pub struct DashboardSession {
    config: DashboardConfig,
    table: RecordTable,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    filter_warnings: Vec<String>,
    filtered: RecordTable,
    report: DashboardReport,
}

impl DashboardSession {
    pub fn new(table: RecordTable, config: &DashboardConfig) -> Self {
        let control_panel = ControlPanel::new(&table);
        let filter_warnings = control_panel.warnings();
        let filtered = filter::apply(&table, &control_panel.criteria());
        let report = DashboardReport::build(&table, &filtered, config);
        Self {
            config: config.clone(),
            table,
            control_panel,
            chart_viewer: ChartViewer::new(),
            filter_warnings,
            filtered,
            report,
        }
    }

    /// Re-run the filter and every chart from the current controls.
    pub fn refresh(&mut self) {
        let criteria = self.control_panel.criteria();
        log::debug!("Recomputing dashboard for {:?}", criteria);
        self.filtered = filter::apply(&self.table, &criteria);
        self.report = DashboardReport::build(&self.table, &self.filtered, &self.config);
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn filtered(&self) -> &RecordTable {
        &self.filtered
    }

    pub fn report(&self) -> &DashboardReport {
        &self.report
    }

    pub fn control_panel_mut(&mut self) -> &mut ControlPanel {
        &mut self.control_panel
    }

    fn show(&mut self, ctx: &egui::Context) {
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::FiltersChanged => self.refresh(),
                        ControlPanelAction::Reset => {
                            self.control_panel.reset(&self.table);
                            self.refresh();
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let input = ViewerInput {
                title: &self.config.title,
                row_height: self.config.row_height,
                full: &self.table,
                filtered: &self.filtered,
                report: &self.report,
                filter_warnings: &self.filter_warnings,
            };
            self.chart_viewer.show(ui, &input);
        });
    }
}

/// Startup outcome: either a usable dashboard or a single fatal message.
pub enum Dashboard {
    Ready(Box<DashboardSession>),
    Halted { message: String },
}

impl Dashboard {
    /// Load the configured file once; any load error halts the dashboard.
    pub fn startup(config: &DashboardConfig) -> Self {
        Self::from_load_result(DataLoader::load_csv(&config.data_path), config)
    }

    pub fn from_load_result(result: Result<RecordTable, LoadError>, config: &DashboardConfig) -> Self {
        match result {
            Ok(table) => {
                log::info!(
                    "Dashboard ready: {} rows, {} columns",
                    table.len(),
                    table.column_names().len()
                );
                Dashboard::Ready(Box::new(DashboardSession::new(table, config)))
            }
            Err(err) => {
                log::error!("Failed to load dataset: {err}");
                Dashboard::Halted {
                    message: format!("Error: {err}"),
                }
            }
        }
    }

    /// The message shown instead of the dashboard, if loading failed.
    pub fn fatal_message(&self) -> Option<&str> {
        match self {
            Dashboard::Halted { message } => Some(message.as_str()),
            Dashboard::Ready(_) => None,
        }
    }

    pub fn session(&self) -> Option<&DashboardSession> {
        match self {
            Dashboard::Ready(session) => Some(session.as_ref()),
            Dashboard::Halted { .. } => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut DashboardSession> {
        match self {
            Dashboard::Ready(session) => Some(session.as_mut()),
            Dashboard::Halted { .. } => None,
        }
    }
}

/// Main application window.
pub struct DashboardApp {
    dashboard: Dashboard,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dashboard: Dashboard) -> Self {
        Self { dashboard }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match &mut self.dashboard {
            Dashboard::Ready(session) => session.show(ctx),
            Dashboard::Halted { message } => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.label(
                        RichText::new(message.as_str())
                            .size(16.0)
                            .color(egui::Color32::from_rgb(220, 53, 69)),
                    );
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_halts_with_one_message() {
        let config = DashboardConfig {
            data_path: PathBuf::from("definitely/missing/main_data.csv"),
            ..Default::default()
        };
        let dashboard = Dashboard::startup(&config);
        let message = dashboard.fatal_message().unwrap();
        assert!(message.starts_with("Error: File '"));
        assert!(message.contains("not found"));
        assert!(dashboard.session().is_none());
    }

    #[test]
    fn loaded_table_starts_unfiltered() {
        let table = RecordTable::new(vec!["order_id".into()], Vec::new());
        let dashboard = Dashboard::from_load_result(Ok(table.clone()), &DashboardConfig::default());
        let session = dashboard.session().unwrap();
        assert!(dashboard.fatal_message().is_none());
        assert_eq!(session.filtered(), &table);
        assert_eq!(session.table(), &table);
    }
}
