//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod data_table;

pub use app::{Dashboard, DashboardApp, DashboardSession};
pub use chart_viewer::{ChartViewer, ViewerInput};
pub use control_panel::{ControlPanel, ControlPanelAction};
