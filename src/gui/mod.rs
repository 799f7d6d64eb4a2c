//! GUI module - User interface components

mod app;
mod control_panel;
mod report_viewer;

pub use app::ChartTableApp;
pub use control_panel::{ControlPanel, ControlPanelAction, InputMode};
pub use report_viewer::{ReportViewer, ViewerAction};
