//! Control Panel Widget
//! Left side panel with the input source and run controls.

use crate::pipeline::Source;
use egui::{Color32, RichText};
use std::path::Path;

pub const SAMPLE_CSV: &str = "Date,Open,High,Low,Close\n\
2025-08-01,81018.72,81500.00,80800.00,81200.00\n\
2025-08-02,81200.00,81800.00,81100.00,81750.00\n\
2025-08-03,81750.00,82000.00,81500.00,81900.00\n\
2025-08-04,81900.00,82100.00,81700.00,82050.00";

pub const SAMPLE_URL: &str = "https://en.wikipedia.org/wiki/List_of_countries_by_GDP_(nominal)";

/// Where the next action reads its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Pasted CSV text
    #[default]
    Manual,
    /// HTML tables of a web page
    Url,
}

/// Left side control panel with data source and progress.
pub struct ControlPanel {
    pub mode: InputMode,
    pub csv_text: String,
    pub url: String,
    pub status: String,
    pub is_error: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            mode: InputMode::default(),
            csv_text: SAMPLE_CSV.to_string(),
            url: SAMPLE_URL.to_string(),
            status: "Ready".to_string(),
            is_error: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source for the current mode, or `None` when its input is blank.
    pub fn source(&self) -> Option<Source> {
        match self.mode {
            InputMode::Manual if !self.csv_text.trim().is_empty() => {
                Some(Source::CsvText(self.csv_text.clone()))
            }
            InputMode::Url if !self.url.trim().is_empty() => {
                Some(Source::Url(self.url.trim().to_string()))
            }
            _ => None,
        }
    }

    /// Draw the control panel; `busy` disables the run button while an action runs.
    pub fn show(&mut self, ui: &mut egui::Ui, busy: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Chart Table")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Chart data to downloadable table")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.radio_value(&mut self.mode, InputMode::Manual, "Paste CSV");
            ui.radio_value(&mut self.mode, InputMode::Url, "From URL");
        });

        ui.add_space(8.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| match self.mode {
                InputMode::Manual => {
                    ui.label("Comma-separated values, first line is the header:");
                    ui.add(
                        egui::TextEdit::multiline(&mut self.csv_text)
                            .code_editor()
                            .desired_rows(14)
                            .desired_width(f32::INFINITY),
                    );
                    ui.horizontal(|ui| {
                        if ui.small_button("📂 Open CSV…").clicked() {
                            action = ControlPanelAction::OpenCsv;
                        }
                        if ui.small_button("Reset sample").clicked() {
                            self.csv_text = SAMPLE_CSV.to_string();
                        }
                    });
                }
                InputMode::Url => {
                    ui.label("Page with standard HTML tables:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.url).desired_width(f32::INFINITY),
                    );
                    ui.label(
                        RichText::new("Data drawn by JavaScript charts cannot be extracted.")
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let label = match self.mode {
                InputMode::Manual => "▶ Create Table & Analyze",
                InputMode::Url => "▶ Fetch Tables",
            };
            ui.add_enabled_ui(!busy, |ui| {
                let button = egui::Button::new(RichText::new(label).size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Run;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal_wrapped(|ui| {
            if busy {
                ui.spinner();
            }
            let status_color = if self.is_error {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.is_error = false;
    }

    pub fn set_error(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.is_error = true;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Run,
    OpenCsv,
}

/// Short display name of a file path.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_follows_mode_and_skips_blank_input() {
        let mut panel = ControlPanel::new();
        assert!(matches!(panel.source(), Some(Source::CsvText(_))));

        panel.mode = InputMode::Url;
        panel.url = "  https://example.com/  ".to_string();
        assert_eq!(panel.source(), Some(Source::Url("https://example.com/".to_string())));

        panel.url = "   ".to_string();
        assert_eq!(panel.source(), None);
    }

    #[test]
    fn busy_flag_comes_from_caller() {
        let mut panel = ControlPanel::new();
        let ctx = egui::Context::default();
        let mut action = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = Some(panel.show(ui, true));
            });
        });
        assert_eq!(action, Some(ControlPanelAction::None));
        assert_eq!(panel.status, "Ready");
    }
}
