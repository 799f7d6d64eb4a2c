//! Report Viewer Widget
//! Central scrollable panel with one card per extracted table.

use crate::charts::ChartPlotter;
use crate::data::Dataset;
use crate::pipeline::{Analysis, TableReport};
use crate::stats::TrendSummary;
use egui::{Color32, RichText, ScrollArea};

/// Rows rendered per table grid; larger tables are still exported whole.
const MAX_VISIBLE_ROWS: usize = 500;
const CARD_SPACING: f32 = 15.0;

/// Actions triggered from a table card.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerAction {
    None,
    /// Save the export of the report at this position.
    SaveCsv(usize),
}

/// Scrollable list of table cards.
#[derive(Default)]
pub struct ReportViewer {
    pub reports: Vec<TableReport>,
}

impl ReportViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }

    pub fn set_reports(&mut self, reports: Vec<TableReport>) {
        self.reports = reports;
    }

    /// Draw every report card.
    pub fn show(&self, ui: &mut egui::Ui) -> ViewerAction {
        let mut action = ViewerAction::None;

        if self.reports.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return action;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (pos, report) in self.reports.iter().enumerate() {
                    if Self::draw_card(ui, report) {
                        action = ViewerAction::SaveCsv(pos);
                    }
                    ui.add_space(CARD_SPACING);
                }
            });

        action
    }

    /// Draw one card; returns true when its save button was clicked.
    fn draw_card(ui: &mut egui::Ui, report: &TableReport) -> bool {
        let mut save_clicked = false;
        let border_color = match &report.analysis {
            Analysis::Completed(summary) => ChartPlotter::signal_color(summary),
            Analysis::Skipped(_) => Color32::from_rgb(243, 156, 18),
        };

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, border_color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("Table {}", report.index + 1))
                            .size(18.0)
                            .strong(),
                    );
                    ui.label(
                        RichText::new(format!(
                            "{} rows × {} columns",
                            report.dataset.row_count(),
                            report.dataset.column_count()
                        ))
                        .color(Color32::GRAY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(format!("💾 Save {}", report.export.file_name))
                            .clicked()
                        {
                            save_clicked = true;
                        }
                    });
                });

                ui.add_space(8.0);
                Self::draw_table(ui, report.index, &report.dataset);
                ui.add_space(10.0);

                match &report.analysis {
                    Analysis::Completed(summary) => {
                        Self::draw_summary(ui, summary);
                        ui.add_space(8.0);
                        ChartPlotter::draw_trend_chart(ui, &report.index.to_string(), summary);
                    }
                    Analysis::Skipped(err) => {
                        ui.label(
                            RichText::new(format!("Trend analysis skipped. {}", err.user_message()))
                                .color(Color32::from_rgb(243, 156, 18)),
                        );
                    }
                }
            });

        save_clicked
    }

    fn draw_table(ui: &mut egui::Ui, index: usize, dataset: &Dataset) {
        ScrollArea::both()
            .id_salt(format!("table_scroll_{}", index))
            .max_height(320.0)
            .show(ui, |ui| {
                egui::Grid::new(format!("table_grid_{}", index))
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for column in dataset.columns() {
                            ui.label(RichText::new(&column.name).strong())
                                .on_hover_text(column.kind.to_string());
                        }
                        ui.end_row();

                        for row in dataset.rows().iter().take(MAX_VISIBLE_ROWS) {
                            for value in row {
                                ui.label(value.to_string());
                            }
                            ui.end_row();
                        }
                    });
            });

        if dataset.row_count() > MAX_VISIBLE_ROWS {
            ui.label(
                RichText::new(format!(
                    "Showing the first {} of {} rows. The CSV export contains all rows.",
                    MAX_VISIBLE_ROWS,
                    dataset.row_count()
                ))
                .size(11.0)
                .color(Color32::GRAY),
            );
        }
    }

    fn draw_summary(ui: &mut egui::Ui, summary: &TrendSummary) {
        let fmt = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".into());

        ui.label(RichText::new("Trend Summary").size(14.0).strong());
        ui.label(format!(
            "A {}-row simple moving average of '{}' was calculated.",
            summary.window, summary.column
        ));
        ui.label(format!("Latest {}: {}", summary.column, fmt(summary.latest_value)));
        ui.label(format!(
            "Latest {}: {}",
            summary.average_column_name(),
            fmt(summary.latest_average)
        ));
        ui.label(
            RichText::new(format!("Conclusion: {}", summary.signal.conclusion()))
                .strong()
                .color(ChartPlotter::signal_color(summary)),
        );
    }
}
