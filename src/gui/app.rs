//! Chart Table Main Application
//! Main window with control panel and report viewer.

use crate::error::DataError;
use crate::gui::control_panel::file_label;
use crate::gui::{ControlPanel, ControlPanelAction, ReportViewer, ViewerAction};
use crate::pipeline::{Pipeline, Source, TableReport};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// Pipeline result from the background thread
enum RunResult {
    Complete(Vec<TableReport>),
    Error(DataError),
}

/// Main application window.
pub struct ChartTableApp {
    pipeline: Arc<Pipeline>,
    control_panel: ControlPanel,
    report_viewer: ReportViewer,

    // Async pipeline run
    run_rx: Option<Receiver<RunResult>>,
    is_running: bool,
}

impl ChartTableApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            control_panel: ControlPanel::new(),
            report_viewer: ReportViewer::new(),
            run_rx: None,
            is_running: false,
        }
    }

    /// Run the pipeline for `source` on a background thread.
    fn start_run(&mut self, source: Source) {
        if self.is_running {
            return; // One action at a time
        }

        self.report_viewer.clear();
        self.control_panel.set_status(match &source {
            Source::CsvText(_) => "Parsing data...".to_string(),
            Source::CsvFile(path) => format!("Loading {}...", file_label(path)),
            Source::Url(url) => format!("Fetching and parsing tables from {}...", url),
        });
        self.is_running = true;

        let (tx, rx) = channel();
        self.run_rx = Some(rx);
        let pipeline = Arc::clone(&self.pipeline);

        thread::spawn(move || {
            let result = match pipeline.run(&source) {
                Ok(reports) => RunResult::Complete(reports),
                Err(e) => RunResult::Error(e),
            };
            let _ = tx.send(result);
        });
    }

    /// Handle the run button
    fn handle_run(&mut self) {
        match self.control_panel.source() {
            Some(source) => self.start_run(source),
            None => self
                .control_panel
                .set_error("Please paste some data or enter a URL first."),
        }
    }

    /// Handle CSV file selection
    fn handle_open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_run(Source::CsvFile(path));
        }
    }

    /// Check for pipeline results
    fn check_run_results(&mut self) {
        // Take the receiver temporarily to avoid borrow issues
        let Some(rx) = self.run_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(RunResult::Complete(reports)) => {
                let status = if reports.is_empty() {
                    "No HTML tables found on this page.".to_string()
                } else {
                    format!("Complete! {} table(s) ready", reports.len())
                };
                self.report_viewer.set_reports(reports);
                self.control_panel.set_status(status);
                self.finish_run();
            }
            Ok(RunResult::Error(e)) => {
                error!(error = %e, "action failed");
                self.control_panel.set_error(format!("Error: {}", e.user_message()));
                self.finish_run();
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                // Put receiver back if still needed
                self.run_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel.set_error("Error: background task stopped unexpectedly");
                self.finish_run();
            }
        }
    }

    fn finish_run(&mut self) {
        self.is_running = false;
    }

    /// Save one table's CSV export
    fn handle_save_csv(&mut self, pos: usize) {
        let Some(report) = self.report_viewer.reports.get(pos) else {
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&report.export.file_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match report.export.write_to(&output_path) {
            Ok(()) => {
                info!(path = %output_path.display(), "table exported");
                self.control_panel
                    .set_status(format!("Saved {}", file_label(&output_path)));
            }
            Err(e) => {
                self.control_panel
                    .set_error(format!("Error: {}", e.user_message()));
            }
        }
    }
}

impl eframe::App for ChartTableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_run_results();

        // Request repaint while running
        if self.is_running {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(320.0)
            .max_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, self.is_running) {
                        ControlPanelAction::Run => self.handle_run(),
                        ControlPanelAction::OpenCsv => self.handle_open_csv(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Report Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            if let ViewerAction::SaveCsv(pos) = self.report_viewer.show(ui) {
                self.handle_save_csv(pos);
            }
        });
    }
}
