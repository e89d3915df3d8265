//! Dashboard Application
//! Main window wiring the control panel, report builder and chart grid.

use crate::charts::StaticChartRenderer;
use crate::config::AppConfig;
use crate::data::{self, SalesData};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::report::{self, Selection};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use tracing::{error, info, warn};

/// Dataset loading result from the background thread
enum LoadResult {
    Progress(String),
    Complete(SalesData),
    Error(String),
}

/// Report build result from the background thread
enum ReportResult {
    Complete(Vec<crate::charts::Figure>),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: AppConfig,
    data: Option<SalesData>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    report_rx: Option<Receiver<ReportResult>>,
    is_building: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.csv_path = config.csv_path.clone();

        let mut app = Self {
            config,
            data: None,
            control_panel,
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
            report_rx: None,
            is_building: false,
        };
        // The table is loaded once at startup
        app.start_load();
        app
    }

    /// Kick off the dataset load on a background thread.
    fn start_load(&mut self) {
        if self.is_loading {
            return;
        }

        self.chart_viewer.clear();
        self.control_panel.export_enabled = false;
        self.control_panel.set_progress(5.0, "Loading dataset...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let url = self.config.data_url.clone();
        let csv_path = self.control_panel.csv_path.clone();

        thread::spawn(move || {
            match Self::load_data(csv_path, &url, &tx) {
                Ok(data) => {
                    let _ = tx.send(LoadResult::Complete(data));
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(format!("{e:#}")));
                }
            }
        });
    }

    /// Load the dataset from the local override or the configured URL.
    fn load_data(
        csv_path: Option<std::path::PathBuf>,
        url: &str,
        tx: &Sender<LoadResult>,
    ) -> anyhow::Result<SalesData> {
        match csv_path {
            Some(path) => {
                let _ = tx.send(LoadResult::Progress(format!(
                    "Reading {}...",
                    path.display()
                )));
                Ok(SalesData::from_csv_path(&path)?)
            }
            None => {
                let _ = tx.send(LoadResult::Progress("Downloading dataset...".to_string()));
                let bytes = data::download_csv(url)?;
                Ok(SalesData::from_csv_bytes(bytes)?)
            }
        }
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(20.0, &status);
                    }
                    LoadResult::Complete(data) => {
                        info!(rows = data.row_count(), "dataset loaded");
                        self.control_panel
                            .set_progress(60.0, &format!("Loaded {} rows", data.row_count()));
                        self.data = Some(data);
                        self.is_loading = false;
                        should_keep_receiver = false;
                        self.start_report_build();
                    }
                    LoadResult::Error(e) => {
                        error!(error = %e, "dataset load failed");
                        self.control_panel.set_progress(0.0, &format!("Error: {}", e));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Rebuild the report for the current selection on a background thread.
    fn start_report_build(&mut self) {
        let Some(data) = &self.data else {
            self.chart_viewer.clear();
            return;
        };

        let df = data.frame().clone();
        let selection: Selection = self.control_panel.selection;

        let (tx, rx) = channel();
        self.report_rx = Some(rx);
        self.is_building = true;
        self.control_panel.set_progress(80.0, "Building report...");

        thread::spawn(move || match report::build_report(&df, selection) {
            Ok(figures) => {
                let _ = tx.send(ReportResult::Complete(figures));
            }
            Err(e) => {
                let _ = tx.send(ReportResult::Error(e.to_string()));
            }
        });
    }

    /// Check for report build results
    fn check_report_results(&mut self) {
        let rx = self.report_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    ReportResult::Complete(figures) => {
                        let count = figures.len();
                        self.control_panel.export_enabled = count > 0;
                        self.chart_viewer.set_figures(figures);
                        if count > 0 {
                            self.control_panel
                                .set_progress(100.0, &format!("Report ready ({} charts)", count));
                        } else {
                            self.control_panel
                                .set_progress(100.0, "Nothing to chart for this selection");
                        }
                        self.is_building = false;
                        should_keep_receiver = false;
                    }
                    ReportResult::Error(e) => {
                        error!(error = %e, "report build failed");
                        self.control_panel.set_progress(0.0, &format!("Error: {}", e));
                        self.chart_viewer.clear();
                        self.control_panel.export_enabled = false;
                        self.is_building = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.report_rx = Some(rx);
            }
        }
    }

    /// Swap the dataset for a local CSV picked by the user.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.csv_path = Some(path);
            self.start_load();
        }
    }

    /// Render the current report into a PNG chosen by the user.
    fn handle_export_png(&mut self) {
        if self.chart_viewer.figures().is_empty() {
            self.control_panel.set_progress(0.0, "No charts to export");
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("sales_report.png")
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::render_report_png(
            self.chart_viewer.figures(),
            &path,
            self.config.export_width,
            self.config.export_height,
        ) {
            Ok(()) => {
                info!(path = %path.display(), "report exported");
                self.control_panel
                    .set_progress(100.0, &format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    warn!(error = %e, "could not open exported report");
                }
            }
            Err(e) => {
                error!(error = %e, "report export failed");
                self.control_panel.set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.check_report_results();

        // Request repaint while loading or building
        if self.is_loading || self.is_building {
            ctx.request_repaint();
        }

        // Left panel - controls
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::SelectionChanged => self.start_report_build(),
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Reload => self.start_load(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - chart grid
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Automobile Sales Statistics Dashboard");
            });
            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);
            self.chart_viewer.show(ui);
        });
    }
}
