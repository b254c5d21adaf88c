// src/app.rs
use eframe::egui;
use rfd::FileDialog;
use std::time::Instant;
use tracing::info;

use crate::config::Settings;
use crate::file::ExportFormat;
use crate::state::AppState;
use crate::ui::{header, input, results, theme, UiAction};

pub struct SilverApp {
    state: AppState,
}

impl SilverApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        theme::apply_retro_style(&cc.egui_ctx);
        Self {
            state: AppState::new(settings),
        }
    }

    fn apply(&mut self, action: UiAction, now: Instant) {
        match action {
            UiAction::Analyze => self.state.analyze(now),
            UiAction::ClearInput => self.state.clear_input(),
            UiAction::Retry(key) => self.state.retry(key, now),
            UiAction::ToggleSpotCheck(key) => self.state.toggle_spot_check(key),
            UiAction::Export(format) => self.export(format),
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let mut file_dialog = FileDialog::new()
            .add_filter(format.filter_name(), &[format.extension()])
            .set_file_name(format.file_name())
            .set_title("Export Results");

        if let Some(dir) = self.state.exporter.export_dir() {
            file_dialog = file_dialog.set_directory(dir);
        }

        if let Some(path) = file_dialog.save_file() {
            match self.state.export_to(format, &path) {
                Ok(written) => info!(path = %written.display(), ?format, "Export saved"),
                Err(e) => {
                    self.state.error_message = Some(format!("Error exporting results: {}", e));
                }
            }
        }
    }
}

impl eframe::App for SilverApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if let Some(due) = self.state.tick(now) {
            ctx.request_repaint_after(due.saturating_duration_since(now));
        }

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
            header::show_header(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("main_scroll")
                .show(ui, |ui| {
                    input::show_input_view(ui, &mut self.state, &mut actions);
                    results::show_results_view(ui, &mut self.state, &mut actions);
                });
        });

        for action in actions {
            self.apply(action, now);
        }

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }
}
