// src/ui/results.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

use crate::analysis::{AnalysisRecord, AnalysisStatus, ConfidenceBand};
use crate::file::ExportFormat;
use crate::state::{AppState, BandSummary, CategoryFilter};
use super::{theme, UiAction};

pub const EMPTY_TIP: &str = "No results yet. Please input RustSec IDs and click Analyze.";
pub const REVIEW_WARNING: &str = "Low confidence, needs manual review.";

pub fn show_results_view(ui: &mut egui::Ui, state: &mut AppState, actions: &mut Vec<UiAction>) {
    theme::bit_card().show(ui, |ui| {
        ui.set_width(ui.available_width());

        show_toolbar(ui, state, actions);
        ui.add_space(8.0);

        let visible = state.visible_records();
        ui.horizontal(|ui| {
            ui.heading(format!("Results ({})", visible.len()));
            if let Some(submitted) = state.results.last_submitted() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!("Last run: {}", submitted.format("%H:%M:%S")));
                });
            }
        });

        if let Some(status) = &state.status_message {
            ui.small(status);
        }

        if visible.is_empty() {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(EMPTY_TIP).italics());
            return;
        }

        let summary = state.summary();
        if summary.total() > summary.pending {
            show_summary_chart(ui, &summary);
        }

        // Outer panel scrolls
        for record in visible {
            show_result_card(ui, record, actions);
            ui.add_space(4.0);
        }
    });
}

fn show_toolbar(ui: &mut egui::Ui, state: &mut AppState, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.label("Filter:");
        egui::ComboBox::from_id_source("results_filter")
            .selected_text(state.filter.label())
            .show_ui(ui, |ui| {
                for filter in CategoryFilter::ALL {
                    ui.selectable_value(&mut state.filter, filter, filter.label());
                }
            });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            // Right-to-left, so the last button is added first
            if ui.small_button("Export TXT").clicked() {
                actions.push(UiAction::Export(ExportFormat::Txt));
            }
            if ui.small_button("Export JSON").clicked() {
                actions.push(UiAction::Export(ExportFormat::Json));
            }
            ui.add(
                egui::TextEdit::singleline(&mut state.search_term)
                    .hint_text("Search results...")
                    .desired_width(200.0),
            );
        });
    });
}

fn show_result_card(ui: &mut egui::Ui, record: &AnalysisRecord, actions: &mut Vec<UiAction>) {
    egui::Frame::none()
        .stroke(theme::tone_stroke(record.tone()))
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(record.status.icon()).on_hover_text(record.status.to_string());
                ui.label(egui::RichText::new(&record.id).strong());
                if let Some(confidence) = record.display_confidence() {
                    ui.label(format!("Confidence: {}", confidence));
                }
            });

            egui::CollapsingHeader::new("Call chain")
                .id_source(("call_chain", record.key.0))
                .default_open(true)
                .show(ui, |ui| {
                    if record.status == AnalysisStatus::Analyzing {
                        ui.spinner();
                    } else {
                        ui.label(&record.chain);
                    }
                });

            if record.needs_review() {
                ui.colored_label(theme::WARNING, REVIEW_WARNING);
            }

            ui.horizontal(|ui| {
                if record.status == AnalysisStatus::Failed && ui.small_button("Retry").clicked() {
                    actions.push(UiAction::Retry(record.key));
                }

                let mut spot = egui::Button::new(record.spot_check_label()).small();
                if record.spot_check {
                    spot = spot.fill(theme::SPOT_HIGHLIGHT);
                }
                if ui.add(spot).clicked() {
                    actions.push(UiAction::ToggleSpotCheck(record.key));
                }
            });
        });
}

fn show_summary_chart(ui: &mut egui::Ui, summary: &BandSummary) {
    let columns = [
        ("Failed", summary.failed, theme::FAILED),
        (ConfidenceBand::Low.label(), summary.low, theme::WARNING),
        (ConfidenceBand::Medium.label(), summary.medium, theme::ACCENT),
        (ConfidenceBand::High.label(), summary.high, egui::Color32::from_rgb(60, 160, 90)),
    ];

    let bars: Vec<Bar> = columns.iter()
        .enumerate()
        .map(|(i, (name, count, color))| {
            Bar::new(i as f64, *count as f64)
                .name(*name)
                .width(0.6)
                .fill(*color)
        })
        .collect();

    Plot::new("confidence_summary")
        .height(110.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_background(false)
        .show_axes([false, true])
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
