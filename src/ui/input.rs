// src/ui/input.rs
use eframe::egui;

use crate::state::AppState;
use super::{theme, UiAction};

pub fn show_input_view(ui: &mut egui::Ui, state: &mut AppState, actions: &mut Vec<UiAction>) {
    theme::bit_card().show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.label(egui::RichText::new("Enter RustSec IDs (comma, space or newline separated):").strong());
        ui.add_space(4.0);
        ui.add(
            egui::TextEdit::multiline(&mut state.input)
                .id_source("rustsec-input")
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text("e.g. RUSTSEC-2022-0001, RUSTSEC-2023-0010"),
        );

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let analyze_label = if state.results.is_in_flight() { "Analyzing..." } else { "Analyze" };
            if ui.add_enabled(state.can_analyze(), egui::Button::new(analyze_label)).clicked() {
                actions.push(UiAction::Analyze);
            }
            if ui.add_enabled(state.can_clear(), egui::Button::new("Clear")).clicked() {
                actions.push(UiAction::ClearInput);
            }
        });
    });
}
