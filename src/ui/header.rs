// src/ui/header.rs
use eframe::egui;
use std::time::Duration;

use super::theme;

pub const TITLE: &str = "SILVER - RustSec Analyzer";
pub const MARQUEE: &str =
    "Automated Call Chain Visualization • LLM + Static Analysis • High Confidence • 8bit UI • ";

const MARQUEE_CHARS_PER_SEC: f64 = 8.0;
const MARQUEE_WIDTH: usize = 64;

pub fn show_header(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(8.0);
        ui.heading(egui::RichText::new(TITLE).strong().color(theme::ACCENT));

        let time = ui.input(|i| i.time);
        let offset = (time * MARQUEE_CHARS_PER_SEC) as usize;
        ui.label(
            egui::RichText::new(theme::marquee_frame(MARQUEE, offset, MARQUEE_WIDTH))
                .monospace()
                .color(theme::INK),
        );
        ui.add_space(4.0);
    });

    ui.ctx().request_repaint_after(Duration::from_millis(125));
}
