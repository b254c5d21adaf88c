// src/ui/theme.rs
//! Retro "8-bit" skin: monospace type, square corners, heavy outlines.

use eframe::egui::{self, Color32, FontFamily, FontId, Rounding, Stroke, TextStyle};

use crate::analysis::CardTone;

pub const INK: Color32 = Color32::from_rgb(20, 20, 28);
pub const PAPER: Color32 = Color32::from_rgb(244, 240, 226);
pub const ACCENT: Color32 = Color32::from_rgb(62, 110, 200);
pub const SPOT_HIGHLIGHT: Color32 = Color32::from_rgb(0xff, 0xe0, 0x66);
pub const FAILED: Color32 = Color32::from_rgb(200, 48, 48);
pub const WARNING: Color32 = Color32::from_rgb(214, 140, 20);

const OUTLINE: f32 = 2.0;

pub fn apply_retro_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.text_styles = [
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Monospace)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Small, FontId::new(11.0, FontFamily::Monospace)),
    ]
    .into();

    let visuals = &mut style.visuals;
    visuals.dark_mode = false;
    visuals.panel_fill = PAPER;
    visuals.window_fill = PAPER;
    visuals.extreme_bg_color = Color32::WHITE;
    visuals.override_text_color = Some(INK);
    visuals.window_rounding = Rounding::same(0.0);
    visuals.window_stroke = Stroke::new(OUTLINE, INK);
    visuals.selection.bg_fill = ACCENT;

    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        widget.rounding = Rounding::same(0.0);
        widget.bg_stroke = Stroke::new(OUTLINE, INK);
    }
    visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(226, 220, 200);
    visuals.widgets.hovered.weak_bg_fill = Color32::from_rgb(210, 224, 246);

    ctx.set_style(style);
}

/// Outline colour for a result card.
pub fn tone_stroke(tone: CardTone) -> Stroke {
    match tone {
        CardTone::Normal => Stroke::new(OUTLINE, INK),
        CardTone::LowConfidence => Stroke::new(OUTLINE + 1.0, WARNING),
        CardTone::Failed => Stroke::new(OUTLINE + 1.0, FAILED),
    }
}

/// Card used for the input and results sections.
pub fn bit_card() -> egui::Frame {
    egui::Frame::none()
        .fill(Color32::WHITE)
        .stroke(Stroke::new(OUTLINE + 1.0, INK))
        .inner_margin(egui::Margin::same(12.0))
        .outer_margin(egui::Margin::symmetric(0.0, 6.0))
}

/// Window of `width` chars into `text` repeated endlessly, starting at `offset`.
pub fn marquee_frame(text: &str, offset: usize, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    (0..width)
        .map(|i| chars[(offset + i) % chars.len()])
        .collect()
}
