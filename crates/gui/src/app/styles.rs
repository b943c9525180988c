//! Application style configuration

use eframe::egui;

/// Accent used for the active step and primary buttons
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
/// Fill of the advance button once the assembly is complete
pub const COMPLETE: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);

/// Configure initial application styles with given font size
pub fn configure_styles(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();

    // Light studio theme
    style.visuals = egui::Visuals::light();

    style.visuals.window_corner_radius = egui::CornerRadius::same(10);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    style.spacing.menu_margin = egui::Margin::same(6);

    style.visuals.panel_fill = egui::Color32::from_rgb(243, 244, 246);
    style.visuals.window_fill = egui::Color32::from_rgb(249, 250, 251);
    style.visuals.selection.bg_fill = ACCENT;

    apply_text_styles(&mut style, font_size);

    ctx.set_style(style);
}

/// Apply font size to all text styles
pub fn apply_font_size(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    use egui::{FontId, TextStyle};
    for (text_style, font) in [
        (TextStyle::Body, FontId::proportional(font_size)),
        (TextStyle::Button, FontId::proportional(font_size)),
        (TextStyle::Small, FontId::proportional(font_size * 0.8)),
        (TextStyle::Heading, FontId::proportional(font_size * 1.6)),
        (TextStyle::Monospace, FontId::monospace(font_size)),
    ] {
        style.text_styles.insert(text_style, font);
    }
}
