use egui::Ui;

use crate::app::styles::{ACCENT, COMPLETE};
use crate::i18n::t;
use crate::state::AppState;

const BUTTON_SIZE: egui::Vec2 = egui::vec2(180.0, 36.0);

/// Reset and next-step buttons, centred under the viewport
pub fn show(ui: &mut Ui, state: &mut AppState) {
    let complete = state.assembly.is_complete();
    let spacing = ui.spacing().item_spacing.x;
    let total = BUTTON_SIZE.x * 2.0 + spacing;

    ui.horizontal(|ui| {
        ui.add_space(((ui.available_width() - total) * 0.5).max(0.0));

        let reset = egui::Button::new(t("step.reset")).min_size(BUTTON_SIZE);
        if ui.add(reset).clicked() {
            state.assembly.reset();
        }

        let (label, fill) = if complete {
            (t("step.complete"), COMPLETE)
        } else {
            (t("step.next"), ACCENT)
        };
        let next = egui::Button::new(egui::RichText::new(label).strong().color(egui::Color32::WHITE))
            .fill(fill)
            .min_size(BUTTON_SIZE);
        if ui.add_enabled(!complete, next).clicked() {
            state.assembly.advance();
        }
    });
}
