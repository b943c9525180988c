//! Card describing the current step, pinned to the viewport corner

use egui::{Rect, RichText, Ui};

use crate::app::styles::ACCENT;
use crate::i18n::{step_description, step_label, t};
use crate::state::AppState;

const CARD_WIDTH: f32 = 300.0;

pub fn show(ui: &mut Ui, viewport: Rect, state: &AppState) {
    let assembly = &state.assembly;
    let revision = assembly.revision();
    let step = assembly.step();

    egui::Area::new(egui::Id::new("step_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(viewport.min + egui::vec2(16.0, 16.0))
        .interactable(false)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style())
                .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 230))
                .inner_margin(egui::Margin::same(14))
                .show(ui, |ui| {
                    ui.set_width(CARD_WIDTH);
                    ui.label(
                        RichText::new(format!("{} {:02}", t("step.part"), assembly.ordinal() + 1))
                            .small()
                            .strong()
                            .color(ACCENT),
                    );
                    ui.label(RichText::new(step_label(revision, step, assembly.model())).heading().strong());
                    ui.add_space(4.0);
                    ui.label(RichText::new(step_description(revision, step)).weak());
                });
        });
}
