use egui::{RichText, Ui};
use shared::AssemblyRevision;

use crate::app::revision_name;
use crate::app::styles::ACCENT;
use crate::i18n::t;
use crate::state::AppState;

/// Title block on the left, revision/model/AI controls on the right
pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new("SolarFrame Pro").size(20.0).strong());
            ui.label(
                RichText::new(format!(
                    "{} {}",
                    t("app.subtitle"),
                    state.assembly.revision().version_label()
                ))
                .small()
                .weak(),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let ai_open = state.panels.ai_studio;
            let ai_button = egui::Button::new(RichText::new(t("ai.title")).color(if ai_open {
                egui::Color32::WHITE
            } else {
                ACCENT
            }))
            .fill(if ai_open { ACCENT } else { egui::Color32::TRANSPARENT })
            .stroke(egui::Stroke::new(1.0, ACCENT));
            if ui.add(ai_button).clicked() {
                state.panels.ai_studio = !ai_open;
            }

            ui.separator();

            let model = state.assembly.model();
            if ui
                .button(model.display_name())
                .on_hover_text(format!("{}: {}", t("status.model"), model.toggled().display_name()))
                .clicked()
            {
                state.assembly.toggle_variant();
            }

            ui.separator();

            // right_to_left lays out in reverse
            for revision in AssemblyRevision::all().iter().rev() {
                let selected = state.assembly.revision() == *revision;
                if ui
                    .selectable_label(selected, revision_name(*revision))
                    .on_hover_text(revision.version_label())
                    .clicked()
                    && !selected
                {
                    state.assembly.set_revision(*revision);
                }
            }
            ui.weak(format!("{}:", t("app.revision")));
        });
    });
}
