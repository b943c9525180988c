use egui::Ui;

use crate::app::revision_name;
use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    let assembly = &state.assembly;
    ui.horizontal(|ui| {
        ui.weak(format!(
            "{}: {}/{}",
            t("status.step"),
            assembly.ordinal() + 1,
            assembly.revision().len()
        ));

        ui.separator();
        ui.weak(format!("{}: {}", t("status.model"), assembly.model().display_name()));

        ui.separator();
        ui.weak(format!(
            "{}: {} {}",
            t("app.revision"),
            revision_name(assembly.revision()),
            assembly.revision().version_label()
        ));

        ui.separator();
        if state.ai.is_pending() {
            ui.colored_label(egui::Color32::from_rgb(217, 119, 6), t("status.ai_busy"));
        } else {
            ui.weak(t("status.ai_idle"));
        }

        // Right-aligned product name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("SolarFrame Pro");
        });
    });
}
