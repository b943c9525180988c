use egui::{RichText, Ui};
use shared::{AiArtifact, AiMode};

use crate::app::styles::ACCENT;
use crate::i18n::{mode_description, mode_label, t};
use crate::state::AppState;

/// AI studio side panel. Returns true when the user asked to run the task.
pub fn show(ui: &mut Ui, state: &mut AppState) -> bool {
    // Header with close button
    ui.horizontal(|ui| {
        ui.heading(t("ai.title"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("✕").clicked() {
                state.panels.ai_studio = false;
            }
        });
    });
    ui.separator();

    let mut submit = false;
    egui::ScrollArea::vertical()
        .id_salt("ai_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            show_mode_tabs(ui, state);
            ui.add_space(8.0);

            if state.ai.mode.accepts_reference_image() {
                show_reference_picker(ui, state);
                ui.add_space(8.0);
            }

            submit = show_prompt(ui, state);
            ui.add_space(8.0);

            show_outcome(ui, state);
        });
    submit
}

fn show_mode_tabs(ui: &mut Ui, state: &mut AppState) {
    let pending = state.ai.is_pending();
    ui.horizontal_wrapped(|ui| {
        for mode in AiMode::all() {
            let tab = ui.add_enabled(
                !pending,
                egui::SelectableLabel::new(state.ai.mode == *mode, mode_label(*mode)),
            );
            if tab.clicked() {
                state.ai.mode = *mode;
            }
        }
    });
    ui.add_space(4.0);
    ui.weak(mode_description(state.ai.mode));
}

fn show_reference_picker(ui: &mut Ui, state: &mut AppState) {
    ui.label(RichText::new(t("ai.reference")).small().strong());
    let pending = state.ai.is_pending();
    ui.horizontal(|ui| {
        if ui.add_enabled(!pending, egui::Button::new(t("ai.choose_file"))).clicked() {
            let picked = rfd::FileDialog::new()
                .set_title(t("ai.pick_title"))
                .add_filter("Image", &["png", "jpg", "jpeg", "webp"])
                .pick_file();
            if let Some(path) = picked {
                // Failure lands in the panel's error frame
                let _ = state.ai.load_reference_image(&path);
            }
        }

        match &state.ai.reference_image {
            Some(image) => {
                ui.label(&image.file_name);
                if ui.small_button(t("ai.remove_file")).clicked() {
                    state.ai.clear_reference_image();
                }
            }
            None => {
                ui.weak(t("ai.no_file"));
            }
        }
    });
}

/// Prompt field and run button. Returns true on click.
fn show_prompt(ui: &mut Ui, state: &mut AppState) -> bool {
    ui.label(RichText::new(t("ai.prompt")).small().strong());
    let hint = if state.ai.mode == AiMode::Analyze {
        t("ai.prompt_hint_analyze")
    } else {
        t("ai.prompt_hint")
    };
    ui.add(
        egui::TextEdit::multiline(&mut state.ai.prompt)
            .hint_text(hint)
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);

    let pending = state.ai.is_pending();
    let mut clicked = false;
    ui.horizontal(|ui| {
        let label = if pending { t("ai.generating") } else { t("ai.submit") };
        let button = egui::Button::new(RichText::new(label).strong().color(egui::Color32::WHITE))
            .fill(ACCENT)
            .min_size(egui::vec2(ui.available_width().min(240.0), 32.0));
        clicked = ui.add_enabled(!pending, button).clicked();
        if pending {
            ui.spinner();
        }
    });
    clicked
}

fn show_outcome(ui: &mut Ui, state: &AppState) {
    if let Some(message) = state.ai.error() {
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(254, 226, 226))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.colored_label(egui::Color32::from_rgb(185, 28, 28), message);
            });
        return;
    }

    let Some(result) = state.ai.result() else {
        return;
    };

    ui.separator();
    ui.label(RichText::new(t("ai.result")).strong());
    ui.add_space(4.0);

    match &result.artifact {
        AiArtifact::VideoUrl(url) => {
            ui.hyperlink_to(t("ai.open_video"), url);
        }
        AiArtifact::ImageDataUri(_) => {
            if let Some(image) = state.ai.result_image() {
                ui.add(
                    egui::Image::from_bytes(image.uri.clone(), egui::load::Bytes::Shared(image.bytes.clone()))
                        .max_width(ui.available_width())
                        .corner_radius(6),
                );
            }
        }
        AiArtifact::Text(text) => {
            egui::Frame::NONE
                .fill(egui::Color32::WHITE)
                .corner_radius(egui::CornerRadius::same(6))
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.add(egui::Label::new(text).wrap());
                });
        }
    }
}
