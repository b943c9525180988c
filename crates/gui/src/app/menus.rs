//! Application menu bar and settings window

use eframe::egui;
use shared::{AssemblyRevision, PhoneModel};

use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::settings::{AppSettings, POLL_INTERVAL_SECS};
use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the assembly menu
pub fn assembly_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.assembly"), |ui| {
        if ui
            .add_enabled(!state.assembly.is_complete(), egui::Button::new(t("menu.next")))
            .clicked()
        {
            state.assembly.advance();
            ui.close_menu();
        }
        if ui.button(t("menu.reset")).clicked() {
            state.assembly.reset();
            ui.close_menu();
        }
        ui.separator();
        ui.label(t("app.revision"));
        for revision in AssemblyRevision::all() {
            let label = format!("  {} {}", revision_name(*revision), revision.version_label());
            if ui
                .selectable_label(state.assembly.revision() == *revision, label)
                .clicked()
            {
                state.assembly.set_revision(*revision);
                ui.close_menu();
            }
        }
        ui.separator();
        ui.label(t("status.model"));
        for model in PhoneModel::all() {
            if ui
                .selectable_label(state.assembly.model() == *model, format!("  {}", model.display_name()))
                .clicked()
            {
                state.assembly.select_variant(*model);
                ui.close_menu();
            }
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.ai_studio, t("menu.ai_studio"));
        ui.checkbox(&mut state.panels.step_info, t("menu.step_info"));
        ui.checkbox(&mut state.settings.viewport.show_grid, t("menu.grid"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for l in [Lang::Fr, Lang::En] {
                if ui.selectable_label(lang() == l, l.display_name()).clicked() {
                    set_lang(l);
                    state.settings.ui.language = l;
                    ui.close_menu();
                }
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    if ui.button(t("menu.settings")).clicked() {
        state.show_settings_window = true;
    }
}

pub fn revision_name(revision: AssemblyRevision) -> &'static str {
    match revision {
        AssemblyRevision::Classic => t("app.classic"),
        AssemblyRevision::Hybrid => t("app.hybrid"),
    }
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_ui_settings(ui, state);
                show_viewport_settings(ui, state);
                show_ai_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open;
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.interface"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_viewport_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.viewport"));
    ui.horizontal(|ui| {
        ui.label(t("settings.background"));
        let [r, g, b] = state.settings.viewport.background_color;
        let mut color = egui::Color32::from_rgb(r, g, b);
        if ui.color_edit_button_srgba(&mut color).changed() {
            state.settings.viewport.background_color = [color.r(), color.g(), color.b()];
        }
    });
    ui.checkbox(&mut state.settings.viewport.show_grid, t("menu.grid"));
    ui.checkbox(&mut state.settings.viewport.idle_sway, t("settings.idle_sway"));
    ui.add_space(10.0);
}

fn show_ai_settings(ui: &mut egui::Ui, state: &mut AppState) {
    let ai = &mut state.settings.ai;
    ui.heading(t("settings.ai"));
    egui::Grid::new("ai_settings_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label(t("settings.base_url"));
            ui.text_edit_singleline(&mut ai.base_url);
            ui.end_row();

            ui.label(t("settings.key_env"));
            ui.text_edit_singleline(&mut ai.api_key_env);
            ui.end_row();

            ui.label(t("settings.poll"));
            ui.add(egui::DragValue::new(&mut ai.poll_interval_secs).range(POLL_INTERVAL_SECS));
            ui.end_row();
        });

    ui.collapsing(t("settings.models"), |ui| {
        egui::Grid::new("ai_models_grid").num_columns(2).show(ui, |ui| {
            for (mode, model) in [
                (shared::AiMode::Video, &mut ai.video_model),
                (shared::AiMode::Image, &mut ai.image_model),
                (shared::AiMode::Edit, &mut ai.edit_model),
                (shared::AiMode::Analyze, &mut ai.analysis_model),
            ] {
                ui.label(crate::i18n::mode_label(mode));
                ui.text_edit_singleline(model);
                ui.end_row();
            }
        });
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.reset")).clicked() {
            let assembly = state.settings.assembly.clone();
            state.settings = AppSettings {
                assembly,
                ..AppSettings::default()
            };
            set_lang(state.settings.ui.language);
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
