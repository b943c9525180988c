//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    // Ctrl+I works even while typing a prompt
    if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::I)) {
        state.panels.ai_studio = !state.panels.ai_studio;
    }

    // Don't handle the remaining shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        if i.modifiers.command {
            return;
        }
        // Space / Right arrow: next step
        if i.key_pressed(egui::Key::Space) || i.key_pressed(egui::Key::ArrowRight) {
            state.assembly.advance();
        }
        // R: back to the first step
        if i.key_pressed(egui::Key::R) {
            state.assembly.reset();
        }
        // M: switch phone model
        if i.key_pressed(egui::Key::M) {
            state.assembly.toggle_variant();
        }
        // Home: default camera
        if i.key_pressed(egui::Key::Home) {
            viewport.reset_camera();
        }
    });
}
