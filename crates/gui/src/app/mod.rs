//! Main application module

mod keyboard;
mod menus;
pub mod styles;

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use crate::ai::{AiError, GeminiClient, GeminiConfig};
use crate::i18n::set_lang;
use crate::state::settings::{AiSettings, AppSettings};
use crate::state::AppState;
use crate::ui::{ai_panel, controls, header, status_bar, step_overlay};
use crate::viewport::ViewportPanel;

pub use menus::revision_name;

/// Main application
pub struct SolarApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Runs AI requests off the UI thread
    runtime: tokio::runtime::Runtime,
    backend: Result<Arc<GeminiClient>, AiError>,
    /// AI settings the backend was built from
    backend_settings: AiSettings,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// Last assembly version mirrored into the settings
    last_assembly_version: u64,
    last_saved_settings: AppSettings,
}

fn build_backend(settings: &AiSettings) -> Result<Arc<GeminiClient>, AiError> {
    let config = GeminiConfig::from_settings(settings)?;
    tracing::info!("Gemini backend ready ({})", config.base_url);
    Ok(Arc::new(GeminiClient::new(config)))
}

impl SolarApp {
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: tokio::runtime::Runtime) -> Self {
        let state = AppState::default();

        set_lang(state.settings.ui.language);
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let backend = build_backend(&state.settings.ai);
        if let Err(e) = &backend {
            tracing::warn!("AI studio disabled until configured: {e}");
        }

        Self {
            viewport: ViewportPanel::new(&cc.egui_ctx),
            runtime,
            backend,
            backend_settings: state.settings.ai.clone(),
            last_font_size: state.settings.ui.font_size,
            last_assembly_version: state.assembly.version(),
            last_saved_settings: state.settings.clone(),
            state,
        }
    }

    /// Mirror state into settings, rebuild what depends on them, save on change
    fn sync_settings(&mut self, ctx: &egui::Context) {
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        let version = self.state.assembly.version();
        if version != self.last_assembly_version {
            self.state.settings.assembly.revision = self.state.assembly.revision();
            self.state.settings.assembly.model = self.state.assembly.model();
            self.last_assembly_version = version;
        }

        if self.state.settings.ai != self.backend_settings {
            self.backend = build_backend(&self.state.settings.ai);
            self.backend_settings = self.state.settings.ai.clone();
        }

        if self.state.settings != self.last_saved_settings {
            self.state.settings.save();
            self.last_saved_settings = self.state.settings.clone();
        }
    }

    fn submit_ai_task(&mut self) {
        let handle = self.runtime.handle().clone();
        let result = match &self.backend {
            Ok(backend) => self.state.ai.submit(&handle, Arc::clone(backend)).map(|_| ()),
            Err(e) => {
                self.state.ai.reject(e);
                Ok(())
            }
        };
        match result {
            Err(e) if e.is_validation() => tracing::debug!("AI submission refused: {e}"),
            Err(e) => tracing::warn!("AI submission failed: {e}"),
            Ok(()) => {}
        }
    }
}

impl eframe::App for SolarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_settings(ctx);

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        self.state.ai.poll_responses();
        for uri in self.state.ai.take_retired_images() {
            ctx.forget_image(&uri);
        }

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui);
                menus::assembly_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Header: title, revision, model, AI toggle ───────
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 10)))
            .show(ctx, |ui| {
                header::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)))
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Step controls ────────────────────────────────────
        egui::TopBottomPanel::bottom("controls")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 10)))
            .show(ctx, |ui| {
                controls::show(ui, &mut self.state);
            });

        // ── Right panel: AI studio ───────────────────────────
        if self.state.panels.ai_studio {
            let mut submit = false;
            egui::SidePanel::right("ai_studio")
                .default_width(380.0)
                .width_range(300.0..=560.0)
                .resizable(true)
                .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(12)))
                .show(ctx, |ui| {
                    submit = ai_panel::show(ui, &mut self.state);
                });
            if submit {
                self.submit_ai_task();
            }
        }

        // ── Central panel: 3D viewport + step card ───────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = self.viewport.show(ui, &self.state);
                if self.state.panels.step_info {
                    step_overlay::show(ui, rect, &self.state);
                }
            });

        if self.viewport.is_animating(&self.state) || self.state.settings.viewport.idle_sway {
            ctx.request_repaint();
        } else if self.state.ai.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }
}
