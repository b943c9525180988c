//! 3D viewport panel

mod camera;
mod renderer;

use egui::{Rect, Ui};

use crate::animation::{AssemblyAnimator, Pose};
use crate::i18n::t;
use crate::parts::{self, PartSpec};
use crate::state::AppState;
use crate::textures;
use camera::ArcBallCamera;
use renderer::SurfaceTextures;

/// 3D viewport showing the assembly at the current step
pub struct ViewportPanel {
    camera: ArcBallCamera,
    animator: AssemblyAnimator,
    solar_texture: egui::TextureHandle,
    pcb_texture: egui::TextureHandle,
    /// Input time of the last painted frame
    last_time: f64,
}

impl ViewportPanel {
    pub fn new(ctx: &egui::Context) -> Self {
        let solar_texture =
            ctx.load_texture("solar_cells", textures::solar_texture(), egui::TextureOptions::LINEAR);
        let pcb_texture = ctx.load_texture(
            "circuit_board",
            textures::pcb_texture(&mut rand::thread_rng()),
            egui::TextureOptions::LINEAR,
        );
        Self {
            camera: ArcBallCamera::new(),
            animator: AssemblyAnimator::new(),
            solar_texture,
            pcb_texture,
            last_time: 0.0,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    /// Whether an entrance animation is still running
    pub fn is_animating(&self, state: &AppState) -> bool {
        let catalog = parts::catalog(state.assembly.revision(), state.assembly.model());
        self.animator.is_animating(&catalog, self.last_time)
    }

    /// Paint the viewport into all remaining space and return its rect
    pub fn show(&mut self, ui: &mut Ui, state: &AppState) -> Rect {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        self.handle_camera(&response, ui);

        let now = ui.input(|i| i.time);
        self.last_time = now;
        let revision = state.assembly.revision();
        let ordinal = state.assembly.ordinal();
        self.animator.observe(revision, ordinal, now);

        if !ui.is_rect_visible(rect) {
            return rect;
        }

        let catalog = parts::catalog(revision, state.assembly.model());
        let posed: Vec<(&PartSpec, Pose)> = catalog
            .iter()
            .filter(|part| parts::is_visible(revision, part.threshold, ordinal))
            .map(|part| (part, self.animator.pose(part, true, now)))
            .collect();

        let viewport = &state.settings.viewport;
        let painter = ui.painter_at(rect);
        renderer::paint_viewport(
            &painter,
            rect,
            &self.camera,
            viewport.background_color,
            viewport.show_grid,
            &posed,
            renderer::group_transform(now, viewport.idle_sway),
            &SurfaceTextures {
                solar: self.solar_texture.id(),
                pcb: self.pcb_texture.id(),
            },
        );

        self.draw_overlays(&painter, rect);
        rect
    }

    fn handle_camera(&mut self, response: &egui::Response, ui: &Ui) {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(delta.x * 0.01, delta.y * 0.01);
        }

        if response.double_clicked() {
            self.reset_camera();
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }
    }

    fn draw_overlays(&self, painter: &egui::Painter, rect: Rect) {
        painter.text(
            egui::pos2(rect.center().x, rect.bottom() - 12.0),
            egui::Align2::CENTER_BOTTOM,
            t("status.nav_hint"),
            egui::FontId::proportional(11.0),
            egui::Color32::from_rgb(107, 114, 128),
        );

        let overlay_rect = egui::Rect::from_min_size(
            egui::pos2(rect.right() - 140.0, rect.bottom() - 52.0),
            egui::vec2(132.0, 40.0),
        );
        painter.rect_filled(
            overlay_rect,
            4.0,
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, 170),
        );
        painter.text(
            overlay_rect.min + egui::vec2(6.0, 4.0),
            egui::Align2::LEFT_TOP,
            format!(
                "Dist: {:.1}\nYaw: {:.0}  Pitch: {:.0}",
                self.camera.distance,
                self.camera.yaw.to_degrees(),
                self.camera.pitch.to_degrees(),
            ),
            egui::FontId::monospace(10.0),
            egui::Color32::from_rgb(75, 85, 99),
        );
    }
}
