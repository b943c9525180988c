use glam::{Mat4, Vec3, Vec4Swizzles};

/// Elevation limits. The lower one stops the orbit just below the horizon.
const MIN_PITCH: f32 = -0.22;
const MAX_PITCH: f32 = 1.5;
const MIN_DISTANCE: f32 = 3.0;
const MAX_DISTANCE: f32 = 30.0;

/// Orbit camera around the assembly, in spherical coordinates about `target`
pub struct ArcBallCamera {
    /// Azimuth around +Y, zero looking down -Z
    pub yaw: f32,
    /// Elevation above the XZ plane
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl ArcBallCamera {
    /// Three-quarter view from (5, 2, 5)
    pub fn new() -> Self {
        Self::looking_from(Vec3::new(5.0, 2.0, 5.0), 50.0_f32.to_radians())
    }

    /// Camera at `eye` looking at the origin
    pub fn looking_from(eye: Vec3, fov: f32) -> Self {
        let distance = eye.length();
        Self {
            yaw: eye.x.atan2(eye.z),
            pitch: (eye.y / distance).asin(),
            distance,
            target: Vec3::ZERO,
            fov,
        }
    }

    /// Orbit by a drag delta in degrees
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(MIN_PITCH, MAX_PITCH);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Slide the target in the view plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let (right, up) = self.screen_axes();
        self.target += up * dy - right * dx;
    }

    fn offset(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    pub fn eye_position(&self) -> Vec3 {
        self.target + self.offset()
    }

    /// World-space right and up directions of the image plane
    fn screen_axes(&self) -> (Vec3, Vec3) {
        let forward = -self.offset().normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        (right, right.cross(forward).normalize_or_zero())
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let projection = Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 200.0);
        projection * Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Screen position of a world point, `None` behind the camera
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let clip = self.view_projection(rect.aspect_ratio()) * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some(egui::pos2(
            rect.center().x + ndc.x * rect.width() * 0.5,
            rect.center().y - ndc.y * rect.height() * 0.5,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_eye_matches_three_quarter_view() {
        let eye = ArcBallCamera::new().eye_position();
        assert!((eye - Vec3::new(5.0, 2.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = ArcBallCamera::new();
        camera.rotate(0.0, -500.0);
        assert_eq!(camera.pitch, MIN_PITCH);
        camera.rotate(0.0, 500.0);
        assert_eq!(camera.pitch, MAX_PITCH);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = ArcBallCamera::new();
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let p = camera.project(Vec3::ZERO, rect).unwrap();
        assert!((p - rect.center()).length() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_not_projected() {
        let camera = ArcBallCamera::new();
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        assert!(camera.project(Vec3::new(20.0, 8.0, 20.0), rect).is_none());
    }
}
