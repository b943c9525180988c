//! Entrance animation of assembly parts.
//!
//! Visibility itself is never stored here: it is recomputed from the current
//! step on every frame (see [`crate::parts`]). The animator only remembers when
//! a part last crossed its threshold upwards, so the entrance tween can be
//! sampled from that instant.

use std::collections::HashMap;

use glam::Vec3;
use shared::{AssemblyRevision, PartId};

use crate::parts::{self, EdgeKind, PartEdge, PartSpec};

/// Easing curves used by the part tweens
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out
    Power1Out,
    /// Quadratic ease-in-out
    Power2InOut,
    /// Cubic ease-out
    Power3Out,
    ExpoOut,
    /// Ease-out with overshoot of the given strength
    BackOut(f32),
}

impl Ease {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    /// `BackOut` overshoots 1.0 before settling.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::Power3Out => 1.0 - (1.0 - t).powi(3),
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Ease::BackOut(overshoot) => {
                let c3 = overshoot + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u.powi(3) + overshoot * u.powi(2)
            }
        }
    }
}

/// Timing of one animated channel (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
}

impl Tween {
    pub fn new(duration: f32, ease: Ease) -> Self {
        Self {
            duration,
            delay: 0.0,
            ease,
        }
    }

    pub fn delayed(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Eased progress after `elapsed` seconds
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return if elapsed >= self.delay { 1.0 } else { 0.0 };
        }
        self.ease.apply((elapsed - self.delay) / self.duration)
    }

    /// Time at which the channel settles
    pub fn end(&self) -> f32 {
        self.delay + self.duration.max(0.0)
    }
}

/// Placement of a part relative to the assembly origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Rotation about the X axis (radians)
    pub rotation_x: f32,
    pub scale: Vec3,
    /// Multiplied into the material opacity
    pub opacity: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_x: 0.0,
            scale: Vec3::ONE,
            opacity: 1.0,
        }
    }
}

impl Pose {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation_x(mut self, rotation_x: f32) -> Self {
        self.rotation_x = rotation_x;
        self
    }
}

/// Motion played when a part becomes visible.
///
/// Channels without a tween jump straight to the rest value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    /// Start pose, if it differs from the part's hidden pose
    pub from: Option<Pose>,
    pub rest: Pose,
    pub position: Tween,
    pub rotation: Option<Tween>,
    pub scale: Option<Tween>,
    pub opacity: Option<Tween>,
}

impl Entrance {
    /// No motion: the part simply sits at `rest`
    pub fn instant(rest: Pose) -> Self {
        Self {
            from: None,
            rest,
            position: Tween::new(0.0, Ease::Linear),
            rotation: None,
            scale: None,
            opacity: None,
        }
    }

    pub fn moving_to(rest: Pose, position: Tween) -> Self {
        Self {
            position,
            ..Self::instant(rest)
        }
    }

    pub fn starting_from(mut self, from: Pose) -> Self {
        self.from = Some(from);
        self
    }

    pub fn rotating(mut self, tween: Tween) -> Self {
        self.rotation = Some(tween);
        self
    }

    pub fn scaling(mut self, tween: Tween) -> Self {
        self.scale = Some(tween);
        self
    }

    pub fn fading(mut self, tween: Tween) -> Self {
        self.opacity = Some(tween);
        self
    }

    /// Pose `elapsed` seconds after the part appeared
    pub fn sample(&self, hidden: &Pose, elapsed: f32) -> Pose {
        let from = self.from.unwrap_or(*hidden);
        let channel = |tween: Option<Tween>| tween.map_or(1.0, |t| t.progress(elapsed));
        let p = self.position.progress(elapsed);
        let r = channel(self.rotation);
        let s = channel(self.scale);
        let o = channel(self.opacity);
        Pose {
            position: from.position.lerp(self.rest.position, p),
            rotation_x: from.rotation_x + (self.rest.rotation_x - from.rotation_x) * r,
            scale: from.scale.lerp(self.rest.scale, s),
            opacity: from.opacity + (self.rest.opacity - from.opacity) * o,
        }
    }

    /// Time after which every channel has settled
    pub fn duration(&self) -> f32 {
        [self.rotation, self.scale, self.opacity]
            .into_iter()
            .flatten()
            .map(|t| t.end())
            .fold(self.position.end(), f32::max)
    }
}

/// Edge-triggered driver of part entrance motion.
///
/// Call [`AssemblyAnimator::observe`] once per frame with the current step; it
/// diffs against the previously observed step and restarts the entrance of
/// every part that crossed its threshold upwards. Parts that crossed downwards
/// are dropped so their next entrance starts from the hidden pose again.
#[derive(Debug, Default)]
pub struct AssemblyAnimator {
    seen: Option<(AssemblyRevision, usize)>,
    started: HashMap<PartId, f64>,
}

impl AssemblyAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, revision: AssemblyRevision, ordinal: usize, now: f64) -> Vec<PartEdge> {
        let edges = match self.seen {
            Some((seen_revision, prev)) if seen_revision == revision => {
                parts::threshold_edges(revision, prev, ordinal)
            }
            Some(_) => {
                // Different part set: show the new one at rest
                self.started.clear();
                Vec::new()
            }
            None => Vec::new(),
        };

        for edge in &edges {
            match edge.kind {
                EdgeKind::Appeared => {
                    self.started.insert(edge.part, now);
                }
                EdgeKind::Disappeared => {
                    self.started.remove(&edge.part);
                }
            }
        }
        if !edges.is_empty() {
            tracing::debug!("Part edges at t={now:.2}: {edges:?}");
        }

        self.seen = Some((revision, ordinal));
        edges
    }

    /// Current pose of `part`
    pub fn pose(&self, part: &PartSpec, visible: bool, now: f64) -> Pose {
        if !visible {
            return part.hidden;
        }
        match self.started.get(&part.id) {
            Some(start) => part.entrance.sample(&part.hidden, (now - start) as f32),
            None => part.entrance.rest,
        }
    }

    /// Whether any visible part is still moving
    pub fn is_animating(&self, catalog: &[PartSpec], now: f64) -> bool {
        catalog.iter().any(|part| {
            self.started
                .get(&part.id)
                .is_some_and(|start| ((now - start) as f32) < part.entrance.duration())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_eases_hit_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::Power1Out,
            Ease::Power2InOut,
            Ease::Power3Out,
            Ease::ExpoOut,
            Ease::BackOut(1.7),
        ] {
            assert!(ease.apply(0.0).abs() < EPS, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < EPS, "{ease:?} at 1");
        }
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut(1.7).apply(i as f32 / 100.0))
            .fold(0.0, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_tween_delay() {
        let tween = Tween::new(1.0, Ease::Linear).delayed(0.2);
        assert_eq!(tween.progress(0.1), 0.0);
        assert!((tween.progress(0.7) - 0.5).abs() < EPS);
        assert_eq!(tween.progress(5.0), 1.0);
        assert!((tween.end() - 1.2).abs() < EPS);
    }

    #[test]
    fn test_entrance_sample_endpoints() {
        let hidden = Pose::at(0.0, 10.0, 0.0).with_opacity(0.0);
        let entrance = Entrance::moving_to(Pose::at(0.0, 0.0, 0.2), Tween::new(1.5, Ease::Power3Out))
            .fading(Tween::new(1.0, Ease::Linear));

        let start = entrance.sample(&hidden, 0.0);
        assert_eq!(start.position, hidden.position);
        assert_eq!(start.opacity, 0.0);

        let end = entrance.sample(&hidden, entrance.duration());
        assert!((end.position - entrance.rest.position).length() < EPS);
        assert!((end.opacity - 1.0).abs() < EPS);
    }

    #[test]
    fn test_untweened_channels_jump_to_rest() {
        let hidden = Pose::at(5.0, 0.0, 0.0).with_scale(Vec3::ZERO);
        let entrance = Entrance::moving_to(Pose::default(), Tween::new(2.0, Ease::Linear));
        let mid = entrance.sample(&hidden, 1.0);
        assert_eq!(mid.scale, Vec3::ONE);
        assert!((mid.position.x - 2.5).abs() < EPS);
    }

    #[test]
    fn test_explicit_start_pose_overrides_hidden() {
        let hidden = Pose::at(0.0, -10.0, 0.0);
        let entrance = Entrance::moving_to(Pose::at(0.0, -2.5, 0.2), Tween::new(1.0, Ease::Linear))
            .starting_from(hidden.with_rotation_x(std::f32::consts::PI))
            .rotating(Tween::new(1.0, Ease::Linear));
        let start = entrance.sample(&hidden, 0.0);
        assert!((start.rotation_x - std::f32::consts::PI).abs() < EPS);
        assert!(entrance.sample(&hidden, 1.0).rotation_x.abs() < EPS);
    }
}
