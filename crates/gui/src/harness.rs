//! Headless test harness: drives the assembly machine, the part animator and
//! the AI panel without a window, on a manually advanced clock.

use std::sync::Arc;

use shared::{AssemblyRevision, AssemblyStep, PartId, PhoneModel};
use tokio::runtime::Handle;
use uuid::Uuid;

use crate::ai::{AiError, GenerativeBackend};
use crate::animation::{AssemblyAnimator, Pose};
use crate::parts::{self, PartEdge, PartSpec};
use crate::state::ai_panel::AiPanelState;
use crate::state::assembly::{AssemblyState, Transition};

pub struct TestHarness {
    pub assembly: AssemblyState,
    pub animator: AssemblyAnimator,
    pub ai: AiPanelState,
    /// Seconds since the harness was created
    clock: f64,
    last_edges: Vec<PartEdge>,
}

impl TestHarness {
    /// Harness on the first step of the default revision
    pub fn new() -> Self {
        Self::with_revision(AssemblyRevision::default())
    }

    pub fn with_revision(revision: AssemblyRevision) -> Self {
        let mut harness = Self {
            assembly: AssemblyState::new(revision),
            animator: AssemblyAnimator::new(),
            ai: AiPanelState::default(),
            clock: 0.0,
            last_edges: Vec::new(),
        };
        harness.observe();
        harness
    }

    // ── Assembly ──────────────────────────────────────────────

    pub fn advance(&mut self) -> Transition {
        let t = self.assembly.advance();
        self.observe();
        t
    }

    /// Advance `n` times
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub fn reset(&mut self) -> Transition {
        let t = self.assembly.reset();
        self.observe();
        t
    }

    pub fn toggle_variant(&mut self) -> PhoneModel {
        let m = self.assembly.toggle_variant();
        self.observe();
        m
    }

    pub fn select_variant(&mut self, model: PhoneModel) {
        self.assembly.select_variant(model);
        self.observe();
    }

    pub fn set_revision(&mut self, revision: AssemblyRevision) -> bool {
        let changed = self.assembly.set_revision(revision);
        self.observe();
        changed
    }

    pub fn step(&self) -> AssemblyStep {
        self.assembly.step()
    }

    fn observe(&mut self) {
        self.last_edges = self.animator.observe(
            self.assembly.revision(),
            self.assembly.ordinal(),
            self.clock,
        );
    }

    /// Threshold edges produced by the last operation
    pub fn last_edges(&self) -> &[PartEdge] {
        &self.last_edges
    }

    // ── Parts ─────────────────────────────────────────────────

    pub fn catalog(&self) -> Vec<PartSpec> {
        parts::catalog(self.assembly.revision(), self.assembly.model())
    }

    pub fn part_visible(&self, id: PartId) -> bool {
        parts::thresholds(self.assembly.revision())
            .iter()
            .find(|(part, _)| *part == id)
            .is_some_and(|(_, threshold)| {
                parts::is_visible(self.assembly.revision(), *threshold, self.assembly.ordinal())
            })
    }

    pub fn visible_parts(&self) -> Vec<PartId> {
        parts::visibility(self.assembly.revision(), self.assembly.ordinal())
            .into_iter()
            .filter(|(_, visible)| *visible)
            .map(|(id, _)| id)
            .collect()
    }

    /// Current pose of a part of the active revision
    pub fn pose(&self, id: PartId) -> Option<Pose> {
        let part = self.catalog().into_iter().find(|p| p.id == id)?;
        Some(self.animator.pose(&part, self.part_visible(id), self.clock))
    }

    // ── Clock ─────────────────────────────────────────────────

    pub fn tick(&mut self, seconds: f64) {
        self.clock += seconds;
    }

    pub fn now(&self) -> f64 {
        self.clock
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating(&self.catalog(), self.clock)
    }

    // ── AI panel ──────────────────────────────────────────────

    pub fn submit_ai<B: GenerativeBackend>(&mut self, runtime: &Handle, backend: Arc<B>) -> Result<Uuid, AiError> {
        self.ai.submit(runtime, backend)
    }

    /// Wait for the outstanding AI request
    pub async fn settle_ai(&mut self) -> bool {
        self.ai.wait().await
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
