//! Assembly step state machine

use shared::{AssemblyRevision, AssemblyStep, PhoneModel};

/// Step change produced by a state machine operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub revision: AssemblyRevision,
    pub from: AssemblyStep,
    pub to: AssemblyStep,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Current step and phone model of the displayed assembly.
///
/// The step only moves forward, one stage at a time, until [`reset`] brings it
/// back to the first stage. Every state change bumps `version`.
///
/// [`reset`]: AssemblyState::reset
#[derive(Debug, Clone)]
pub struct AssemblyState {
    revision: AssemblyRevision,
    ordinal: usize,
    model: PhoneModel,
    version: u64,
}

impl Default for AssemblyState {
    fn default() -> Self {
        Self::new(AssemblyRevision::default())
    }
}

impl AssemblyState {
    pub fn new(revision: AssemblyRevision) -> Self {
        Self {
            revision,
            ordinal: 0,
            model: PhoneModel::default(),
            version: 0,
        }
    }

    pub fn step(&self) -> AssemblyStep {
        // ordinal is kept in range by every mutator
        self.revision.steps()[self.ordinal]
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn model(&self) -> PhoneModel {
        self.model
    }

    pub fn revision(&self) -> AssemblyRevision {
        self.revision
    }

    /// Incremented on every observable change
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_first(&self) -> bool {
        self.ordinal == 0
    }

    pub fn is_complete(&self) -> bool {
        self.ordinal + 1 == self.revision.len()
    }

    /// Move to the next step; no-op on the last one
    pub fn advance(&mut self) -> Transition {
        let from = self.step();
        if !self.is_complete() {
            self.ordinal += 1;
            self.version += 1;
        }
        let transition = self.transition_from(from);
        if transition.is_noop() {
            tracing::debug!("Advance ignored, already at {:?}", from);
        } else {
            tracing::info!("Assembly step {:?} -> {:?}", transition.from, transition.to);
        }
        transition
    }

    /// Back to the first step
    pub fn reset(&mut self) -> Transition {
        let from = self.step();
        if self.ordinal != 0 {
            self.ordinal = 0;
            self.version += 1;
            tracing::info!("Assembly reset from {:?}", from);
        }
        self.transition_from(from)
    }

    /// Overwrite the phone model; the step is untouched
    pub fn select_variant(&mut self, model: PhoneModel) {
        if self.model != model {
            self.model = model;
            self.version += 1;
            tracing::info!("Phone model set to {}", model.display_name());
        }
    }

    pub fn toggle_variant(&mut self) -> PhoneModel {
        self.select_variant(self.model.toggled());
        self.model
    }

    /// Switch to another step sequence, starting over at its first step.
    /// Returns `false` if `revision` was already active.
    pub fn set_revision(&mut self, revision: AssemblyRevision) -> bool {
        if self.revision == revision {
            return false;
        }
        self.revision = revision;
        self.ordinal = 0;
        self.version += 1;
        tracing::info!("Assembly revision set to {}", revision.version_label());
        true
    }

    fn transition_from(&self, from: AssemblyStep) -> Transition {
        Transition {
            revision: self.revision,
            from,
            to: self.step(),
        }
    }
}
