use serde::{Deserialize, Serialize};

/// A stage of the physical assembly.
///
/// The set is the union of both app revisions; which stages are used, and in
/// which order, is decided by [`AssemblyRevision::steps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyStep {
    Chassis,
    Case,
    SolarModule,
    Battery,
    Pcb,
    Slider,
    ThermalInsert,
    Phone,
}

/// Which assembly sequence is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyRevision {
    /// Five stages built on top of the phone body (prototype v1.0)
    #[default]
    Classic,
    /// Six stages built inside a translucent case, phone inserted last (v2.2)
    Hybrid,
}

const CLASSIC_STEPS: [AssemblyStep; 5] = [
    AssemblyStep::Chassis,
    AssemblyStep::SolarModule,
    AssemblyStep::Pcb,
    AssemblyStep::Slider,
    AssemblyStep::ThermalInsert,
];

const HYBRID_STEPS: [AssemblyStep; 6] = [
    AssemblyStep::Case,
    AssemblyStep::SolarModule,
    AssemblyStep::Battery,
    AssemblyStep::Pcb,
    AssemblyStep::ThermalInsert,
    AssemblyStep::Phone,
];

impl AssemblyRevision {
    /// Ordered stage sequence. Never empty.
    pub fn steps(self) -> &'static [AssemblyStep] {
        match self {
            AssemblyRevision::Classic => &CLASSIC_STEPS,
            AssemblyRevision::Hybrid => &HYBRID_STEPS,
        }
    }

    pub fn len(self) -> usize {
        self.steps().len()
    }

    pub fn first_step(self) -> AssemblyStep {
        self.steps()[0]
    }

    pub fn last_step(self) -> AssemblyStep {
        self.steps()[self.len() - 1]
    }

    /// Index of `step` in this revision, `None` if the revision does not use it
    pub fn ordinal(self, step: AssemblyStep) -> Option<usize> {
        self.steps().iter().position(|s| *s == step)
    }

    pub fn step_at(self, ordinal: usize) -> Option<AssemblyStep> {
        self.steps().get(ordinal).copied()
    }

    /// Version tag shown under the title
    pub fn version_label(self) -> &'static str {
        match self {
            AssemblyRevision::Classic => "v1.0",
            AssemblyRevision::Hybrid => "v2.2",
        }
    }

    pub fn all() -> &'static [AssemblyRevision] {
        &[AssemblyRevision::Classic, AssemblyRevision::Hybrid]
    }
}

/// Phone the case is displayed with. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhoneModel {
    #[default]
    #[serde(rename = "iPhone12")]
    IPhone12,
    #[serde(rename = "GalaxyS22")]
    GalaxyS22,
}

impl PhoneModel {
    /// The other model
    pub fn toggled(self) -> Self {
        match self {
            PhoneModel::IPhone12 => PhoneModel::GalaxyS22,
            PhoneModel::GalaxyS22 => PhoneModel::IPhone12,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PhoneModel::IPhone12 => "iPhone 12",
            PhoneModel::GalaxyS22 => "Galaxy S22",
        }
    }

    pub fn all() -> &'static [PhoneModel] {
        &[PhoneModel::IPhone12, PhoneModel::GalaxyS22]
    }
}

/// Identifier of a drawable part of the assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartId {
    PhoneBody,
    PhoneCase,
    SolarModule,
    Battery,
    Pcb,
    SlidingCover,
    ThermalInsert,
    Phone,
}

/// Request kind of the AI studio panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiMode {
    /// Video synthesis from text, optionally animating a reference image
    #[default]
    Video,
    /// Still image synthesis from text
    Image,
    /// Image editing driven by a text instruction
    Edit,
    /// Free-text analysis
    Analyze,
}

impl AiMode {
    /// Whether the panel offers a reference image input for this mode
    pub fn accepts_reference_image(self) -> bool {
        matches!(self, AiMode::Video | AiMode::Edit)
    }

    /// Whether a submission without a reference image is rejected
    pub fn requires_reference_image(self) -> bool {
        matches!(self, AiMode::Edit)
    }

    pub fn all() -> &'static [AiMode] {
        &[AiMode::Video, AiMode::Image, AiMode::Edit, AiMode::Analyze]
    }
}

/// Image picked by the user, raw file bytes
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// One submission of the AI panel
#[derive(Debug, Clone, PartialEq)]
pub struct AiTaskRequest {
    pub mode: AiMode,
    pub prompt: String,
    pub reference_image: Option<ReferenceImage>,
}

/// Artifact returned by the generative backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AiArtifact {
    /// Playable video URL
    VideoUrl(String),
    /// `data:` URI holding a base64 encoded image
    ImageDataUri(String),
    Text(String),
}

/// Artifact tagged with the mode that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiTaskResult {
    pub mode: AiMode,
    pub artifact: AiArtifact,
}
