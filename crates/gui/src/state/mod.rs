pub mod ai_panel;
pub mod assembly;
pub mod settings;

pub use ai_panel::{AiPanelState, PanelStatus};
pub use assembly::{AssemblyState, Transition};
pub use settings::{AiSettings, AppSettings};

/// Panel visibility flags
pub struct PanelVisibility {
    pub ai_studio: bool,
    pub step_info: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            ai_studio: false,
            step_info: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub assembly: AssemblyState,
    pub ai: AiPanelState,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
}

impl AppState {
    /// State starting on the persisted revision and phone model
    pub fn from_settings(settings: AppSettings) -> Self {
        let mut assembly = AssemblyState::new(settings.assembly.revision);
        assembly.select_variant(settings.assembly.model);
        Self {
            assembly,
            ai: AiPanelState::default(),
            panels: PanelVisibility::default(),
            settings,
            show_settings_window: false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_settings(AppSettings::load())
    }
}
