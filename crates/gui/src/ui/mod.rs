//! Panels around the viewport

pub mod ai_panel;
pub mod controls;
pub mod header;
pub mod status_bar;
pub mod step_overlay;
