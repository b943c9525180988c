// Library crate: exposes testable modules for integration tests and the command interface.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod ai;
pub mod animation;
pub mod command;
pub mod harness;
pub mod i18n;
pub mod parts;
pub mod state;
pub mod textures;
