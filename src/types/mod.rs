// Blablador shared type definitions
// Each submodule defines types used across the shell.

pub mod command;
pub mod errors;
pub mod intent;
pub mod navigation;
pub mod settings;
