//! Blablador: a minimal native shell around the Blablador web front-end.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod cli;
pub mod intent_handler;
pub mod intent_server;
pub mod ipc;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
