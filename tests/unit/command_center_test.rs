//! Unit tests for the pending voice-command holder.

use blablador::services::command_center::{CommandCenter, CommandCenterTrait};
use blablador::types::command::VoiceCommand;

#[test]
fn test_starts_empty() {
    let mut center = CommandCenter::new();
    assert!(center.pending().is_none());
    assert!(center.consume().is_none());
}

#[test]
fn test_handle_stores_command() {
    let mut center = CommandCenter::new();
    let cmd = center.handle("summarize this page");

    assert_eq!(cmd.text, "summarize this page");
    assert_eq!(center.pending(), Some(&cmd));
}

#[test]
fn test_consume_empties_holder() {
    let mut center = CommandCenter::new();
    let cmd = center.handle("translate to German");

    assert_eq!(center.consume(), Some(cmd));
    assert!(center.pending().is_none());
    assert!(center.consume().is_none(), "A command is consumed at most once");
}

/// A second command arriving before the first was delivered replaces it.
#[test]
fn test_newer_command_replaces_pending() {
    let mut center = CommandCenter::new();
    let first = center.handle("first");
    let second = center.handle("second");

    assert_ne!(first.id, second.id);
    assert_eq!(center.pending().map(|c| c.text.as_str()), Some("second"));
}

#[test]
fn test_store_keeps_id() {
    let mut center = CommandCenter::new();
    let cmd = VoiceCommand::new("open settings");
    center.store(cmd.clone());

    assert_eq!(center.pending().map(|c| c.id), Some(cmd.id));
}
