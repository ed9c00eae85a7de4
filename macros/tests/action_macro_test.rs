//! Tests for #[derive(Action)] macro

use chrono::{DateTime, Utc};
use tasklist_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum NoteAction {
    #[command]
    Write { body: String },

    #[command]
    Archive,

    #[command]
    Pin(u32),

    #[event]
    Written { id: u32, body: String, at: DateTime<Utc> },

    #[event]
    Archived,

    Heartbeat,
}

#[test]
fn commands_are_identified() {
    let commands = vec![
        NoteAction::Write {
            body: "hello".to_string(),
        },
        NoteAction::Archive,
        NoteAction::Pin(3),
    ];

    for cmd in commands {
        assert!(cmd.is_command(), "Expected command: {cmd:?}");
        assert!(!cmd.is_event(), "Should not be event: {cmd:?}");
        assert_eq!(cmd.event_type(), None);
    }
}

#[test]
fn events_are_identified() {
    let written = NoteAction::Written {
        id: 1,
        body: "hello".to_string(),
        at: Utc::now(),
    };
    assert!(written.is_event());
    assert!(!written.is_command());
    assert_eq!(written.event_type(), Some("Written.v1"));

    assert!(NoteAction::Archived.is_event());
    assert_eq!(NoteAction::Archived.event_type(), Some("Archived.v1"));
}

#[test]
fn unmarked_variant_is_neither() {
    let action = NoteAction::Heartbeat;
    assert!(!action.is_command());
    assert!(!action.is_event());
    assert_eq!(action.event_type(), None);
}

#[test]
fn name_matches_variant() {
    assert_eq!(NoteAction::Archive.name(), "Archive");
    assert_eq!(NoteAction::Pin(1).name(), "Pin");
    assert_eq!(
        NoteAction::Write {
            body: String::new()
        }
        .name(),
        "Write"
    );
    assert_eq!(NoteAction::Heartbeat.name(), "Heartbeat");
}

#[derive(Action, Clone, Debug)]
enum Wrapped<T> {
    #[event]
    Value(T),
}

#[test]
fn generic_enums_are_supported() {
    let action = Wrapped::Value(5_u8);
    assert!(action.is_event());
    assert_eq!(action.name(), "Value");
}
