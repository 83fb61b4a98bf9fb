//! Binding table and persistence tests

use std::path::PathBuf;

use blockfall::core::{ClockConfig, Controller, EngineCommand, Event, MenuAction};
use blockfall::input::{open_store, BindError, BindingTable, FileStore, KeyId};
use blockfall::types::Action;

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("blockfall-{tag}-{}-{nanos}", std::process::id()))
}

fn settings(ctl: &mut Controller) {
    ctl.handle(Event::KeyDown(KeyId::escape()));
    ctl.handle(Event::Menu(MenuAction::OpenSettings));
}

fn resume(ctl: &mut Controller) {
    ctl.handle(Event::KeyDown(KeyId::escape()));
    ctl.handle(Event::KeyDown(KeyId::escape()));
}

#[test]
fn test_rebind_applies_to_the_next_key() {
    let mut ctl = Controller::new(ClockConfig::default(), BindingTable::in_memory()).unwrap();

    for (action, key, expected) in [
        (Action::MoveLeft, "ArrowLeft", EngineCommand::ShiftLeft),
        (Action::MoveRight, "ArrowRight", EngineCommand::ShiftRight),
        (Action::RotateCw, "ArrowUp", EngineCommand::Rotate),
        (Action::MoveLeft, "h", EngineCommand::ShiftLeft),
    ] {
        settings(&mut ctl);
        ctl.handle(Event::Menu(MenuAction::Rebind {
            action,
            key: KeyId::from(key),
        }));
        resume(&mut ctl);

        let r = ctl.handle(Event::KeyDown(KeyId::from(key)));
        assert_eq!(r.commands.as_slice(), &[expected], "{key}");
    }

    // The previous key for MoveLeft no longer does anything.
    let r = ctl.handle(Event::KeyDown(KeyId::from("ArrowLeft")));
    assert!(!r.handled);
}

#[test]
fn test_escape_rebind_is_refused() {
    let mut table = BindingTable::in_memory();
    assert_eq!(
        table.set(Action::RotateCw, KeyId::escape()),
        Err(BindError::Reserved)
    );
    assert_eq!(table.key_for(Action::RotateCw).as_str(), "w");
}

#[test]
fn test_bindings_survive_restart() {
    let dir = temp_dir("restart");
    let path = dir.join("bindings.toml");

    {
        let mut table = BindingTable::load(open_store(Some(path.as_path())));
        assert!(table.is_persistent());
        table.set(Action::SoftDrop, KeyId::from("ArrowDown")).unwrap();
    }

    let table = BindingTable::load(Box::new(FileStore::open(&path).unwrap()));
    assert_eq!(table.key_for(Action::SoftDrop).as_str(), "ArrowDown");
    assert_eq!(table.key_for(Action::RotateCw).as_str(), "w");

    let text = std::fs::read_to_string(&path).unwrap();
    for name in ["rotateKey", "leftKey", "downKey", "rightKey"] {
        assert!(text.contains(name), "{name} missing from {text}");
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_unwritable_location_falls_back_to_defaults() {
    let dir = temp_dir("blocked");
    std::fs::create_dir_all(&dir).unwrap();
    // A regular file where a directory is expected.
    let blocker = dir.join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let path = blocker.join("bindings.toml");
    let table = BindingTable::load(open_store(Some(path.as_path())));
    assert!(!table.is_persistent());
    assert_eq!(table.key_for(Action::MoveRight).as_str(), "d");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_shared_key_dispatches_first_action_in_fixed_order() {
    let mut table = BindingTable::in_memory();
    table.set(Action::MoveRight, KeyId::from("a")).unwrap();
    table.set(Action::SoftDrop, KeyId::from("a")).unwrap();
    assert_eq!(table.action_for(&KeyId::from("a")), Some(Action::MoveLeft));
}
