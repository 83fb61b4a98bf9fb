//! Key identifiers for terminal events.
//!
//! Identifiers follow the browser `KeyboardEvent.key` naming so a binding
//! file reads the same way regardless of where it was written: printable keys
//! are the character itself (case sensitive), named keys use names such as
//! `ArrowLeft` or `Escape`.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// The fixed, non-remappable pause key.
pub const ESCAPE: &str = "Escape";

/// A physical key, by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(String);

impl KeyId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn escape() -> Self {
        Self::new(ESCAPE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_escape(&self) -> bool {
        self.0 == ESCAPE
    }
}

impl From<&str> for KeyId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_str() {
            " " => f.write_str("Space"),
            other => f.write_str(other),
        }
    }
}

/// Map a terminal key event to its identifier.
///
/// Chords with Control or Alt are not keys in their own right and map to `None`.
pub fn key_id(key: &KeyEvent) -> Option<KeyId> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    let name = match key.code {
        KeyCode::Char(c) => return Some(KeyId(c.to_string())),
        KeyCode::F(n) => return Some(KeyId(format!("F{n}"))),
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Esc => ESCAPE,
        KeyCode::Enter => "Enter",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        _ => return None,
    };
    Some(KeyId::new(name))
}

/// Ctrl+C always ends the session, bound or not.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Quit key, honored only when nothing else handled the key.
pub fn is_quit_key(key: &KeyId) -> bool {
    matches!(key.as_str(), "q" | "Q")
}
