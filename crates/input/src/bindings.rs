//! Binding table: logical action -> physical key.
//!
//! Every action always has exactly one key. Two actions may share a key; a
//! lookup then resolves in [`Action::ALL`] order. Every change is written
//! through to the backing [`BindingStore`] immediately.

use std::fmt;

use crate::keys::KeyId;
use crate::store::{BindingStore, MemoryStore};
use crate::types::Action;

/// Why a rebind was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    /// The key is reserved (Escape always toggles the pause menu).
    Reserved,
    /// Empty key names cannot be matched by any event.
    Empty,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::Reserved => f.write_str("key is reserved"),
            BindError::Empty => f.write_str("key name is empty"),
        }
    }
}

impl std::error::Error for BindError {}

pub struct BindingTable {
    keys: [KeyId; 4],
    store: Box<dyn BindingStore>,
}

fn slot(action: Action) -> usize {
    match action {
        Action::RotateCw => 0,
        Action::MoveLeft => 1,
        Action::SoftDrop => 2,
        Action::MoveRight => 3,
    }
}

fn validate(key: &KeyId) -> Result<(), BindError> {
    if key.as_str().is_empty() {
        return Err(BindError::Empty);
    }
    if key.is_escape() {
        return Err(BindError::Reserved);
    }
    Ok(())
}

impl BindingTable {
    /// Load bindings from `store`.
    ///
    /// Missing or unusable entries fall back to the built-in default, and the
    /// default is written back so the store always holds a full table.
    pub fn load(mut store: Box<dyn BindingStore>) -> Self {
        let keys = Action::ALL.map(|action| {
            let name = action.storage_name();
            let stored = store.get(name).map(KeyId::new);
            match stored {
                Some(key) if validate(&key).is_ok() => key,
                other => {
                    if let Some(bad) = other {
                        tracing::warn!(name, key = %bad, "ignoring stored binding");
                    }
                    let key = KeyId::new(action.default_key());
                    if let Err(e) = store.set(name, key.as_str()) {
                        tracing::warn!(name, error = ?e, "could not store default binding");
                    }
                    key
                }
            }
        });

        // `Action::ALL` is in slot order, so `keys[slot(a)]` lines up.
        Self { keys, store }
    }

    /// Defaults backed by a session-only store.
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    pub fn key_for(&self, action: Action) -> &KeyId {
        &self.keys[slot(action)]
    }

    /// The action bound to `key`, if any.
    pub fn action_for(&self, key: &KeyId) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&action| self.key_for(action) == key)
    }

    /// Rebind `action` to `key` and persist it.
    ///
    /// A failed write is logged; the in-memory table still changes.
    pub fn set(&mut self, action: Action, key: KeyId) -> Result<(), BindError> {
        validate(&key)?;
        if let Err(e) = self.store.set(action.storage_name(), key.as_str()) {
            tracing::warn!(action = action.as_str(), error = ?e, "binding not persisted");
        }
        tracing::debug!(action = action.as_str(), key = %key, "rebound");
        self.keys[slot(action)] = key;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, &KeyId)> + '_ {
        Action::ALL
            .into_iter()
            .map(move |action| (action, self.key_for(action)))
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_persistent()
    }
}

impl fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(a, k)| (a.as_str(), k.as_str())))
            .finish()
    }
}
