//! Terminal input module.
//!
//! Turns `crossterm` key events into browser-style key identifiers and keeps
//! the user-configurable [`BindingTable`] that maps those identifiers onto
//! logical [`crate::types::Action`]s. Bindings survive restarts through a
//! [`BindingStore`].
//!
//! Nothing in here knows about the game loop; routing a key to a command is
//! the controller's job.

pub mod bindings;
pub mod keys;
pub mod store;

pub use blockfall_types as types;

pub use bindings::{BindError, BindingTable};
pub use keys::{is_interrupt, is_quit_key, key_id, KeyId, ESCAPE};
pub use store::{open_store, BindingStore, DefaultsStore, FileStore, MemoryStore};
