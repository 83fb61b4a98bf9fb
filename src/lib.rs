//! blockfall (workspace facade crate).
//!
//! Re-exports the member crates under short names and adds the pieces that
//! only the binary needs: command line configuration and the [`Session`] that
//! ties an engine, a controller and the terminal view together.

pub mod config;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::Cli;
pub use session::{Flow, Session};
