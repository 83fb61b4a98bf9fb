//! Presentation and control core - pure, deterministic, and testable
//!
//! Everything between the keyboard and the falling-block engine lives here,
//! with no dependency on the terminal:
//!
//! - [`tile_view`]: zero-copy read access to the engine's tile buffer
//! - [`clock`]: the accumulator that decides when stride and fall fire
//! - [`menu`]: the Playing / Paused / Settings overlay state machine
//! - [`controller`]: folds key, frame and menu events into engine commands
//!
//! The engine is reached only through [`Simulation`]; a host owns both the
//! engine and a [`Controller`] and applies each [`Reaction`] itself.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, ClockConfig, Controller, Event, TileView};
//! use blockfall_core::input::BindingTable;
//!
//! let mut board = Board::new(7);
//! let mut ctl = Controller::new(ClockConfig::default(), BindingTable::in_memory()).unwrap();
//!
//! for now_ms in (0..1_000).step_by(16) {
//!     let reaction = ctl.handle(Event::Tick { now_ms });
//!     reaction.apply_to(&mut board);
//! }
//!
//! let view = TileView::bind(&board);
//! assert_eq!(view.len(), 200);
//! ```

pub mod clock;
pub mod controller;
pub mod menu;
pub mod tile_view;

pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;

pub use blockfall_engine::{Board, Simulation};
pub use clock::{Cadence, ClockConfig, ClockConfigError, LoopClock};
pub use controller::{Controller, EngineCommand, Event, MenuAction, Reaction};
pub use menu::{MenuState, Overlay, PauseButton, Trigger};
pub use tile_view::TileView;
