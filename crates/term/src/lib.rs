//! Terminal rendering module.
//!
//! The board is drawn onto a small RGB [`Canvas`] through the [`Surface`]
//! seam, then composited into a character [`FrameBuffer`] with half-block
//! glyphs so one terminal cell shows two canvas pixels. Overlay panels and the
//! score readout are drawn straight into the framebuffer, which
//! [`TerminalRenderer`] flushes to the terminal.
//!
//! Everything except `renderer` is pure and unit-tested without a terminal.

pub mod board_view;
pub mod fb;
pub mod game_view;
pub mod overlay;
pub mod renderer;
pub mod surface;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use board_view::{tile_color, BoardView, TileStats, FALLBACK_COLOR, GRID_COLOR};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, HALF_BLOCK};
pub use game_view::{AnchorY, GameView, Viewport};
pub use overlay::Rect;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::{Canvas, Surface};
