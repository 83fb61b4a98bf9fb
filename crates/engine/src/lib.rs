//! Simulation module - the engine the presentation layer drives
//!
//! The loop controller never touches grid contents itself. It talks to an
//! engine exclusively through the [`Simulation`] trait: discrete commands,
//! the two cadence entry points, a score query and a borrowed view of the
//! tile buffer.
//!
//! [`Board`] is a small reference implementation so the terminal front end
//! has something to play. Collision, rotation and line clears live here and
//! nowhere else.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Board, Simulation};
//!
//! let mut board = Board::new(7);
//! assert_eq!(board.tile_buffer().len(), (board.width() * board.height()) as usize);
//!
//! board.shift_left();
//! board.advance_stride();
//! board.advance_fall();
//! assert_eq!(board.current_score(), 0);
//! ```

pub mod board;
pub mod pieces;
pub mod rng;

pub use blockfall_types as types;

pub use board::Board;
pub use pieces::{ActivePiece, PieceKind};
pub use rng::{PieceQueue, SimpleRng};

/// Operations the presentation layer requires from a simulation engine.
///
/// Width and height are fixed for the lifetime of an instance. The tile
/// buffer may be reallocated by any `&mut self` call, which is why it is only
/// ever handed out as a borrow.
pub trait Simulation {
    fn width(&self) -> u16;

    fn height(&self) -> u16;

    /// Reinitialize the board to its starting configuration.
    fn reset_state(&mut self);

    /// One stride-cadence update (lateral movement).
    fn advance_stride(&mut self);

    /// One fall-cadence update (gravity, locking, line clears).
    fn advance_fall(&mut self);

    fn rotate_active_piece(&mut self);

    fn shift_left(&mut self);

    fn shift_right(&mut self);

    fn current_score(&self) -> u32;

    /// Row-major tile codes. Pointer and length come from the same call.
    fn tile_buffer(&self) -> &[u8];
}
