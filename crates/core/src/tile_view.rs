//! Borrowed, read-only view of the engine's tile buffer.
//!
//! A [`TileView`] is bound straight from [`Simulation::tile_buffer`]: no copy,
//! and the slice length arrives in the same call as the data. The view
//! borrows the engine, so it cannot be held across anything that mutates the
//! engine; bind a fresh one for every render pass.

use blockfall_engine::Simulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileView<'a> {
    tiles: &'a [u8],
    width: u16,
    height: u16,
}

impl<'a> TileView<'a> {
    /// Bind to the engine's current buffer.
    pub fn bind<S: Simulation + ?Sized>(sim: &'a S) -> Self {
        Self {
            tiles: sim.tile_buffer(),
            width: sim.width(),
            height: sim.height(),
        }
    }

    /// View over an arbitrary row-major buffer.
    pub fn from_slice(tiles: &'a [u8], width: u16, height: u16) -> Self {
        Self {
            tiles,
            width,
            height,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Length of the bound buffer, which may differ from `width * height`.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether the buffer covers every cell of the board.
    pub fn is_complete(&self) -> bool {
        self.tiles.len() >= self.width as usize * self.height as usize
    }

    #[inline(always)]
    pub fn index(&self, row: u16, col: u16) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Raw code at `(row, col)`.
    ///
    /// `None` outside the board or past the end of the bound buffer.
    #[inline]
    pub fn get(&self, row: u16, col: u16) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.tiles.get(self.index(row, col)).copied()
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.tiles
    }
}
