//! Board module - the reference simulation
//!
//! Locked cells live in a flat row-major buffer. After every mutation the
//! active piece is composited on top into a second buffer, which is what
//! [`Simulation::tile_buffer`] hands out. Readers therefore never need to know
//! about the active piece.

use arrayvec::ArrayVec;

use crate::pieces::ActivePiece;
use crate::rng::PieceQueue;
use crate::types::{TileCode, BOARD_HEIGHT, BOARD_WIDTH, LINE_SCORES};
use crate::Simulation;

/// Smallest board a piece can spawn on.
pub const MIN_DIMENSION: u16 = 4;

#[derive(Debug, Clone)]
pub struct Board {
    width: u16,
    height: u16,
    /// Locked cells only.
    locked: Vec<u8>,
    /// Locked cells plus the active piece.
    tiles: Vec<u8>,
    active: ActivePiece,
    /// Lateral velocity applied on the next stride update.
    pending_shift: i16,
    score: u32,
    queue: PieceQueue,
}

impl Board {
    /// Board with the default 10x20 playfield.
    pub fn new(seed: u32) -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT, seed)
    }

    /// Dimensions below [`MIN_DIMENSION`] are raised to it.
    pub fn with_size(width: u16, height: u16, seed: u32) -> Self {
        let width = width.max(MIN_DIMENSION);
        let height = height.max(MIN_DIMENSION);
        let len = width as usize * height as usize;
        let mut queue = PieceQueue::new(seed);
        let active = ActivePiece::spawn(queue.draw(), width);

        let mut board = Self {
            width,
            height,
            locked: vec![TileCode::Empty.as_u8(); len],
            tiles: vec![TileCode::Empty.as_u8(); len],
            active,
            pending_shift: 0,
            score: 0,
            queue,
        };
        board.compose();
        board
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    /// Locked cell at `(x, y)`, `None` when out of bounds.
    pub fn locked_at(&self, x: i16, y: i16) -> Option<TileCode> {
        self.index(x, y)
            .and_then(|i| TileCode::from_u8(self.locked[i]))
    }

    /// Overwrite a locked cell. Intended for setting up scenarios.
    pub fn set_locked(&mut self, x: i16, y: i16, tile: TileCode) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.locked[i] = tile.as_u8();
                self.compose();
                true
            }
            None => false,
        }
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn fits(&self, piece: &ActivePiece) -> bool {
        piece.cells().all(|(x, y)| {
            self.index(x, y)
                .map(|i| self.locked[i] == TileCode::Empty.as_u8())
                .unwrap_or(false)
        })
    }

    fn compose(&mut self) {
        self.tiles.copy_from_slice(&self.locked);
        let active = self.active;
        let code = active.kind.tile().as_u8();
        for (x, y) in active.cells() {
            if let Some(i) = self.index(x, y) {
                self.tiles[i] = code;
            }
        }
    }

    fn spawn(&mut self) {
        let next = ActivePiece::spawn(self.queue.draw(), self.width);
        if self.fits(&next) {
            self.active = next;
            return;
        }

        tracing::info!(score = self.score, "spawn blocked, resetting board");
        self.locked.fill(TileCode::Empty.as_u8());
        self.score = 0;
        self.active = next;
    }

    fn lock_active(&mut self) {
        let code = self.active.kind.tile().as_u8();
        let cells: ArrayVec<(i16, i16), 4> = self.active.cells().collect();
        for (x, y) in cells {
            if let Some(i) = self.index(x, y) {
                self.locked[i] = code;
            }
        }
    }

    /// Remove full rows, compacting the rest downwards. Returns the number removed.
    fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let empty = TileCode::Empty.as_u8();
        let mut cleared = 0;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            let start = read_y * width;
            let full = self.locked[start..start + width].iter().all(|&c| c != empty);
            if full {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                self.locked.copy_within(start..start + width, write_y * width);
            }
        }

        self.locked[..write_y * width].fill(empty);
        cleared
    }
}

impl Simulation for Board {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn reset_state(&mut self) {
        self.locked.fill(TileCode::Empty.as_u8());
        self.score = 0;
        self.pending_shift = 0;
        self.active = ActivePiece::spawn(self.queue.draw(), self.width);
        self.compose();
    }

    fn advance_stride(&mut self) {
        if self.pending_shift != 0 {
            let moved = self.active.moved(self.pending_shift, 0);
            if self.fits(&moved) {
                self.active = moved;
            }
            self.pending_shift = 0;
            self.compose();
        }
    }

    fn advance_fall(&mut self) {
        let fallen = self.active.moved(0, 1);
        if self.fits(&fallen) {
            self.active = fallen;
        } else {
            self.lock_active();
            let rows = self.clear_full_rows();
            self.score += LINE_SCORES[rows.min(LINE_SCORES.len() - 1)];
            self.pending_shift = 0;
            self.spawn();
        }
        self.compose();
    }

    fn rotate_active_piece(&mut self) {
        let rotated = self.active.rotated();
        if self.fits(&rotated) {
            self.active = rotated;
            self.compose();
        }
    }

    fn shift_left(&mut self) {
        self.pending_shift = -1;
    }

    fn shift_right(&mut self) {
        self.pending_shift = 1;
    }

    fn current_score(&self) -> u32 {
        self.score
    }

    fn tile_buffer(&self) -> &[u8] {
        &self.tiles
    }
}
