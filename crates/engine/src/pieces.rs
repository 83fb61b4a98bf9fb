//! Pieces module - tetromino shapes and pivot rotation
//!
//! Shapes are four mino offsets around a pivot cell at `(0, 0)`, with `y`
//! growing downwards. Rotation is a quarter turn about the pivot; there are no
//! wall kicks.

use crate::types::TileCode;

/// Offset of a single mino relative to the pivot.
pub type MinoOffset = (i8, i8);

/// Shape of a piece - four mino offsets.
pub type PieceShape = [MinoOffset; 4];

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Tile code written into the buffer for this kind.
    pub fn tile(self) -> TileCode {
        match self {
            PieceKind::I => TileCode::Turquoise,
            PieceKind::J => TileCode::Blue,
            PieceKind::L => TileCode::Orange,
            PieceKind::O => TileCode::Yellow,
            PieceKind::S => TileCode::Green,
            PieceKind::T => TileCode::Purple,
            PieceKind::Z => TileCode::Red,
        }
    }

    /// Spawn orientation.
    pub fn shape(self) -> PieceShape {
        match self {
            PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            PieceKind::O => [(0, -1), (1, -1), (0, 0), (1, 0)],
            PieceKind::T => [(0, -1), (-1, 0), (0, 0), (1, 0)],
            PieceKind::S => [(0, -1), (1, -1), (-1, 0), (0, 0)],
            PieceKind::Z => [(-1, -1), (0, -1), (0, 0), (1, 0)],
            PieceKind::J => [(-1, -1), (-1, 0), (0, 0), (1, 0)],
            PieceKind::L => [(1, -1), (-1, 0), (0, 0), (1, 0)],
        }
    }
}

/// Rotate a shape a quarter turn clockwise about the pivot.
pub fn rotate_cw(shape: &PieceShape) -> PieceShape {
    let mut out = *shape;
    for (dst, &(dx, dy)) in out.iter_mut().zip(shape.iter()) {
        *dst = (-dy, dx);
    }
    out
}

/// The falling piece: a kind, its current offsets and the pivot position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub x: i16,
    pub y: i16,
}

impl ActivePiece {
    /// Spawn a piece with its pivot on row 1, centred horizontally.
    pub fn spawn(kind: PieceKind, board_width: u16) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            x: (board_width as i16) / 2 - 1,
            y: 1,
        }
    }

    /// Absolute board coordinates of the four minos.
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .iter()
            .map(move |&(dx, dy)| (self.x + dx as i16, self.y + dy as i16))
    }

    pub fn moved(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Clockwise rotation; the square piece is rotation invariant.
    pub fn rotated(&self) -> Self {
        if self.kind == PieceKind::O {
            return *self;
        }
        Self {
            shape: rotate_cw(&self.shape),
            ..*self
        }
    }
}
