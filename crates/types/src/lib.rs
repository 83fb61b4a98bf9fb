//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by the engine, the input layer,
//! the loop controller and the terminal renderer. Everything here is plain
//! data with no dependencies.
//!
//! # Board Dimensions
//!
//! The playfield defaults to 10 columns by 20 rows. Tiles are stored row-major
//! (`index = row * width + col`) as single-byte [`TileCode`]s.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Host frame interval (~60 FPS) |
//! | `FALL_CADENCE_MS` | 300 | Default fall update interval |
//! | `SOFT_DROP_CADENCE_MS` | 50 | Fall interval while soft drop is held |
//! | `STRIDE_RATIO` | 0.5 | Stride threshold as a fraction of the fall interval |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Implicit key release on terminals without release events |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Action, TileCode};
//!
//! assert_eq!(TileCode::from_u8(2), Some(TileCode::Turquoise));
//! assert_eq!(TileCode::from_u8(0), None);
//!
//! assert_eq!(Action::from_str("moveLeft"), Some(Action::MoveLeft));
//! assert_eq!(Action::SoftDrop.storage_name(), "downKey");
//! ```

/// Default board width in cells.
pub const BOARD_WIDTH: u16 = 10;

/// Default board height in cells.
pub const BOARD_HEIGHT: u16 = 20;

/// Default cell size in canvas pixels (the grid adds one pixel of border).
pub const CELL_SIZE: u16 = 1;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS).
pub const FRAME_MS: u64 = 16;

/// Default fall cadence.
pub const FALL_CADENCE_MS: u64 = 300;

/// Fall cadence while the soft-drop key is held.
pub const SOFT_DROP_CADENCE_MS: u64 = 50;

/// Stride updates fire once the accumulator passes this fraction of the fall cadence.
///
/// Must stay within `(0, 1]`.
pub const STRIDE_RATIO: f64 = 0.5;

/// A held key counts as released after this long without a repeat.
pub const KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Line clear scoring table, indexed by rows cleared at once.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Occupancy/color class of one board cell.
///
/// The numeric values are the bytes the engine writes into its tile buffer.
/// `0` and anything above `8` are undefined.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileCode {
    Empty = 1,
    Turquoise = 2,
    Blue = 3,
    Orange = 4,
    Yellow = 5,
    Green = 6,
    Purple = 7,
    Red = 8,
}

impl TileCode {
    pub const ALL: [TileCode; 8] = [
        TileCode::Empty,
        TileCode::Turquoise,
        TileCode::Blue,
        TileCode::Orange,
        TileCode::Yellow,
        TileCode::Green,
        TileCode::Purple,
        TileCode::Red,
    ];

    /// Decode a raw tile byte.
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(TileCode::Empty),
            2 => Some(TileCode::Turquoise),
            3 => Some(TileCode::Blue),
            4 => Some(TileCode::Orange),
            5 => Some(TileCode::Yellow),
            6 => Some(TileCode::Green),
            7 => Some(TileCode::Purple),
            8 => Some(TileCode::Red),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_empty(self) -> bool {
        self == TileCode::Empty
    }
}

/// Remappable logical actions.
///
/// `Escape` (toggle pause) is deliberately absent: it is fixed and cannot be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Rotate the active piece clockwise (edge-triggered)
    RotateCw,
    /// Shift the active piece one column left (edge-triggered)
    MoveLeft,
    /// Shift the active piece one column right (edge-triggered)
    MoveRight,
    /// Accelerate the fall cadence while held (level-triggered)
    SoftDrop,
}

impl Action {
    /// Lookup order used when several actions share one key.
    pub const ALL: [Action; 4] = [
        Action::RotateCw,
        Action::MoveLeft,
        Action::SoftDrop,
        Action::MoveRight,
    ];

    /// Parse action from its camelCase name.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Action;
    ///
    /// assert_eq!(Action::from_str("rotateCw"), Some(Action::RotateCw));
    /// assert_eq!(Action::from_str("SOFTDROP"), Some(Action::SoftDrop));
    /// assert_eq!(Action::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotatecw" => Some(Action::RotateCw),
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "softdrop" => Some(Action::SoftDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::RotateCw => "rotateCw",
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::SoftDrop => "softDrop",
        }
    }

    /// Name under which the binding is persisted.
    pub fn storage_name(&self) -> &'static str {
        match self {
            Action::RotateCw => "rotateKey",
            Action::MoveLeft => "leftKey",
            Action::MoveRight => "rightKey",
            Action::SoftDrop => "downKey",
        }
    }

    /// Built-in key when nothing is stored.
    pub fn default_key(&self) -> &'static str {
        match self {
            Action::RotateCw => "w",
            Action::MoveLeft => "a",
            Action::MoveRight => "d",
            Action::SoftDrop => "s",
        }
    }

    /// Human readable label for the settings panel.
    pub fn label(&self) -> &'static str {
        match self {
            Action::RotateCw => "Rotate",
            Action::MoveLeft => "Left",
            Action::MoveRight => "Right",
            Action::SoftDrop => "Drop",
        }
    }

    /// Soft drop changes the fall cadence instead of issuing a command.
    pub fn is_level_triggered(&self) -> bool {
        matches!(self, Action::SoftDrop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(FALL_CADENCE_MS, 300);
        assert_eq!(SOFT_DROP_CADENCE_MS, 50);
        assert!(STRIDE_RATIO > 0.0 && STRIDE_RATIO <= 1.0);
    }

    #[test]
    fn tile_codes_round_trip_through_bytes() {
        for code in TileCode::ALL {
            assert_eq!(TileCode::from_u8(code.as_u8()), Some(code));
        }
        assert_eq!(TileCode::from_u8(0), None);
        assert_eq!(TileCode::from_u8(9), None);
    }

    #[test]
    fn default_keys_are_wasd() {
        let keys: Vec<&str> = Action::ALL.iter().map(|a| a.default_key()).collect();
        assert_eq!(keys, vec!["w", "a", "s", "d"]);
    }

    #[test]
    fn storage_names_are_distinct() {
        let mut names: Vec<&str> = Action::ALL.iter().map(|a| a.storage_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
