//! Board renderer: grid lines plus one filled square per tile.
//!
//! Cells sit on a pitch of `cell_size + 1` pixels; the extra pixel is the grid
//! line. For a `W x H` board the surface is `(S+1)*W+1` by `(S+1)*H+1`, so the
//! last line of each axis lands on the final pixel.
//!
//! Every pass repaints the whole board. Rendering the same tiles twice gives
//! the same pixels.

use blockfall_core::TileView;

use crate::fb::Rgb;
use crate::surface::Surface;
use crate::types::TileCode;

pub const GRID_COLOR: Rgb = Rgb::from_hex(0xCCCCCC);

/// Painted for codes outside the tile palette.
pub const FALLBACK_COLOR: Rgb = Rgb::from_hex(0x000000);

/// Palette lookup. `None` for undefined codes.
pub fn tile_color(code: u8) -> Option<Rgb> {
    let hex = match TileCode::from_u8(code)? {
        TileCode::Empty => 0xFFFFFF,
        TileCode::Turquoise => 0x40E0D0,
        TileCode::Blue => 0x405BE0,
        TileCode::Orange => 0xF69114,
        TileCode::Yellow => 0xE8EA19,
        TileCode::Green => 0x01DB10,
        TileCode::Purple => 0xAD01DB,
        TileCode::Red => 0x920000,
    };
    Some(Rgb::from_hex(hex))
}

/// Counts from one tile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileStats {
    pub filled: usize,
    /// Cells painted with [`FALLBACK_COLOR`].
    pub fallbacks: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardView {
    width: u16,
    height: u16,
    cell_size: u16,
}

impl BoardView {
    pub fn new(width: u16, height: u16, cell_size: u16) -> Self {
        Self {
            width,
            height,
            cell_size: cell_size.max(1),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell_size(&self) -> u16 {
        self.cell_size
    }

    #[inline(always)]
    pub fn pitch(&self) -> u16 {
        self.cell_size + 1
    }

    /// Pixel size of the surface this board needs.
    pub fn surface_size(&self) -> (u16, u16) {
        (
            self.pitch() * self.width + 1,
            self.pitch() * self.height + 1,
        )
    }

    /// Clear, then draw the grid and every tile.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, view: &TileView<'_>) -> TileStats {
        surface.clear();
        self.draw_grid(surface);
        self.draw_tiles(surface, view)
    }

    /// `width + 1` vertical and `height + 1` horizontal lines, each spanning
    /// the full surface.
    pub fn draw_grid<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (sw, sh) = surface.size();
        let (max_x, max_y) = (sw.saturating_sub(1), sh.saturating_sub(1));
        let pitch = self.pitch();

        for i in 0..=self.width {
            let x = i * pitch;
            surface.line((x, 0), (x, max_y), GRID_COLOR);
        }
        for j in 0..=self.height {
            let y = j * pitch;
            surface.line((0, y), (max_x, y), GRID_COLOR);
        }
    }

    /// One fill per cell, in row-major order.
    pub fn draw_tiles<S: Surface + ?Sized>(&self, surface: &mut S, view: &TileView<'_>) -> TileStats {
        let pitch = self.pitch();
        let mut stats = TileStats::default();

        for row in 0..self.height {
            for col in 0..self.width {
                let code = view.get(row, col);
                let color = match code.and_then(tile_color) {
                    Some(color) => color,
                    None => {
                        match code {
                            Some(code) => tracing::warn!(row, col, code, "undefined tile code"),
                            None => tracing::warn!(row, col, len = view.len(), "tile missing from buffer"),
                        }
                        stats.fallbacks += 1;
                        FALLBACK_COLOR
                    }
                };
                surface.fill_rect(
                    col * pitch + 1,
                    row * pitch + 1,
                    self.cell_size,
                    self.cell_size,
                    color,
                );
                stats.filled += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;

    #[test]
    fn palette_matches_tile_codes() {
        assert_eq!(tile_color(1), Some(Rgb::WHITE));
        assert_eq!(tile_color(2), Some(Rgb::new(0x40, 0xE0, 0xD0)));
        assert_eq!(tile_color(8), Some(Rgb::new(0x92, 0, 0)));
        assert_eq!(tile_color(0), None);
        assert_eq!(tile_color(9), None);
    }

    #[test]
    fn surface_size_includes_grid() {
        assert_eq!(BoardView::new(10, 20, 1).surface_size(), (21, 41));
        assert_eq!(BoardView::new(10, 20, 3).surface_size(), (41, 81));
    }

    #[test]
    fn every_pixel_is_grid_or_tile() {
        let board = BoardView::new(3, 2, 2);
        let (w, h) = board.surface_size();
        let mut canvas = Canvas::with_background(w, h, Rgb::new(1, 2, 3));
        let tiles = [1u8, 2, 3, 4, 5, 6];

        let stats = board.render(&mut canvas, &TileView::from_slice(&tiles, 3, 2));
        assert_eq!(stats, TileStats { filled: 6, fallbacks: 0 });
        assert!(canvas.pixels().iter().all(|p| *p != Rgb::new(1, 2, 3)));
        assert_eq!(canvas.pixel(0, 0), Some(GRID_COLOR));
        assert_eq!(canvas.pixel(w - 1, h - 1), Some(GRID_COLOR));
        assert_eq!(canvas.pixel(1, 1), Some(Rgb::WHITE));
    }

    #[test]
    fn undefined_codes_use_fallback() {
        let board = BoardView::new(2, 1, 1);
        let mut canvas = Canvas::new(5, 3);
        let stats = board.draw_tiles(&mut canvas, &TileView::from_slice(&[0, 42], 2, 1));
        assert_eq!(stats.fallbacks, 2);
        assert_eq!(canvas.pixel(1, 1), Some(FALLBACK_COLOR));
    }
}
