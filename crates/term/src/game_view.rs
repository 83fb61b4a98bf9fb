//! GameView: composes the board canvas, overlays and score into a
//! terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use blockfall_core::{Controller, Overlay, Simulation, TileView};

use crate::board_view::{BoardView, TileStats};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::overlay::{self, Rect};
use crate::surface::Canvas;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct GameView {
    board: BoardView,
    canvas: Canvas,
    anchor_y: AnchorY,
}

impl GameView {
    pub fn new(board: BoardView) -> Self {
        let (w, h) = board.surface_size();
        Self {
            board,
            canvas: Canvas::new(w, h),
            anchor_y: AnchorY::Center,
        }
    }

    /// Size the board after `sim`'s dimensions.
    pub fn for_simulation<S: Simulation + ?Sized>(sim: &S, cell_size: u16) -> Self {
        Self::new(BoardView::new(sim.width(), sim.height(), cell_size))
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn board(&self) -> &BoardView {
        &self.board
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Terminal cells covered by the canvas (two pixel rows per cell).
    pub fn canvas_cells(&self) -> (u16, u16) {
        let (w, h) = self.board.surface_size();
        (w, h.div_ceil(2))
    }

    /// Canvas plus the score line beneath it.
    pub fn footprint(&self) -> (u16, u16) {
        let (w, h) = self.canvas_cells();
        (w, h + 1)
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// Returns the tile pass counts when the board was repainted, which only
    /// happens while playing.
    pub fn render_into<S: Simulation + ?Sized>(
        &mut self,
        sim: &S,
        ctl: &Controller,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> Option<TileStats> {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Default::default());

        let (foot_w, foot_h) = self.footprint();
        let start_x = viewport.width.saturating_sub(foot_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(foot_h) / 2,
            AnchorY::Top => 0,
        };
        let (canvas_w, canvas_h) = self.canvas_cells();
        let area = Rect::new(start_x, start_y, canvas_w, canvas_h);

        let stats = match ctl.overlay() {
            Overlay::Playing => {
                let view = TileView::bind(sim);
                let stats = self.board.render(&mut self.canvas, &view);
                if stats.fallbacks > 0 {
                    tracing::debug!(fallbacks = stats.fallbacks, "frame had undefined tiles");
                }
                fb.blit_half_blocks(start_x, start_y, &self.canvas, Rgb::BLACK);
                Some(stats)
            }
            Overlay::Paused => {
                overlay::draw_pause_panel(fb, area, ctl.menu());
                None
            }
            Overlay::Settings => {
                overlay::draw_settings_panel(fb, area, ctl.menu(), ctl.bindings());
                None
            }
        };

        overlay::draw_score(fb, start_x, start_y + canvas_h, sim.current_score());
        stats
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<S: Simulation + ?Sized>(
        &mut self,
        sim: &S,
        ctl: &Controller,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(sim, ctl, viewport, &mut fb);
        fb
    }

    /// Shown when the terminal is smaller than the footprint.
    pub fn too_small(&self, viewport: Viewport) -> bool {
        let (w, h) = self.footprint();
        viewport.width < w || viewport.height < h
    }

    pub fn render_too_small(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Default::default());
        let (w, h) = self.footprint();
        let style = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let n = fb.put_str(0, 0, "Terminal too small, need ", style);
        let n = n + fb.put_u32(n, 0, w as u32, style);
        let n = n + fb.put_str(n, 0, "x", style);
        fb.put_u32(n, 0, h as u32, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::input::BindingTable;
    use blockfall_core::{Board, ClockConfig, Event};
    use blockfall_core::input::KeyId;

    use crate::board_view::GRID_COLOR;
    use crate::fb::HALF_BLOCK;

    fn controller() -> Controller {
        Controller::new(ClockConfig::default(), BindingTable::in_memory()).unwrap()
    }

    fn text(fb: &FrameBuffer) -> String {
        fb.cells().iter().map(|c| c.ch).collect()
    }

    #[test]
    fn default_board_footprint() {
        let board = Board::new(1);
        let view = GameView::for_simulation(&board, 1);
        assert_eq!(view.board().surface_size(), (21, 41));
        assert_eq!(view.canvas_cells(), (21, 21));
        assert_eq!(view.footprint(), (21, 22));
    }

    #[test]
    fn playing_blits_canvas_and_score() {
        let board = Board::new(1);
        let ctl = controller();
        let mut view = GameView::for_simulation(&board, 1).with_anchor_y(AnchorY::Top);

        let fb = view.render(&board, &ctl, Viewport::new(21, 22));
        let corner = fb.get(0, 0).unwrap();
        assert_eq!(corner.ch, HALF_BLOCK);
        assert_eq!(corner.style.fg, GRID_COLOR);
        assert!(text(&fb).contains("Score: 0"));
    }

    #[test]
    fn paused_replaces_canvas_with_panel() {
        let board = Board::new(1);
        let mut ctl = controller();
        ctl.handle(Event::KeyDown(KeyId::escape()));
        let mut view = GameView::for_simulation(&board, 1);

        let mut fb = FrameBuffer::new(1, 1);
        let stats = view.render_into(&board, &ctl, Viewport::new(30, 24), &mut fb);
        assert_eq!(stats, None);
        assert!(!fb.cells().iter().any(|c| c.ch == HALF_BLOCK));
        assert!(text(&fb).contains("PAUSED"));
        assert!(text(&fb).contains("Score: 0"));
    }

    #[test]
    fn reports_too_small_viewport() {
        let board = Board::new(1);
        let view = GameView::for_simulation(&board, 1);
        assert!(view.too_small(Viewport::new(20, 40)));
        assert!(!view.too_small(Viewport::new(21, 22)));
    }
}
