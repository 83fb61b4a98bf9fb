//! Pause and settings panels, plus the score readout.
//!
//! Panels are drawn in place of the board canvas and use its footprint, so
//! switching overlays never moves anything else on screen.

use blockfall_core::input::BindingTable;
use blockfall_core::{MenuState, PauseButton};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Action;

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }
}

const PANEL_BG: Rgb = Rgb::new(24, 24, 32);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const FOCUS_BG: Rgb = Rgb::new(70, 90, 160);
const HINT: Rgb = Rgb::new(130, 130, 140);

fn panel_style() -> CellStyle {
    CellStyle::plain(TEXT, PANEL_BG)
}

fn title_style() -> CellStyle {
    CellStyle {
        bold: true,
        ..panel_style()
    }
}

fn row_style(focused: bool) -> CellStyle {
    if focused {
        CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::WHITE, FOCUS_BG)
        }
    } else {
        panel_style()
    }
}

fn hint_style() -> CellStyle {
    CellStyle {
        dim: true,
        ..CellStyle::plain(HINT, PANEL_BG)
    }
}

fn background(fb: &mut FrameBuffer, area: Rect) {
    fb.fill_rect(area.x, area.y, area.w, area.h, ' ', panel_style());
}

fn centered(fb: &mut FrameBuffer, area: Rect, y: u16, text: &str, style: CellStyle) {
    let w = text.chars().count() as u16;
    let x = area.x + area.w.saturating_sub(w) / 2;
    fb.put_str(x, y, text, style);
}

/// A full-width row, highlighted when focused.
fn button_row(fb: &mut FrameBuffer, area: Rect, y: u16, text: &str, focused: bool) {
    let style = row_style(focused);
    fb.fill_rect(area.x + 1, y, area.w.saturating_sub(2), 1, ' ', style);
    centered(fb, area, y, text, style);
}

pub fn draw_pause_panel(fb: &mut FrameBuffer, area: Rect, menu: &MenuState) {
    background(fb, area);

    let mut y = area.y + 1;
    centered(fb, area, y, "PAUSED", title_style());
    y += 2;

    for button in PauseButton::ALL {
        button_row(fb, area, y, button.label(), button == menu.focused_button());
        y += 2;
    }

    let hint_y = (area.y + area.h).saturating_sub(2);
    if hint_y > y {
        centered(fb, area, hint_y, "Esc resume", hint_style());
    }
}

pub fn draw_settings_panel(
    fb: &mut FrameBuffer,
    area: Rect,
    menu: &MenuState,
    bindings: &BindingTable,
) {
    background(fb, area);

    let mut y = area.y + 1;
    centered(fb, area, y, "CONTROLS", title_style());
    y += 2;

    let label_w = Action::ALL
        .iter()
        .map(|a| a.label().len() as u16)
        .max()
        .unwrap_or(0);

    for (action, key) in bindings.iter() {
        let focused = action == menu.focused_action();
        let style = row_style(focused);
        fb.fill_rect(area.x + 1, y, area.w.saturating_sub(2), 1, ' ', style);

        let x = area.x + 2;
        fb.put_str(x, y, action.label(), style);
        let key_x = x + label_w + 2;
        if menu.capturing() == Some(action) {
            fb.put_str(key_x, y, "press a key", style);
        } else {
            // Display renders " " as "Space".
            fb.put_str(key_x, y, &key.to_string(), style);
        }
        y += 2;
    }

    if !bindings.is_persistent() && y < area.y + area.h {
        centered(fb, area, y, "not saved", hint_style());
    }

    let hint_y = (area.y + area.h).saturating_sub(2);
    if hint_y > y {
        centered(fb, area, hint_y, "Enter set  Esc back", hint_style());
    }
}

/// `Score: N` at `(x, y)`.
pub fn draw_score(fb: &mut FrameBuffer, x: u16, y: u16, score: u32) {
    let style = CellStyle::default();
    let n = fb.put_str(x, y, "Score: ", style);
    fb.put_u32(x + n, y, score, style);
}
