//! Framebuffer and style types for terminal output.

use crate::surface::{Canvas, Surface};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn plain(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::plain(Rgb::new(220, 220, 220), Rgb::BLACK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Upper half block: foreground paints the top pixel, background the bottom.
pub const HALF_BLOCK: char = '▀';

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write `s` left to right, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
        cx - x
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, mut value: u32, style: CellStyle) -> u16 {
        let mut digits = [0u8; 10];
        let mut n = 0;
        loop {
            digits[n] = b'0' + (value % 10) as u8;
            n += 1;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        for (i, d) in digits[..n].iter().rev().enumerate() {
            self.put_char(x.saturating_add(i as u16), y, *d as char, style);
        }
        n as u16
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Copy a pixel canvas in at `(x, y)`, two pixel rows per terminal row.
    ///
    /// An odd final pixel row is paired with `pad`.
    pub fn blit_half_blocks(&mut self, x: u16, y: u16, canvas: &Canvas, pad: Rgb) {
        let (w, h) = canvas.size();
        for ty in 0..h.div_ceil(2) {
            let py = ty * 2;
            for px in 0..w {
                let upper = canvas.pixel(px, py).unwrap_or(pad);
                let lower = canvas.pixel(px, py + 1).unwrap_or(pad);
                self.put_char(
                    x.saturating_add(px),
                    y.saturating_add(ty),
                    HALF_BLOCK,
                    CellStyle::plain(upper, lower),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_u32_writes_digits() {
        let mut fb = FrameBuffer::new(12, 1);
        let style = CellStyle::default();
        assert_eq!(fb.put_u32(0, 0, 0, style), 1);
        assert_eq!(fb.put_u32(2, 0, 1200, style), 4);
        let text: String = fb.cells().iter().map(|c| c.ch).collect();
        assert_eq!(text.trim_end(), "0 1200");
    }

    #[test]
    fn put_str_clips_at_edge() {
        let mut fb = FrameBuffer::new(3, 1);
        assert_eq!(fb.put_str(1, 0, "abc", CellStyle::default()), 2);
        assert_eq!(fb.get(2, 0).unwrap().ch, 'b');
    }

    #[test]
    fn half_blocks_pair_pixel_rows() {
        let mut canvas = Canvas::new(2, 3);
        canvas.fill_rect(0, 0, 2, 1, Rgb::WHITE);
        canvas.fill_rect(0, 1, 2, 1, Rgb::new(1, 2, 3));
        canvas.fill_rect(0, 2, 2, 1, Rgb::new(9, 9, 9));

        let mut fb = FrameBuffer::new(2, 2);
        fb.blit_half_blocks(0, 0, &canvas, Rgb::BLACK);

        let top = fb.get(1, 0).unwrap();
        assert_eq!(top.ch, HALF_BLOCK);
        assert_eq!(top.style.fg, Rgb::WHITE);
        assert_eq!(top.style.bg, Rgb::new(1, 2, 3));

        let bottom = fb.get(0, 1).unwrap();
        assert_eq!(bottom.style.fg, Rgb::new(9, 9, 9));
        assert_eq!(bottom.style.bg, Rgb::BLACK);
    }
}
