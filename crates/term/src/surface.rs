//! Drawing surface seam and the pixel canvas behind it.

use crate::fb::Rgb;

/// The four primitives the board renderer needs.
pub trait Surface {
    /// `(width, height)` in pixels.
    fn size(&self) -> (u16, u16);

    fn clear(&mut self);

    /// Straight line between two pixel coordinates, both ends inclusive.
    fn line(&mut self, from: (u16, u16), to: (u16, u16), color: Rgb);

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb);
}

/// An in-memory RGB pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    background: Rgb,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_background(width, height, Rgb::BLACK)
    }

    pub fn with_background(width: u16, height: u16, background: Rgb) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = color;
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    fn line(&mut self, from: (u16, u16), to: (u16, u16), color: Rgb) {
        // Bresenham; grid lines are axis-aligned so this is mostly one loop.
        let (mut x, mut y) = (from.0 as i32, from.1 as i32);
        let (x1, y1) = (to.0 as i32, to.1 as i32);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) {
        if x >= self.width {
            return;
        }
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for py in y..y_end {
            let row = py as usize * self.width as usize;
            self.pixels[row + x as usize..row + x_end as usize].fill(color);
        }
    }
}
