//! Drawing surfaces.
//!
//! [`Surface`] is the small set of primitives the render loop needs.
//! [`Framebuffer`] implements it in software over a packed `0xAARRGGBB`
//! buffer, which is what `minifb` windows display.

use anyhow::Result;

use hand_canvas::{Rect, StrokePoint};

use crate::source::Frame;

/// Packed ARGB color (`0xAARRGGBB`).
pub type Color = u32;

pub const WHITE: Color = 0xFFFFFFFF;
pub const BLACK: Color = 0xFF000000;
pub const RED:   Color = 0xFFFF0000;
pub const GREEN: Color = 0xFF00C800;

// ════════════════════════════════════════════════════════════════════════════
// Surface
// ════════════════════════════════════════════════════════════════════════════

/// A display the canvas can be composed onto.
pub trait Surface {
    fn fill_background(&mut self, color: Color);
    fn draw_filled_circle(&mut self, center: StrokePoint, radius: f32, color: Color);
    /// Outline drawn inward from the rectangle's edges, `line_width` pixels thick.
    fn draw_rect_outline(&mut self, rect: Rect, color: Color, line_width: u32);
    /// Make everything drawn since the last call visible.
    fn present(&mut self) -> Result<()>;
}

// ════════════════════════════════════════════════════════════════════════════
// Framebuffer
// ════════════════════════════════════════════════════════════════════════════

pub struct Framebuffer {
    width:  usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer { width, height, pixels: vec![BLACK; width * height] }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn pixels(&self) -> &[u32] { &self.pixels }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Change dimensions; contents are reset when the size changes.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![BLACK; width * height];
        }
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// Fill the half-open pixel span `[x0, x1) × [y0, y1)`, clipped.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let x0 = x0.clamp(0, self.width as i64) as usize;
        let x1 = x1.clamp(0, self.width as i64) as usize;
        let y0 = y0.clamp(0, self.height as i64) as usize;
        let y1 = y1.clamp(0, self.height as i64) as usize;
        for row in y0..y1 {
            self.pixels[row * self.width + x0..row * self.width + x1.max(x0)].fill(color);
        }
    }

    /// One-pixel line (Bresenham).
    pub fn draw_line(&mut self, a: StrokePoint, b: StrokePoint, color: Color) {
        let (mut x0, mut y0) = (a.x.round() as i64, a.y.round() as i64);
        let (x1, y1) = (b.x.round() as i64, b.y.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x0 += sx; }
            if e2 <= dx { err += dx; y0 += sy; }
        }
    }

    /// Copy a camera frame in, resizing to match it.
    pub fn blit_frame(&mut self, frame: &Frame) {
        self.resize(frame.width, frame.height);
        for (dst, bgr) in self.pixels.iter_mut().zip(frame.bgr.chunks_exact(3)) {
            *dst = 0xFF000000 | (bgr[2] as u32) << 16 | (bgr[1] as u32) << 8 | bgr[0] as u32;
        }
    }
}

impl Surface for Framebuffer {
    fn fill_background(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn draw_filled_circle(&mut self, center: StrokePoint, radius: f32, color: Color) {
        let cx = center.x.round() as i64;
        let cy = center.y.round() as i64;
        let r = radius.round().max(0.0) as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn draw_rect_outline(&mut self, rect: Rect, color: Color, line_width: u32) {
        let l = rect.left.round() as i64;
        let t = rect.top.round() as i64;
        let r = rect.right().round() as i64;
        let b = rect.bottom().round() as i64;
        let w = line_width.max(1) as i64;
        self.fill_rect(l, t, r, t + w, color);
        self.fill_rect(l, b - w, r, b, color);
        self.fill_rect(l, t, l + w, b, color);
        self.fill_rect(r - w, t, r, b, color);
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_background_covers_everything() {
        let mut fb = Framebuffer::new(8, 4);
        fb.fill_background(WHITE);
        assert!(fb.pixels().iter().all(|&p| p == WHITE));
    }

    #[test]
    fn circle_is_round_and_clipped() {
        let mut fb = Framebuffer::new(20, 20);
        fb.fill_background(WHITE);
        fb.draw_filled_circle(StrokePoint::new(10.0, 10.0), 3.0, BLACK);
        assert_eq!(fb.pixel(10, 10), Some(BLACK));
        assert_eq!(fb.pixel(13, 10), Some(BLACK));
        assert_eq!(fb.pixel(10, 7), Some(BLACK));
        // corner of the bounding box lies outside the circle
        assert_eq!(fb.pixel(13, 13), Some(WHITE));

        // partly off-surface must not panic
        fb.draw_filled_circle(StrokePoint::new(-1.0, 19.0), 4.0, RED);
        assert_eq!(fb.pixel(0, 19), Some(RED));
    }

    #[test]
    fn rect_outline_is_drawn_inward() {
        let mut fb = Framebuffer::new(600, 600);
        fb.fill_background(WHITE);
        fb.draw_rect_outline(Rect::new(525.0, 0.0, 75.0, 75.0), BLACK, 5);
        assert_eq!(fb.pixel(525, 0),  Some(BLACK));
        assert_eq!(fb.pixel(599, 74), Some(BLACK));
        assert_eq!(fb.pixel(529, 37), Some(BLACK));
        assert_eq!(fb.pixel(530, 37), Some(WHITE));
        assert_eq!(fb.pixel(560, 37), Some(WHITE));
        assert_eq!(fb.pixel(524, 37), Some(WHITE));
        assert_eq!(fb.pixel(560, 75), Some(WHITE));
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut fb = Framebuffer::new(10, 10);
        fb.draw_line(StrokePoint::new(1.0, 1.0), StrokePoint::new(8.0, 5.0), GREEN);
        assert_eq!(fb.pixel(1, 1), Some(GREEN));
        assert_eq!(fb.pixel(8, 5), Some(GREEN));
        assert_eq!(fb.pixels().iter().filter(|&&p| p == GREEN).count(), 8);
    }

    #[test]
    fn blit_converts_bgr_and_resizes() {
        let frame = Frame { width: 2, height: 1, bgr: vec![255, 0, 0, 0, 0, 255] };
        let mut fb = Framebuffer::new(4, 4);
        fb.blit_frame(&frame);
        assert_eq!((fb.width(), fb.height()), (2, 1));
        assert_eq!(fb.pixel(0, 0), Some(0xFF0000FF));
        assert_eq!(fb.pixel(1, 0), Some(RED));
    }
}
