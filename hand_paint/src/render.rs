//! Per-frame composition of the drawing canvas and the diagnostic view.

use anyhow::Result;

use hand_canvas::HandSkeleton;
use pinch_pen::Session;

use crate::source::Frame;
use crate::surface::{Color, Framebuffer, Surface, BLACK, GREEN, RED, WHITE};

/// Fixed look of the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    pub background:      Color,
    pub stroke_color:    Color,
    pub stroke_radius:   f32,
    pub cursor_color:    Color,
    pub cursor_radius:   f32,
    pub zone_color:      Color,
    pub zone_line_width: u32,
    pub draw_cursor:     bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            background:      WHITE,
            stroke_color:    BLACK,
            stroke_radius:   7.0,
            cursor_color:    RED,
            cursor_radius:   4.0,
            zone_color:      BLACK,
            zone_line_width: 5,
            draw_cursor:     true,
        }
    }
}

/// Compose the canvas: background, every stroke point, the cursor, then the
/// clear-zone outline on top. Presents when done.
pub fn render_canvas<S: Surface + ?Sized>(
    surface: &mut S,
    session: &Session,
    style:   &RenderStyle,
) -> Result<()> {
    surface.fill_background(style.background);

    for point in session.canvas().all_points() {
        surface.draw_filled_circle(*point, style.stroke_radius, style.stroke_color);
    }

    if style.draw_cursor {
        if let Some(pointer) = session.pointer() {
            surface.draw_filled_circle(pointer, style.cursor_radius, style.cursor_color);
        }
    }

    surface.draw_rect_outline(session.clear_zone(), style.zone_color, style.zone_line_width);
    surface.present()
}

const BONE_COLOR:   Color = WHITE;
const JOINT_COLOR:  Color = RED;
const JOINT_RADIUS: f32   = 3.0;

/// Camera image with every detected hand's skeleton drawn over it.
pub fn render_diagnostic(view: &mut Framebuffer, frame: &Frame, hands: &[HandSkeleton]) {
    view.blit_frame(frame);
    let (w, h) = (frame.width as u32, frame.height as u32);

    for hand in hands {
        for (a, b) in hand.bones() {
            view.draw_line(a.to_screen(w, h), b.to_screen(w, h), BONE_COLOR);
        }
        for (_, lm) in hand.present() {
            view.draw_filled_circle(lm.to_screen(w, h), JOINT_RADIUS, JOINT_COLOR);
        }
    }

    if hands.is_empty() {
        // small marker in the corner so a live-but-empty view is obvious
        view.fill_rect(4, 4, 12, 12, GREEN);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
