//! `minifb` windows: the drawing canvas and the diagnostic camera view.
//!
//! The canvas window is the only source of host events. In simulation mode
//! it also forwards mouse and key state to the simulated landmark source.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::{info, warn};

use hand_canvas::{Rect, StrokePoint};

use crate::app::{Host, HostEvent};
use crate::config::AppConfig;
use crate::sim::SimInput;
use crate::surface::{Color, Framebuffer, Surface};

const CANVAS_TITLE:     &str  = "HandPaint";
const DIAGNOSTIC_TITLE: &str  = "HandPaint Tracker";
const DIAGNOSTIC_W:     usize = 640;
const DIAGNOSTIC_H:     usize = 480;

// ════════════════════════════════════════════════════════════════════════════
// CanvasWindow
// ════════════════════════════════════════════════════════════════════════════

pub struct CanvasWindow {
    window: Window,
    buf:    Framebuffer,
}

impl CanvasWindow {
    fn open(width: usize, height: usize) -> Result<Self> {
        let window = Window::new(
            CANVAS_TITLE,
            width,
            height,
            WindowOptions { resize: false, ..WindowOptions::default() },
        )
        .map_err(|e| anyhow!("{}", e))
        .context("failed to open the canvas window")?;

        Ok(CanvasWindow { window, buf: Framebuffer::new(width, height) })
    }
}

impl Surface for CanvasWindow {
    fn fill_background(&mut self, color: Color) {
        self.buf.fill_background(color);
    }

    fn draw_filled_circle(&mut self, center: StrokePoint, radius: f32, color: Color) {
        self.buf.draw_filled_circle(center, radius, color);
    }

    fn draw_rect_outline(&mut self, rect: Rect, color: Color, line_width: u32) {
        self.buf.draw_rect_outline(rect, color, line_width);
    }

    fn present(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(self.buf.pixels(), self.buf.width(), self.buf.height())
            .map_err(|e| anyhow!("failed to present canvas: {}", e))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// WindowHost
// ════════════════════════════════════════════════════════════════════════════

pub struct WindowHost {
    canvas:     CanvasWindow,
    diagnostic: Window,
    sim_tx:     Option<Sender<SimInput>>,
    poll_delay: Duration,
}

impl WindowHost {
    /// Open both windows. `sim_tx` receives pointer input when running the
    /// simulated landmark source.
    pub fn open(cfg: &AppConfig, sim_tx: Option<Sender<SimInput>>) -> Result<Self> {
        let canvas = CanvasWindow::open(
            cfg.session.canvas_width as usize,
            cfg.session.canvas_height as usize,
        )?;

        let diagnostic = Window::new(
            DIAGNOSTIC_TITLE,
            DIAGNOSTIC_W,
            DIAGNOSTIC_H,
            WindowOptions { resize: true, ..WindowOptions::default() },
        )
        .map_err(|e| anyhow!("{}", e))
        .context("failed to open the diagnostic window")?;

        info!(
            width = cfg.session.canvas_width,
            height = cfg.session.canvas_height,
            "windows open"
        );

        Ok(WindowHost {
            canvas,
            diagnostic,
            sim_tx,
            poll_delay: Duration::from_millis(cfg.poll_delay_ms),
        })
    }

    fn forward_pointer(&self, tx: &Sender<SimInput>) {
        let w = &self.canvas.window;
        if let Some((x, y)) = w.get_mouse_pos(MouseMode::Discard) {
            let _ = tx.send(SimInput::Pointer {
                x:       x / self.canvas.buf.width() as f32,
                y:       y / self.canvas.buf.height() as f32,
                pinched: w.get_mouse_down(MouseButton::Left),
            });
        }
        let _ = tx.send(SimInput::RingTip(!w.is_key_down(Key::R)));
    }
}

impl Host for WindowHost {
    type Canvas = CanvasWindow;

    fn poll_events(&mut self) -> Vec<HostEvent> {
        // minifb only refreshes input state on update; skipped frames never
        // present, so pump it here
        self.canvas.window.update();
        if !self.canvas.window.is_open() {
            return vec![HostEvent::Quit];
        }

        let mut events = Vec::new();
        for key in self.canvas.window.get_keys_pressed(KeyRepeat::No) {
            let event = match key {
                Key::Q => HostEvent::Quit,
                _      => HostEvent::Other,
            };
            if let Some(tx) = &self.sim_tx {
                match key {
                    Key::F => { let _ = tx.send(SimInput::DropFrame); }
                    Key::H => { let _ = tx.send(SimInput::ToggleHand); }
                    _ => {}
                }
            }
            events.push(event);
        }

        if let Some(tx) = &self.sim_tx {
            self.forward_pointer(tx);
        }
        events
    }

    fn canvas(&mut self) -> &mut CanvasWindow {
        &mut self.canvas
    }

    fn show_diagnostic(&mut self, view: &Framebuffer) {
        if let Err(e) = self.diagnostic.update_with_buffer(view.pixels(), view.width(), view.height()) {
            warn!("diagnostic view not updated: {}", e);
        }
    }

    fn exit_requested(&mut self) -> bool {
        thread::sleep(self.poll_delay);
        self.diagnostic.update();
        self.diagnostic.is_key_down(Key::Escape)
    }

    fn frame_skipped(&mut self) {
        thread::sleep(self.poll_delay);
    }

    fn set_status(&mut self, status: &str) {
        self.canvas.window.set_title(status);
    }
}
