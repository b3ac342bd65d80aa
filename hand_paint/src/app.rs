//! The frame loop.
//!
//! One tick = one camera frame, processed to completion:
//!
//! 1. acquire a frame (a failure skips the tick, nothing else happens)
//! 2. detect hands
//! 3. [`Session::update`] — pen, strokes, clear zone
//! 4. compose and present the canvas
//! 5. compose and show the diagnostic view
//!
//! [`run_loop`] wraps ticks with the host's quit and exit-key checks.

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{error, info, warn};

use hand_canvas::HandSkeleton;
use pinch_pen::{FrameUpdate, Session, SessionConfig};

use crate::config::AppConfig;
use crate::render::{render_canvas, render_diagnostic, RenderStyle};
use crate::source::{LandmarkSource, SourceLost};
use crate::surface::{Framebuffer, Surface};
use crate::window::WindowHost;

// ════════════════════════════════════════════════════════════════════════════
// Host — windows and events
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Quit,
    Other,
}

/// The windowing side of the application.
pub trait Host {
    type Canvas: Surface;

    /// Drain everything that happened since the last poll. Never blocks.
    fn poll_events(&mut self) -> Vec<HostEvent>;

    fn canvas(&mut self) -> &mut Self::Canvas;

    fn show_diagnostic(&mut self, view: &Framebuffer);

    /// Wait briefly, then report whether the diagnostic view's exit key is
    /// down.
    fn exit_requested(&mut self) -> bool;

    /// Called instead of rendering when a frame could not be acquired.
    fn frame_skipped(&mut self) {}

    fn set_status(&mut self, _status: &str) {}
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// The frame could not be acquired; no state changed, nothing drawn.
    Skipped,
    Rendered(FrameUpdate),
}

pub struct App<S> {
    source:     S,
    session:    Session,
    style:      RenderStyle,
    diagnostic: Framebuffer,
}

impl<S: LandmarkSource> App<S> {
    pub fn new(source: S, config: SessionConfig, style: RenderStyle) -> Self {
        App {
            source,
            session:    Session::new(config),
            style,
            diagnostic: Framebuffer::new(1, 1),
        }
    }

    pub fn session(&self) -> &Session { &self.session }
    pub fn source(&self) -> &S { &self.source }

    /// Process one camera frame. `now` is the time since the session began.
    pub fn tick<H: Host>(&mut self, host: &mut H, now: Duration) -> Result<Tick> {
        let frame = match self.source.acquire_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("empty camera frame ignored: {:#}", e);
                return Ok(Tick::Skipped);
            }
        };

        let hands: Vec<HandSkeleton> = match self.source.detect_hands(&frame) {
            Ok(hands) => hands,
            Err(e) if e.downcast_ref::<SourceLost>().is_some() => {
                error!("hand detection is gone: {:#}", e);
                return Err(e);
            }
            Err(e) => {
                warn!("hand detection failed, treating frame as empty: {:#}", e);
                Vec::new()
            }
        };

        let update = self.session.update(&hands, now);
        if update.toggled {
            info!(pen = ?self.session.pen(), "pen toggled");
        }
        if update.cleared {
            info!("canvas cleared");
        }

        render_canvas(host.canvas(), &self.session, &self.style)?;
        host.set_status(&status_line(&self.session));

        render_diagnostic(&mut self.diagnostic, &frame, &hands);
        host.show_diagnostic(&self.diagnostic);

        Ok(Tick::Rendered(update))
    }
}

/// One-line summary for the canvas window title.
pub fn status_line(session: &Session) -> String {
    format!(
        "HandPaint — pen {}  ·  {} points",
        if session.pen().is_on() { "ON" } else { "off" },
        session.canvas().len()
    )
}

/// Tick until the host asks to quit or the diagnostic exit key is pressed.
/// A [`SourceLost`] error from the source ends the loop with that error.
///
/// `clock` returns the time elapsed since the session began.
pub fn run_loop<S, H, C>(app: &mut App<S>, host: &mut H, mut clock: C) -> Result<()>
where
    S: LandmarkSource,
    H: Host,
    C: FnMut() -> Duration,
{
    loop {
        if host.poll_events().contains(&HostEvent::Quit) {
            info!("quit requested");
            return Ok(());
        }

        if let Tick::Skipped = app.tick(host, clock())? {
            host.frame_skipped();
            continue;
        }

        if host.exit_requested() {
            info!("exit key pressed");
            return Ok(());
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Opens the landmark source (simulation by default, webcam with
/// `--features camera`) and both windows; any failure here is returned
/// before the loop starts. Resources are released when they drop.
pub fn run(cfg: AppConfig) -> Result<()> {
    let style = RenderStyle { draw_cursor: cfg.draw_cursor, ..RenderStyle::default() };

    #[cfg(not(feature = "camera"))]
    let (source, mut host) = {
        let (sim_tx, sim_rx) = std::sync::mpsc::channel();
        let source = crate::sim::SimLandmarkSource::new(
            sim_rx,
            cfg.session.canvas_width as usize,
            cfg.session.canvas_height as usize,
        );
        (source, WindowHost::open(&cfg, Some(sim_tx))?)
    };

    #[cfg(feature = "camera")]
    let (source, mut host) = {
        let source = crate::camera::CameraLandmarkSource::open(&cfg)?;
        (source, WindowHost::open(&cfg, None)?)
    };

    let mut app = App::new(source, cfg.session.clone(), style);
    let start = Instant::now();

    info!("entering frame loop");
    let result = run_loop(&mut app, &mut host, || start.elapsed());
    info!(points = app.session().canvas().len(), "session ended");
    result
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
