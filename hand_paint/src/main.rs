//! hand_paint — command-line entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use hand_canvas::Rect;
use hand_paint::app::run;
use hand_paint::config::AppConfig;
use pinch_pen::{HandSelection, SessionConfig};

/// Draw on a virtual canvas with hand gestures
#[derive(Parser, Debug)]
#[command(name = "hand_paint")]
#[command(about = "Pinch to toggle the pen, pinch over the corner box to clear", long_about = None)]
struct Cli {
    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Thumb-to-ring distance (normalized) that counts as a pinch
    #[arg(long)]
    threshold: Option<f32>,

    /// Minimum seconds between pen toggles
    #[arg(long)]
    debounce: Option<f32>,

    /// Clear zone as left,top,width,height in pixels
    #[arg(long)]
    clear_zone: Option<Rect>,

    /// Leave the pen state alone when the clear zone fires
    #[arg(long)]
    keep_pen_on_clear: bool,

    /// Which hand drives the pen when several are visible
    #[arg(long, value_enum)]
    hand: Option<HandArg>,

    /// Do not draw the fingertip cursor
    #[arg(long)]
    no_cursor: bool,

    /// Do not mirror the camera image
    #[arg(long)]
    no_mirror: bool,

    /// Minimum detection confidence passed to the landmark model
    #[arg(long)]
    detection_confidence: Option<f32>,

    /// Minimum tracking confidence passed to the landmark model
    #[arg(long)]
    tracking_confidence: Option<f32>,

    /// Camera device index
    #[arg(long)]
    camera: Option<i32>,

    /// Python interpreter for the detector subprocess
    #[arg(long)]
    python: Option<PathBuf>,

    /// Path to the MediaPipe detector script
    #[arg(long)]
    detector: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum HandArg {
    First,
    Last,
}

impl From<HandArg> for HandSelection {
    fn from(arg: HandArg) -> Self {
        match arg {
            HandArg::First => HandSelection::First,
            HandArg::Last  => HandSelection::Last,
        }
    }
}

impl Cli {
    fn into_config(self) -> Result<AppConfig> {
        let mut cfg = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None       => AppConfig::default(),
        };

        let s = &mut cfg.session;
        if let Some(w) = self.width {
            s.canvas_width = w;
            if self.clear_zone.is_none() {
                s.clear_zone = SessionConfig::corner_zone(w);
            }
        }
        if let Some(h) = self.height { s.canvas_height = h; }
        if let Some(t) = self.threshold { s.pinch_threshold = t; }
        if let Some(d) = self.debounce { s.debounce_secs = d; }
        if let Some(z) = self.clear_zone { s.clear_zone = z; }
        if self.keep_pen_on_clear { s.cancel_pen_on_clear = false; }
        if let Some(h) = self.hand { s.hand_selection = h.into(); }

        if self.no_cursor { cfg.draw_cursor = false; }
        if self.no_mirror { cfg.mirror = false; }
        if let Some(c) = self.detection_confidence { cfg.detection_confidence = c; }
        if let Some(c) = self.tracking_confidence { cfg.tracking_confidence = c; }
        if let Some(i) = self.camera { cfg.camera_index = i; }
        if let Some(p) = self.python { cfg.python = p; }
        if let Some(p) = self.detector { cfg.detector_script = p; }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hand_paint=info,pinch_pen=info".into()),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║          HandPaint — Gesture Drawing Canvas          ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Mode: webcam + MediaPipe");
    #[cfg(not(feature = "camera"))]
    println!("  Mode: mouse simulation  (use --features camera for a webcam)");
    println!();

    let result = cli.into_config().and_then(|cfg| {
        info!(
            threshold = cfg.session.pinch_threshold,
            debounce_secs = cfg.session.debounce_secs,
            clear_zone = %cfg.session.clear_zone,
            cancel_pen_on_clear = cfg.session.cancel_pen_on_clear,
            "starting"
        );
        run(cfg)
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        let mut argv = vec!["hand_paint"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().into_config().unwrap()
    }

    #[test]
    fn no_flags_gives_defaults() {
        assert_eq!(parse(&[]), AppConfig::default());
    }

    #[test]
    fn flags_override_session() {
        let cfg = parse(&[
            "--threshold", "0.15",
            "--debounce", "1.0",
            "--keep-pen-on-clear",
            "--hand", "last",
            "--no-cursor",
        ]);
        assert_eq!(cfg.session.pinch_threshold, 0.15);
        assert_eq!(cfg.session.debounce_secs, 1.0);
        assert!(!cfg.session.cancel_pen_on_clear);
        assert_eq!(cfg.session.hand_selection, HandSelection::Last);
        assert!(!cfg.draw_cursor);
    }

    #[test]
    fn width_moves_default_clear_zone_to_new_corner() {
        let cfg = parse(&["--width", "800"]);
        assert_eq!(cfg.session.clear_zone, Rect::new(725.0, 0.0, 75.0, 75.0));
    }

    #[test]
    fn explicit_clear_zone_wins() {
        let cfg = parse(&["--width", "800", "--clear-zone", "0,0,50,50"]);
        assert_eq!(cfg.session.clear_zone, Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn bad_clear_zone_is_rejected() {
        assert!(Cli::try_parse_from(["hand_paint", "--clear-zone", "1,2"]).is_err());
    }

    #[test]
    fn invalid_values_fail_validation() {
        let cli = Cli::try_parse_from(["hand_paint", "--detection-confidence", "2"]).unwrap();
        assert!(cli.into_config().is_err());
    }

    #[test]
    fn unrepresentable_debounce_is_an_error_not_a_panic() {
        for value in ["inf", "1e20"] {
            let cli = Cli::try_parse_from(["hand_paint", "--debounce", value]).unwrap();
            let err = cli.into_config().unwrap_err();
            assert!(format!("{:#}", err).contains("debounce"));
        }
    }
}
