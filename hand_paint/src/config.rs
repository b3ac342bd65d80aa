//! Application configuration.
//!
//! Defaults reproduce the classic layout: a 600×600 white canvas, pinch at
//! 0.10, half-second debounce, and a 75 px clear zone in the top-right
//! corner. A JSON file can override any subset of fields; command-line flags
//! are applied on top of that in `main.rs`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use pinch_pen::SessionConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session:              SessionConfig,
    /// Draw the red marker at the fingertip.
    pub draw_cursor:          bool,
    /// Flip camera frames horizontally for a selfie view.
    pub mirror:               bool,
    /// Passed through to the landmark model.
    pub detection_confidence: f32,
    pub tracking_confidence:  f32,
    pub camera_index:         i32,
    pub python:               PathBuf,
    pub detector_script:      PathBuf,
    /// Pause before polling the diagnostic view for the exit key.
    pub poll_delay_ms:        u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            session:              SessionConfig::default(),
            draw_cursor:          true,
            mirror:               true,
            detection_confidence: 0.5,
            tracking_confidence:  0.4,
            camera_index:         0,
            python:               PathBuf::from("python3"),
            detector_script:      PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/scripts/hand_detect.py")),
            poll_delay_ms:        5,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.session;
        ensure!(s.canvas_width > 0 && s.canvas_height > 0, "canvas size must be non-zero");
        ensure!(
            s.pinch_threshold.is_finite() && s.pinch_threshold > 0.0,
            "pinch threshold must be a positive number, got {}", s.pinch_threshold
        );
        ensure!(
            s.debounce_secs >= 0.0 && Duration::try_from_secs_f32(s.debounce_secs).is_ok(),
            "debounce window must be a non-negative number of seconds, got {}", s.debounce_secs
        );
        for (name, v) in [
            ("detection confidence", self.detection_confidence),
            ("tracking confidence", self.tracking_confidence),
        ] {
            ensure!((0.0..=1.0).contains(&v), "{} must be within 0..=1, got {}", name, v);
        }
        Ok(())
    }
}
