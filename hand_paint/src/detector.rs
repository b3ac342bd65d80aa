//! Hand-landmark detection via a MediaPipe subprocess.
//!
//! The Python helper (`scripts/hand_detect.py`) prints `READY` once the model
//! is loaded, then for every request reads
//!
//! ```text
//! u32 LE width │ u32 LE height │ u32 LE channels │ width·height·channels bytes (BGR)
//! ```
//!
//! from stdin and answers with one JSON line:
//!
//! ```text
//! {"hands": [{"handedness": "Right", "score": 0.97,
//!             "landmarks": [{"x": 0.41, "y": 0.63, "z": -0.02}, …]}],
//!  "error": null}
//! ```

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use hand_canvas::{HandSkeleton, Landmark};

use crate::source::{Frame, SourceLost};

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    #[serde(default)]
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionReply {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode one reply line into skeletons, in the order the detector listed
/// them.
pub fn parse_reply(line: &str) -> Result<Vec<HandSkeleton>> {
    let reply: DetectionReply = serde_json::from_str(line.trim())
        .with_context(|| format!("malformed detector reply: {}", line.trim()))?;

    if let Some(error) = reply.error {
        bail!("detector error: {}", error);
    }

    Ok(reply
        .hands
        .into_iter()
        .map(|hand| {
            debug!(
                handedness = %hand.handedness,
                score = hand.score,
                keypoints = hand.landmarks.len(),
                "hand detected"
            );
            HandSkeleton::from_landmarks(hand.landmarks.into_iter().map(|lm| Landmark::new(lm.x, lm.y)))
        })
        .collect())
}

// ════════════════════════════════════════════════════════════════════════════
// MediapipeDetector
// ════════════════════════════════════════════════════════════════════════════

/// A running detector subprocess. Killed on drop.
pub struct MediapipeDetector {
    process: Child,
    stdout:  BufReader<ChildStdout>,
}

impl MediapipeDetector {
    /// Start `python script` and wait for it to report ready.
    ///
    /// The confidences are passed through to the model unchanged.
    pub fn spawn(
        python:               &Path,
        script:               &Path,
        detection_confidence: f32,
        tracking_confidence:  f32,
    ) -> Result<Self> {
        if !script.exists() {
            bail!("hand detection script not found at {}", script.display());
        }

        info!(script = %script.display(), "starting MediaPipe hand detector");

        let mut process = Command::new(python)
            .arg(script)
            .arg("--detection-confidence")
            .arg(detection_confidence.to_string())
            .arg("--tracking-confidence")
            .arg(tracking_confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to start {}", python.display()))?;

        let stdout = process.stdout.take().context("detector stdout not captured")?;
        let mut stdout = BufReader::new(stdout);

        let mut ready = String::new();
        stdout.read_line(&mut ready).context("detector closed before signalling ready")?;
        if ready.trim() != "READY" {
            let _ = process.kill();
            bail!("detector did not signal ready, got: {:?}", ready.trim());
        }

        info!("hand detector ready");
        Ok(MediapipeDetector { process, stdout })
    }

    /// Run detection on one frame.
    ///
    /// A reply carrying an `error` only fails this frame. Any failure on the
    /// pipes means the request stream is broken for good, and is reported
    /// as [`SourceLost`].
    pub fn detect(&mut self, frame: &Frame) -> Result<Vec<HandSkeleton>> {
        let mut line = String::new();
        let exchanged = self.send(frame).and_then(|()| match self.stdout.read_line(&mut line)? {
            0 => bail!("end of output"),
            _ => Ok(()),
        });
        if let Err(e) = exchanged {
            return Err(self.lost(e));
        }
        parse_reply(&line)
    }

    fn send(&mut self, frame: &Frame) -> Result<()> {
        let stdin = self.process.stdin.as_mut().ok_or_else(|| anyhow!("stdin closed"))?;
        stdin.write_all(&(frame.width as u32).to_le_bytes())?;
        stdin.write_all(&(frame.height as u32).to_le_bytes())?;
        stdin.write_all(&(frame.channels() as u32).to_le_bytes())?;
        stdin.write_all(&frame.bgr)?;
        stdin.flush()?;
        Ok(())
    }

    fn lost(&mut self, cause: anyhow::Error) -> anyhow::Error {
        let status = match self.process.try_wait() {
            Ok(Some(status)) => status.to_string(),
            _                => "still running".to_string(),
        };
        anyhow!(SourceLost(format!("hand detector stopped ({}): {:#}", status, cause)))
    }
}

impl Drop for MediapipeDetector {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
