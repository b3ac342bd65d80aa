//! Landmark sources — the camera + detector pair that feeds the pipeline.
//!
//! The render loop only sees [`LandmarkSource`]; whether frames come from a
//! webcam and a MediaPipe subprocess or from the mouse-driven simulator is
//! decided once at startup.

use std::fmt;

use anyhow::Result;

use hand_canvas::HandSkeleton;

/// One camera image, 8-bit BGR, row-major, no padding.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width:  usize,
    pub height: usize,
    pub bgr:    Vec<u8>,
}

impl Frame {
    /// A frame filled with a single `(b, g, r)` color.
    pub fn solid(width: usize, height: usize, bgr: [u8; 3]) -> Self {
        Frame { width, height, bgr: bgr.repeat(width * height) }
    }

    pub fn channels(&self) -> usize { 3 }
}

/// Error marking a source that can produce nothing more, such as a detector
/// process that has exited. The frame loop stops on it instead of skipping.
#[derive(Debug)]
pub struct SourceLost(pub String);

impl fmt::Display for SourceLost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for SourceLost {}

/// Produces camera frames and the hands detected in them.
pub trait LandmarkSource {
    /// Block until the next frame is available. An error means this frame
    /// is lost; the caller skips it and tries again next tick.
    fn acquire_frame(&mut self) -> Result<Frame>;

    /// Hands in `frame`, in detector order. Return [`SourceLost`] when no
    /// further detection is possible; any other error only costs this frame.
    fn detect_hands(&mut self, frame: &Frame) -> Result<Vec<HandSkeleton>>;
}
