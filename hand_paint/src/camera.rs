//! Webcam landmark source (feature = "camera").
//!
//! Frames come from OpenCV's `VideoCapture`, are mirrored for a selfie view
//! when configured, and are handed to the MediaPipe subprocess for
//! detection.

use anyhow::{anyhow, bail, Context, Result};
use opencv::{
    core::{self, Mat},
    prelude::*,
    videoio::{self, VideoCapture},
};
use tracing::info;

use hand_canvas::HandSkeleton;

use crate::config::AppConfig;
use crate::detector::MediapipeDetector;
use crate::source::{Frame, LandmarkSource};

pub struct CameraLandmarkSource {
    capture:  VideoCapture,
    detector: MediapipeDetector,
    mirror:   bool,
    raw:      Mat,
}

impl CameraLandmarkSource {
    /// Open the camera and start the detector. Either failing is fatal.
    pub fn open(cfg: &AppConfig) -> Result<Self> {
        info!(index = cfg.camera_index, "opening camera");
        let capture = VideoCapture::new(cfg.camera_index, videoio::CAP_ANY)
            .with_context(|| format!("failed to open camera {}", cfg.camera_index))?;
        if !capture.is_opened()? {
            bail!("camera {} is not available", cfg.camera_index);
        }

        let detector = MediapipeDetector::spawn(
            &cfg.python,
            &cfg.detector_script,
            cfg.detection_confidence,
            cfg.tracking_confidence,
        )?;

        Ok(CameraLandmarkSource { capture, detector, mirror: cfg.mirror, raw: Mat::default() })
    }
}

impl LandmarkSource for CameraLandmarkSource {
    fn acquire_frame(&mut self) -> Result<Frame> {
        if !self.capture.read(&mut self.raw).map_err(|e| anyhow!("camera read failed: {}", e))?
            || self.raw.empty()
        {
            bail!("camera returned no frame");
        }

        let image = if self.mirror {
            let mut flipped = Mat::default();
            core::flip(&self.raw, &mut flipped, 1)?;
            flipped
        } else {
            self.raw.try_clone()?
        };

        if image.channels() != 3 {
            bail!("expected a 3-channel BGR frame, got {} channels", image.channels());
        }

        Ok(Frame {
            width:  image.cols() as usize,
            height: image.rows() as usize,
            bgr:    image.data_bytes()?.to_vec(),
        })
    }

    fn detect_hands(&mut self, frame: &Frame) -> Result<Vec<HandSkeleton>> {
        self.detector.detect(frame)
    }
}

impl Drop for CameraLandmarkSource {
    fn drop(&mut self) {
        let _ = self.capture.release();
        info!("camera released");
    }
}
