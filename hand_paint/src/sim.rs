//! Simulated landmark source, driven by the mouse and keyboard of the
//! canvas window.
//!
//! The window sends [`SimInput`] events over a channel; this source turns
//! the latest pointer state into a synthetic 21-point hand each frame. The
//! rest of the pipeline cannot tell it apart from a camera.
//!
//! | Input | Effect |
//! |---|---|
//! | mouse position | index fingertip |
//! | left button held | thumb and ring finger pinched together |
//! | `F` | drop the next frame |
//! | `H` | hide / show the hand |
//! | `R` held | ring fingertip missing from the skeleton |

use std::sync::mpsc::Receiver;

use anyhow::{bail, Result};
use tracing::debug;

use hand_canvas::{joints, HandSkeleton, Landmark, LANDMARK_COUNT};

use crate::source::{Frame, LandmarkSource};

/// Raw input event from the canvas window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer position in normalized canvas coordinates.
    Pointer { x: f32, y: f32, pinched: bool },
    DropFrame,
    ToggleHand,
    /// Whether the ring fingertip is reported.
    RingTip(bool),
}

/// Background of the synthetic camera image (BGR).
const SIM_BACKGROUND: [u8; 3] = [48, 40, 40];

/// Open-hand pose, relative to the wrist, fingers pointing up.
const HAND_POSE: [(f32, f32); LANDMARK_COUNT] = [
    ( 0.000,  0.000),                                                  // wrist
    (-0.040, -0.030), (-0.080, -0.060), (-0.110, -0.090), (-0.130, -0.120), // thumb
    (-0.035, -0.140), (-0.040, -0.190), (-0.042, -0.220), (-0.045, -0.250), // index
    ( 0.000, -0.150), ( 0.000, -0.205), ( 0.000, -0.235), ( 0.000, -0.265), // middle
    ( 0.030, -0.140), ( 0.035, -0.190), ( 0.038, -0.215), ( 0.040, -0.240), // ring
    ( 0.060, -0.120), ( 0.070, -0.160), ( 0.075, -0.180), ( 0.080, -0.200), // pinky
];

/// Build a hand whose index fingertip sits at `tip`.
///
/// When `pinched`, the ring finger curls over so its tip meets the thumb.
pub fn synthetic_hand(tip: (f32, f32), pinched: bool, ring_tip: bool) -> HandSkeleton {
    let (ox, oy) = HAND_POSE[joints::INDEX_TIP];
    let wrist = (tip.0 - ox, tip.1 - oy);
    let at = |(dx, dy): (f32, f32)| Landmark::new(wrist.0 + dx, wrist.1 + dy);

    let mut hand = HandSkeleton::from_landmarks(HAND_POSE.iter().map(|&p| at(p)));

    if pinched {
        let (tx, ty) = HAND_POSE[joints::THUMB_TIP];
        let (px, py) = HAND_POSE[joints::RING_PIP];
        hand.set(joints::RING_TIP, Some(at((tx + 0.01, ty + 0.01))));
        hand.set(joints::RING_DIP, Some(at(((tx + px) / 2.0, (ty + py) / 2.0))));
    }
    if !ring_tip {
        hand.set(joints::RING_TIP, None);
    }
    hand
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource
// ════════════════════════════════════════════════════════════════════════════

pub struct SimLandmarkSource {
    rx:           Receiver<SimInput>,
    width:        usize,
    height:       usize,
    pointer:      Option<(f32, f32)>,
    pinched:      bool,
    hand_visible: bool,
    ring_tip:     bool,
    drops:        u32,
}

impl SimLandmarkSource {
    pub fn new(rx: Receiver<SimInput>, width: usize, height: usize) -> Self {
        SimLandmarkSource {
            rx,
            width,
            height,
            pointer:      None,
            pinched:      false,
            hand_visible: true,
            ring_tip:     true,
            drops:        0,
        }
    }

    fn drain_inputs(&mut self) {
        while let Ok(input) = self.rx.try_recv() {
            match input {
                SimInput::Pointer { x, y, pinched } => {
                    self.pointer = Some((x, y));
                    self.pinched = pinched;
                }
                SimInput::DropFrame => self.drops += 1,
                SimInput::ToggleHand => {
                    self.hand_visible = !self.hand_visible;
                    debug!(visible = self.hand_visible, "simulated hand toggled");
                }
                SimInput::RingTip(present) => self.ring_tip = present,
            }
        }
    }
}

impl LandmarkSource for SimLandmarkSource {
    fn acquire_frame(&mut self) -> Result<Frame> {
        self.drain_inputs();
        if self.drops > 0 {
            self.drops -= 1;
            bail!("simulated frame drop");
        }
        Ok(Frame::solid(self.width, self.height, SIM_BACKGROUND))
    }

    fn detect_hands(&mut self, _frame: &Frame) -> Result<Vec<HandSkeleton>> {
        match self.pointer {
            Some(tip) if self.hand_visible => {
                Ok(vec![synthetic_hand(tip, self.pinched, self.ring_tip)])
            }
            _ => Ok(Vec::new()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
