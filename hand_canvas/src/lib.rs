//! # hand_canvas
//!
//! The data model shared by the gesture-drawing pipeline:
//!
//! * [`Landmark`] — one normalized hand keypoint in `[0,1]²`.
//! * [`HandSkeleton`] — the 21 keypoints of one detected hand, any of which
//!   may be missing.
//! * [`PinchKeypoints`] — the three keypoints the pen logic needs, selected
//!   once at the source boundary so downstream code never does a fallible
//!   lookup.
//! * [`StrokePoint`] / [`Rect`] — screen-space pixel geometry.
//! * [`StrokeCanvas`] — the ordered, append-only (until cleared) record of
//!   drawn points.
//!
//! No windowing or camera code lives here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Keypoint indices (MediaPipe hand model convention)
// ════════════════════════════════════════════════════════════════════════════

/// Number of keypoints reported per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Named keypoint indices into a [`HandSkeleton`].
pub mod joints {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Bone segments of the hand skeleton, as `(from, to)` keypoint pairs.
/// Used for the diagnostic overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// A single hand keypoint in normalized image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y }
    }

    /// Euclidean distance to `other`, in normalized units.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Scale into pixel space for a `width` × `height` surface.
    pub fn to_screen(&self, width: u32, height: u32) -> StrokePoint {
        StrokePoint::new(self.x * width as f32, self.y * height as f32)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandSkeleton — everything the detector reported for one hand
// ════════════════════════════════════════════════════════════════════════════

/// All keypoints of one detected hand in one frame.
///
/// Detectors normally report the full set, but a slot may be `None` when a
/// keypoint was not recovered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandSkeleton {
    points: [Option<Landmark>; LANDMARK_COUNT],
}

impl HandSkeleton {
    /// Build from a detector's ordered keypoint list. Entries beyond
    /// [`LANDMARK_COUNT`] are ignored; a short list leaves the tail missing.
    pub fn from_landmarks<I>(landmarks: I) -> Self
    where
        I: IntoIterator<Item = Landmark>,
    {
        let mut skeleton = HandSkeleton::default();
        for (slot, lm) in skeleton.points.iter_mut().zip(landmarks) {
            *slot = Some(lm);
        }
        skeleton
    }

    pub fn get(&self, joint: usize) -> Option<Landmark> {
        self.points.get(joint).copied().flatten()
    }

    pub fn set(&mut self, joint: usize, landmark: Option<Landmark>) {
        if let Some(slot) = self.points.get_mut(joint) {
            *slot = landmark;
        }
    }

    /// Iterate over the keypoints that are present, with their indices.
    pub fn present(&self) -> impl Iterator<Item = (usize, Landmark)> + '_ {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|lm| (i, lm)))
    }

    /// Bone segments whose two endpoints are both present.
    pub fn bones(&self) -> impl Iterator<Item = (Landmark, Landmark)> + '_ {
        HAND_CONNECTIONS
            .iter()
            .filter_map(|&(a, b)| Some((self.get(a)?, self.get(b)?)))
    }

    /// The strongly typed record used by the pen logic, or `None` when any
    /// of the three required keypoints is missing.
    pub fn pinch_keypoints(&self) -> Option<PinchKeypoints> {
        Some(PinchKeypoints {
            index_tip: self.get(joints::INDEX_TIP)?,
            thumb_tip: self.get(joints::THUMB_TIP)?,
            ring_tip:  self.get(joints::RING_TIP)?,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PinchKeypoints
// ════════════════════════════════════════════════════════════════════════════

/// The three keypoints consumed per frame: the index fingertip drives the
/// pointer, thumb-tip to ring-fingertip distance drives the pinch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchKeypoints {
    pub index_tip: Landmark,
    pub thumb_tip: Landmark,
    pub ring_tip:  Landmark,
}

// ════════════════════════════════════════════════════════════════════════════
// Screen-space geometry
// ════════════════════════════════════════════════════════════════════════════

/// A point on the drawing surface, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
}

impl StrokePoint {
    pub fn new(x: f32, y: f32) -> Self {
        StrokePoint { x, y }
    }
}

/// Axis-aligned rectangle in pixels. Edges are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left:   f32,
    pub top:    f32,
    pub width:  f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Rect { left, top, width, height }
    }

    pub fn right(&self) -> f32 { self.left + self.width }
    pub fn bottom(&self) -> f32 { self.top + self.height }

    pub fn contains(&self, p: StrokePoint) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.width, self.height)
    }
}

/// Parse `left,top,width,height`.
impl FromStr for Rect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f32> = s
            .split(',')
            .map(|p| p.trim().parse::<f32>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("invalid rectangle {:?}: {}", s, e))?;
        match parts.as_slice() {
            &[left, top, width, height] if width >= 0.0 && height >= 0.0 => {
                Ok(Rect::new(left, top, width, height))
            }
            &[_, _, _, _] => Err(format!("rectangle {:?} has a negative size", s)),
            _ => Err(format!("expected left,top,width,height but got {:?}", s)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// StrokeCanvas
// ════════════════════════════════════════════════════════════════════════════

/// Ordered record of drawn points. Insertion order is drawing order.
#[derive(Clone, Debug, Default)]
pub struct StrokeCanvas {
    points: Vec<StrokePoint>,
}

impl StrokeCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, point: StrokePoint) {
        self.points.push(point);
    }

    /// Remove every point. Clearing an empty canvas is a no-op.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Read-only view of the points in drawing order. The iterator is
    /// `Clone`, and a fresh one can be taken every frame.
    pub fn all_points(&self) -> std::slice::Iter<'_, StrokePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
