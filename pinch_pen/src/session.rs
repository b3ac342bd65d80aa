//! Per-session drawing state and the per-frame update rule.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use hand_canvas::{HandSkeleton, Rect, StrokeCanvas, StrokePoint};

use crate::classifier::{PinchClassifier, PinchReading};
use crate::clear_zone::ClearZoneDetector;
use crate::pen::{PenState, PenStateMachine};

// ════════════════════════════════════════════════════════════════════════════
// HandSelection
// ════════════════════════════════════════════════════════════════════════════

/// Which detected hand drives the pen when several are visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandSelection {
    /// The first hand the detector reports.
    #[default]
    First,
    /// The last hand the detector reports.
    Last,
}

impl HandSelection {
    pub fn select<'a>(self, hands: &'a [HandSkeleton]) -> Option<&'a HandSkeleton> {
        match self {
            HandSelection::First => hands.first(),
            HandSelection::Last  => hands.last(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionConfig
// ════════════════════════════════════════════════════════════════════════════

/// Side length of the default square clear zone, in pixels.
pub const DEFAULT_ZONE_SIZE: f32 = 75.0;

/// Tunables for one drawing session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub canvas_width:        u32,
    pub canvas_height:       u32,
    /// Normalized thumb↔ring distance at or below which the hand is pinched.
    pub pinch_threshold:     f32,
    /// Minimum time between two pen toggles, in seconds.
    pub debounce_secs:       f32,
    /// Pixel rectangle that clears the canvas when pinched over.
    pub clear_zone:          Rect,
    /// Also force the pen off when the clear zone fires.
    pub cancel_pen_on_clear: bool,
    pub hand_selection:      HandSelection,
}

impl SessionConfig {
    /// The default clear zone: a square in the top-right corner.
    pub fn corner_zone(canvas_width: u32) -> Rect {
        Rect::new(canvas_width as f32 - DEFAULT_ZONE_SIZE, 0.0, DEFAULT_ZONE_SIZE, DEFAULT_ZONE_SIZE)
    }

    /// The debounce window; values too large for a `Duration` saturate.
    pub fn debounce_window(&self) -> Duration {
        Duration::try_from_secs_f32(self.debounce_secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            canvas_width:        600,
            canvas_height:       600,
            pinch_threshold:     0.10,
            debounce_secs:       0.5,
            clear_zone:          SessionConfig::corner_zone(600),
            cancel_pen_on_clear: true,
            hand_selection:      HandSelection::First,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameUpdate — what one frame did
// ════════════════════════════════════════════════════════════════════════════

/// Summary of the state changes made by one [`Session::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameUpdate {
    /// A hand was selected this frame.
    pub hand_seen: bool,
    /// `None` when no hand was seen or its pinch keypoints were missing.
    pub reading:   Option<PinchReading>,
    pub toggled:   bool,
    pub appended:  Option<StrokePoint>,
    pub cleared:   bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

/// All mutable drawing state for one run of the application.
pub struct Session {
    config:     SessionConfig,
    classifier: PinchClassifier,
    pen:        PenStateMachine,
    clear_zone: ClearZoneDetector,
    canvas:     StrokeCanvas,
    /// Last known index-fingertip position, in pixels.
    pointer:    Option<StrokePoint>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Session {
            classifier: PinchClassifier::new(config.pinch_threshold),
            pen:        PenStateMachine::new(config.debounce_window()),
            clear_zone: ClearZoneDetector::new(config.clear_zone),
            canvas:     StrokeCanvas::new(),
            pointer:    None,
            config,
        }
    }

    /// Advance one frame with the hands detected in it.
    ///
    /// With no hand, or a hand missing one of its pinch keypoints, nothing
    /// changes and the pointer keeps its last known position. Otherwise the
    /// pointer moves and the pen is updated, a point is appended if the pen
    /// is on, and finally the canvas is cleared if the pinch landed in the
    /// clear zone, so a clearing frame always ends with an empty canvas.
    ///
    /// A pinch inside the clear zone is a clear gesture only: it never
    /// toggles the pen. With `cancel_pen_on_clear` the pen is then forced
    /// off; otherwise it keeps whatever state it had.
    pub fn update(&mut self, hands: &[HandSkeleton], now: Duration) -> FrameUpdate {
        let mut out = FrameUpdate::default();

        let Some(hand) = self.config.hand_selection.select(hands) else {
            return out;
        };
        out.hand_seen = true;

        let Some(kp) = hand.pinch_keypoints() else {
            trace!("hand is missing pinch keypoints; no gesture signal this frame");
            return out;
        };

        let reading = self.classifier.classify(&kp);
        out.reading = Some(reading);

        let pointer = kp.index_tip.to_screen(self.config.canvas_width, self.config.canvas_height);
        self.pointer = Some(pointer);

        let clearing = self.clear_zone.is_triggered(pointer, reading.pinched);
        out.toggled = !clearing && self.pen.update(reading.pinched, now);

        if self.pen.state().is_on() {
            self.canvas.append(pointer);
            out.appended = Some(pointer);
        }

        if clearing {
            self.canvas.clear();
            if self.config.cancel_pen_on_clear {
                self.pen.force_off();
            }
            out.cleared = true;
            debug!(x = pointer.x, y = pointer.y, pen = ?self.pen.state(), "clear zone triggered");
        }

        out
    }

    pub fn config(&self) -> &SessionConfig { &self.config }
    pub fn canvas(&self) -> &StrokeCanvas { &self.canvas }
    pub fn pen(&self) -> PenState { self.pen.state() }
    pub fn pointer(&self) -> Option<StrokePoint> { self.pointer }
    pub fn clear_zone(&self) -> Rect { self.clear_zone.zone() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_canvas::{joints, Landmark, LANDMARK_COUNT};

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    /// A hand with its index tip at `index` and thumb/ring either touching
    /// or spread apart.
    fn hand(index: (f32, f32), pinched: bool) -> HandSkeleton {
        let mut h = HandSkeleton::from_landmarks(vec![Landmark::new(0.5, 0.8); LANDMARK_COUNT]);
        h.set(joints::INDEX_TIP, Some(Landmark::new(index.0, index.1)));
        h.set(joints::THUMB_TIP, Some(Landmark::new(0.40, 0.70)));
        let ring = if pinched { Landmark::new(0.42, 0.71) } else { Landmark::new(0.60, 0.70) };
        h.set(joints::RING_TIP, Some(ring));
        h
    }

    fn session() -> Session {
        Session::new(SessionConfig::default())
    }

    #[test]
    fn default_clear_zone_is_top_right_corner() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.clear_zone, Rect::new(525.0, 0.0, 75.0, 75.0));
        assert_eq!(cfg.debounce_window(), ms(500));
    }

    #[test]
    fn no_hand_changes_nothing() {
        let mut s = session();
        let up = s.update(&[], ms(0));
        assert_eq!(up, FrameUpdate::default());
        assert_eq!(s.pen(), PenState::Off);
        assert!(s.pointer().is_none());
    }

    #[test]
    fn pointer_tracks_index_tip_in_pixels() {
        let mut s = session();
        s.update(&[hand((0.25, 0.5), false)], ms(0));
        assert_eq!(s.pointer(), Some(StrokePoint::new(150.0, 300.0)));
        assert!(s.canvas().is_empty());
    }

    #[test]
    fn pinch_then_move_draws() {
        let mut s = session();
        s.update(&[hand((0.2, 0.5), true)], ms(0));
        assert_eq!(s.pen(), PenState::On);
        for i in 1..=5 {
            let up = s.update(&[hand((0.2 + i as f32 * 0.01, 0.5), false)], ms(i * 33));
            assert!(up.appended.is_some());
        }
        // the toggling frame itself also draws
        assert_eq!(s.canvas().len(), 6);
    }

    #[test]
    fn pen_off_never_appends() {
        let mut s = session();
        for i in 0..30 {
            let up = s.update(&[hand((0.3, 0.3), false)], ms(i * 33));
            assert!(up.appended.is_none());
        }
        assert!(s.canvas().is_empty());
    }

    #[test]
    fn held_pinch_for_two_seconds_toggles_four_times() {
        let mut s = session();
        let mut toggles = Vec::new();
        for t in (0..2_000).step_by(10) {
            if s.update(&[hand((0.3, 0.5), true)], ms(t)).toggled {
                toggles.push((t, s.pen()));
            }
        }
        assert_eq!(toggles, vec![
            (0,    PenState::On),
            (500,  PenState::Off),
            (1000, PenState::On),
            (1500, PenState::Off),
        ]);
    }

    #[test]
    fn point_count_matches_pen_on_frames() {
        let mut s = session();
        let mut on_frames = 0;
        for i in 0..120u64 {
            // pinch pulses every 40 frames
            let pinched = i % 40 < 3;
            s.update(&[hand((0.3, 0.5), pinched)], ms(i * 33));
            if s.pen().is_on() {
                on_frames += 1;
            }
        }
        assert!(on_frames > 0);
        assert_eq!(s.canvas().len(), on_frames);
    }

    #[test]
    fn clear_zone_with_pen_off_keeps_pen_off() {
        let mut s = session();
        // draw a little, then turn the pen off again
        s.update(&[hand((0.2, 0.5), true)], ms(0));
        s.update(&[hand((0.21, 0.5), false)], ms(33));
        s.update(&[hand((0.22, 0.5), true)], ms(600));
        assert_eq!(s.pen(), PenState::Off);
        assert_eq!(s.canvas().len(), 2);

        // pinch over the zone inside the cooldown: no toggle, just a clear
        let up = s.update(&[hand((0.95, 0.05), true)], ms(700));
        assert!(up.cleared);
        assert!(!up.toggled);
        assert!(s.canvas().is_empty());
        assert_eq!(s.pen(), PenState::Off);
    }

    #[test]
    fn clear_zone_forces_pen_off_when_cancelling() {
        let mut s = session();
        s.update(&[hand((0.2, 0.5), true)], ms(0));
        s.update(&[hand((0.95, 0.05), false)], ms(33));
        assert_eq!(s.pen(), PenState::On);
        let up = s.update(&[hand((0.95, 0.05), true)], ms(100));
        assert!(up.cleared);
        assert!(s.canvas().is_empty());
        assert_eq!(s.pen(), PenState::Off);
    }

    #[test]
    fn clear_zone_after_cooldown_leaves_pen_off_without_cancel() {
        let mut s = Session::new(SessionConfig { cancel_pen_on_clear: false, ..SessionConfig::default() });
        s.update(&[hand((0.2, 0.5), true)], ms(0));
        s.update(&[hand((0.21, 0.5), false)], ms(33));
        s.update(&[hand((0.22, 0.5), true)], ms(600));
        assert_eq!(s.pen(), PenState::Off);

        // well past the debounce window: the pinch still only clears
        let up = s.update(&[hand((0.95, 0.05), true)], ms(5_000));
        assert!(up.cleared);
        assert!(!up.toggled);
        assert!(up.appended.is_none());
        assert!(s.canvas().is_empty());
        assert_eq!(s.pen(), PenState::Off);
        assert_eq!(s.pen.last_toggle(), Some(ms(600)));
    }

    #[test]
    fn clear_zone_after_cooldown_with_cancel_ends_off() {
        let mut s = session();
        let up = s.update(&[hand((0.95, 0.05), true)], ms(5_000));
        assert!(up.cleared);
        assert!(!up.toggled);
        assert_eq!(s.pen(), PenState::Off);
    }

    #[test]
    fn oversized_debounce_saturates() {
        for secs in [1e20, f32::INFINITY] {
            let cfg = SessionConfig { debounce_secs: secs, ..SessionConfig::default() };
            assert_eq!(cfg.debounce_window(), Duration::MAX);
            let mut s = Session::new(cfg);
            assert!(s.update(&[hand((0.3, 0.5), true)], ms(0)).toggled);
            assert!(!s.update(&[hand((0.3, 0.5), true)], ms(60_000)).toggled);
        }
    }

    #[test]
    fn clear_zone_leaves_pen_on_without_cancel() {
        let mut s = Session::new(SessionConfig { cancel_pen_on_clear: false, ..SessionConfig::default() });
        s.update(&[hand((0.2, 0.5), true)], ms(0));
        let up = s.update(&[hand((0.95, 0.05), true)], ms(100));
        assert!(up.cleared);
        assert!(up.appended.is_some());
        // the append happened before the clear
        assert!(s.canvas().is_empty());
        assert_eq!(s.pen(), PenState::On);
    }

    #[test]
    fn missing_ring_tip_skips_gesture_and_keeps_pointer() {
        let mut s = session();
        s.update(&[hand((0.2, 0.5), true)], ms(0));
        let before_pointer = s.pointer();
        let before_points = s.canvas().len();

        let mut h = hand((0.7, 0.7), true);
        h.set(joints::RING_TIP, None);
        let up = s.update(&[h], ms(1000));

        assert!(up.hand_seen);
        assert!(up.reading.is_none());
        assert!(!up.toggled);
        assert_eq!(s.pen(), PenState::On);
        assert_eq!(s.canvas().len(), before_points);
        assert_eq!(s.pointer(), before_pointer);
    }

    #[test]
    fn missing_keypoint_before_any_pointer_leaves_none() {
        let mut s = session();
        let mut h = hand((0.7, 0.7), true);
        h.set(joints::RING_TIP, None);
        s.update(&[h], ms(0));
        assert!(s.pointer().is_none());
    }

    #[test]
    fn hand_selection_policy() {
        let left  = hand((0.25, 0.5), false);
        let right = hand((0.75, 0.5), false);
        let hands = [left, right];

        let mut first = session();
        first.update(&hands, ms(0));
        assert_eq!(first.pointer(), Some(StrokePoint::new(150.0, 300.0)));

        let mut last = Session::new(SessionConfig {
            hand_selection: HandSelection::Last,
            ..SessionConfig::default()
        });
        last.update(&hands, ms(0));
        assert_eq!(last.pointer(), Some(StrokePoint::new(450.0, 300.0)));
    }
}
