//! Pinch classification: thumb-tip to ring-fingertip distance against a
//! fixed threshold.

use hand_canvas::PinchKeypoints;

/// Result of classifying one hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchReading {
    /// Normalized thumb↔ring distance.
    pub distance: f32,
    pub pinched:  bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchClassifier {
    threshold: f32,
}

impl PinchClassifier {
    pub fn new(threshold: f32) -> Self {
        PinchClassifier { threshold }
    }

    pub fn threshold(&self) -> f32 { self.threshold }

    /// A distance equal to the threshold counts as pinched.
    pub fn classify(&self, kp: &PinchKeypoints) -> PinchReading {
        let distance = kp.thumb_tip.distance(&kp.ring_tip);
        PinchReading { distance, pinched: distance <= self.threshold }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_canvas::Landmark;

    fn keypoints(thumb: (f32, f32), ring: (f32, f32)) -> PinchKeypoints {
        PinchKeypoints {
            index_tip: Landmark::new(0.5, 0.2),
            thumb_tip: Landmark::new(thumb.0, thumb.1),
            ring_tip:  Landmark::new(ring.0, ring.1),
        }
    }

    #[test]
    fn close_fingers_are_pinched() {
        let c = PinchClassifier::new(0.1);
        let r = c.classify(&keypoints((0.5, 0.5), (0.52, 0.51)));
        assert!(r.pinched);
        assert!(r.distance < 0.1);
    }

    #[test]
    fn spread_fingers_are_not_pinched() {
        let c = PinchClassifier::new(0.1);
        assert!(!c.classify(&keypoints((0.3, 0.5), (0.6, 0.5))).pinched);
    }

    #[test]
    fn distance_equal_to_threshold_is_pinched() {
        // 0.125 is exact in binary, so the distance lands on the threshold.
        let c = PinchClassifier::new(0.125);
        let r = c.classify(&keypoints((0.5, 0.5), (0.5, 0.625)));
        assert_eq!(r.distance, 0.125);
        assert!(r.pinched);
    }

    #[test]
    fn index_tip_does_not_affect_pinch() {
        let c = PinchClassifier::new(0.1);
        let mut kp = keypoints((0.5, 0.5), (0.5, 0.55));
        let before = c.classify(&kp);
        kp.index_tip = Landmark::new(0.5, 0.5);
        assert_eq!(c.classify(&kp), before);
    }
}
