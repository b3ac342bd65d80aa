//! Screen-corner "erase everything" button, pressed by pinching over it.

use hand_canvas::{Rect, StrokePoint};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearZoneDetector {
    zone: Rect,
}

impl ClearZoneDetector {
    pub fn new(zone: Rect) -> Self {
        ClearZoneDetector { zone }
    }

    pub fn zone(&self) -> Rect { self.zone }

    /// True when the pointer is inside the zone while pinched. Pen state
    /// plays no part.
    pub fn is_triggered(&self, pointer: StrokePoint, pinched: bool) -> bool {
        pinched && self.zone.contains(pointer)
    }
}
