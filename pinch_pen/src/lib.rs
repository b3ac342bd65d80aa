//! # pinch_pen
//!
//! Turns per-frame hand keypoints into drawing actions.
//!
//! ```text
//!  hands ──► HandSelection ──► PinchKeypoints
//!                                  │
//!                   PinchClassifier │ pinched?
//!                                  ▼
//!                          PenStateMachine ──► append to StrokeCanvas
//!                                  │
//!                      ClearZoneDetector ──► clear StrokeCanvas
//! ```
//!
//! [`Session`] owns all of the mutable state and is advanced once per
//! camera frame with [`Session::update`]. Time is passed in explicitly as a
//! monotonic offset from session start, so every rule here is testable
//! without a clock or a camera.

pub mod classifier;
pub mod pen;
pub mod clear_zone;
pub mod session;

pub use classifier::{PinchClassifier, PinchReading};
pub use pen::{PenState, PenStateMachine};
pub use clear_zone::ClearZoneDetector;
pub use session::{FrameUpdate, HandSelection, Session, SessionConfig};
