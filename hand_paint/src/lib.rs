//! # hand_paint
//!
//! Draw on a virtual canvas with hand gestures captured from a camera.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Move index finger | Moves the red cursor |
//! | Touch thumb to ring finger | Toggle the pen on/off (at most once per debounce window) |
//! | Pen on | Every frame leaves a dot under the index fingertip |
//! | Pinch over the top-right box | Clear the canvas (and, by default, lift the pen) |
//!
//! ## Windows
//!
//! * **HandPaint** — the canvas: white background, black stroke dots, red
//!   cursor, clear-zone outline. The title shows the pen state and point
//!   count. Closing it (or pressing `Q`) quits.
//! * **HandPaint Tracker** — the camera image with each detected hand's
//!   skeleton overlaid. `Escape` here exits.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse stands in for the hand.
//! * `camera` — **Hardware mode**: webcam via OpenCV, landmarks from a
//!   MediaPipe subprocess (`scripts/hand_detect.py`).
//!
//! ### Simulation controls (canvas window)
//!
//! | Input | Gesture |
//! |---|---|
//! | Mouse position | Index fingertip |
//! | Hold left button | Pinch |
//! | `F` | Drop the next camera frame |
//! | `H` | Hide / show the hand |
//! | Hold `R` | Ring fingertip not detected |
//! | `Q` | Quit |

pub mod config;
pub mod source;
pub mod sim;
pub mod detector;
#[cfg(feature = "camera")]
pub mod camera;
pub mod surface;
pub mod render;
pub mod window;
pub mod app;
