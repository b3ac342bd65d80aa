//! Replays a scripted two-second gesture through a `Session` and prints
//! what each interesting frame did.

use std::time::Duration;

use hand_canvas::{joints, HandSkeleton, Landmark, LANDMARK_COUNT};
use pinch_pen::{Session, SessionConfig};

fn hand(index: (f32, f32), pinched: bool) -> HandSkeleton {
    let mut h = HandSkeleton::from_landmarks(vec![Landmark::new(0.5, 0.8); LANDMARK_COUNT]);
    h.set(joints::INDEX_TIP, Some(Landmark::new(index.0, index.1)));
    h.set(joints::THUMB_TIP, Some(Landmark::new(0.40, 0.70)));
    let ring = if pinched { Landmark::new(0.42, 0.71) } else { Landmark::new(0.60, 0.70) };
    h.set(joints::RING_TIP, Some(ring));
    h
}

fn main() {
    println!("\n=== Pinch Pen Demo ===\n");

    let mut session = Session::new(SessionConfig::default());
    println!("  config: {:?}\n", session.config());

    // 60 frames at ~30 fps: pinch to start, draw a diagonal, pinch to stop,
    // then pinch over the top-right clear zone.
    for frame in 0..60u64 {
        let now = Duration::from_millis(frame * 33);
        let (index, pinched) = match frame {
            0..=2   => ((0.20, 0.60), true),
            3..=29  => ((0.20 + frame as f32 * 0.01, 0.60 - frame as f32 * 0.01), false),
            30..=31 => ((0.50, 0.30), true),
            32..=49 => ((0.60 + (frame - 32) as f32 * 0.02, 0.10), false),
            _       => ((0.95, 0.05), true),
        };
        let up = session.update(&[hand(index, pinched)], now);
        if up.toggled || up.cleared {
            println!(
                "  [{:>2}] t={:>4}ms  pen={:?}  toggled={}  cleared={}  points={}",
                frame, now.as_millis(), session.pen(), up.toggled, up.cleared,
                session.canvas().len()
            );
        }
    }

    println!("\n  final: pen={:?}, {} points\n", session.pen(), session.canvas().len());
}
