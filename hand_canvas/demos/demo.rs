//! Builds a hand skeleton, extracts the pinch keypoints, and records a
//! short stroke on the canvas.

use hand_canvas::{joints, HandSkeleton, Landmark, Rect, StrokeCanvas, LANDMARK_COUNT};

fn main() {
    println!("\n=== Hand Canvas Demo ===\n");

    // ── 1. A synthetic hand ──────────────────────────────────────────────
    let mut hand = HandSkeleton::from_landmarks(
        (0..LANDMARK_COUNT).map(|i| Landmark::new(0.3 + i as f32 * 0.01, 0.6)),
    );
    hand.set(joints::INDEX_TIP, Some(Landmark::new(0.5, 0.4)));
    println!("1. Skeleton: {} keypoints, {} bones", hand.present().count(), hand.bones().count());

    let kp = hand.pinch_keypoints().expect("all pinch keypoints present");
    println!("   thumb↔ring distance: {:.3}", kp.thumb_tip.distance(&kp.ring_tip));
    println!();

    // ── 2. Screen mapping ────────────────────────────────────────────────
    let p = kp.index_tip.to_screen(600, 600);
    println!("2. Index tip on a 600×600 canvas: ({:.1}, {:.1})", p.x, p.y);
    let zone: Rect = "525,0,75,75".parse().expect("valid rectangle");
    println!("   inside clear zone {}? {}", zone, zone.contains(p));
    println!();

    // ── 3. Stroke canvas ─────────────────────────────────────────────────
    let mut canvas = StrokeCanvas::new();
    for step in 0..8 {
        let lm = Landmark::new(0.2 + step as f32 * 0.05, 0.5);
        canvas.append(lm.to_screen(600, 600));
    }
    println!("3. Stroke of {} points:", canvas.len());
    for (i, pt) in canvas.all_points().enumerate() {
        println!("    [{:>2}]  ({:>5.1}, {:>5.1})", i, pt.x, pt.y);
    }
    canvas.clear();
    println!("   after clear: {} points", canvas.len());
    println!();
}
