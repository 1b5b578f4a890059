//! Headless trail: swing an emitter along an arc and dump the strip
//!
//! Run with: cargo run --example headless
//! More detail: RUST_LOG=motion_trail=debug cargo run --example headless

use motion_trail::prelude::*;
use tracing_subscriber::EnvFilter;

const FRAMES: usize = 30;
const DT: f64 = 1.0 / 60.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = TrailConfig::sword_swing();
    tracing::info!(?config, "starting swing");

    let pivot = Vec3::new(0.0, 1.0, 0.0);
    let mut trail = Trail::new(config, Emitter::at(pivot + Vec3::X));

    // Half a turn around the pivot over the run.
    for frame in 1..=FRAMES {
        let angle = frame as f32 / FRAMES as f32 * std::f32::consts::PI;
        let hand = pivot + Vec3::new(angle.cos(), 0.0, angle.sin());

        let report = trail.tick(DT, hand);
        tracing::info!(
            frame,
            captured = report.captured,
            evicted = report.evicted,
            points = trail.len(),
            vertices = trail.mesh().vertex_count(),
            "tick"
        );
    }

    for (i, vertex) in trail.mesh().vertices().enumerate() {
        tracing::info!(
            i,
            position = ?vertex.position(),
            color = ?vertex.color(),
            uv = ?vertex.uv(),
            "vertex"
        );
    }
}
