//! The trail component: sampling, aging and mesh rebuild in one tick.

use glam::Vec3;

use crate::config::TrailConfig;
use crate::emitter::Emitter;
use crate::history::{History, TrailPoint};
use crate::mesh::{ImmediateMesh, MeshSink};
use crate::sampler::Sampler;
use crate::strip::build_strip;

/// What a single [`Trail::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The tick was skipped because the trail is paused.
    pub paused: bool,
    /// A new point was captured.
    pub captured: bool,
    /// Number of points that expired this tick.
    pub evicted: usize,
}

/// A ribbon trail attached to a moving emitter.
///
/// Drive it with [`Trail::tick`] once per frame. Each tick:
///
/// 1. captures a point if the emitter moved at least `motion_delta` since
///    the last capture (and capture is enabled),
/// 2. ages every point by `dt` and drops the expired ones,
/// 3. rebuilds the mesh from scratch.
///
/// A paused trail skips all three.
///
/// # Example
///
/// ```ignore
/// let mut trail = Trail::new(TrailConfig::sword_swing(), Emitter::at(hand));
///
/// // every frame
/// trail.tick(dt, hand_position);
/// upload(trail.mesh());
/// ```
#[derive(Debug, Clone)]
pub struct Trail<M: MeshSink = ImmediateMesh> {
    config: TrailConfig,
    emitter: Emitter,
    sampler: Sampler,
    history: History,
    mesh: M,
}

impl Trail<ImmediateMesh> {
    /// Create a trail that records into an [`ImmediateMesh`].
    pub fn new(config: TrailConfig, emitter: Emitter) -> Self {
        Self::with_mesh(config, emitter, ImmediateMesh::new())
    }
}

impl<M: MeshSink> Trail<M> {
    /// Create a trail that writes into `mesh`.
    ///
    /// The emitter's current position becomes the capture baseline, so no
    /// point is captured until it moves.
    pub fn with_mesh(config: TrailConfig, emitter: Emitter, mesh: M) -> Self {
        config.warn_out_of_range();
        Self {
            config,
            sampler: Sampler::new(emitter.position),
            emitter,
            history: History::new(),
            mesh,
        }
    }

    /// Advance the trail by `dt` seconds with the emitter now at `position`.
    pub fn tick(&mut self, dt: f64, position: Vec3) -> TickReport {
        self.emitter.position = position;

        if self.config.paused {
            return TickReport {
                paused: true,
                ..Default::default()
            };
        }

        let mut report = TickReport::default();

        if self.config.enabled {
            if let Some(point) = self.sampler.sample(
                &mut self.emitter,
                self.config.motion_delta,
                self.config.start_width,
                self.config.end_width,
            ) {
                tracing::debug!(position = ?point.position, yaw = self.emitter.yaw(), "captured trail point");
                self.history.push(point);
                report.captured = true;
            }
        }

        report.evicted = self.history.advance(dt, self.config.lifetime);
        if report.evicted > 0 {
            tracing::debug!(evicted = report.evicted, remaining = self.history.len(), "expired trail points");
        }

        self.render();
        report
    }

    /// Rebuild the mesh from the current history, outside the tick cadence.
    pub fn render(&mut self) {
        build_strip(self.history.points(), &self.config, &self.emitter, &mut self.mesh);
    }

    /// Drop every point. The next render emits no geometry.
    pub fn clear_points(&mut self) {
        tracing::debug!(points = self.history.len(), "clearing trail");
        self.history.clear();
    }

    /// Live points, oldest first.
    pub fn points(&self) -> &[TrailPoint] {
        self.history.points()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Mutable access to the tuning parameters. Width changes apply to
    /// points captured afterwards.
    pub fn config_mut(&mut self) -> &mut TrailConfig {
        &mut self.config
    }

    /// Replace the whole configuration.
    pub fn set_config(&mut self, config: TrailConfig) {
        config.warn_out_of_range();
        self.config = config;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.config.paused = paused;
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut Emitter {
        &mut self.emitter
    }

    /// Where the last point was captured (or the starting position).
    pub fn last_captured_position(&self) -> Vec3 {
        self.sampler.last_position()
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut M {
        &mut self.mesh
    }

    pub fn into_mesh(self) -> M {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail() -> Trail {
        Trail::new(TrailConfig::default(), Emitter::default())
    }

    #[test]
    fn test_no_capture_without_motion() {
        let mut trail = trail();
        let report = trail.tick(0.1, Vec3::ZERO);
        assert!(!report.captured);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_capture_on_threshold() {
        let mut trail = trail();
        assert!(!trail.tick(0.1, Vec3::new(0.0, 0.0, 0.05)).captured);
        let report = trail.tick(0.1, Vec3::new(0.0, 0.0, 0.1));
        assert!(report.captured);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.points()[0].position, Vec3::new(0.0, 0.0, 0.1));
        assert_eq!(trail.last_captured_position(), Vec3::new(0.0, 0.0, 0.1));
    }

    #[test]
    fn test_capture_ages_in_same_tick() {
        let mut trail = trail();
        trail.tick(0.1, Vec3::new(0.0, 0.0, 1.0));
        assert!((trail.points()[0].age - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_paused_freezes_everything() {
        let mut trail = trail();
        trail.tick(0.1, Vec3::new(0.0, 0.0, 1.0));
        trail.tick(0.1, Vec3::new(0.0, 0.0, 2.0));
        let before = trail.points().to_vec();
        let mesh_before = trail.mesh().vertex_count();

        trail.set_paused(true);
        let report = trail.tick(0.5, Vec3::new(0.0, 0.0, 3.0));

        assert!(report.paused);
        assert_eq!(trail.points(), &before[..]);
        assert_eq!(trail.mesh().vertex_count(), mesh_before);
    }

    #[test]
    fn test_disabled_still_ages() {
        let mut trail = trail();
        trail.tick(0.1, Vec3::new(0.0, 0.0, 1.0));
        trail.set_enabled(false);
        let report = trail.tick(0.2, Vec3::new(0.0, 0.0, 2.0));
        assert!(!report.captured);
        assert_eq!(trail.len(), 1);
        assert!((trail.points()[0].age - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_expiry_reported() {
        let mut trail = Trail::new(TrailConfig::default().with_lifetime(0.25), Emitter::default());
        trail.tick(0.1, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(trail.tick(0.1, Vec3::new(0.0, 0.0, 1.0)).evicted, 0);
        assert_eq!(trail.tick(0.1, Vec3::new(0.0, 0.0, 1.0)).evicted, 1);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_clear_points_then_render() {
        let mut trail = trail();
        for i in 1..=5 {
            trail.tick(0.01, Vec3::new(0.0, 0.0, i as f32));
        }
        assert!(!trail.mesh().is_empty());
        trail.clear_points();
        trail.render();
        assert!(trail.mesh().is_empty());
    }

    #[test]
    fn test_width_change_only_affects_new_points() {
        let mut trail = trail();
        trail.tick(0.01, Vec3::new(0.0, 0.0, 1.0));
        trail.config_mut().start_width = 2.0;
        trail.tick(0.01, Vec3::new(0.0, 0.0, 2.0));

        let widths: Vec<f32> = trail.points().iter().map(|p| p.start_width.length()).collect();
        assert!((widths[0] - 0.5).abs() < 1e-6);
        assert!((widths[1] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_borrowed_mesh_sink() {
        let mut mesh = ImmediateMesh::new();
        {
            let mut trail = Trail::with_mesh(TrailConfig::default(), Emitter::default(), &mut mesh);
            trail.tick(0.01, Vec3::new(0.0, 0.0, 1.0));
            trail.tick(0.01, Vec3::new(0.0, 0.0, 2.0));
        }
        assert_eq!(mesh.vertex_count(), 4);
    }
}
