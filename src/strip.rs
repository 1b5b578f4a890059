//! Triangle-strip generation from the point history.
//!
//! Every rebuild starts from an empty sink. Each point contributes a
//! cross-section of two vertices, pushed oldest point first:
//!
//! ```text
//!   point 0        point 1        point N-1
//!   +offset ------ +offset ... -- +offset     (V = 0)
//!      |      \       |      \       |
//!   -offset ------ -offset ... -- -offset     (V = 1)
//! ```
//!
//! Width, color and U are all driven by where a point sits along the trail.

use glam::{Vec2, Vec4};

use crate::config::TrailConfig;
use crate::emitter::Emitter;
use crate::history::TrailPoint;
use crate::interpolation::lerp_color;
use crate::mesh::MeshSink;

/// Per-point values the strip is built from, before the local-frame
/// conversion. Exposed for inspection and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    /// `index / (count - 1)`: 0 at the oldest point, 1 at the newest.
    pub raw_progress: f32,
    /// `raw_progress` remapped by the interpolation direction.
    pub progress: f32,
    pub color: Vec4,
    /// U for the `+offset` vertex.
    pub u0: f32,
    /// U for the `-offset` vertex.
    pub u1: f32,
}

/// Compute the color, progress and texture span of point `index` out of
/// `count`.
///
/// A strip needs at least two points; smaller counts are treated as two so
/// the result stays finite.
pub fn cross_section(index: usize, count: usize, config: &TrailConfig) -> CrossSection {
    let count = count.max(2);
    let raw_progress = index as f32 / (count - 1) as f32;
    let progress = config.color_interpolation_direction.progress(raw_progress);
    let color = lerp_color(
        config.start_color,
        config.end_color,
        config.color_interpolation_mode.ease(progress),
    );

    let (u0, u1) = if config.scale_texture {
        (
            config.motion_delta * index as f32,
            config.motion_delta * (index + 1) as f32,
        )
    } else {
        (index as f32 / count as f32, raw_progress)
    };

    CrossSection {
        raw_progress,
        progress,
        color,
        u0,
        u1,
    }
}

/// Rebuild the whole strip for `points` into `mesh`.
///
/// The sink is always cleared. With fewer than two points nothing else is
/// emitted. Vertices are expressed in `emitter`'s local frame.
pub fn build_strip<M: MeshSink + ?Sized>(
    points: &[TrailPoint],
    config: &TrailConfig,
    emitter: &Emitter,
    mesh: &mut M,
) {
    mesh.clear();

    let count = points.len();
    if count < 2 {
        return;
    }

    let to_local = emitter.transform().inverse();

    mesh.begin_strip();
    for (index, point) in points.iter().enumerate() {
        let section = cross_section(index, count, config);
        let offset = point.offset(section.progress, config.scale_acceleration);

        mesh.set_color(section.color);
        mesh.set_uv(Vec2::new(section.u0, 0.0));
        mesh.add_vertex(to_local.transform_point3(point.position + offset));
        mesh.set_uv(Vec2::new(section.u1, 1.0));
        mesh.add_vertex(to_local.transform_point3(point.position - offset));
    }
    mesh.end_strip();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::{InterpolationDirection, InterpolationMode};
    use crate::mesh::ImmediateMesh;
    use glam::Vec3;

    fn line(count: usize) -> Vec<TrailPoint> {
        (0..count)
            .map(|i| TrailPoint::new(Vec3::new(0.0, 0.0, i as f32), Vec3::X, 0.5, 0.0))
            .collect()
    }

    #[test]
    fn test_single_point_emits_nothing() {
        let mut mesh = ImmediateMesh::new();
        build_strip(&line(1), &TrailConfig::default(), &Emitter::default(), &mut mesh);
        assert!(mesh.is_empty());
        assert!(mesh.strips().is_empty());
    }

    #[test]
    fn test_rebuild_clears_previous_geometry() {
        let mut mesh = ImmediateMesh::new();
        let config = TrailConfig::default();
        build_strip(&line(4), &config, &Emitter::default(), &mut mesh);
        assert_eq!(mesh.vertex_count(), 8);
        build_strip(&line(0), &config, &Emitter::default(), &mut mesh);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_two_vertices_per_point_in_one_strip() {
        let mut mesh = ImmediateMesh::new();
        build_strip(&line(5), &TrailConfig::default(), &Emitter::default(), &mut mesh);
        assert_eq!(mesh.strips().len(), 1);
        assert_eq!(mesh.vertex_count(), 10);
    }

    #[test]
    fn test_vertex_order_and_width() {
        let mut mesh = ImmediateMesh::new();
        build_strip(&line(3), &TrailConfig::default(), &Emitter::default(), &mut mesh);
        let v: Vec<Vec3> = mesh.vertices().map(|v| v.position()).collect();

        // Oldest point is full width, newest has narrowed to nothing.
        assert_eq!(v[0], Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(v[1], Vec3::new(-0.5, 0.0, 0.0));
        assert_eq!(v[2], Vec3::new(0.25, 0.0, 1.0));
        assert_eq!(v[3], Vec3::new(-0.25, 0.0, 1.0));
        assert_eq!(v[4], Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(v[5], Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_vertices_are_emitter_local() {
        let mut mesh = ImmediateMesh::new();
        let emitter = Emitter::at(Vec3::new(0.0, 0.0, 2.0));
        build_strip(&line(3), &TrailConfig::default(), &emitter, &mut mesh);
        let first = mesh.vertices().next().unwrap().position();
        assert!((first - Vec3::new(0.5, 0.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn test_progress_direction() {
        let backward = TrailConfig::default();
        assert_eq!(cross_section(0, 4, &backward).progress, 0.0);
        assert_eq!(cross_section(3, 4, &backward).progress, 1.0);

        let forward = TrailConfig::default()
            .with_interpolation(InterpolationMode::Linear, InterpolationDirection::Forward);
        assert_eq!(cross_section(0, 4, &forward).progress, 1.0);
        assert_eq!(cross_section(3, 4, &forward).progress, 0.0);
    }

    #[test]
    fn test_degenerate_counts_stay_finite() {
        let config = TrailConfig::default().with_scale_texture(false);
        for count in [0, 1] {
            let section = cross_section(0, count, &config);
            assert_eq!(section.raw_progress, 0.0);
            assert_eq!(section.progress, 0.0);
            assert_eq!(section.color, config.start_color);
            assert!(section.u0.is_finite() && section.u1.is_finite());
        }
    }

    #[test]
    fn test_scaled_texture_coordinates() {
        let config = TrailConfig::default().with_motion_delta(0.25);
        let section = cross_section(2, 5, &config);
        assert_eq!(section.u0, 0.5);
        assert_eq!(section.u1, 0.75);
    }

    #[test]
    fn test_normalized_texture_coordinates() {
        let config = TrailConfig::default().with_scale_texture(false);
        let section = cross_section(2, 5, &config);
        assert_eq!(section.u0, 0.4);
        assert_eq!(section.u1, 0.5);
    }

    #[test]
    fn test_v_alternates() {
        let mut mesh = ImmediateMesh::new();
        build_strip(&line(3), &TrailConfig::default(), &Emitter::default(), &mut mesh);
        let vs: Vec<f32> = mesh.vertices().map(|v| v.uv[1]).collect();
        assert_eq!(vs, vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_scale_acceleration_shapes_width() {
        let config = TrailConfig::default().with_scale_acceleration(0.5);
        let mut mesh = ImmediateMesh::new();
        build_strip(&line(5), &config, &Emitter::default(), &mut mesh);
        // progress 0.25 -> 0.25^0.5 = 0.5 of the taper applied.
        let second = mesh.vertices().nth(2).unwrap().position();
        assert!((second.x - 0.25).abs() < 1e-6);
    }
}
