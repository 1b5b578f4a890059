//! Distance-gated capture of new trail points.

use glam::Vec3;

use crate::emitter::Emitter;
use crate::history::TrailPoint;

/// Decides when the emitter has moved far enough to capture a new point.
///
/// Keeps the position of the last capture as the baseline. The baseline only
/// moves when a point is captured, so slow motion accumulates until it
/// crosses the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    last_position: Vec3,
}

impl Sampler {
    /// Start measuring from `origin`.
    pub fn new(origin: Vec3) -> Self {
        Self {
            last_position: origin,
        }
    }

    /// Position of the last capture (or the origin if nothing was captured).
    #[inline]
    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }

    /// Whether `position` is far enough from the baseline to capture.
    ///
    /// Never true for `position == baseline`, even with a zero threshold,
    /// because the travel direction would be undefined.
    pub fn should_capture(&self, position: Vec3, motion_delta: f32) -> bool {
        let distance = position.distance(self.last_position);
        distance > 0.0 && distance >= motion_delta
    }

    /// Capture a point at the emitter's current position if it moved at
    /// least `motion_delta` since the last capture.
    ///
    /// On capture the emitter is turned to face the direction of travel
    /// first, then its lateral axis is frozen into the point's widths.
    pub fn sample(
        &mut self,
        emitter: &mut Emitter,
        motion_delta: f32,
        start_width: f32,
        end_width: f32,
    ) -> Option<TrailPoint> {
        let position = emitter.position;
        if !self.should_capture(position, motion_delta) {
            return None;
        }

        emitter.face_direction(position - self.last_position);
        let point = TrailPoint::new(position, emitter.basis_x(), start_width, end_width);
        self.last_position = position;

        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_skips() {
        let mut sampler = Sampler::new(Vec3::ZERO);
        let mut emitter = Emitter::at(Vec3::new(0.05, 0.0, 0.0));
        assert!(sampler.sample(&mut emitter, 0.1, 0.5, 0.0).is_none());
        assert_eq!(sampler.last_position(), Vec3::ZERO);
        assert_eq!(emitter.yaw(), 0.0);
    }

    #[test]
    fn test_at_threshold_captures() {
        let mut sampler = Sampler::new(Vec3::ZERO);
        let mut emitter = Emitter::at(Vec3::new(0.0, 0.0, 0.25));
        let point = sampler.sample(&mut emitter, 0.25, 0.5, 0.0).unwrap();
        assert_eq!(point.position, Vec3::new(0.0, 0.0, 0.25));
        assert_eq!(point.age, 0.0);
        assert_eq!(sampler.last_position(), Vec3::new(0.0, 0.0, 0.25));
    }

    #[test]
    fn test_zero_motion_never_captures() {
        let mut sampler = Sampler::new(Vec3::ONE);
        let mut emitter = Emitter::at(Vec3::ONE);
        assert!(sampler.sample(&mut emitter, 0.0, 0.5, 0.0).is_none());
    }

    #[test]
    fn test_capture_turns_emitter_before_width() {
        let mut sampler = Sampler::new(Vec3::ZERO);
        let mut emitter = Emitter::default();
        emitter.position = Vec3::new(1.0, 0.0, 0.0);

        let point = sampler.sample(&mut emitter, 0.1, 0.5, 0.0).unwrap();

        assert!((emitter.yaw() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        // Travelling along +X: ribbon spreads along Z.
        assert!(point.start_width.x.abs() < 1e-6);
        assert!((point.start_width.z.abs() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_slow_motion_accumulates() {
        let mut sampler = Sampler::new(Vec3::ZERO);
        let mut emitter = Emitter::default();
        let mut captured = 0;
        for step in 1..=10 {
            emitter.position = Vec3::new(0.0, 0.0, step as f32 * 0.04);
            if sampler.sample(&mut emitter, 0.1, 0.5, 0.0).is_some() {
                captured += 1;
            }
        }
        // 0.4 units in 0.04 steps with a 0.1 threshold: captures at 0.12,
        // 0.24 and 0.36.
        assert_eq!(captured, 3);
    }
}
