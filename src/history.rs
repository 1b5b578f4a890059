//! Captured trail points and their aging.
//!
//! Points are kept oldest-first. New points are only ever appended; any
//! point whose age reaches the trail lifetime is dropped on the next
//! [`History::advance`], wherever it sits in the list.

use glam::Vec3;

/// One captured sample of the emitter's path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    /// World-space position at capture time.
    pub position: Vec3,
    /// Half-width offset at progress 0, already scaled by the emitter's
    /// lateral axis. Frozen at capture.
    pub start_width: Vec3,
    /// Amount the offset shrinks by at progress 1. Frozen at capture.
    pub end_width: Vec3,
    /// Seconds since capture.
    pub age: f64,
}

impl TrailPoint {
    /// Fresh point at `position` whose ribbon spans `lateral * start_width`
    /// at one end and `lateral * end_width` at the other.
    pub fn new(position: Vec3, lateral: Vec3, start_width: f32, end_width: f32) -> Self {
        Self {
            position,
            start_width: lateral * start_width,
            end_width: (lateral * start_width) - (lateral * end_width),
            age: 0.0,
        }
    }

    /// Lateral offset at `progress` along the trail.
    #[inline]
    pub fn offset(&self, progress: f32, acceleration: f32) -> Vec3 {
        self.start_width - self.end_width * progress.powf(acceleration)
    }
}

/// Ordered, oldest-first list of live trail points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    points: Vec<TrailPoint>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point at the newest end.
    pub fn push(&mut self, point: TrailPoint) {
        self.points.push(point);
    }

    /// Age every point by `dt`, then drop those with `age >= lifetime`.
    ///
    /// Relative order of the survivors is preserved. Returns the number of
    /// points removed.
    pub fn advance(&mut self, dt: f64, lifetime: f64) -> usize {
        for point in &mut self.points {
            point.age += dt;
        }

        let before = self.points.len();
        self.points.retain(|point| point.age < lifetime);
        before - self.points.len()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points oldest-first.
    #[inline]
    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }

    /// Most recently captured point.
    pub fn newest(&self) -> Option<&TrailPoint> {
        self.points.last()
    }

    /// Oldest surviving point.
    pub fn oldest(&self) -> Option<&TrailPoint> {
        self.points.first()
    }
}

impl FromIterator<TrailPoint> for History {
    fn from_iter<I: IntoIterator<Item = TrailPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
