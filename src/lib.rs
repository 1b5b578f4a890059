//! # motion-trail
//!
//! Ribbon trails that follow a moving point in 3D space, fading and
//! narrowing over time.
//!
//! A [`Trail`] samples its emitter's position whenever it has moved far
//! enough, ages the captured points, and rebuilds a triangle strip from them
//! every tick. The strip goes to any [`MeshSink`]; the crate ships an
//! in-memory [`ImmediateMesh`] and a wgpu [`gpu::TrailRenderer`] that draws
//! it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use motion_trail::prelude::*;
//!
//! let mut trail = Trail::new(TrailConfig::default(), Emitter::at(Vec3::ZERO));
//!
//! // Once per frame, with the emitter's new world position:
//! trail.tick(dt, position);
//!
//! for strip in trail.mesh().strips() {
//!     // position / color / uv per vertex, ready for a vertex buffer
//! }
//! ```
//!
//! ## Per-tick pipeline
//!
//! | Phase | What happens |
//! |-------|--------------|
//! | Sample | Capture a point if the emitter moved `motion_delta` since the last capture |
//! | Age | Add `dt` to every point, drop those at or past `lifetime` |
//! | Rebuild | Clear the sink and emit two vertices per point, oldest first |
//!
//! A paused trail ([`TrailConfig::paused`]) skips every phase; a disabled
//! one ([`TrailConfig::enabled`]) only skips sampling.
//!
//! ## Shaping the ribbon
//!
//! - Width narrows from `start_width` to `end_width` as
//!   `progress^scale_acceleration`.
//! - Color blends from `start_color` to `end_color` through an
//!   [`InterpolationMode`] easing curve.
//! - [`InterpolationDirection`] decides whether progress runs from the
//!   oldest point (`Backward`) or the newest (`Forward`).
//! - `scale_texture` picks distance-proportional or normalized U.

pub mod config;
pub mod emitter;
pub mod error;
pub mod gpu;
pub mod history;
pub mod interpolation;
pub mod mesh;
pub mod sampler;
pub mod strip;
mod trail;

pub use config::TrailConfig;
pub use emitter::Emitter;
pub use error::{ConfigError, GpuError};
pub use glam::{Vec2, Vec3, Vec4};
pub use history::{History, TrailPoint};
pub use interpolation::{InterpolationDirection, InterpolationMode};
pub use mesh::{ImmediateMesh, MeshSink, TrailVertex};
pub use sampler::Sampler;
pub use trail::{TickReport, Trail};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use motion_trail::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::TrailConfig;
    pub use crate::emitter::Emitter;
    pub use crate::interpolation::{InterpolationDirection, InterpolationMode};
    pub use crate::mesh::{ImmediateMesh, MeshSink, TrailVertex};
    pub use crate::trail::{TickReport, Trail};
    pub use glam::{Vec2, Vec3, Vec4};
}
