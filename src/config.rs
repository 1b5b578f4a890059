//! Trail tuning parameters.
//!
//! [`TrailConfig`] is a plain struct: every field is public and can be
//! changed between ticks. Width changes only affect points captured after
//! the change, since each point freezes its widths at capture.
//!
//! # Usage
//!
//! ```ignore
//! let config = TrailConfig::default()
//!     .with_widths(0.3, 0.0)
//!     .with_lifetime(0.6)
//!     .with_colors(Vec4::new(1.0, 0.8, 0.2, 1.0), Vec4::ZERO)
//!     .with_interpolation(InterpolationMode::Square, InterpolationDirection::Backward);
//! ```
//!
//! With the `serde` feature, configs round-trip through JSON:
//!
//! ```ignore
//! let config = TrailConfig::load("assets/trails/sword.json")?;
//! ```

use glam::Vec4;

#[cfg(feature = "serde")]
use crate::error::ConfigError;
use crate::interpolation::{InterpolationDirection, InterpolationMode};

/// Recommended range for [`TrailConfig::scale_acceleration`].
pub const SCALE_ACCELERATION_RANGE: std::ops::RangeInclusive<f32> = 0.5..=1.5;

/// Everything that shapes a trail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrailConfig {
    /// Capture new points. Aging and rendering continue when off.
    pub enabled: bool,
    /// Freeze the trail entirely: no capture, no aging, no rebuild.
    pub paused: bool,
    /// Half-width at progress 0.
    pub start_width: f32,
    /// Half-width at progress 1.
    pub end_width: f32,
    /// Exponent applied to progress when narrowing the ribbon.
    pub scale_acceleration: f32,
    /// Minimum distance the emitter must travel between captures.
    pub motion_delta: f32,
    /// Seconds a point lives.
    pub lifetime: f64,
    /// Stretch U with distance (`motion_delta` per point) instead of
    /// normalizing it to the trail length.
    pub scale_texture: bool,
    /// RGBA at progress 0.
    pub start_color: Vec4,
    /// RGBA at progress 1.
    pub end_color: Vec4,
    pub color_interpolation_mode: InterpolationMode,
    pub color_interpolation_direction: InterpolationDirection,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            paused: false,
            start_width: 0.5,
            end_width: 0.0,
            scale_acceleration: 1.0,
            motion_delta: 0.1,
            lifetime: 1.0,
            scale_texture: true,
            start_color: Vec4::ONE,
            end_color: Vec4::ZERO,
            color_interpolation_mode: InterpolationMode::Linear,
            color_interpolation_direction: InterpolationDirection::Backward,
        }
    }
}

impl TrailConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // PRESETS
    // =========================================================================

    /// Sword swing preset: short-lived, wide, bright arc.
    ///
    /// Dense sampling keeps fast arcs smooth; the square easing holds the
    /// color near the blade before it drops off.
    pub fn sword_swing() -> Self {
        Self {
            start_width: 0.6,
            end_width: 0.0,
            scale_acceleration: 0.7,
            motion_delta: 0.05,
            lifetime: 0.35,
            start_color: Vec4::new(1.0, 1.0, 1.0, 0.9),
            end_color: Vec4::new(0.6, 0.8, 1.0, 0.0),
            color_interpolation_mode: InterpolationMode::Square,
            color_interpolation_direction: InterpolationDirection::Forward,
            ..Default::default()
        }
    }

    /// Projectile preset: thin streak with a hot head.
    pub fn projectile() -> Self {
        Self {
            start_width: 0.08,
            end_width: 0.0,
            scale_acceleration: 1.5,
            motion_delta: 0.2,
            lifetime: 0.5,
            scale_texture: false,
            start_color: Vec4::new(1.0, 0.9, 0.4, 1.0),
            end_color: Vec4::new(1.0, 0.2, 0.0, 0.0),
            color_interpolation_mode: InterpolationMode::Cube,
            color_interpolation_direction: InterpolationDirection::Forward,
            ..Default::default()
        }
    }

    /// Wake preset: wide, slow ribbon that keeps its width.
    ///
    /// Suited to boats, vehicles and characters leaving a path on the
    /// ground.
    pub fn wake() -> Self {
        Self {
            start_width: 1.0,
            end_width: 0.4,
            scale_acceleration: 1.0,
            motion_delta: 0.25,
            lifetime: 4.0,
            start_color: Vec4::new(0.85, 0.95, 1.0, 0.6),
            end_color: Vec4::new(0.2, 0.4, 0.6, 0.0),
            color_interpolation_mode: InterpolationMode::Linear,
            color_interpolation_direction: InterpolationDirection::Forward,
            ..Default::default()
        }
    }

    // =========================================================================
    // BUILDER
    // =========================================================================

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Set the half-widths at progress 0 and 1.
    pub fn with_widths(mut self, start: f32, end: f32) -> Self {
        self.start_width = start;
        self.end_width = end;
        self
    }

    /// Set the narrowing exponent. Values outside 0.5..=1.5 are accepted but
    /// logged.
    pub fn with_scale_acceleration(mut self, exponent: f32) -> Self {
        self.scale_acceleration = exponent;
        self.warn_out_of_range();
        self
    }

    pub fn with_motion_delta(mut self, distance: f32) -> Self {
        self.motion_delta = distance;
        self
    }

    pub fn with_lifetime(mut self, seconds: f64) -> Self {
        self.lifetime = seconds;
        self
    }

    pub fn with_scale_texture(mut self, scale: bool) -> Self {
        self.scale_texture = scale;
        self
    }

    /// Set the RGBA colors at progress 0 and 1.
    pub fn with_colors(mut self, start: Vec4, end: Vec4) -> Self {
        self.start_color = start;
        self.end_color = end;
        self
    }

    pub fn with_interpolation(
        mut self,
        mode: InterpolationMode,
        direction: InterpolationDirection,
    ) -> Self {
        self.color_interpolation_mode = mode;
        self.color_interpolation_direction = direction;
        self
    }

    /// Log values that are allowed but unlikely to be intended.
    pub(crate) fn warn_out_of_range(&self) {
        if !SCALE_ACCELERATION_RANGE.contains(&self.scale_acceleration) {
            tracing::warn!(
                scale_acceleration = self.scale_acceleration,
                "scale acceleration outside the recommended 0.5..=1.5 range"
            );
        }
        if self.lifetime <= 0.0 {
            tracing::warn!(lifetime = self.lifetime, "non-positive lifetime; points expire immediately");
        }
        if self.motion_delta < 0.0 {
            tracing::warn!(motion_delta = self.motion_delta, "negative motion delta");
        }
    }
}

#[cfg(feature = "serde")]
impl TrailConfig {
    /// Parse a config from JSON. Missing fields take their defaults;
    /// unknown interpolation names are rejected.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TrailConfig = serde_json::from_str(json)?;
        config.warn_out_of_range();
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Save the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
