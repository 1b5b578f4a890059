//! Color interpolation along the trail.
//!
//! Two independent settings decide how a point's color is picked:
//!
//! - [`InterpolationDirection`] maps a point's index fraction (0 at the
//!   oldest point, 1 at the newest) to a *progress* value.
//! - [`InterpolationMode`] eases that progress before it blends between the
//!   start and end colors.
//!
//! | Mode | Easing |
//! |------|--------|
//! | [`InterpolationMode::Linear`] | `p` |
//! | [`InterpolationMode::Square`] | `p^2` |
//! | [`InterpolationMode::Cube`] | `p^3` |
//! | [`InterpolationMode::Quad`] | `p^4` |
//! | [`InterpolationMode::Quint`] | `p^5` |
//! | [`InterpolationMode::Sine`] | `sin(p)` (radians) |

use std::fmt;
use std::str::FromStr;

use glam::Vec4;

use crate::error::ConfigError;

/// Easing curve applied to progress before blending colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    /// Straight blend.
    #[default]
    Linear,
    /// `p^2`.
    Square,
    /// `p^3`.
    Cube,
    /// `p^4`.
    Quad,
    /// `p^5`.
    Quint,
    /// `sin(p)` with `p` in radians. Tops out at `sin(1)`, so the end color
    /// is never fully reached.
    Sine,
}

impl InterpolationMode {
    /// Every mode, in declaration order.
    pub const ALL: [InterpolationMode; 6] = [
        InterpolationMode::Linear,
        InterpolationMode::Square,
        InterpolationMode::Cube,
        InterpolationMode::Quad,
        InterpolationMode::Quint,
        InterpolationMode::Sine,
    ];

    /// Apply the easing curve to `progress`.
    #[inline]
    pub fn ease(self, progress: f32) -> f32 {
        match self {
            InterpolationMode::Linear => progress,
            InterpolationMode::Square => progress.powi(2),
            InterpolationMode::Cube => progress.powi(3),
            InterpolationMode::Quad => progress.powi(4),
            InterpolationMode::Quint => progress.powi(5),
            InterpolationMode::Sine => progress.sin(),
        }
    }

    /// Next mode in declaration order, wrapping around.
    pub fn next(self) -> Self {
        let index = self as usize;
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    fn name(self) -> &'static str {
        match self {
            InterpolationMode::Linear => "Linear",
            InterpolationMode::Square => "Square",
            InterpolationMode::Cube => "Cube",
            InterpolationMode::Quad => "Quad",
            InterpolationMode::Quint => "Quint",
            InterpolationMode::Sine => "Sine",
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownVariant {
                kind: "interpolation mode",
                value: s.to_string(),
            })
    }
}

impl TryFrom<u32> for InterpolationMode {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| ConfigError::UnknownVariant {
                kind: "interpolation mode",
                value: value.to_string(),
            })
    }
}

/// Which end of the trail sits at progress 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationDirection {
    /// Newest point at progress 0, oldest at 1.
    Forward,
    /// Oldest point at progress 0, newest at 1.
    #[default]
    Backward,
}

impl InterpolationDirection {
    /// Both directions, in declaration order.
    pub const ALL: [InterpolationDirection; 2] =
        [InterpolationDirection::Forward, InterpolationDirection::Backward];

    /// Map a raw index fraction (0 = oldest, 1 = newest) to progress.
    #[inline]
    pub fn progress(self, raw_progress: f32) -> f32 {
        match self {
            InterpolationDirection::Forward => 1.0 - raw_progress,
            InterpolationDirection::Backward => raw_progress,
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            InterpolationDirection::Forward => InterpolationDirection::Backward,
            InterpolationDirection::Backward => InterpolationDirection::Forward,
        }
    }

    fn name(self) -> &'static str {
        match self {
            InterpolationDirection::Forward => "Forward",
            InterpolationDirection::Backward => "Backward",
        }
    }
}

impl fmt::Display for InterpolationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownVariant {
                kind: "interpolation direction",
                value: s.to_string(),
            })
    }
}

impl TryFrom<u32> for InterpolationDirection {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| ConfigError::UnknownVariant {
                kind: "interpolation direction",
                value: value.to_string(),
            })
    }
}

/// Serialize by name and deserialize through `FromStr`, so JSON accepts the
/// same spellings as parsing.
#[cfg(feature = "serde")]
macro_rules! serde_by_name {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = <String as serde::Deserialize>::deserialize(deserializer)?;
                name.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

#[cfg(feature = "serde")]
serde_by_name!(InterpolationMode);
#[cfg(feature = "serde")]
serde_by_name!(InterpolationDirection);

/// Blend two RGBA colors.
///
/// Written as `a * (1 - t) + b * t` so that `t = 0` yields `a` and `t = 1`
/// yields `b` bit-for-bit.
#[inline]
pub fn lerp_color(start: Vec4, end: Vec4, t: f32) -> Vec4 {
    start * (1.0 - t) + end * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_modes_hit_endpoints() {
        for mode in InterpolationMode::ALL {
            assert_eq!(mode.ease(0.0), 0.0, "{mode} at 0");
            if mode != InterpolationMode::Sine {
                assert_eq!(mode.ease(1.0), 1.0, "{mode} at 1");
            }
        }
    }

    #[test]
    fn test_ease_values() {
        assert_eq!(InterpolationMode::Linear.ease(0.5), 0.5);
        assert_eq!(InterpolationMode::Square.ease(0.5), 0.25);
        assert_eq!(InterpolationMode::Cube.ease(0.5), 0.125);
        assert_eq!(InterpolationMode::Quad.ease(0.5), 0.0625);
        assert_eq!(InterpolationMode::Quint.ease(0.5), 0.03125);
        assert!((InterpolationMode::Sine.ease(1.0) - 1.0f32.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_direction_progress() {
        assert_eq!(InterpolationDirection::Backward.progress(0.0), 0.0);
        assert_eq!(InterpolationDirection::Backward.progress(1.0), 1.0);
        assert_eq!(InterpolationDirection::Forward.progress(0.0), 1.0);
        assert_eq!(InterpolationDirection::Forward.progress(1.0), 0.0);
        assert_eq!(
            InterpolationDirection::Forward.reversed(),
            InterpolationDirection::Backward
        );
    }

    #[test]
    fn test_mode_cycles() {
        let mut mode = InterpolationMode::Linear;
        for _ in 0..InterpolationMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, InterpolationMode::Linear);
        assert_eq!(InterpolationMode::Quint.next(), InterpolationMode::Sine);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("quad".parse::<InterpolationMode>().unwrap(), InterpolationMode::Quad);
        assert_eq!(
            " Forward ".parse::<InterpolationDirection>().unwrap(),
            InterpolationDirection::Forward
        );
        assert!("Bounce".parse::<InterpolationMode>().is_err());
        assert!("Sideways".parse::<InterpolationDirection>().is_err());
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(InterpolationMode::try_from(5).unwrap(), InterpolationMode::Sine);
        assert!(matches!(
            InterpolationMode::try_from(6),
            Err(ConfigError::UnknownVariant { kind: "interpolation mode", .. })
        ));
        assert_eq!(
            InterpolationDirection::try_from(1).unwrap(),
            InterpolationDirection::Backward
        );
        assert!(InterpolationDirection::try_from(2).is_err());
    }

    #[test]
    fn test_lerp_color_exact_endpoints() {
        let start = Vec4::new(0.3, 0.7, 0.1, 0.9);
        let end = Vec4::new(0.9, 0.2, 0.6, 0.0);
        assert_eq!(lerp_color(start, end, 0.0), start);
        assert_eq!(lerp_color(start, end, 1.0), end);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_names_match_parsing() {
        let mode: InterpolationMode = serde_json::from_str(r#""quad""#).unwrap();
        assert_eq!(mode, InterpolationMode::Quad);
        let direction: InterpolationDirection = serde_json::from_str(r#"" Forward ""#).unwrap();
        assert_eq!(direction, InterpolationDirection::Forward);

        assert_eq!(serde_json::to_string(&InterpolationMode::Sine).unwrap(), r#""Sine""#);
        let err = serde_json::from_str::<InterpolationMode>(r#""Bounce""#).unwrap_err();
        assert!(err.to_string().contains("Unsupported interpolation mode: Bounce"));
    }
}
