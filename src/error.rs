//! Error types for motion trails.
//!
//! The per-tick pipeline cannot fail. Errors only come from the edges of the
//! crate: turning host-supplied values into interpolation settings, reading
//! config files, and bringing up the GPU backend.

use std::fmt;

/// Errors that can occur while building or loading a trail configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A value did not name a known interpolation mode or direction.
    UnknownVariant {
        /// Which setting was being parsed (`"interpolation mode"`, ...).
        kind: &'static str,
        /// The rejected input, as text.
        value: String,
    },
    /// Failed to read or write a config file.
    #[cfg(feature = "serde")]
    Io(std::io::Error),
    /// Config file contents were not valid JSON for a trail config.
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownVariant { kind, value } => {
                write!(f, "Unsupported {}: {}", kind, value)
            }
            #[cfg(feature = "serde")]
            ConfigError::Io(e) => write!(f, "Failed to access trail config: {}", e),
            #[cfg(feature = "serde")]
            ConfigError::Json(e) => write!(f, "Invalid trail config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::UnknownVariant { .. } => None,
            #[cfg(feature = "serde")]
            ConfigError::Io(e) => Some(e),
            #[cfg(feature = "serde")]
            ConfigError::Json(e) => Some(e),
        }
    }
}

#[cfg(feature = "serde")]
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors that can occur while bringing up the GPU trail renderer.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unknown_variant_message() {
        let err = ConfigError::UnknownVariant {
            kind: "interpolation mode",
            value: "Bounce".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported interpolation mode: Bounce");
        assert!(err.source().is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_io_error_has_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io.into();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.source().is_some());
    }
}
