//! Error types for Mote

use thiserror::Error;

/// The main error type for Mote operations
#[derive(Debug, Error)]
pub enum MoteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Texture overflow: {count} particles do not fit a {dimension}x{dimension} texture")]
    TextureOverflow { count: usize, dimension: u32 },

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Dependency unavailable: {name} not ready after {attempts} attempts")]
    DependencyUnavailable { name: String, attempts: u32 },

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias for Mote operations
pub type Result<T> = std::result::Result<T, MoteError>;

impl From<toml::de::Error> for MoteError {
    fn from(err: toml::de::Error) -> Self {
        MoteError::TomlParseError(err.to_string())
    }
}
