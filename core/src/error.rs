//! Error types for terrain generation and config persistence.

/// Errors returned by [`generate_terrain`](crate::generate_terrain).
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// A buffer could not be reserved. Nothing partially built is returned.
    #[error("failed to allocate {what}")]
    AllocationFailure { what: &'static str },

    /// The config was rejected before any sampling happened.
    #[error("invalid terrain config: {0}")]
    InvalidConfig(String),
}

/// Errors that can occur when loading, saving, or parsing a terrain config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The preset name is not one of the known presets.
    #[error("unknown terrain preset `{0}`")]
    UnknownPreset(String),
}
