//! Navigation bar errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavbarError {
    /// Filter value not in the option list
    #[error("unknown filter option: {0}")]
    UnknownFilter(String),

    /// Section directory file could not be parsed
    #[error("invalid section directory: {0}")]
    Directory(#[from] toml::de::Error),

    /// Search debounce could not be set up
    #[error(transparent)]
    Debounce(#[from] debounce::DebounceError),
}

/// Result type for navbar operations
pub type Result<T> = std::result::Result<T, NavbarError>;
