//! Custom error types for tint-shell
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the tint-shell library and CLI
#[derive(Error, Debug)]
pub enum ShellError {
    /// The surface to sample has no pixels across
    #[error("Cannot sample an empty surface (width is zero).")]
    EmptySurface,

    /// The off-screen row buffer could not be produced
    #[error("Cannot capture the sample row: {0}")]
    RenderBuffer(String),

    /// Image decoding failed
    #[error("Cannot read image: {0}\n\n  → Supported formats include PNG, JPEG and BMP.")]
    Image(String),

    /// Invalid color notation
    #[error("Invalid color '{0}'.\n\n  → Expected a hex color such as #1e1e2e or 1e1e2e.")]
    InvalidColor(String),

    /// Endpoint is not a parseable URL
    #[error("Invalid endpoint '{0}'.\n\n  → Expected a URL such as https://example.com or host:port.")]
    InvalidEndpoint(String),

    /// Endpoint list is empty
    #[error("No endpoints are configured.\n\n  → Run 'tint endpoints add <URL>' or 'tint endpoints reset'.")]
    NoEndpoints,

    /// Web content asked for a resource the shell does not broker
    #[error("Unknown permission resource: {0}")]
    UnknownResource(String),

    /// Credential storage error
    #[error("Cannot access secure storage: {0}\n\n  → On macOS: Make sure Keychain Access is available.\n  → On Linux: Ensure a secret service (like gnome-keyring) is running.")]
    Credential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Failed to parse stored data: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl ShellError {
    /// Whether the error only means "skip this sampling pass"
    pub fn is_sample_skip(&self) -> bool {
        matches!(self, ShellError::EmptySurface | ShellError::RenderBuffer(_))
    }
}

impl From<keyring::Error> for ShellError {
    fn from(err: keyring::Error) -> Self {
        ShellError::Credential(err.to_string())
    }
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        ShellError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ShellError {
    fn from(err: toml::ser::Error) -> Self {
        ShellError::Toml(err.to_string())
    }
}

impl From<image::ImageError> for ShellError {
    fn from(err: image::ImageError) -> Self {
        ShellError::Image(err.to_string())
    }
}

/// Result type alias using ShellError
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_skip_classification() {
        assert!(ShellError::EmptySurface.is_sample_skip());
        assert!(ShellError::RenderBuffer("offset".into()).is_sample_skip());
        assert!(!ShellError::NoEndpoints.is_sample_skip());
    }
}
