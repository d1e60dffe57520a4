//! Error types for the SocialGraph engine
//!
//! - `thiserror` for the error definitions
//! - Domain variants for rejected graph operations and broken invariants
//! - Source chaining for I/O and parse failures

use std::borrow::Cow;
use thiserror::Error;

/// Result type alias for SocialGraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the SocialGraph engine
#[derive(Debug, Error)]
pub enum Error {
    // ========================================================================
    // Graph Model Errors
    // ========================================================================
    #[error("Invalid operation: {message}")]
    InvalidOperation { message: Cow<'static, str> },

    #[error("Invariant violated: {message}")]
    InvariantViolation { message: Cow<'static, str> },

    // ========================================================================
    // Scenario Errors
    // ========================================================================
    #[error("Scenario error: {message}")]
    Scenario { message: Cow<'static, str> },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Configuration error: {message}")]
    Config { message: Cow<'static, str> },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig {
        key: &'static str,
        message: Cow<'static, str>,
    },

    // ========================================================================
    // Serialization / IO Errors
    // ========================================================================
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid operation error
    pub fn invalid_operation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create an invariant violation error
    pub fn invariant(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Create a scenario error
    pub fn scenario(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Scenario {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if the caller asked for something structurally invalid
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Error::InvalidOperation { .. })
    }

    /// Stable error code for logs and machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidOperation { .. } => "INVALID_OPERATION",
            Error::InvariantViolation { .. } => "INVARIANT_VIOLATION",
            Error::Scenario { .. } => "SCENARIO_ERROR",
            Error::Config { .. } | Error::InvalidConfig { .. } => "CONFIG_ERROR",
            Error::Json(_) | Error::Toml(_) => "SERIALIZATION_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Other(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_operation_classification() {
        assert!(Error::invalid_operation("self-follow").is_invalid_operation());
        assert!(!Error::invariant("count drift").is_invalid_operation());
        assert!(!Error::scenario("unknown user").is_invalid_operation());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::invalid_operation("x").error_code(),
            "INVALID_OPERATION"
        );
        assert_eq!(
            Error::InvalidConfig {
                key: "RANKING_TOP_N",
                message: "must be positive".into(),
            }
            .error_code(),
            "CONFIG_ERROR"
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(Error::from(io).error_code(), "IO_ERROR");
    }

    #[test]
    fn test_display_includes_message() {
        let err = Error::invalid_operation("user cannot follow itself");
        assert_eq!(
            err.to_string(),
            "Invalid operation: user cannot follow itself"
        );
    }
}
