//! Error types for image URL transformation.
//!
//! Directive validation is strict and happens at assignment time, so
//! [`ValidationError`] is kept separate from the resolution-time failures in
//! [`YootError`]. Malformed constructor input is not an error at all: it
//! degrades to an empty state.

use thiserror::Error;

/// Top-level error type for yoot operations.
#[derive(Error, Debug)]
pub enum YootError {
    /// A directive value failed its domain constraint
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// URL generation was requested on a state without a source
    #[error("Image source URL is required")]
    MissingSource,

    /// No registered adapter matched and no fallback was supplied
    #[error(
        "No adapter found for URL: {url}. Register an adapter or configure `on_missing_adapter`"
    )]
    NoAdapterFound { url: String },

    /// An adapter definition is missing a mandatory function
    #[error("Malformed adapter: {0}")]
    MalformedAdapter(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A directive value outside its allowed domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Value is NaN or infinite
    #[error("{directive} must be a finite number")]
    NotFinite { directive: &'static str },

    /// Value is outside the inclusive range
    #[error("{directive} must be between {min} and {max} (got {value})")]
    OutOfRange {
        directive: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    /// Value is not a member of the allowed set
    #[error("{directive} must be one of: {} (got {value:?})", .allowed.join(", "))]
    NotOneOf {
        directive: &'static str,
        allowed: &'static [&'static str],
        value: String,
    },

    /// `src` is not an absolute URL
    #[error("src isn't a valid URL: {0:?}")]
    InvalidSource(String),
}

impl ValidationError {
    /// Name of the directive (or field) that failed validation.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::NotFinite { directive }
            | Self::OutOfRange { directive, .. }
            | Self::NotOneOf { directive, .. } => *directive,
            Self::InvalidSource(_) => "src",
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Convenience type alias for yoot results.
pub type Result<T> = std::result::Result<T, YootError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message_names_directive() {
        let err = ValidationError::OutOfRange {
            directive: "quality",
            min: 0.0,
            max: 100.0,
            value: 101.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("quality"));
        assert!(msg.contains("between 0 and 100"));
        assert_eq!(err.directive(), "quality");
    }

    #[test]
    fn test_not_one_of_lists_allowed_values() {
        let err = ValidationError::NotOneOf {
            directive: "fit",
            allowed: &["contain", "cover"],
            value: "fill".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fit must be one of: contain, cover (got \"fill\")"
        );
    }

    #[test]
    fn test_no_adapter_found_carries_url() {
        let err = YootError::NoAdapterFound {
            url: "https://foo.com/a.jpg".to_string(),
        };
        assert!(err.to_string().contains("https://foo.com/a.jpg"));
    }

    #[test]
    fn test_validation_converts_into_yoot_error() {
        let err: YootError = ValidationError::NotFinite { directive: "dpr" }.into();
        assert!(matches!(err, YootError::Validation(_)));
    }
}
