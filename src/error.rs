//! Error types and handling for the `poimap` application

use thiserror::Error;

/// Main error type for the `poimap` application
#[derive(Error, Debug)]
pub enum PoiMapError {
    /// Input validation errors, rejected before any network call
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoder returned nothing usable for the query
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// An upstream service returned a non-success response
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// The translation service answered successfully but without usable text
    #[error("Empty result: {message}")]
    EmptyResult { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PoiMapError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new empty-result error
    pub fn empty_result<S: Into<String>>(message: S) -> Self {
        Self::EmptyResult {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PoiMapError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PoiMapError::NotFound { message } => message.clone(),
            PoiMapError::Upstream { .. } => {
                "Unable to reach external services. Please try again later.".to_string()
            }
            PoiMapError::EmptyResult { message } => message.clone(),
            PoiMapError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PoiMapError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for PoiMapError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let validation_err = PoiMapError::validation("empty query");
        assert!(matches!(validation_err, PoiMapError::Validation { .. }));

        let not_found_err = PoiMapError::not_found("no match for query");
        assert!(matches!(not_found_err, PoiMapError::NotFound { .. }));

        let upstream_err = PoiMapError::upstream("overpass returned 504");
        assert!(matches!(upstream_err, PoiMapError::Upstream { .. }));
    }

    #[test]
    fn test_user_messages() {
        let validation_err = PoiMapError::validation("query cannot be empty");
        assert!(
            validation_err
                .user_message()
                .contains("query cannot be empty")
        );

        let not_found_err = PoiMapError::not_found("Place not found");
        assert_eq!(not_found_err.user_message(), "Place not found");

        let upstream_err = PoiMapError::upstream("503");
        assert!(upstream_err.user_message().contains("Unable to reach"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PoiMapError = io_err.into();
        assert!(matches!(err, PoiMapError::Io { .. }));
    }
}
