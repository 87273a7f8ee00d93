//! Error types for the towadmin dashboard

use std::{error::Error as StdError, fmt};

/// Main error type for the towadmin dashboard
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Transport-level HTTP error (request never completed)
    Http(String),

    /// Application-level API error (the service answered, but not with "ok")
    Api {
        /// Status string reported by the service
        status: String,
        /// Human-readable message from the service
        message: String,
    },

    /// Authentication error
    Authentication(String),

    /// Not found error
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Serialization error
    Serialization(serde_json::Error),

    /// Terminal rendering or event error
    Terminal(String),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::Http(msg) => write!(f, "HTTP error: {msg}"),
            Self::Api { status, message } => {
                write!(f, "API error ({status}): {message}")
            }
            Self::Authentication(msg) => write!(f, "Authentication failed: {msg}"),
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Terminal(msg) => write!(f, "Terminal error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

// From implementations for automatic conversions
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_error = Error::from(io_error);

        match app_error {
            Error::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }

        assert!(format!("{app_error}").contains("I/O error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_configuration_error() {
        let error = Error::Configuration {
            message: "Invalid API base URL".to_string(),
        };

        assert_eq!(
            format!("{error}"),
            "Configuration error: Invalid API base URL"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_validation_error() {
        let error = Error::Validation {
            field: "email".to_string(),
            message: "Field is required".to_string(),
        };

        assert_eq!(format!("{error}"), "Validation error: email - Field is required");
    }

    #[test]
    fn test_api_error_display() {
        let error = Error::Api {
            status: "failed".to_string(),
            message: "admin user not found".to_string(),
        };

        assert_eq!(format!("{error}"), "API error (failed): admin user not found");
    }

    #[test]
    fn test_http_error_display() {
        let error = Error::Http("connection refused".to_string());
        assert_eq!(format!("{error}"), "HTTP error: connection refused");
    }

    #[test]
    fn test_authentication_error() {
        let error = Error::Authentication("invalid credentials".to_string());
        assert_eq!(format!("{error}"), "Authentication failed: invalid credentials");
    }

    #[test]
    fn test_not_found_error() {
        let error = Error::NotFound {
            resource: "operator 42".to_string(),
        };
        assert_eq!(format!("{error}"), "Resource not found: operator 42");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{bad json").unwrap_err();
        let app_error = Error::from(json_error);

        match app_error {
            Error::Serialization(_) => {}
            _ => panic!("Expected Serialization error variant"),
        }

        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_other_error_display_is_bare() {
        let error = Error::Other("something odd happened".to_string());
        assert_eq!(format!("{error}"), "something odd happened");
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        fn returns_error() -> Result<String> {
            Err(Error::Other("test error".to_string()))
        }

        assert!(returns_result().is_ok());
        assert!(returns_error().is_err());
    }
}
