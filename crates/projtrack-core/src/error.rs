//! Error types for Projtrack

use thiserror::Error;

/// Result type alias using Projtrack's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Projtrack error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (E100-E199)
    #[error("{0}")]
    InvalidInput(String),

    #[error("Malformed project record on line {0}: {1}")]
    MalformedRecord(usize, String),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown configuration key: {0}. Use `projtrack config list` to see available keys.")]
    UnknownConfigKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "E100",
            Self::MalformedRecord(..) => "E101",
            Self::ConfigError(_) => "E600",
            Self::UnknownConfigKey(_) => "E601",
            Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::MalformedRecord(..) => Some(
                r#"each line must look like {"title": "...", "description": "...", "people": 3}"#
                    .to_string(),
            ),
            Self::ConfigError(_) => Some("projtrack config reset".to_string()),
            Self::UnknownConfigKey(_) => Some("projtrack config list".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_config_key_error() {
        let error = Error::UnknownConfigKey("form.colour".to_string());
        assert_eq!(error.code(), "E601");
        assert_eq!(error.suggestion(), Some("projtrack config list".to_string()));
        assert!(error.to_string().contains("form.colour"));
    }

    #[test]
    fn test_invalid_input_message_is_unprefixed() {
        let error = Error::InvalidInput("Invalid input! people must be at most 5 (got 6)".to_string());
        assert_eq!(error.code(), "E100");
        assert_eq!(error.suggestion(), None);
        assert_eq!(error.to_string(), "Invalid input! people must be at most 5 (got 6)");
    }

    #[test]
    fn test_malformed_record_error() {
        let error = Error::MalformedRecord(3, "expected value".to_string());
        assert_eq!(error.code(), "E101");
        assert!(error.suggestion().is_some());
        assert!(error.to_string().contains("line 3"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: Error = io.into();
        assert_eq!(error.code(), "E9999");
        assert_eq!(error.suggestion(), None);
    }
}
