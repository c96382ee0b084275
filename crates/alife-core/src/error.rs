//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: `{parameter}` {reason}")]
    InvalidConfig { parameter: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// The offending parameter, if this is a configuration error
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Error::InvalidConfig { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = Error::invalid_config("grid.dimension", "must be positive, got 0");
        assert_eq!(err.parameter(), Some("grid.dimension"));
        assert_eq!(
            err.to_string(),
            "Invalid configuration: `grid.dimension` must be positive, got 0"
        );
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Serialization(_)));
        assert_eq!(err.parameter(), None);
    }
}
