//! Error types for the Pixpie client

use thiserror::Error;

/// Pixpie client error type
#[derive(Error, Debug)]
pub enum PixpieError {
    #[error("SDK authentication failed ({status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Environment variable not found: {0}")]
    EnvVar(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for Pixpie operations
pub type PixpieResult<T> = Result<T, PixpieError>;

impl PixpieError {
    /// Create an authentication error from a failed handshake
    pub fn authentication(status: u16, message: impl Into<String>) -> Self {
        Self::Authentication {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status() {
        assert_eq!(PixpieError::authentication(401, "denied").status(), Some(401));
        let err = PixpieError::UnexpectedStatus {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(PixpieError::EnvVar("X".to_string()).status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = PixpieError::authentication(500, "boom");
        assert_eq!(err.to_string(), "SDK authentication failed (500): boom");
    }
}
