//! Error types and handling for the Wanderplan service

use thiserror::Error;

/// Main error type for the Wanderplan service
#[derive(Error, Debug)]
pub enum WanderplanError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Trip request validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The completion provider answered with a non-success status
    #[error("Upstream error ({status}): {detail}")]
    Upstream { status: u16, detail: String },

    /// The shared request deadline elapsed during the JSON phase
    #[error("Timed out during {phase}")]
    Timeout { phase: &'static str },

    /// Transport or protocol errors talking to the provider
    #[error("API error: {message}")]
    Api { message: String },
}

impl WanderplanError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new upstream rejection error
    pub fn upstream<S: Into<String>>(status: u16, detail: S) -> Self {
        Self::Upstream {
            status,
            detail: detail.into(),
        }
    }

    /// Create a new API/transport error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WanderplanError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            WanderplanError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WanderplanError::Upstream { status, .. } => {
                format!("The itinerary provider rejected the request (HTTP {status}).")
            }
            WanderplanError::Timeout { .. } => {
                "The itinerary request took too long and was aborted.".to_string()
            }
            WanderplanError::Api { .. } => {
                "Unable to reach the itinerary provider. Please check your internet connection."
                    .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WanderplanError::config("missing API key");
        assert!(matches!(config_err, WanderplanError::Config { .. }));

        let validation_err = WanderplanError::validation("destination too short");
        assert!(matches!(validation_err, WanderplanError::Validation { .. }));

        let upstream_err = WanderplanError::upstream(429, "rate limited");
        assert!(matches!(
            upstream_err,
            WanderplanError::Upstream { status: 429, .. }
        ));
    }

    #[test]
    fn test_user_messages() {
        let config_err = WanderplanError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = WanderplanError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let upstream_err = WanderplanError::upstream(502, "bad gateway");
        assert!(upstream_err.user_message().contains("502"));

        let timeout_err = WanderplanError::Timeout {
            phase: "itinerary generation",
        };
        assert!(timeout_err.user_message().contains("too long"));
    }

    #[test]
    fn test_timeout_is_distinct_from_upstream() {
        let timeout = WanderplanError::Timeout { phase: "repair" };
        assert!(!matches!(timeout, WanderplanError::Upstream { .. }));
        assert!(timeout.to_string().contains("repair"));
    }
}
