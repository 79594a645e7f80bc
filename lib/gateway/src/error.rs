//! Gateway error types.
//!
//! These never cross the gateway boundary: every failure is reported to
//! callers inside an [`ApiResponse`](crate::ApiResponse) envelope. They exist
//! so internal steps can propagate with `?` and be logged with context.

use std::fmt;

/// Failures inside the gateway.
#[derive(Debug)]
pub enum GatewayError {
    /// The HTTP client could not be constructed.
    ClientBuild {
        /// Error details.
        details: String,
    },
    /// No response was received (connection refused, DNS, timeout, ...).
    Transport {
        /// The path that was requested.
        path: String,
        /// Error details.
        details: String,
    },
    /// A response arrived but its body could not be read.
    Body {
        /// The path that was requested.
        path: String,
        /// Error details.
        details: String,
    },
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientBuild { details } => {
                write!(f, "failed to build HTTP client: {}", details)
            }
            Self::Transport { path, details } => {
                write!(f, "request to '{}' failed: {}", path, details)
            }
            Self::Body { path, details } => {
                write!(f, "failed to read response from '{}': {}", path, details)
            }
        }
    }
}

impl std::error::Error for GatewayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display_names_path() {
        let err = GatewayError::Transport {
            path: "/auth/verify".to_string(),
            details: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("/auth/verify"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn client_build_error_display() {
        let err = GatewayError::ClientBuild {
            details: "tls backend unavailable".to_string(),
        };
        assert!(err.to_string().contains("HTTP client"));
    }
}
