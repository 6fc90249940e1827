//! # Gateway Error Types
//!
//! Error taxonomy for outbound calls.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Gateway Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Transport      │  │   Server        │  │     Client              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  CannotConnect  │  │  Rejected       │  │  InvalidConfig          │ │
//! │  │                 │  │  EndpointMissing│  │  Malformed              │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  CannotConnect and EndpointMissing carry distinct user-facing          │
//! │  messages so a dead network reads differently from an undeployed       │
//! │  backend route.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure of one outbound call.
///
/// Every variant carries a message fit for direct display; the session
/// controller passes these through without rewording.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never reached the backend (connect/transport failure).
    #[error("Cannot connect to server. Please make sure the backend server is running.")]
    CannotConnect {
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The backend answered but refused the operation (`success:false`
    /// or a non-2xx status). The message is the server's own, when it
    /// sent one.
    #[error("{message}")]
    Rejected { message: String },

    /// The backend's router did not know the path ("Route not found").
    /// Analytics panels render this as a deployment hint, not a failure.
    #[error("Route not found: {path}")]
    EndpointMissing { path: String },

    /// A 2xx response whose body could not be decoded.
    #[error("Malformed response from server: {0}")]
    Malformed(String),

    /// Client-side configuration problem (bad base URL, unreadable file).
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl GatewayError {
    /// Creates a rejection with the server's message, or a status-derived
    /// fallback when the body carried none.
    pub fn rejected(message: impl Into<String>) -> Self {
        GatewayError::Rejected {
            message: message.into(),
        }
    }

    /// True when the backend was unreachable at the transport level.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, GatewayError::CannotConnect { .. })
    }

    /// True when the route is absent server-side (backend not deployed
    /// or an older backend version).
    pub fn is_endpoint_missing(&self) -> bool {
        matches!(self, GatewayError::EndpointMissing { .. })
    }

    /// The string an analytics panel shows in its degraded state.
    ///
    /// Distinguishes "backend route missing" from connectivity and from
    /// a generic server-side failure.
    pub fn panel_message(&self) -> String {
        match self {
            GatewayError::EndpointMissing { .. } => {
                "BI endpoint not available. Please check backend deployment.".to_string()
            }
            GatewayError::CannotConnect { .. } => self.to_string(),
            GatewayError::Rejected { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            GatewayError::CannotConnect { source: Some(err) }
        } else if err.is_decode() {
            GatewayError::Malformed(err.to_string())
        } else {
            GatewayError::CannotConnect { source: Some(err) }
        }
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::InvalidConfig(err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_message_distinguishes_categories() {
        let missing = GatewayError::EndpointMissing {
            path: "/bi/forecast".into(),
        };
        assert!(missing.panel_message().contains("backend deployment"));
        assert!(missing.is_endpoint_missing());

        let down = GatewayError::CannotConnect { source: None };
        assert!(down.panel_message().contains("Cannot connect to server"));
        assert!(down.is_connectivity());

        let rejected = GatewayError::rejected("Product is out of stock");
        assert_eq!(rejected.panel_message(), "Product is out of stock");
        assert!(!rejected.is_connectivity());
    }
}
