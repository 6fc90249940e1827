//! # Response Envelope
//!
//! Every backend response wraps its payload in the same JSON envelope:
//!
//! ```json
//! { "success": true,  "data": { ... } }
//! { "success": false, "message": "Product is out of stock" }
//! ```
//!
//! The envelope is decoded once in the client's dispatch path; callers
//! only ever see the unwrapped `data` or a [`GatewayError`].
//!
//! [`GatewayError`]: crate::error::GatewayError

use serde::Deserialize;

/// The backend's uniform response wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Whether the server applied the operation.
    pub success: bool,

    /// Payload, present on success (checkout-style acks omit it).
    #[serde(default)]
    pub data: Option<T>,

    /// Server-provided failure (or informational) message.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Payload {
        bill_id: String,
    }

    #[test]
    fn decodes_success_with_data() {
        let env: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"success":true,"data":{"billId":"b-42"}}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data.unwrap().bill_id, "b-42");
        assert!(env.message.is_none());
    }

    #[test]
    fn decodes_failure_with_message() {
        let env: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"success":false,"message":"Route not found"}"#).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("Route not found"));
    }

    #[test]
    fn decodes_bare_ack() {
        // Checkout acks carry no data at all.
        let env: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.success);
        assert!(env.data.is_none());
    }
}
