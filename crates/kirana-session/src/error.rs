//! # Session Error Types
//!
//! Everything an operation of the billing session can surface. Each
//! variant carries a user-renderable message; the UI's only job is to
//! show it and re-enable controls. No session operation panics or lets
//! an error escape unstructured.

use thiserror::Error;

use kirana_core::ValidationError;
use kirana_gateway::GatewayError;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Failure of one billing-session operation.
///
/// Every variant is recoverable: the bill state is preserved at its last
/// confirmed snapshot and the operator can retry.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No active bill is held (creation failed or checkout just
    /// completed). Scanning must stay disabled until re-initialization.
    #[error("Bill not initialized. Please refresh and try again.")]
    NotInitialized,

    /// Input was rejected before any network call.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The scanned barcode resolved to no product. The bill is untouched.
    #[error("{0}")]
    ProductNotFound(String),

    /// The product exists but has zero stock. The bill is untouched.
    #[error("Product is out of stock: {name}")]
    OutOfStock { name: String },

    /// The referenced line item is not in the last confirmed snapshot.
    #[error("Item not found in bill: {item_id}")]
    ItemNotFound { item_id: String },

    /// Checkout requires at least one line item.
    #[error("Cart is empty")]
    EmptyCart,

    /// The backend refused or was unreachable; the gateway message is
    /// passed through unchanged.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl SessionError {
    /// True when the failure is a transport-level connectivity problem,
    /// as opposed to a validation or business refusal.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, SessionError::Gateway(g) if g.is_connectivity())
    }
}
