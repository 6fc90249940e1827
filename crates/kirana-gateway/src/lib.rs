//! # kirana-gateway: HTTP API Client for the Kirana POS Backend
//!
//! Uniform request dispatch with identity propagation and response
//! normalization. The backend owns all business rules (pricing, GST,
//! stock decrement, forecasting); this crate only moves JSON.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Gateway Request Flow                              │
//! │                                                                         │
//! │  caller ──► GatewayClient::dispatch                                     │
//! │                 │                                                       │
//! │                 ├── SessionStore.username() ──► x-username header       │
//! │                 │   (no session → header omitted, server decides)       │
//! │                 │                                                       │
//! │                 ├── reqwest (single attempt, no retry)                  │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │        { success, data, message }                                       │
//! │                 │                                                       │
//! │     success ────┼──── !success / non-2xx ──► GatewayError::Rejected    │
//! │        │        │     "Route not found"  ──► GatewayError::             │
//! │        ▼        │                            EndpointMissing            │
//! │     Ok(data)    └──── connect failure    ──► GatewayError::             │
//! │                                              CannotConnect             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod analytics;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod session;

pub use client::{GatewayClient, ProductDraft};
pub use config::ClientConfig;
pub use envelope::ApiEnvelope;
pub use error::{GatewayError, GatewayResult};
pub use session::SessionStore;
