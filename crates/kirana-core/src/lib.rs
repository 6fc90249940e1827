//! # kirana-core: Pure Domain Logic for the Kirana POS Client
//!
//! This crate holds everything the client knows without talking to the
//! backend or the camera: wire types, input validation, and currency
//! formatting.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Kirana POS Client Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  POS Surface (out of scope)                     │   │
//! │  │    Scan input ──► Cart table ──► Checkout dialog ──► Receipt   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   kirana-session (bill state machine)                           │   │
//! │  └──────┬───────────────────────────────────────────────┬──────────┘   │
//! │         │                                               │              │
//! │  ┌──────▼──────────┐                          ┌─────────▼──────────┐   │
//! │  │ kirana-gateway  │                          │ kirana-scan        │   │
//! │  │ (HTTP client)   │                          │ (camera engine)    │   │
//! │  └──────┬──────────┘                          └────────────────────┘   │
//! │         │                                                              │
//! │  ┌──────▼──────────────────────────────────────────────────────────┐   │
//! │  │              ★ kirana-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌───────────┐      ┌───────────┐          │   │
//! │  │   │   types   │      │  currency │      │ validation│          │   │
//! │  │   │  Product  │      │  ₹ format │      │  barcode  │          │   │
//! │  │   │  BillItem │      │  grouping │      │  customer │          │   │
//! │  │   └───────────┘      └───────────┘      └───────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO HARDWARE • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire/domain types (Product, BillItem, Receipt, etc.)
//! - [`currency`] - Rupee formatting with Indian digit grouping
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation for scans and checkout
//!
//! ## Server Ownership
//!
//! The bill, its line items and its totals are owned by the backend. This
//! crate never computes a grand total or a line total; `BillItem::total`
//! and `BillSnapshot::grand_total` are carried verbatim from the server
//! response.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item the client will request.
///
/// Client-side sanity bound only; the backend enforces the real rules.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Shortest barcode length that triggers auto-submit while typing.
///
/// Manual entry accepts any non-empty code; this window only governs when
/// a keystroke-fed input may fire a scan without an explicit Enter.
pub const AUTO_SCAN_MIN_LEN: usize = 8;

/// Longest barcode length that triggers auto-submit while typing.
pub const AUTO_SCAN_MAX_LEN: usize = 20;
