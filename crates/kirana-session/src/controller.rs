//! # Billing Session Controller
//!
//! The bill state machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Billing Session State Machine                       │
//! │                                                                         │
//! │  ┌─────────────┐  initialize  ┌──────────────┐  bill created  ┌──────┐ │
//! │  │Uninitialized│─────────────►│ Initializing │───────────────►│Active│ │
//! │  └─────────────┘              └──────┬───────┘                └──┬───┘ │
//! │         ▲                            │ create failed             │     │
//! │         └────────────────────────────┘                           │     │
//! │                                                                  │     │
//! │   scan / change quantity / remove / clear:                       │     │
//! │     Active ──► server mutation ──► reload snapshot ──► Active    │     │
//! │     (failure: Active, snapshot stays at last confirmed)          │     │
//! │                                                                  │     │
//! │  ┌───────────┐   checkout ok   ┌────────────┐   checkout        │     │
//! │  │ Completed │◄────────────────│ Completing │◄───────────────────┘     │
//! │  └─────┬─────┘                 └─────┬──────┘                          │
//! │        │ new bill after delay        │ checkout failed                 │
//! │        ▼                             ▼                                 │
//! │   Initializing                    Active (cart intact)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Totals are never computed locally; every mutation reloads the
//!   server's snapshot.
//! - A quantity change that would reach 0 is issued as a removal.
//! - Any failure leaves the last confirmed snapshot visible.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use kirana_core::validation::{validate_barcode, validate_customer, validate_quantity};
use kirana_core::{BillItem, BillSnapshot, CustomerSnapshot, Product, Receipt, StoreInfo};
use kirana_gateway::GatewayError;

use crate::backend::BillingBackend;
use crate::error::{SessionError, SessionResult};

// =============================================================================
// Phase
// =============================================================================

/// Where the session is in the bill lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No bill exists and none is being created. Scanning disabled.
    Uninitialized,

    /// A bill-create request is in flight.
    Initializing,

    /// A bill exists; items may be empty.
    Active,

    /// A checkout request is in flight.
    Completing,

    /// Checkout succeeded; the receipt is captured and a new bill has
    /// not been created yet.
    Completed,
}

/// What a UI surface needs to render the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: SessionPhase,
    pub bill_id: Option<String>,
    pub items: Vec<BillItem>,
    pub grand_total: f64,
}

// =============================================================================
// Controller
// =============================================================================

/// Mediates all state transitions of one active bill.
///
/// Methods take `&mut self`: a second mutation cannot be dispatched
/// while one is unresolved. Share through [`SessionHandle`] to get the
/// same serialization across tasks.
///
/// [`SessionHandle`]: crate::handle::SessionHandle
pub struct BillingSession<B: BillingBackend> {
    backend: B,
    store: StoreInfo,
    phase: SessionPhase,
    bill_id: Option<String>,
    snapshot: BillSnapshot,
}

impl<B: BillingBackend> BillingSession<B> {
    /// Creates an uninitialized session.
    ///
    /// `store` is the receipt header, taken from the cached session
    /// profile (placeholders when absent).
    pub fn new(backend: B, store: StoreInfo) -> Self {
        BillingSession {
            backend,
            store,
            phase: SessionPhase::Uninitialized,
            bill_id: None,
            snapshot: BillSnapshot::default(),
        }
    }

    // =========================================================================
    // Read Side
    // =========================================================================

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }

    /// Last confirmed line items.
    pub fn items(&self) -> &[BillItem] {
        &self.snapshot.items
    }

    /// Last confirmed grand total (server-computed).
    pub fn grand_total(&self) -> f64 {
        self.snapshot.grand_total
    }

    /// Whether scan input should be enabled.
    pub fn can_scan(&self) -> bool {
        self.phase == SessionPhase::Active && self.bill_id.is_some()
    }

    /// Renderable snapshot of the whole session.
    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            bill_id: self.bill_id.clone(),
            items: self.snapshot.items.clone(),
            grand_total: self.snapshot.grand_total,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Ensures a bill exists.
    ///
    /// With a bill id already held and `force_new == false`, re-fetches
    /// that bill instead of creating another (idempotent reattachment
    /// after a transient remount). `force_new == true` always creates a
    /// fresh bill; the prior one is simply no longer referenced.
    ///
    /// On create failure no bill id is held, the phase falls back to
    /// [`SessionPhase::Uninitialized`] (or stays on the prior bill when
    /// one exists) and scanning stays disabled.
    pub async fn initialize_bill(&mut self, force_new: bool) -> SessionResult<()> {
        if !force_new {
            if let Some(bill_id) = self.bill_id.clone() {
                debug!(%bill_id, "reattaching to existing bill");
                self.reload().await?;
                self.phase = SessionPhase::Active;
                return Ok(());
            }
        }

        self.phase = SessionPhase::Initializing;
        match self.backend.create_bill().await {
            Ok(created) => {
                info!(bill_id = %created.bill_id, "bill created");
                self.bill_id = Some(created.bill_id);
                self.snapshot = BillSnapshot::default();
                self.phase = SessionPhase::Active;
                // The fresh bill is empty; the reload only confirms it.
                // A reload failure still leaves a usable empty bill, so
                // surface the error without tearing the session down.
                self.reload().await
            }
            Err(err) => {
                self.phase = if self.bill_id.is_some() {
                    SessionPhase::Active
                } else {
                    SessionPhase::Uninitialized
                };
                warn!(error = %err, "bill creation failed");
                Err(err.into())
            }
        }
    }

    /// Re-fetches the authoritative bill snapshot.
    ///
    /// On failure the in-memory snapshot stays at its last confirmed
    /// state; re-querying later always converges on ground truth.
    async fn reload(&mut self) -> SessionResult<()> {
        let bill_id = self.bill_id.clone().ok_or(SessionError::NotInitialized)?;
        let snapshot = self.backend.fetch_bill(&bill_id).await?;
        debug!(
            %bill_id,
            lines = snapshot.items.len(),
            grand_total = snapshot.grand_total,
            "bill snapshot reloaded"
        );
        self.snapshot = snapshot;
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Resolves a barcode and adds one unit of the product to the bill.
    ///
    /// Rejects empty input and requires an active bill. Unknown barcodes
    /// and zero-stock products surface without touching the bill. On
    /// success the snapshot is reloaded; the client never increments a
    /// quantity locally.
    ///
    /// Returns the resolved product so the surface can announce what was
    /// added.
    pub async fn scan_barcode(&mut self, code: &str) -> SessionResult<Product> {
        let code = validate_barcode(code)?;
        let bill_id = self.bill_id.clone().ok_or(SessionError::NotInitialized)?;

        let product = match self.backend.product_by_barcode(code).await {
            Ok(product) => product,
            Err(GatewayError::Rejected { message }) => {
                debug!(%code, "barcode not in catalog");
                return Err(SessionError::ProductNotFound(message));
            }
            Err(err) => return Err(err.into()),
        };

        if !product.is_in_stock() {
            debug!(%code, name = %product.name, "product out of stock");
            return Err(SessionError::OutOfStock { name: product.name });
        }

        // Add one unit, then trust the server's snapshot. A failure here
        // (e.g. concurrent stock depletion) leaves the bill unchanged.
        self.backend
            .add_item(&bill_id, &product.barcode_id, 1)
            .await?;
        self.reload().await?;
        info!(%bill_id, name = %product.name, "item added to bill");
        Ok(product)
    }

    /// Applies a quantity delta to a line item.
    ///
    /// A resulting quantity of 0 or less collapses into a removal; the
    /// item must end up absent, never present with quantity 0.
    pub async fn change_quantity(&mut self, item_id: &str, delta: i64) -> SessionResult<()> {
        let bill_id = self.bill_id.clone().ok_or(SessionError::NotInitialized)?;
        let item = self
            .snapshot
            .find_item(item_id)
            .ok_or_else(|| SessionError::ItemNotFound {
                item_id: item_id.to_string(),
            })?;

        let new_quantity = item.quantity + delta;
        if new_quantity <= 0 {
            return self.remove_item(item_id).await;
        }
        validate_quantity(new_quantity)?;

        self.backend
            .update_item(&bill_id, item_id, new_quantity)
            .await?;
        self.reload().await
    }

    /// Removes one line item, then reloads.
    pub async fn remove_item(&mut self, item_id: &str) -> SessionResult<()> {
        let bill_id = self.bill_id.clone().ok_or(SessionError::NotInitialized)?;
        self.backend.remove_item(&bill_id, item_id).await?;
        self.reload().await
    }

    /// Removes all line items, one by one (no bulk endpoint).
    ///
    /// On any single failure the loop aborts, a best-effort reload shows
    /// whatever the server reflects, and the error surfaces. Re-running
    /// clears the remainder.
    pub async fn clear_cart(&mut self) -> SessionResult<()> {
        let bill_id = self.bill_id.clone().ok_or(SessionError::NotInitialized)?;
        let item_ids: Vec<String> = self.snapshot.items.iter().map(|i| i.id.clone()).collect();

        for item_id in item_ids {
            if let Err(err) = self.backend.remove_item(&bill_id, &item_id).await {
                warn!(%bill_id, %item_id, error = %err, "clear cart aborted");
                // Show ground truth for whatever was removed before the
                // failure; keep the last confirmed snapshot if even the
                // reload fails.
                if let Err(reload_err) = self.reload().await {
                    warn!(error = %reload_err, "reload after aborted clear failed");
                }
                return Err(err.into());
            }
        }

        self.reload().await
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Finalizes the bill and captures the receipt payload.
    ///
    /// Requires at least one line item. On success the visible cart is
    /// cleared immediately and no bill id is held until the next
    /// initialization; on failure the cart is untouched and the phase
    /// returns to [`SessionPhase::Active`].
    pub async fn checkout(&mut self, customer: CustomerSnapshot) -> SessionResult<Receipt> {
        let bill_id = self.bill_id.clone().ok_or(SessionError::NotInitialized)?;
        if self.snapshot.is_empty() {
            return Err(SessionError::EmptyCart);
        }
        validate_customer(&customer)?;

        self.phase = SessionPhase::Completing;
        match self.backend.checkout_bill(&bill_id).await {
            Ok(()) => {
                let snapshot = std::mem::take(&mut self.snapshot);
                let receipt = Receipt {
                    store: self.store.clone(),
                    customer,
                    items: snapshot.items,
                    bill_id: bill_id.clone(),
                    grand_total: snapshot.grand_total,
                    completed_at: Utc::now(),
                };
                self.bill_id = None;
                self.phase = SessionPhase::Completed;
                info!(%bill_id, grand_total = receipt.grand_total, "bill checked out");
                Ok(receipt)
            }
            Err(err) => {
                // Cart stays intact; the operator can retry.
                self.phase = SessionPhase::Active;
                warn!(%bill_id, error = %err, "checkout failed");
                Err(err.into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
