//! # Session Handle
//!
//! Shared access to one [`BillingSession`] with two jobs the raw
//! controller cannot do alone:
//!
//! 1. **Mutation serialization.** The handle holds a mutex across the
//!    whole operation (request + reload), so a second mutation cannot be
//!    dispatched against the bill while one is unresolved. This is the
//!    concrete form of "disable the scan input while a scan is pending".
//! 2. **Delayed re-initialization.** After a successful checkout the
//!    handle schedules a forced `initialize_bill(true)` once the
//!    new-bill delay elapses, leaving the receipt view stable before the
//!    next sale becomes interactive.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::warn;

use kirana_core::{CustomerSnapshot, Product, Receipt};

use crate::backend::BillingBackend;
use crate::controller::{BillingSession, SessionView};
use crate::error::SessionResult;

// =============================================================================
// Options
// =============================================================================

/// Tunables for a shared session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// How long after a successful checkout the next bill is created.
    ///
    /// Exists to let the receipt dialog settle before the POS becomes
    /// interactive again. Tunable, not load-bearing.
    pub new_bill_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            new_bill_delay: Duration::from_secs(2),
        }
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Cloneable handle to a shared billing session.
pub struct SessionHandle<B: BillingBackend + 'static> {
    inner: Arc<Mutex<BillingSession<B>>>,
    options: SessionOptions,
}

impl<B: BillingBackend + 'static> Clone for SessionHandle<B> {
    fn clone(&self) -> Self {
        SessionHandle {
            inner: Arc::clone(&self.inner),
            options: self.options.clone(),
        }
    }
}

impl<B: BillingBackend + 'static> SessionHandle<B> {
    /// Wraps a session with default options.
    pub fn new(session: BillingSession<B>) -> Self {
        Self::with_options(session, SessionOptions::default())
    }

    /// Wraps a session with explicit options.
    pub fn with_options(session: BillingSession<B>, options: SessionOptions) -> Self {
        SessionHandle {
            inner: Arc::new(Mutex::new(session)),
            options,
        }
    }

    /// Renderable snapshot of the session.
    pub async fn view(&self) -> SessionView {
        self.inner.lock().await.view()
    }

    /// See [`BillingSession::initialize_bill`].
    pub async fn initialize_bill(&self, force_new: bool) -> SessionResult<()> {
        self.inner.lock().await.initialize_bill(force_new).await
    }

    /// See [`BillingSession::scan_barcode`]. The lock is held for the
    /// full add + reload, so concurrent scans queue instead of racing.
    pub async fn scan_barcode(&self, code: &str) -> SessionResult<Product> {
        self.inner.lock().await.scan_barcode(code).await
    }

    /// See [`BillingSession::change_quantity`].
    pub async fn change_quantity(&self, item_id: &str, delta: i64) -> SessionResult<()> {
        self.inner.lock().await.change_quantity(item_id, delta).await
    }

    /// See [`BillingSession::remove_item`].
    pub async fn remove_item(&self, item_id: &str) -> SessionResult<()> {
        self.inner.lock().await.remove_item(item_id).await
    }

    /// See [`BillingSession::clear_cart`].
    pub async fn clear_cart(&self) -> SessionResult<()> {
        self.inner.lock().await.clear_cart().await
    }

    /// Checks out the bill and schedules the next one.
    ///
    /// On success the receipt payload is returned for the print
    /// collaborator and a background task creates a fresh bill after
    /// [`SessionOptions::new_bill_delay`]. On failure nothing is
    /// scheduled and the cart stays intact.
    pub async fn checkout(&self, customer: CustomerSnapshot) -> SessionResult<Receipt> {
        let receipt = self.inner.lock().await.checkout(customer).await?;

        let inner = Arc::clone(&self.inner);
        let delay = self.options.new_bill_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = inner.lock().await.initialize_bill(true).await {
                // Surfaced on the next user action as NotInitialized;
                // the operator can also refresh manually.
                warn!(error = %err, "automatic new bill creation failed");
            }
        });

        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SessionPhase;
    use crate::testing::FakeBackend;
    use kirana_core::{PaymentMode, StoreInfo};

    fn handle(backend: &FakeBackend) -> SessionHandle<FakeBackend> {
        SessionHandle::new(BillingSession::new(
            backend.clone(),
            StoreInfo::placeholder(),
        ))
    }

    fn walk_in() -> CustomerSnapshot {
        CustomerSnapshot {
            name: "Meena".to_string(),
            contact_number: Some("+919812345678".to_string()),
            payment_mode: PaymentMode::Online,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn checkout_creates_a_new_bill_after_the_delay() {
        crate::testing::init_tracing();
        let backend = FakeBackend::new().with_product("8901000000011", "Toor Dal 1kg", 10.0, 50);
        let handle = handle(&backend);

        handle.initialize_bill(false).await.unwrap();
        handle.scan_barcode("8901000000011").await.unwrap();
        let first_bill = handle.view().await.bill_id.unwrap();

        let receipt = handle.checkout(walk_in()).await.unwrap();
        assert_eq!(receipt.grand_total, 10.0);

        // Immediately after checkout: empty cart, no bill yet.
        let view = handle.view().await;
        assert_eq!(view.phase, SessionPhase::Completed);
        assert!(view.bill_id.is_none());
        assert!(view.items.is_empty());

        // Paused time fast-forwards through the new-bill delay.
        tokio::time::sleep(Duration::from_secs(3)).await;

        let view = handle.view().await;
        assert_eq!(view.phase, SessionPhase::Active);
        let next_bill = view.bill_id.expect("a new bill within the delay window");
        assert_ne!(next_bill, first_bill);
        assert!(view.items.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_checkout_schedules_nothing() {
        let backend = FakeBackend::new().with_product("8901000000011", "Toor Dal 1kg", 10.0, 50);
        backend.state().fail_checkout = true;
        let handle = handle(&backend);

        handle.initialize_bill(false).await.unwrap();
        handle.scan_barcode("8901000000011").await.unwrap();
        let bill_id = handle.view().await.bill_id.unwrap();

        handle.checkout(walk_in()).await.unwrap_err();
        tokio::time::sleep(Duration::from_secs(5)).await;

        // Same bill, cart intact, only the one create call ever made.
        let view = handle.view().await;
        assert_eq!(view.bill_id.as_deref(), Some(bill_id.as_str()));
        assert_eq!(view.items.len(), 1);
        assert_eq!(backend.state().create_calls, 1);
    }

    #[tokio::test]
    async fn clones_drive_the_same_session() {
        let backend = FakeBackend::new().with_product("8901000000011", "Toor Dal 1kg", 10.0, 50);
        let handle = handle(&backend);
        let clone = handle.clone();

        handle.initialize_bill(false).await.unwrap();
        clone.scan_barcode("8901000000011").await.unwrap();

        assert_eq!(handle.view().await.items.len(), 1);
    }
}
