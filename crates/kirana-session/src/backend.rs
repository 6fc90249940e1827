//! # Billing Backend Seam
//!
//! The set of server operations the session controller depends on.
//! Production wires [`GatewayClient`] here; tests substitute an
//! in-memory fake that plays the server's role, totals included.
//!
//! [`GatewayClient`]: kirana_gateway::GatewayClient

use async_trait::async_trait;

use kirana_core::{BillCreated, BillSnapshot, Product};
use kirana_gateway::{GatewayClient, GatewayResult};

/// Server operations backing one billing session.
///
/// All totals in returned snapshots are server-computed; implementors
/// are the authority, callers only reload.
#[async_trait]
pub trait BillingBackend: Send + Sync {
    /// Resolves a barcode to a product, or a rejection when unknown.
    async fn product_by_barcode(&self, barcode: &str) -> GatewayResult<Product>;

    /// Creates a new bill.
    async fn create_bill(&self) -> GatewayResult<BillCreated>;

    /// Fetches the authoritative snapshot of a bill.
    async fn fetch_bill(&self, bill_id: &str) -> GatewayResult<BillSnapshot>;

    /// Adds units of a barcode to a bill.
    async fn add_item(&self, bill_id: &str, barcode_id: &str, quantity: i64) -> GatewayResult<()>;

    /// Sets the quantity of an existing line item.
    async fn update_item(&self, bill_id: &str, item_id: &str, quantity: i64) -> GatewayResult<()>;

    /// Removes one line item.
    async fn remove_item(&self, bill_id: &str, item_id: &str) -> GatewayResult<()>;

    /// Finalizes a bill (stock decrement and sale record server-side).
    async fn checkout_bill(&self, bill_id: &str) -> GatewayResult<()>;
}

#[async_trait]
impl BillingBackend for GatewayClient {
    async fn product_by_barcode(&self, barcode: &str) -> GatewayResult<Product> {
        GatewayClient::product_by_barcode(self, barcode).await
    }

    async fn create_bill(&self) -> GatewayResult<BillCreated> {
        GatewayClient::create_bill(self).await
    }

    async fn fetch_bill(&self, bill_id: &str) -> GatewayResult<BillSnapshot> {
        GatewayClient::fetch_bill(self, bill_id).await
    }

    async fn add_item(&self, bill_id: &str, barcode_id: &str, quantity: i64) -> GatewayResult<()> {
        GatewayClient::add_item(self, bill_id, barcode_id, quantity).await
    }

    async fn update_item(&self, bill_id: &str, item_id: &str, quantity: i64) -> GatewayResult<()> {
        GatewayClient::update_item(self, bill_id, item_id, quantity).await
    }

    async fn remove_item(&self, bill_id: &str, item_id: &str) -> GatewayResult<()> {
        GatewayClient::remove_item(self, bill_id, item_id).await
    }

    async fn checkout_bill(&self, bill_id: &str) -> GatewayResult<()> {
        GatewayClient::checkout_bill(self, bill_id).await
    }
}
