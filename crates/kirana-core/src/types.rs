//! # Domain Types
//!
//! Wire and domain types shared across the client.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  BillSnapshot   │   │    Receipt      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  items          │   │  store          │       │
//! │  │  barcodeId      │   │  grandTotal     │   │  customer       │       │
//! │  │  name, category │   │   (server-      │   │  paymentMode    │       │
//! │  │  price, stock   │   │    computed)    │   │  items, billId  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    BillItem     │   │ CustomerSnapshot │   │  PaymentMode    │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id (line id)   │   │  name            │   │  Cash           │      │
//! │  │  barcodeId      │   │  contactNumber?  │   │  Online         │      │
//! │  │  price, qty ≥ 1 │   │                  │   └─────────────────┘      │
//! │  │  total (server) │   └──────────────────┘                            │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Server Authority
//! `BillItem.total` and `BillSnapshot.grand_total` are recomputed by the
//! backend after every mutation. The client carries them verbatim and never
//! recomputes them for display of stored state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A catalog product, read through from the backend.
///
/// The client holds read-only copies; every mutation is a server round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend-assigned identifier.
    pub id: String,

    /// Unique scannable identifier. Distinct from `id`.
    pub barcode_id: String,

    /// Display name shown in the cart and on the receipt.
    pub name: String,

    /// Catalog category.
    pub category: String,

    /// Unit price in rupees, two-decimal semantics.
    pub price: f64,

    /// Units on hand. Never negative.
    pub stock: u32,
}

impl Product {
    /// Checks whether at least one unit can be sold.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Bill
// =============================================================================

/// Response payload of a bill-create call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillCreated {
    /// Opaque server-assigned bill identifier.
    pub bill_id: String,
}

/// One product line within a bill.
///
/// Uses the snapshot pattern: `price` is the unit price frozen at add-time,
/// `total` is the server's price × quantity for this line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    /// Line-item identity. Distinct from the product id.
    pub id: String,

    /// Barcode of the product this line was created from.
    pub barcode_id: String,

    /// Product name at add-time (frozen).
    pub name: String,

    /// Unit price at add-time (frozen).
    pub price: f64,

    /// Units on this line. Invariant: ≥ 1. A mutation that would reach 0
    /// is issued as a removal, never as an update.
    pub quantity: i64,

    /// Line total as computed by the server. Authoritative.
    pub total: f64,
}

/// The server's view of one open bill: the line items plus the grand total.
///
/// This is what a fetch-bill call returns, and it replaces the client's
/// in-memory state wholesale after every mutation (reload-after-write).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSnapshot {
    /// Ordered line items.
    #[serde(default)]
    pub items: Vec<BillItem>,

    /// Grand total as computed by the server. Authoritative.
    #[serde(default)]
    pub grand_total: f64,
}

impl BillSnapshot {
    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Checks whether the bill has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds a line by its line-item id.
    pub fn find_item(&self, item_id: &str) -> Option<&BillItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

// =============================================================================
// Payment Mode
// =============================================================================

/// How the customer paid. Serialized as `"Cash"` / `"Online"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    Online,
}

impl Default for PaymentMode {
    fn default() -> Self {
        PaymentMode::Cash
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMode::Cash => write!(f, "Cash"),
            PaymentMode::Online => write!(f, "Online"),
        }
    }
}

// =============================================================================
// Customer Snapshot
// =============================================================================

/// Customer details captured at checkout time.
///
/// Ephemeral: not persisted as an entity, only attached to the receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshot {
    /// Customer name. Required.
    pub name: String,

    /// Optional contact number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,

    /// How the customer paid.
    #[serde(default)]
    pub payment_mode: PaymentMode,
}

// =============================================================================
// Store / Session Identity
// =============================================================================

/// Store details printed on the receipt header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub name: String,
    pub address: String,
    pub contact_number: String,
    pub pincode: String,
}

impl StoreInfo {
    /// Placeholder store details used when the cached session carries none.
    pub fn placeholder() -> Self {
        StoreInfo {
            name: "Store Name".to_string(),
            address: "Address".to_string(),
            contact_number: "Contact Number".to_string(),
            pincode: "Pincode".to_string(),
        }
    }
}

/// The cached session identity.
///
/// Written only by the auth collaborator (out of scope); read by the
/// gateway on every call and by the session controller at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Username sent as the `x-username` identity header.
    pub username: String,

    pub shop_name: Option<String>,
    pub full_address: Option<String>,
    pub contact_number: Option<String>,
    pub pincode: Option<String>,
}

impl SessionUser {
    /// Store details for the receipt header, falling back to placeholders
    /// for any field the cached profile is missing.
    pub fn store_info(&self) -> StoreInfo {
        let fallback = StoreInfo::placeholder();
        StoreInfo {
            name: self.shop_name.clone().unwrap_or(fallback.name),
            address: self.full_address.clone().unwrap_or(fallback.address),
            contact_number: self
                .contact_number
                .clone()
                .unwrap_or(fallback.contact_number),
            pincode: self.pincode.clone().unwrap_or(fallback.pincode),
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Receipt-ready payload captured at the moment a checkout succeeds.
///
/// The print collaborator consumes this as-is; the session controller
/// clears its visible cart immediately after capturing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub store: StoreInfo,

    /// Customer details, including the payment mode.
    pub customer: CustomerSnapshot,

    /// Line items of the completed bill, as last confirmed by the server.
    pub items: Vec<BillItem>,

    pub bill_id: String,

    /// Grand total of the completed bill, as last confirmed by the server.
    pub grand_total: f64,

    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_snapshot_totals() {
        let snapshot = BillSnapshot {
            items: vec![
                BillItem {
                    id: "l1".into(),
                    barcode_id: "890100000001".into(),
                    name: "Toor Dal 1kg".into(),
                    price: 10.0,
                    quantity: 2,
                    total: 20.0,
                },
                BillItem {
                    id: "l2".into(),
                    barcode_id: "890100000002".into(),
                    name: "Sugar 500g".into(),
                    price: 5.5,
                    quantity: 1,
                    total: 5.5,
                },
            ],
            grand_total: 25.5,
        };

        assert_eq!(snapshot.line_count(), 2);
        assert_eq!(snapshot.total_quantity(), 3);
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.find_item("l2").unwrap().name, "Sugar 500g");
        assert!(snapshot.find_item("missing").is_none());
    }

    #[test]
    fn bill_snapshot_decodes_sparse_payload() {
        // The backend omits `items` on a bill that was never written to.
        let snapshot: BillSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.grand_total, 0.0);
    }

    #[test]
    fn payment_mode_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMode::Cash).unwrap(),
            "\"Cash\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMode::Online).unwrap(),
            "\"Online\""
        );
    }

    #[test]
    fn session_user_store_info_falls_back_to_placeholders() {
        let user = SessionUser {
            username: "asha".into(),
            shop_name: Some("Asha General Store".into()),
            full_address: None,
            contact_number: None,
            pincode: None,
        };

        let store = user.store_info();
        assert_eq!(store.name, "Asha General Store");
        assert_eq!(store.address, "Address");
        assert_eq!(store.pincode, "Pincode");
    }

    #[test]
    fn product_wire_format_is_camel_case() {
        let json = r#"{
            "id": "p1",
            "barcodeId": "890123456789",
            "name": "Basmati Rice 5kg",
            "category": "Grocery",
            "price": 499.0,
            "stock": 3
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.barcode_id, "890123456789");
        assert!(product.is_in_stock());
    }
}
