//! In-memory billing backend playing the server's role for tests.
//!
//! The fake owns bills and computes every total, the same authority
//! split as production: the controller under test only ever reloads.
//! Fault switches let tests reject specific operations the way the
//! server would.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use kirana_core::{BillCreated, BillItem, BillSnapshot, Product};
use kirana_gateway::{GatewayError, GatewayResult};

use crate::backend::BillingBackend;

/// Opt-in log output for tests: `RUST_LOG=debug cargo test -- --nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
pub struct FakeState {
    /// Catalog, keyed by barcode.
    pub products: HashMap<String, Product>,

    /// Open bills, keyed by bill id.
    pub bills: HashMap<String, Vec<BillItem>>,

    /// Bills that have been checked out.
    pub completed: Vec<String>,

    pub create_calls: u32,
    next_bill: u32,
    next_line: u32,

    // Fault switches.
    pub fail_create: bool,
    pub fail_add: bool,
    pub fail_checkout: bool,
    /// Line-item id whose removal the server rejects.
    pub fail_remove_item: Option<String>,
}

/// Cloneable in-memory backend.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, barcode: &str, name: &str, price: f64, stock: u32) -> Self {
        {
            let mut state = self.state();
            let next_index = state.products.len() + 1;
            state.products.insert(
                barcode.to_string(),
                Product {
                    id: format!("p-{}", next_index),
                    barcode_id: barcode.to_string(),
                    name: name.to_string(),
                    category: "Grocery".to_string(),
                    price,
                    stock,
                },
            );
        }
        self
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn snapshot_of(items: &[BillItem]) -> BillSnapshot {
        // The fake is the server: it alone computes totals.
        BillSnapshot {
            items: items.to_vec(),
            grand_total: items.iter().map(|i| i.total).sum(),
        }
    }
}

#[async_trait]
impl BillingBackend for FakeBackend {
    async fn product_by_barcode(&self, barcode: &str) -> GatewayResult<Product> {
        self.state()
            .products
            .get(barcode)
            .cloned()
            .ok_or_else(|| GatewayError::rejected("Product not found"))
    }

    async fn create_bill(&self) -> GatewayResult<BillCreated> {
        let mut state = self.state();
        state.create_calls += 1;
        if state.fail_create {
            return Err(GatewayError::rejected("Failed to create bill"));
        }
        state.next_bill += 1;
        let bill_id = format!("bill-{}", state.next_bill);
        state.bills.insert(bill_id.clone(), Vec::new());
        Ok(BillCreated { bill_id })
    }

    async fn fetch_bill(&self, bill_id: &str) -> GatewayResult<BillSnapshot> {
        self.state()
            .bills
            .get(bill_id)
            .map(|items| Self::snapshot_of(items))
            .ok_or_else(|| GatewayError::rejected("Bill not found"))
    }

    async fn add_item(&self, bill_id: &str, barcode_id: &str, quantity: i64) -> GatewayResult<()> {
        let mut state = self.state();
        if state.fail_add {
            return Err(GatewayError::rejected("Failed to add product to cart"));
        }
        let product = state
            .products
            .get(barcode_id)
            .cloned()
            .ok_or_else(|| GatewayError::rejected("Product not found"))?;
        state.next_line += 1;
        let line_id = format!("line-{}", state.next_line);
        let items = state
            .bills
            .get_mut(bill_id)
            .ok_or_else(|| GatewayError::rejected("Bill not found"))?;

        // Server merges repeat scans of the same barcode into one line.
        if let Some(line) = items.iter_mut().find(|i| i.barcode_id == barcode_id) {
            line.quantity += quantity;
            line.total = line.price * line.quantity as f64;
        } else {
            items.push(BillItem {
                id: line_id,
                barcode_id: barcode_id.to_string(),
                name: product.name,
                price: product.price,
                quantity,
                total: product.price * quantity as f64,
            });
        }
        Ok(())
    }

    async fn update_item(&self, bill_id: &str, item_id: &str, quantity: i64) -> GatewayResult<()> {
        let mut state = self.state();
        let items = state
            .bills
            .get_mut(bill_id)
            .ok_or_else(|| GatewayError::rejected("Bill not found"))?;
        let line = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| GatewayError::rejected("Item not found"))?;
        line.quantity = quantity;
        line.total = line.price * quantity as f64;
        Ok(())
    }

    async fn remove_item(&self, bill_id: &str, item_id: &str) -> GatewayResult<()> {
        let mut state = self.state();
        if state.fail_remove_item.as_deref() == Some(item_id) {
            return Err(GatewayError::rejected("Failed to remove item"));
        }
        let items = state
            .bills
            .get_mut(bill_id)
            .ok_or_else(|| GatewayError::rejected("Bill not found"))?;
        let before = items.len();
        items.retain(|i| i.id != item_id);
        if items.len() == before {
            return Err(GatewayError::rejected("Item not found"));
        }
        Ok(())
    }

    async fn checkout_bill(&self, bill_id: &str) -> GatewayResult<()> {
        let mut state = self.state();
        if state.fail_checkout {
            return Err(GatewayError::rejected("Failed to complete sale"));
        }
        state
            .bills
            .remove(bill_id)
            .ok_or_else(|| GatewayError::rejected("Bill not found"))?;
        state.completed.push(bill_id.to_string());
        Ok(())
    }
}
