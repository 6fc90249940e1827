//! # Gateway Client
//!
//! Uniform request dispatch for every backend endpoint.
//!
//! ## Dispatch Contract
//! - One attempt per call. No retry, no backoff: a retry is a caller
//!   decision (the UI's manual Refresh).
//! - The `x-username` identity header is attached when a session is
//!   cached; absence of a session omits the header and the server
//!   decides authorization.
//! - Non-2xx and `success:false` responses normalize into
//!   [`GatewayError`], never a panic or an opaque status code.
//! - Mutating bill calls return `()` even when the server echoes a bill:
//!   the caller always reloads the snapshot afterwards
//!   (reload-after-write), so an echoed body is never trusted.

use kirana_core::{BillCreated, BillSnapshot, Product};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::envelope::ApiEnvelope;
use crate::error::{GatewayError, GatewayResult};
use crate::session::SessionStore;

/// Header carrying the cached username on every authenticated call.
pub const IDENTITY_HEADER: &str = "x-username";

/// Marker the backend's catch-all router puts in its 404 message.
const ROUTE_NOT_FOUND_MARKER: &str = "Route not found";

// =============================================================================
// Client
// =============================================================================

/// HTTP client for the Kirana POS backend.
///
/// Cheap to clone is not a goal here; share it behind an `Arc` when
/// multiple components need it.
#[derive(Debug)]
pub struct GatewayClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl GatewayClient {
    /// Builds a client from configuration and the shared session store.
    pub fn new(config: ClientConfig, session: SessionStore) -> GatewayResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GatewayError::InvalidConfig(e.to_string()))?;

        Ok(GatewayClient {
            http,
            base_url: config.api_base_url,
            session,
        })
    }

    /// The session store this client consults on every call.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // =========================================================================
    // Billing Endpoints
    // =========================================================================

    /// Looks up a product by its barcode.
    pub async fn product_by_barcode(&self, barcode: &str) -> GatewayResult<Product> {
        let path = format!("/products/barcode/{}", barcode);
        self.get(&path).await
    }

    /// Creates a new bill and returns its server-assigned id.
    pub async fn create_bill(&self) -> GatewayResult<BillCreated> {
        let path = "/bills";
        self.execute(self.request(Method::POST, path), path).await
    }

    /// Fetches the authoritative snapshot of a bill.
    pub async fn fetch_bill(&self, bill_id: &str) -> GatewayResult<BillSnapshot> {
        let path = format!("/bills/{}", bill_id);
        self.get(&path).await
    }

    /// Adds units of a barcode to a bill. The caller reloads afterwards.
    pub async fn add_item(
        &self,
        bill_id: &str,
        barcode_id: &str,
        quantity: i64,
    ) -> GatewayResult<()> {
        let path = format!("/bills/{}/items", bill_id);
        let body = AddItemRequest {
            barcode_id,
            quantity,
        };
        self.execute_ack(self.request(Method::POST, &path).json(&body), &path)
            .await
    }

    /// Sets the quantity of an existing line item.
    pub async fn update_item(
        &self,
        bill_id: &str,
        item_id: &str,
        quantity: i64,
    ) -> GatewayResult<()> {
        let path = format!("/bills/{}/items/{}", bill_id, item_id);
        let body = UpdateQuantityRequest { quantity };
        self.execute_ack(self.request(Method::PUT, &path).json(&body), &path)
            .await
    }

    /// Removes one line item from a bill.
    pub async fn remove_item(&self, bill_id: &str, item_id: &str) -> GatewayResult<()> {
        let path = format!("/bills/{}/items/{}", bill_id, item_id);
        self.execute_ack(self.request(Method::DELETE, &path), &path)
            .await
    }

    /// Finalizes a bill. Server-side: stock decremented, sale recorded.
    pub async fn checkout_bill(&self, bill_id: &str) -> GatewayResult<()> {
        let path = format!("/bills/{}/checkout", bill_id);
        self.execute_ack(self.request(Method::POST, &path), &path)
            .await
    }

    // =========================================================================
    // Product CRUD Endpoints
    // =========================================================================

    /// Lists the full product catalog.
    pub async fn list_products(&self) -> GatewayResult<Vec<Product>> {
        self.get("/products").await
    }

    /// Creates a catalog product.
    pub async fn create_product(&self, draft: &ProductDraft) -> GatewayResult<Product> {
        let path = "/products";
        self.execute(self.request(Method::POST, path).json(draft), path)
            .await
    }

    /// Updates a catalog product.
    pub async fn update_product(&self, id: &str, draft: &ProductDraft) -> GatewayResult<Product> {
        let path = format!("/products/{}", id);
        self.execute(self.request(Method::PUT, &path).json(draft), &path)
            .await
    }

    /// Deletes a catalog product.
    pub async fn delete_product(&self, id: &str) -> GatewayResult<()> {
        let path = format!("/products/{}", id);
        self.execute_ack(self.request(Method::DELETE, &path), &path)
            .await
    }

    /// Asks the backend to mint a fresh barcode for a product.
    pub async fn regenerate_barcode(&self, id: &str) -> GatewayResult<Product> {
        let path = format!("/products/{}/regenerate-barcode", id);
        self.execute(self.request(Method::PUT, &path), &path).await
    }

    /// Adjusts the stock level of a product.
    ///
    /// Stock is a field of the product resource; there is no dedicated
    /// stock endpoint.
    pub async fn update_stock(&self, id: &str, stock: u32) -> GatewayResult<Product> {
        let path = format!("/products/{}", id);
        let body = StockUpdateRequest { stock };
        self.execute(self.request(Method::PUT, &path).json(&body), &path)
            .await
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// GET helper shared with the analytics module.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        self.execute(self.request(Method::GET, path), path).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if let Some(username) = self.session.username() {
            req = req.header(IDENTITY_HEADER, username);
        }
        req
    }

    /// Sends a request and unwraps the envelope's `data`.
    async fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        path: &str,
    ) -> GatewayResult<T> {
        debug!(%path, "dispatching request");
        let (status, body) = self.send(req).await?;

        match serde_json::from_str::<ApiEnvelope<T>>(&body) {
            Ok(envelope) if envelope.success => envelope.data.ok_or_else(|| {
                GatewayError::Malformed("success envelope carried no data".to_string())
            }),
            Ok(envelope) => Err(rejection(path, status, envelope.message)),
            Err(parse_err) => Err(undecodable(path, status, parse_err)),
        }
    }

    /// Sends a request where only the `success` flag matters.
    async fn execute_ack(&self, req: RequestBuilder, path: &str) -> GatewayResult<()> {
        debug!(%path, "dispatching request");
        let (status, body) = self.send(req).await?;

        match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body) {
            Ok(envelope) if envelope.success => Ok(()),
            Ok(envelope) => Err(rejection(path, status, envelope.message)),
            Err(parse_err) => Err(undecodable(path, status, parse_err)),
        }
    }

    async fn send(&self, req: RequestBuilder) -> GatewayResult<(StatusCode, String)> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Maps a server-side refusal to the right error variant.
///
/// The backend's catch-all router answers unknown paths with a message
/// containing "Route not found"; that one is surfaced as
/// `EndpointMissing` so panels can render a deployment hint instead of a
/// generic failure.
fn rejection(path: &str, status: StatusCode, message: Option<String>) -> GatewayError {
    match message {
        Some(m) if m.contains(ROUTE_NOT_FOUND_MARKER) => GatewayError::EndpointMissing {
            path: path.to_string(),
        },
        Some(m) => GatewayError::rejected(m),
        None => GatewayError::rejected(format!("Server error ({})", status)),
    }
}

fn undecodable(path: &str, status: StatusCode, parse_err: serde_json::Error) -> GatewayError {
    if status.is_success() {
        warn!(%path, error = %parse_err, "undecodable 2xx response");
        GatewayError::Malformed(parse_err.to_string())
    } else {
        // Non-JSON error page (proxy, crash). Keep the status visible.
        GatewayError::rejected(format!("Server error ({})", status))
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Fields of a product create/update call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemRequest<'a> {
    barcode_id: &'a str,
    quantity: i64,
}

#[derive(Debug, Serialize)]
struct UpdateQuantityRequest {
    quantity: i64,
}

#[derive(Debug, Serialize)]
struct StockUpdateRequest {
    stock: u32,
}
