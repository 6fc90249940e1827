//! # Analytics (BI) Reads
//!
//! Read-only dashboard data: sales trends, product performance,
//! profit/loss, demand forecast and low-stock alerts.
//!
//! All numbers here are computed server-side; the client renders whatever
//! comes back. Each call resolves to data or a normalized
//! [`GatewayError`] whose [`panel_message`] is what a degraded panel
//! shows, with an undeployed BI route distinguished from a generic
//! failure.
//!
//! [`panel_message`]: crate::error::GatewayError::panel_message

use serde::Deserialize;

use crate::client::GatewayClient;
use crate::error::GatewayResult;

// =============================================================================
// Report Types
// =============================================================================

/// Revenue/volume series for the sales-trends panel.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTrends {
    /// One point per day over the requested window.
    #[serde(default)]
    pub daily: Vec<DailySales>,

    /// Revenue over the trailing week.
    #[serde(default)]
    pub weekly_revenue: f64,

    /// Revenue over the trailing month.
    #[serde(default)]
    pub monthly_revenue: f64,
}

/// One day of sales.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,

    #[serde(default)]
    pub revenue: f64,

    /// Number of bills completed that day.
    #[serde(default)]
    pub count: i64,
}

/// Top sellers and per-category revenue.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    #[serde(default)]
    pub top_products: Vec<ProductSales>,

    #[serde(default)]
    pub category_performance: Vec<CategorySales>,
}

/// Sales rollup for one product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    pub name: String,

    #[serde(default)]
    pub total_revenue: f64,

    #[serde(default)]
    pub total_quantity: i64,
}

/// Sales rollup for one category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub category: String,

    #[serde(default)]
    pub total_revenue: f64,

    #[serde(default)]
    pub total_quantity: i64,
}

/// Per-product revenue against cost.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLoss {
    #[serde(default)]
    pub products: Vec<ProductRevenue>,

    #[serde(default)]
    pub total_revenue: f64,
}

/// Revenue line for one product in the profit/loss panel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRevenue {
    pub name: String,

    #[serde(default)]
    pub revenue: f64,

    #[serde(default)]
    pub profit: f64,
}

/// Demand forecast for the top products.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    #[serde(default)]
    pub forecasts: Vec<ProductForecast>,
}

/// Forecast series for one product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForecast {
    pub name: String,

    #[serde(default)]
    pub forecast: Vec<ForecastPoint>,
}

/// One forecast point.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: String,

    #[serde(default)]
    pub forecasted_quantity: f64,
}

/// Products at or below the low-stock threshold.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockReport {
    #[serde(default)]
    pub products: Vec<LowStockItem>,
}

/// One low-stock (or out-of-stock) product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: String,
    pub name: String,
    pub stock: u32,
}

impl LowStockItem {
    /// True when the product has sold out entirely.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

// =============================================================================
// Client Methods
// =============================================================================

impl GatewayClient {
    /// Daily sales series over the last `days` days.
    pub async fn sales_trends(&self, days: u32) -> GatewayResult<SalesTrends> {
        self.get(&format!("/bi/sales-trends?days={}", days)).await
    }

    /// Top products and per-category revenue.
    pub async fn product_performance(&self) -> GatewayResult<ProductPerformance> {
        self.get("/bi/product-performance").await
    }

    /// Per-product revenue against cost.
    pub async fn profit_loss(&self) -> GatewayResult<ProfitLoss> {
        self.get("/bi/profit-loss").await
    }

    /// Demand forecast for the top products.
    pub async fn forecast(&self) -> GatewayResult<ForecastReport> {
        self.get("/bi/forecast").await
    }

    /// Products at or below the low-stock threshold.
    pub async fn low_stock(&self) -> GatewayResult<LowStockReport> {
        self.get("/bi/low-stock").await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sales_trends_decodes_sparse_payload() {
        let trends: SalesTrends = serde_json::from_str(
            r#"{"daily":[{"date":"2026-08-01","revenue":1250.5}],"weeklyRevenue":8400.0}"#,
        )
        .unwrap();

        assert_eq!(trends.daily.len(), 1);
        assert_eq!(trends.daily[0].count, 0);
        assert_eq!(trends.weekly_revenue, 8400.0);
        assert_eq!(trends.monthly_revenue, 0.0);
    }

    #[test]
    fn forecast_decodes_nested_series() {
        let report: ForecastReport = serde_json::from_str(
            r#"{"forecasts":[
                {"name":"Toor Dal 1kg","forecast":[
                    {"date":"2026-08-08","forecastedQuantity":12.0},
                    {"date":"2026-08-09","forecastedQuantity":9.5}
                ]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(report.forecasts.len(), 1);
        assert_eq!(report.forecasts[0].forecast[1].forecasted_quantity, 9.5);
    }

    #[test]
    fn low_stock_flags_sold_out_items() {
        let report: LowStockReport = serde_json::from_str(
            r#"{"products":[
                {"id":"p1","name":"Sugar 500g","stock":0},
                {"id":"p2","name":"Tea 250g","stock":3}
            ]}"#,
        )
        .unwrap();

        assert!(report.products[0].is_out_of_stock());
        assert!(!report.products[1].is_out_of_stock());
    }
}
