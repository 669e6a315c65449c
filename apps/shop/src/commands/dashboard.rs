//! # Dashboard Command
//!
//! Counters for the admin landing screen.

use serde::{Deserialize, Serialize};
use tracing::debug;

use trasua_core::OrderStats;

use crate::error::AppResult;
use crate::state::Session;

/// Admin dashboard counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_orders: usize,
    /// Orders in `dang_xu_ly`.
    pub processing_orders: usize,
    /// Orders in `da_giao`.
    pub delivered_orders: usize,
    /// Every status, for the breakdown table.
    pub by_status: OrderStats,
}

/// Loads the catalog and the order book concurrently and counts them.
pub async fn get_dashboard(session: &Session) -> AppResult<DashboardStats> {
    debug!("get_dashboard command");

    let products = session.api().products();
    let orders = session.api().orders();
    let (products, orders) = tokio::try_join!(products.list(), orders.list(None))?;

    let by_status = OrderStats::from_orders(&orders);
    Ok(DashboardStats {
        total_products: products.len(),
        total_orders: by_status.total,
        processing_orders: by_status.processing,
        delivered_orders: by_status.delivered,
        by_status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{envelope, order_json, product_json, session_for};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_dashboard_counts() {
        let server = MockServer::start().await;
        let at = "2024-06-01T08:30:00.000Z";
        Mock::given(method("GET"))
            .and(path("/api/sanpham"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
                product_json("p1", "Trà Sữa Trân Châu", 25_000, 10),
                product_json("p2", "Hồng Trà", 20_000, 0),
            ]))))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/donhang"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
                order_json("o1", "A", "dang_xu_ly", at),
                order_json("o2", "B", "dang_xu_ly", at),
                order_json("o3", "C", "da_giao", at),
                order_json("o4", "D", "cho_xac_nhan", at),
            ]))))
            .mount(&server)
            .await;
        let session = session_for(&server);

        let stats = get_dashboard(&session).await.unwrap();
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.processing_orders, 2);
        assert_eq!(stats.delivered_orders, 1);
        assert_eq!(stats.by_status.awaiting_confirmation, 1);
    }
}
