//! # Order Resource
//!
//! Order calls under `/donhang`.
//!
//! ## Who Calls What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer checkout                                                      │
//! │    submit(&OrderSubmission) ──► POST /donhang/full ──► new order id     │
//! │                                                                         │
//! │  Admin order book                                                       │
//! │    list(status?)            ──► GET    /donhang[?trang_thai=]           │
//! │    get(id)                  ──► GET    /donhang/{id}                    │
//! │    update_status(id, s)     ──► PATCH  /donhang/{id}/status             │
//! │    cancel(id)               ──► PATCH  /donhang/{id}/cancel (restocks)  │
//! │    delete(id)               ──► DELETE /donhang/{id}                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use trasua_core::{Order, OrderStatus, OrderSubmission};

use crate::client::ApiClient;
use crate::error::ClientResult;

#[derive(Debug, Serialize)]
struct StatusChange {
    trang_thai: OrderStatus,
}

#[derive(Debug, Deserialize)]
struct CreatedOrder {
    #[serde(rename = "_id")]
    id: String,
}

/// Order operations.
#[derive(Debug, Clone)]
pub struct OrderResource {
    client: ApiClient,
}

impl OrderResource {
    pub fn new(client: ApiClient) -> Self {
        OrderResource { client }
    }

    /// Lists orders, optionally only those in one status.
    pub async fn list(&self, status: Option<OrderStatus>) -> ClientResult<Vec<Order>> {
        let path = "/donhang";
        let mut builder = self.client.request(Method::GET, path);
        if let Some(status) = status {
            builder = builder.query(&[("trang_thai", status.code())]);
        }

        let orders: Vec<Order> = self.client.fetch(builder, path).await?;
        debug!(count = orders.len(), status = ?status, "Listed orders");
        Ok(orders)
    }

    /// Order with its line items.
    pub async fn get(&self, id: &str) -> ClientResult<Order> {
        let path = format!("/donhang/{}", id);
        self.client
            .fetch(self.client.request(Method::GET, &path), &path)
            .await
    }

    /// Places an order and returns the id the service assigned.
    pub async fn submit(&self, submission: &OrderSubmission) -> ClientResult<String> {
        let path = "/donhang/full";
        let builder = self.client.request(Method::POST, path).json(submission);
        let created: CreatedOrder = self.client.fetch(builder, path).await?;

        info!(
            order_id = %created.id,
            lines = submission.lines.len(),
            "Order submitted"
        );
        Ok(created.id)
    }

    pub async fn update_status(&self, id: &str, status: OrderStatus) -> ClientResult<()> {
        let path = format!("/donhang/{}/status", id);
        let builder = self
            .client
            .request(Method::PATCH, &path)
            .json(&StatusChange { trang_thai: status });
        self.client.execute(builder, &path).await
    }

    /// Cancels the order; the service returns its items to stock.
    pub async fn cancel(&self, id: &str) -> ClientResult<()> {
        let path = format!("/donhang/{}/cancel", id);
        self.client
            .execute(self.client.request(Method::PATCH, &path), &path)
            .await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let path = format!("/donhang/{}", id);
        self.client
            .execute(self.client.request(Method::DELETE, &path), &path)
            .await
    }
}

// =============================================================================
// Tests
// =============================================================================
