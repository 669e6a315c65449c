//! # Order Commands
//!
//! Checkout for customers and the order book for admins.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  trasua> checkout --name "Nguyễn Văn A" --phone 0901234567 --address .. │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderSubmission::from_cart()                                           │
//! │       ├── cart empty? ──────────────► CART_ERROR, cart untouched        │
//! │       └── form invalid? ────────────► VALIDATION_ERROR, cart untouched  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /donhang/full                                                     │
//! │       ├── service error? ───────────► error, cart untouched             │
//! │       └── order id                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart cleared, OrderReceipt printed                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Admin Transitions
//! ```text
//!  confirm   cho_xac_nhan ──► dang_xu_ly
//!  complete  dang_xu_ly   ──► hoan_thanh
//!  cancel    cho_xac_nhan | dang_xu_ly ──► da_huy  (service restocks)
//!  delete    da_huy | hoan_thanh ──► gone
//! ```
//! The current status is fetched first; a transition that does not fit it
//! fails with `BUSINESS_LOGIC` and nothing is sent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use trasua_core::{CoreError, CustomerInfo, Money, Order, OrderFilter, OrderStatus, OrderSubmission};

use crate::error::AppResult;
use crate::state::Session;

/// What the customer sees after placing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String,
    pub total: Money,
    pub total_display: String,
    pub item_count: u64,
    pub customer: CustomerInfo,
}

/// One row of the admin order list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub short_id: String,
    pub customer_name: String,
    pub phone: String,
    pub status: OrderStatus,
    pub status_label: String,
    pub total: Money,
    pub total_display: String,
    pub placed_at: DateTime<Utc>,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        OrderSummary {
            id: order.id.clone(),
            short_id: order.short_id().to_string(),
            customer_name: order.customer_name.clone(),
            phone: order.phone.clone(),
            status: order.status,
            status_label: order.status.label().to_string(),
            total: order.total,
            total_display: order.total.to_string(),
            placed_at: order.placed_at,
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Places an order for everything in the cart.
///
/// ## Behavior
/// - Validates the form and the cart before any request
/// - Clears the cart only once the service has accepted the order
pub async fn checkout(session: &mut Session, customer: CustomerInfo) -> AppResult<OrderReceipt> {
    debug!(lines = session.cart().len(), "checkout command");

    let submission = OrderSubmission::from_cart(&customer, session.cart())?;
    let total = session.cart().total_price();
    let item_count = session.cart().total_items();

    let order_id = session.api().orders().submit(&submission).await?;
    session.cart_mut().clear();

    info!(
        order_id = %order_id,
        total = %total,
        items = item_count,
        "Order placed"
    );

    Ok(OrderReceipt {
        order_id,
        total,
        total_display: session.config().format_currency(total),
        item_count,
        customer: CustomerInfo {
            customer_name: submission.customer_name,
            phone: submission.phone,
            address: submission.address,
            order_note: submission.order_note,
        },
    })
}

// =============================================================================
// Admin
// =============================================================================

/// Lists orders. The status goes to the service; search and date are
/// applied here.
pub async fn list_orders(session: &Session, filter: OrderFilter) -> AppResult<Vec<OrderSummary>> {
    debug!(status = ?filter.status, search = ?filter.search, date = ?filter.date, "list_orders command");

    let orders = session.api().orders().list(filter.status).await?;
    let rows: Vec<OrderSummary> = filter
        .apply(&orders)
        .into_iter()
        .map(OrderSummary::from)
        .collect();

    debug!(fetched = orders.len(), shown = rows.len(), "Orders filtered");
    Ok(rows)
}

/// Order with its line items.
pub async fn get_order(session: &Session, id: &str) -> AppResult<Order> {
    debug!(id = %id, "get_order command");
    Ok(session.api().orders().get(id).await?)
}

pub async fn confirm_order(session: &Session, id: &str) -> AppResult<Order> {
    debug!(id = %id, "confirm_order command");
    ensure_status(session, id, "confirm", OrderStatus::can_confirm).await?;

    session
        .api()
        .orders()
        .update_status(id, OrderStatus::Processing)
        .await?;
    info!(id = %id, "Order confirmed");
    get_order(session, id).await
}

pub async fn complete_order(session: &Session, id: &str) -> AppResult<Order> {
    debug!(id = %id, "complete_order command");
    ensure_status(session, id, "complete", OrderStatus::can_complete).await?;

    session
        .api()
        .orders()
        .update_status(id, OrderStatus::Completed)
        .await?;
    info!(id = %id, "Order completed");
    get_order(session, id).await
}

/// Cancels the order; the service puts its items back in stock.
pub async fn cancel_order(session: &Session, id: &str) -> AppResult<Order> {
    debug!(id = %id, "cancel_order command");
    ensure_status(session, id, "cancel", OrderStatus::can_cancel).await?;

    session.api().orders().cancel(id).await?;
    info!(id = %id, "Order cancelled");
    get_order(session, id).await
}

pub async fn delete_order(session: &Session, id: &str) -> AppResult<()> {
    debug!(id = %id, "delete_order command");
    ensure_status(session, id, "delete", OrderStatus::can_delete).await?;

    session.api().orders().delete(id).await?;
    info!(id = %id, "Order deleted");
    Ok(())
}

async fn ensure_status(
    session: &Session,
    id: &str,
    action: &str,
    allowed: fn(&OrderStatus) -> bool,
) -> AppResult<()> {
    let order = session.api().orders().get(id).await?;
    if allowed(&order.status) {
        return Ok(());
    }

    Err(CoreError::InvalidOrderStatus {
        order_id: order.short_id().to_string(),
        current_status: order.status.code().to_string(),
        action: action.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{envelope, order_json, session_for};
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use serde_json::json;
    use trasua_core::{CartProduct, Customization};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn customer() -> CustomerInfo {
        CustomerInfo {
            customer_name: " Nguyễn Văn A ".to_string(),
            phone: "0901 234 567".to_string(),
            address: "12 Lê Lợi".to_string(),
            order_note: "Giao giờ hành chính".to_string(),
        }
    }

    fn fill_cart(session: &mut Session) {
        let p1 = CartProduct::new("p1", "Trà Sữa Trân Châu", Money::from_dong(25_000), 10);
        let cart = session.cart_mut();
        cart.add(&p1, Customization::default());
        cart.add(&p1, Customization::default());
    }

    async fn mount_order(server: &MockServer, id: &str, status: &str, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/api/donhang/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(order_json(
                id,
                "Nguyễn Văn A",
                status,
                "2024-06-01T08:30:00.000Z",
            ))))
            .up_to_n_times(times)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/donhang/full"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(envelope(json!({"_id": "66a0b1c2d3e4f5a6b7c8d9e0"}))),
            )
            .expect(1)
            .mount(&server)
            .await;
        let mut session = session_for(&server);
        fill_cart(&mut session);

        let receipt = checkout(&mut session, customer()).await.unwrap();

        assert_eq!(receipt.order_id, "66a0b1c2d3e4f5a6b7c8d9e0");
        assert_eq!(receipt.total, Money::from_dong(50_000));
        assert_eq!(receipt.total_display, "50.000 ₫");
        assert_eq!(receipt.item_count, 2);
        assert_eq!(receipt.customer.customer_name, "Nguyễn Văn A");
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_keeps_cart_when_service_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/donhang/full"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"message": "Sản phẩm không đủ số lượng"})),
            )
            .mount(&server)
            .await;
        let mut session = session_for(&server);
        fill_cart(&mut session);

        let err = checkout(&mut session, customer()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ServiceError);
        assert_eq!(session.cart().total_items(), 2);
    }

    #[tokio::test]
    async fn test_checkout_rejects_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;
        let mut session = session_for(&server);

        let err = checkout(&mut session, customer()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        fill_cart(&mut session);
        let mut bad_phone = customer();
        bad_phone.phone = "12345".to_string();
        let err = checkout(&mut session, bad_phone).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(session.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_list_orders_filters_locally() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/donhang"))
            .and(query_param("trang_thai", "cho_xac_nhan"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
                order_json("o1", "Nguyễn Văn A", "cho_xac_nhan", "2024-06-01T08:30:00.000Z"),
                order_json("o2", "Lê Thị B", "cho_xac_nhan", "2024-06-01T09:00:00.000Z"),
                order_json("o3", "Nguyễn Thị C", "cho_xac_nhan", "2024-06-03T09:00:00.000Z"),
            ]))))
            .mount(&server)
            .await;
        let session = session_for(&server);

        let filter = OrderFilter {
            status: Some(OrderStatus::AwaitingConfirmation),
            search: Some("nguyễn".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 6, 1),
        };
        let rows = list_orders(&session, filter).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "o1");
        assert_eq!(rows[0].status_label, "Chờ Xác Nhận");
    }

    #[tokio::test]
    async fn test_confirm_order() {
        let server = MockServer::start().await;
        mount_order(&server, "o1", "cho_xac_nhan", 1).await;
        mount_order(&server, "o1", "dang_xu_ly", 1).await;
        Mock::given(method("PATCH"))
            .and(path("/api/donhang/o1/status"))
            .and(body_json(json!({"trang_thai": "dang_xu_ly"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
        let session = session_for(&server);

        let order = confirm_order(&session, "o1").await.unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_wrong_transition_sends_nothing() {
        let server = MockServer::start().await;
        mount_order(&server, "o2", "hoan_thanh", 5).await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let session = session_for(&server);

        let err = cancel_order(&session, "o2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(err.message, "Order o2 is hoan_thanh, cannot cancel");

        let err = confirm_order(&session, "o2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[tokio::test]
    async fn test_cancel_then_delete() {
        let server = MockServer::start().await;
        mount_order(&server, "o3", "dang_xu_ly", 1).await;
        mount_order(&server, "o3", "da_huy", 2).await;
        Mock::given(method("PATCH"))
            .and(path("/api/donhang/o3/cancel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/donhang/o3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
        let session = session_for(&server);

        let order = cancel_order(&session, "o3").await.unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);

        delete_order(&session, "o3").await.unwrap();
    }
}
