//! # Orders
//!
//! The checkout payload built from a cart, and the admin-side order
//! filters and counters.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CustomerInfo ──┐                                                       │
//! │                 ├──► OrderSubmission::from_cart() ──► POST /donhang/full│
//! │  CartStore ─────┘        │                                    │         │
//! │                          ├── cart empty? → EmptyCart          │         │
//! │                          └── customer invalid? → Validation   ▼         │
//! │                                                           order id      │
//! │                                                               │         │
//! │                                        caller clears cart ◄───┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{CartLineItem, CartStore};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Ice, Order, OrderStatus, ProductId, Sweetness};
use crate::validation::validate_customer;
use crate::SHOP_UTC_OFFSET_SECS;

// =============================================================================
// Checkout Payload
// =============================================================================

/// Contact details typed in at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub order_note: String,
}

/// Per-line snapshot the service stores with the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineDetail {
    #[serde(rename = "ten_san_pham")]
    pub product_name: String,
    #[serde(rename = "so_luong")]
    pub quantity: u32,
    #[serde(rename = "gia")]
    pub unit_price: Money,
    #[serde(rename = "muc_ngot")]
    pub sweetness: Sweetness,
    #[serde(rename = "muc_da")]
    pub ice: Ice,
}

/// One entry of `san_phams` in the submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    #[serde(rename = "san_pham_id")]
    pub product_id: ProductId,
    #[serde(rename = "so_luong")]
    pub quantity: u32,
    #[serde(rename = "ghi_chu")]
    pub note: String,
    #[serde(rename = "chi_tiet_san_pham")]
    pub line_detail: LineDetail,
}

impl From<&CartLineItem> for OrderLine {
    fn from(item: &CartLineItem) -> Self {
        OrderLine {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            note: item.note.clone(),
            line_detail: LineDetail {
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                sweetness: item.sweetness,
                ice: item.ice,
            },
        }
    }
}

/// Body of `POST /donhang/full`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSubmission {
    #[serde(rename = "ten_khach")]
    pub customer_name: String,
    #[serde(rename = "sdt")]
    pub phone: String,
    #[serde(rename = "dia_chi")]
    pub address: String,
    #[serde(rename = "ghi_chu_don_hang")]
    pub order_note: String,
    #[serde(rename = "san_phams")]
    pub lines: Vec<OrderLine>,
}

impl OrderSubmission {
    /// Builds the submission for the current cart.
    ///
    /// ## Errors
    /// - `CoreError::EmptyCart` when there is nothing to order
    /// - `CoreError::Validation` for the first invalid customer field
    ///
    /// Text fields are sent trimmed.
    pub fn from_cart(customer: &CustomerInfo, cart: &CartStore) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        validate_customer(customer)?;

        Ok(OrderSubmission {
            customer_name: customer.customer_name.trim().to_string(),
            phone: customer.phone.trim().to_string(),
            address: customer.address.trim().to_string(),
            order_note: customer.order_note.trim().to_string(),
            lines: cart.order_lines(),
        })
    }

    /// Total the customer saw when submitting.
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .map(|l| l.line_detail.unit_price.multiply_quantity(l.quantity))
            .sum()
    }
}

// =============================================================================
// Admin Filters
// =============================================================================

/// Filters for the admin order list. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Case-insensitive customer name or phone substring.
    pub search: Option<String>,
    /// Calendar day the order was placed, in shop time.
    pub date: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }

        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                let needle = search.to_lowercase();
                let by_name = order.customer_name.to_lowercase().contains(&needle);
                let by_phone = order.phone.contains(search);
                if !by_name && !by_phone {
                    return false;
                }
            }
        }

        if let Some(date) = self.date {
            if placed_on(order) != Some(date) {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}

fn placed_on(order: &Order) -> Option<NaiveDate> {
    let offset = FixedOffset::east_opt(SHOP_UTC_OFFSET_SECS)?;
    Some(order.placed_at.with_timezone(&offset).date_naive())
}

/// Order counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: usize,
    pub awaiting_confirmation: usize,
    pub confirmed: usize,
    pub processing: usize,
    pub shipping: usize,
    pub delivered: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl OrderStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut stats = OrderStats::default();
        for order in orders {
            stats.total += 1;
            match order.status {
                OrderStatus::AwaitingConfirmation => stats.awaiting_confirmation += 1,
                OrderStatus::Confirmed => stats.confirmed += 1,
                OrderStatus::Processing => stats.processing += 1,
                OrderStatus::Shipping => stats.shipping += 1,
                OrderStatus::Delivered => stats.delivered += 1,
                OrderStatus::Completed => stats.completed += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
        }
        stats
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
