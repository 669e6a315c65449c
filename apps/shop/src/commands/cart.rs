//! # Cart Commands
//!
//! Shell commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_to_cart                       cart cleared        │
//! │                   update_cart_item                  (order.rs)          │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                    │
//! │                                                      (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use trasua_core::cart::CartTotals;
use trasua_core::{
    AddOutcome, CartLineItem, CartStore, CoreError, Customization, LineTarget, ProductId,
};

use crate::error::AppResult;
use crate::state::Session;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
    pub total_display: String,
}

impl From<&CartStore> for CartResponse {
    fn from(cart: &CartStore) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
            total_display: cart.total_price().to_string(),
        }
    }
}

/// What `add_to_cart` did, plus the cart afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    pub outcome: AddOutcome,
    pub cart: CartResponse,
}

/// Gets the current cart contents.
pub fn get_cart(session: &Session) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(session.cart())
}

/// Adds one unit of a customized drink.
///
/// ## Behavior
/// - Same product, sweetness and ice already in cart: quantity + 1
/// - Otherwise: new line with quantity 1
/// - Never goes above the product's live stock
/// - Name and price are snapshotted from the live product
///
/// ## Errors
/// `UNAVAILABLE` when the product is sold out or has no stock left.
pub async fn add_to_cart(
    session: &mut Session,
    product_id: &ProductId,
    customization: Customization,
) -> AppResult<AddToCartResponse> {
    debug!(
        product_id = %product_id,
        sweetness = %customization.sweetness,
        ice = %customization.ice,
        "add_to_cart command"
    );

    let product = session.api().products().get(product_id).await?;
    if !product.is_purchasable() {
        return Err(CoreError::ProductUnavailable { name: product.name }.into());
    }

    let cart = session.cart_mut();
    let outcome = cart.add(&product.to_cart_product(), customization);

    debug!(outcome = ?outcome, lines = cart.len(), "Cart updated");
    Ok(AddToCartResponse {
        outcome,
        cart: CartResponse::from(&*cart),
    })
}

/// Sets the quantity of the targeted line(s).
///
/// ## Behavior
/// - Quantity <= 0: removes the targeted lines
/// - Otherwise the quantity is capped at the product's live stock;
///   a product with no stock left is removed
/// - A product that is no longer purchasable can only go down
/// - A target that matches nothing leaves the cart as it was
///
/// ## Errors
/// `UNAVAILABLE` when raising a line of a sold-out product.
pub async fn update_cart_item(
    session: &mut Session,
    target: LineTarget,
    quantity: i64,
) -> AppResult<CartResponse> {
    debug!(target = ?target, quantity = %quantity, "update_cart_item command");

    let quantity = if quantity > 0 {
        let product_id = target_product(&target);
        let product = session.api().products().get(product_id).await?;
        if !product.is_purchasable() && quantity > current_quantity(session.cart(), &target) {
            return Err(CoreError::ProductUnavailable { name: product.name }.into());
        }
        let capped = quantity.min(i64::from(product.stock_limit()));
        if capped < quantity {
            debug!(requested = %quantity, stock = %capped, "Quantity capped at stock");
        }
        capped
    } else {
        quantity
    };

    let cart = session.cart_mut();
    let touched = cart.update_quantity(&target, quantity);

    debug!(touched = touched, "Cart lines updated");
    Ok(CartResponse::from(&*cart))
}

/// Removes the targeted line(s).
pub fn remove_from_cart(session: &mut Session, target: LineTarget) -> CartResponse {
    debug!(target = ?target, "remove_from_cart command");

    let cart = session.cart_mut();
    cart.remove(&target);
    CartResponse::from(&*cart)
}

/// Clears all items from the cart.
pub fn clear_cart(session: &mut Session) -> CartResponse {
    debug!("clear_cart command");

    let cart = session.cart_mut();
    cart.clear();
    CartResponse::from(&*cart)
}

/// Highest quantity among the targeted lines, 0 when none match.
fn current_quantity(cart: &CartStore, target: &LineTarget) -> i64 {
    cart.items()
        .iter()
        .filter(|item| target.matches(item))
        .map(|item| i64::from(item.quantity))
        .max()
        .unwrap_or(0)
}

fn target_product(target: &LineTarget) -> &ProductId {
    match target {
        LineTarget::Product(id) => id,
        LineTarget::Variant(key) => &key.product_id,
    }
}
