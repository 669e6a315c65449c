//! # Cart Store
//!
//! The shopping cart: an ordered list of drink lines, each identified by
//! product plus customization.
//!
//! ## Line Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  VariantKey = (product_id, sweetness, ice)                              │
//! │                                                                         │
//! │  add(p1, vua/vua)  ──► line A  qty 1                                    │
//! │  add(p1, vua/vua)  ──► line A  qty 2      same key: merge               │
//! │  add(p1, ngot/vua) ──► line B  qty 1      new key: separate line        │
//! │                                                                         │
//! │  The note is NOT part of the key. A merge keeps the first note.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shell Action              Store Call                  Line State       │
//! │  ────────────              ──────────                  ──────────       │
//! │  Add drink ──────────────► add(product, custom) ─────► absent→present   │
//! │                                                        qty+1 (clamped)  │
//! │  Change quantity ────────► update_quantity(t, n) ────► qty = n          │
//! │                                   n <= 0 ────────────► present→absent   │
//! │  Remove ─────────────────► remove(target) ───────────► present→absent   │
//! │  Checkout done ──────────► clear() ──────────────────► all absent       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per `VariantKey`
//! - Every line has `quantity >= 1`; there are no zero-quantity rows
//! - `add` never takes a line above the stock limit it was given
//!
//! `update_quantity` sets the quantity verbatim. Clamping that path to
//! live stock is the caller's job (the shop's `update_cart_item` does it).
//!
//! None of these operations can fail. A target that matches nothing is a
//! no-op.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::order::OrderLine;
use crate::types::{Customization, Ice, ProductId, Sweetness};

// =============================================================================
// Inputs
// =============================================================================

/// The product data the cart needs from the catalog.
///
/// Price is copied into the line on insert and never re-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProduct {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    /// Maximum purchasable quantity.
    pub stock_limit: u32,
}

impl CartProduct {
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        stock_limit: u32,
    ) -> Self {
        CartProduct {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            stock_limit,
        }
    }
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantKey {
    pub product_id: ProductId,
    pub sweetness: Sweetness,
    pub ice: Ice,
}

impl VariantKey {
    pub fn new(product_id: impl Into<ProductId>, sweetness: Sweetness, ice: Ice) -> Self {
        VariantKey {
            product_id: product_id.into(),
            sweetness,
            ice,
        }
    }

    /// Key of the plain drink (normal sweetness, normal ice).
    pub fn plain(product_id: impl Into<ProductId>) -> Self {
        VariantKey::new(product_id, Sweetness::Normal, Ice::Normal)
    }
}

/// Renders as `{product_id}_{sweetness}_{ice}` using wire codes.
impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.product_id, self.sweetness, self.ice)
    }
}

/// Which lines a remove/update applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LineTarget {
    /// Every line of this product, whatever its customization.
    Product(ProductId),
    /// Exactly one line.
    Variant(VariantKey),
}

impl LineTarget {
    /// Whether `item` is one of the lines this target selects.
    pub fn matches(&self, item: &CartLineItem) -> bool {
        match self {
            LineTarget::Product(id) => &item.product_id == id,
            LineTarget::Variant(key) => item.is_variant(key),
        }
    }
}

/// What an `add` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AddOutcome {
    /// A new line with quantity 1.
    Inserted,
    /// An existing line went up by one.
    Incremented { quantity: u32 },
    /// The line was already at the stock limit (or got clamped down to it).
    AtStockLimit { quantity: u32 },
    /// Stock limit is zero: nothing was added and any line for the
    /// variant is gone.
    OutOfStock,
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of the cart.
///
/// ## Snapshot Fields
/// `product_name` and `unit_price` are copied from the catalog when the
/// line is created. A later price change in the catalog does not touch
/// them, so the cart total a customer saw is the total they submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub sweetness: Sweetness,
    pub ice: Ice,
    pub note: String,
}

impl CartLineItem {
    fn from_product(product: &CartProduct, customization: Customization) -> Self {
        CartLineItem {
            product_id: product.product_id.clone(),
            product_name: product.name.clone(),
            unit_price: product.unit_price,
            quantity: 1,
            sweetness: customization.sweetness,
            ice: customization.ice,
            note: customization.note,
        }
    }

    /// The line's identity, derived from its fields.
    pub fn variant_key(&self) -> VariantKey {
        VariantKey::new(self.product_id.clone(), self.sweetness, self.ice)
    }

    fn is_variant(&self, key: &VariantKey) -> bool {
        self.product_id == key.product_id && self.sweetness == key.sweetness && self.ice == key.ice
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// True when the drink is not the plain default.
    pub fn is_customized(&self) -> bool {
        self.sweetness != Sweetness::Normal || self.ice != Ice::Normal
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The shopping cart.
///
/// Owned by one session and mutated only through `&mut self`; it holds no
/// locks and does no I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartStore {
    items: Vec<CartLineItem>,
}

impl CartStore {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartStore::default()
    }

    /// Adds one unit of a customized drink.
    ///
    /// ## Behavior
    /// - Variant already in cart: quantity becomes `min(quantity + 1, stock_limit)`
    /// - Variant not in cart: new line with quantity 1 and a price snapshot
    /// - `stock_limit == 0`: nothing is added; a clamped line disappears
    ///
    /// ## Example
    /// ```rust
    /// use trasua_core::cart::{AddOutcome, CartProduct, CartStore};
    /// use trasua_core::money::Money;
    /// use trasua_core::types::Customization;
    ///
    /// let mut cart = CartStore::new();
    /// let tea = CartProduct::new("p1", "Trà đào", Money::from_dong(30_000), 1);
    ///
    /// assert_eq!(cart.add(&tea, Customization::default()), AddOutcome::Inserted);
    /// assert_eq!(
    ///     cart.add(&tea, Customization::default()),
    ///     AddOutcome::AtStockLimit { quantity: 1 }
    /// );
    /// ```
    pub fn add(&mut self, product: &CartProduct, customization: Customization) -> AddOutcome {
        let key = VariantKey::new(
            product.product_id.clone(),
            customization.sweetness,
            customization.ice,
        );
        let limit = product.stock_limit;

        if let Some(item) = self.items.iter_mut().find(|i| i.is_variant(&key)) {
            let current = item.quantity;
            let next = current.saturating_add(1).min(limit);

            if next == 0 {
                self.items.retain(|i| !i.is_variant(&key));
                return AddOutcome::OutOfStock;
            }

            item.quantity = next;
            return if next > current {
                AddOutcome::Incremented { quantity: next }
            } else {
                AddOutcome::AtStockLimit { quantity: next }
            };
        }

        if limit == 0 {
            return AddOutcome::OutOfStock;
        }

        self.items.push(CartLineItem::from_product(product, customization));
        AddOutcome::Inserted
    }

    /// Removes the targeted lines and returns how many were removed.
    ///
    /// `LineTarget::Product` removes every variant of the product.
    pub fn remove(&mut self, target: &LineTarget) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !target.matches(item));
        before - self.items.len()
    }

    /// Sets the quantity of the targeted lines.
    ///
    /// ## Behavior
    /// - `new_quantity <= 0`: same as `remove(target)`
    /// - otherwise: every matched line gets `new_quantity`, not clamped to
    ///   stock; values above `u32::MAX` saturate at `u32::MAX`
    ///
    /// Returns the number of lines touched.
    pub fn update_quantity(&mut self, target: &LineTarget, new_quantity: i64) -> usize {
        if new_quantity <= 0 {
            return self.remove(target);
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        let mut touched = 0;
        for item in self.items.iter_mut().filter(|i| target.matches(i)) {
            item.quantity = quantity;
            touched += 1;
        }
        touched
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities over all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals, using each line's price snapshot.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Looks up the line for one exact customization.
    pub fn find(&self, product_id: &ProductId, sweetness: Sweetness, ice: Ice) -> Option<&CartLineItem> {
        self.items.iter().find(|i| {
            &i.product_id == product_id && i.sweetness == sweetness && i.ice == ice
        })
    }

    /// Looks up the plain (normal/normal) line of a product.
    pub fn find_default(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.find(product_id, Sweetness::Normal, Ice::Normal)
    }

    /// Units of a product across all its variants.
    pub fn quantity_of_product(&self, product_id: &ProductId) -> u64 {
        self.items
            .iter()
            .filter(|i| &i.product_id == product_id)
            .map(|i| u64::from(i.quantity))
            .sum()
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The `lines` section of an order submission, one entry per line.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.items.iter().map(OrderLine::from).collect()
    }
}

/// Cart totals summary for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: u64,
    pub total_price: Money,
}

impl From<&CartStore> for CartTotals {
    fn from(cart: &CartStore) -> Self {
        CartTotals {
            line_count: cart.len(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
