//! # trasua-core: Pure Business Logic for the Trà Sữa Shop
//!
//! This crate is the **heart** of the shop client. It holds the shopping
//! cart model, the order payload, and the validation rules, all as pure
//! code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trà Sữa Shop Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Shop Shell (apps/shop)                       │   │
//! │  │    Menu ──► Customize ──► Cart ──► Checkout ──► Admin           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ trasua-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   order   │  │   │
//! │  │   │  Product  │  │   Money   │  │ CartStore │  │ Submission│  │   │
//! │  │   │  Order    │  │   (VND)   │  │ LineItem  │  │  Filters  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 trasua-api (REST client)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Sweetness, Ice, ...)
//! - [`money`] - Money type in whole đồng
//! - [`cart`] - The cart store and its line items
//! - [`catalog`] - Shop page product filter
//! - [`order`] - Order submission payload, order filters and stats
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout and product form rules
//!
//! ## Example Usage
//!
//! ```rust
//! use trasua_core::cart::{CartProduct, CartStore};
//! use trasua_core::money::Money;
//! use trasua_core::types::{Customization, Sweetness};
//!
//! let mut cart = CartStore::new();
//! let p1 = CartProduct::new("p1", "Trà sữa trân châu", Money::from_dong(25_000), 10);
//!
//! cart.add(&p1, Customization::default());
//! cart.add(&p1, Customization::default().with_sweetness(Sweetness::More));
//!
//! assert_eq!(cart.len(), 2);
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price(), Money::from_dong(50_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, CartLineItem, CartProduct, CartStore, LineTarget, VariantKey};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use catalog::ShopFilter;
pub use order::{CustomerInfo, OrderFilter, OrderLine, OrderStats, OrderSubmission};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Menu categories offered by the shop.
///
/// Product forms only accept one of these; the shop page filters by them.
pub const CATEGORIES: [&str; 6] = [
    "Trà Sữa Truyền Thống",
    "Trà Sữa Trái Cây",
    "Trà Sữa Đặc Biệt",
    "Trà Nguyên Chất",
    "Nước Ép Trái Cây",
    "Topping",
];

/// Shop time is Vietnam time (UTC+7, no daylight saving).
///
/// Order date filters compare calendar days in this offset.
pub const SHOP_UTC_OFFSET_SECS: i32 = 7 * 3600;
