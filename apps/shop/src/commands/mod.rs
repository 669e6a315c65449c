//! # Shop Commands Module
//!
//! Every action the shell can run.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── product.rs    ◄─── Shop menu, admin product CRUD
//! ├── cart.rs       ◄─── Cart manipulation
//! ├── order.rs      ◄─── Checkout, admin order book
//! └── dashboard.rs  ◄─── Admin counters
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shell Command Flow                                   │
//! │                                                                         │
//! │  trasua> add p1 --sweetness less --ice none                             │
//! │         │                                                               │
//! │         │ (clap, shell.rs)                                              │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      session: &mut Session,   ◄── owns cart + API client                │
//! │      product_id,              ◄── from the line                         │
//! │      customization,           ◄── from the flags                        │
//! │  ) -> Result<AddToCartResponse, AppError>                               │
//! │         │                                                               │
//! │         │ (serde_json)                                                  │
//! │         ▼                                                               │
//! │  Shell prints the response                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read-only commands take `&Session`; commands that change the cart take
//! `&mut Session`.

pub mod cart;
pub mod dashboard;
pub mod order;
pub mod product;
