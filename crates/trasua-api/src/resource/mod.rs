//! # Resource Module
//!
//! One type per shop service resource, each handed out by [`ApiClient`].
//!
//! ```text
//! client.products()  ──►  /sanpham   list, get, search, create, update, delete
//! client.orders()    ──►  /donhang   list, get, submit, update_status,
//!                                    cancel, delete
//! ```
//!
//! [`ApiClient`]: crate::ApiClient

pub mod order;
pub mod product;
