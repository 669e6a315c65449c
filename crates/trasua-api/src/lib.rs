//! # trasua-api: REST Client for the Trà Sữa Shop Service
//!
//! This crate owns every HTTP call the shop makes. The catalog and the
//! order book live on a remote service; this crate turns its JSON into
//! `trasua-core` types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trà Sữa Shop Data Flow                           │
//! │                                                                         │
//! │  Shop command (checkout)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   trasua-api (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   ApiClient   │    │   Resources   │    │  ClientError │  │   │
//! │  │   │  (client.rs)  │    │ (resource/)   │    │  (error.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ reqwest +     │◄───│ products()    │    │ NotFound     │  │   │
//! │  │   │ envelope      │    │ orders()      │    │ Api / Decode │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Shop service  /api/sanpham  /api/donhang          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trasua_api::{ApiClient, ApiConfig};
//!
//! let client = ApiClient::new(ApiConfig::new("http://localhost:5000/api"))?;
//! let menu = client.products().list().await?;
//! let order_id = client.orders().submit(&submission).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod resource;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{ApiClient, ApiConfig};
pub use error::{ClientError, ClientResult};

pub use resource::order::OrderResource;
pub use resource::product::ProductResource;
