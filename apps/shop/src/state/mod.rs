//! # State Module
//!
//! Application state for the shop shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ConfigState::from_env()                                                │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  Session::connect(config)                                               │
//! │          │                                                              │
//! │          ├──► ConfigState   read-only after startup                     │
//! │          ├──► ApiClient     shared connection pool                      │
//! │          └──► CartStore     owned by the session, one command at a time │
//! │                                                                         │
//! │  Commands borrow the session: `&Session` to read, `&mut Session` to     │
//! │  change the cart.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigState, Environment};
pub use session::Session;
