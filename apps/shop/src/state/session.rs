//! # Session State
//!
//! Everything one shell session owns.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  Session                                      │
//! │  ├── id        uuid v4, tags every log line   │
//! │  ├── config    ConfigState (read-only)        │
//! │  ├── api       ApiClient (cheap clone)        │
//! │  └── cart      CartStore (owned, no lock)     │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! The shell runs one command at a time, so the cart is reached through
//! `&mut Session` rather than a mutex. The cart lives only as long as the
//! session.

use trasua_api::{ApiClient, ClientResult};
use trasua_core::CartStore;
use uuid::Uuid;

use super::ConfigState;

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    config: ConfigState,
    api: ApiClient,
    cart: CartStore,
}

impl Session {
    /// Starts a session with an empty cart.
    pub fn new(config: ConfigState, api: ApiClient) -> Self {
        Session {
            id: Uuid::new_v4(),
            config,
            api,
            cart: CartStore::new(),
        }
    }

    /// Builds the API client from the configuration.
    pub fn connect(config: ConfigState) -> ClientResult<Self> {
        let api = ApiClient::new(config.api_config())?;
        Ok(Session::new(config, api))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }
}
