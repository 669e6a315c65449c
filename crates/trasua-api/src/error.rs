//! # Client Error Types
//!
//! Error types for calls to the shop service.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / HTTP status / bad JSON                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (this module) ← Categorized by what went wrong             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in shop app) ← Code + message for the shell                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Shop service call errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered 404.
    ///
    /// ## When This Occurs
    /// - Product or order id does not exist
    /// - Order was deleted by another admin
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// The service answered with any other non-success status.
    ///
    /// `message` is the body's `message` field when there is one, the
    /// raw body otherwise.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The request never got an answer.
    ///
    /// ## When This Occurs
    /// - Service unreachable
    /// - Timeout elapsed
    /// - TLS failure
    #[error("Request failed: {0}")]
    Request(String),

    /// The answer was not the JSON we expected.
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// The client could not be built.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

/// Convenience type alias for Results with ClientError.
pub type ClientResult<T> = Result<T, ClientError>;
