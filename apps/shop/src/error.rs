//! # App Error Type
//!
//! Unified error type for shop commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shop Shell                         │
//! │                                                                         │
//! │  shell line: checkout --name "" ...                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Service Error? ─── ClientError::Api { 400, "..." } ──┐          │  │
//! │  │         │                                             │          │  │
//! │  │         ▼                                             ▼          │  │
//! │  │  Rule Broken? ─── CoreError::EmptyCart ──────────── AppError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Shell prints:  [VALIDATION_ERROR] customer_name is required            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use trasua_api::ClientError;
use trasua_core::{CoreError, ValidationError};

/// Error returned from shop commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Not found: /sanpham/abc"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code}] {message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or order does not exist
    NotFound,

    /// Form input failed validation
    ValidationError,

    /// The shop service rejected the request
    ServiceError,

    /// The shop service could not be reached
    NetworkError,

    /// Business rule violation (wrong order status, ...)
    BusinessLogic,

    /// Cart operation refused
    CartError,

    /// Product cannot be ordered right now
    Unavailable,

    /// Unexpected failure
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::ServiceError => "SERVICE_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::Unavailable => "UNAVAILABLE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::CartError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Result type for shop commands.
pub type AppResult<T> = Result<T, AppError>;

/// Converts REST client errors to app errors.
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound { path } => {
                AppError::new(ErrorCode::NotFound, format!("Not found: {}", path))
            }
            ClientError::Api { status, message } => {
                AppError::new(ErrorCode::ServiceError, format!("{} ({})", message, status))
            }
            ClientError::Request(e) => {
                tracing::error!("Shop service request failed: {}", e);
                AppError::new(ErrorCode::NetworkError, "Shop service is unreachable")
            }
            ClientError::Decode(e) => {
                tracing::error!("Unexpected shop service response: {}", e);
                AppError::internal("Unexpected response from the shop service")
            }
            ClientError::Config(e) => AppError::internal(e),
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => AppError::cart("Cart is empty"),
            CoreError::ProductUnavailable { name } => AppError::new(
                ErrorCode::Unavailable,
                format!("{} is not available", name),
            ),
            e @ CoreError::InvalidOrderStatus { .. } => {
                AppError::new(ErrorCode::BusinessLogic, e.to_string())
            }
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}
