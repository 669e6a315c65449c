//! # Error Types
//!
//! Domain-specific error types for trasua-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trasua-core errors (this file)                                        │
//! │  ├── CoreError        - Checkout and order workflow errors             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  trasua-api errors (separate crate)                                    │
//! │  └── ClientError      - REST call failures                             │
//! │                                                                         │
//! │  Shop app errors                                                       │
//! │  └── AppError         - What the shell prints (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError ◄── ClientError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart store itself never fails; its operations are total. These
//! errors come from the flows built around it.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations in the order workflow.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Product exists but cannot be ordered right now.
    ///
    /// ## When This Occurs
    /// - Admin marked it `het_hang`
    /// - Stock dropped to zero after the menu was loaded
    #[error("{name} is not available")]
    ProductUnavailable { name: String },

    /// An admin action does not fit the order's current status.
    ///
    /// ## When This Occurs
    /// - Confirming an order that is already processing
    /// - Deleting an order that is still awaiting confirmation
    #[error("Order {order_id} is {current_status}, cannot {action}")]
    InvalidOrderStatus {
        order_id: String,
        current_status: String,
        action: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation of checkout and product forms before any
/// request is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidOrderStatus {
            order_id: "b7c8d9e0".to_string(),
            current_status: "hoan_thanh".to_string(),
            action: "cancel".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Order b7c8d9e0 is hoan_thanh, cannot cancel"
        );
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(err.to_string(), "phone is required");

        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "address".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
