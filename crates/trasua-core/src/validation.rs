//! # Validation Module
//!
//! Form rules checked before anything is sent to the shop service.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell (apps/shop)                                             │
//! │  └── Argument parsing (types, enums)                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Checkout form: name, phone, address                                │
//! │  └── Product form: name, price, stock, category                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Shop service                                                  │
//! │  └── Stock checks and persistence                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator reports the first failing rule only.
//!
//! ## Usage
//! ```rust
//! use trasua_core::validation::validate_phone;
//!
//! assert!(validate_phone("0901 234 567").is_ok());
//! assert!(validate_phone("12345").is_err());
//! ```

use crate::error::ValidationError;
use crate::order::CustomerInfo;
use crate::types::ProductDraft;
use crate::CATEGORIES;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Checkout Form
// =============================================================================

/// Validates the checkout form.
///
/// ## Rules (checked in this order)
/// 1. Customer name is required
/// 2. Phone is required
/// 3. Address is required
/// 4. Phone has 10 or 11 digits once whitespace is removed
///
/// The order note is optional.
pub fn validate_customer(customer: &CustomerInfo) -> ValidationResult<()> {
    require("customer_name", &customer.customer_name)?;
    require("phone", &customer.phone)?;
    require("address", &customer.address)?;
    validate_phone(&customer.phone)
}

/// Validates a Vietnamese phone number.
///
/// ## Example
/// ```rust
/// use trasua_core::validation::validate_phone;
///
/// assert!(validate_phone("0912345678").is_ok());
/// assert!(validate_phone("01234567890").is_ok());
/// assert!(validate_phone("090-123-4567").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let valid = (10..=11).contains(&digits.chars().count())
        && digits.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be 10-11 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Product Form
// =============================================================================

/// Validates the admin product form.
///
/// ## Rules (checked in this order)
/// 1. Name is required
/// 2. Price is greater than zero
/// 3. Stock is not negative
/// 4. Category is required and is one of [`CATEGORIES`]
pub fn validate_product_draft(draft: &ProductDraft) -> ValidationResult<()> {
    require("name", &draft.name)?;

    if !draft.price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if draft.stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }

    validate_category(&draft.category)
}

/// Checks the category against the fixed menu categories.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    require("category", category)?;

    if !CATEGORIES.contains(&category.trim()) {
        return Err(ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: CATEGORIES.iter().map(|c| c.to_string()).collect(),
        });
    }

    Ok(())
}

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
