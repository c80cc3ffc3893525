//! # checkout-core: Pure Validation Logic for the Checkout Form
//!
//! This crate is the single validation core for an e-commerce checkout:
//! customer info, shipping address, payment details, and a cart of line
//! items identified by ISBN. It accepts an untyped JSON record and produces
//! either a fully-typed [`CheckoutRequest`] or a structured, per-field
//! error report.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Validation Flow                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Web Layer (out of scope)                        │   │
//! │  │      Decodes the request body into serde_json::Value           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  checks   │  │  expiry   │  │  schema   │  │   │
//! │  │   │ Customer  │  │  Luhn     │  │  MM/YY    │  │ Validator │  │   │
//! │  │   │ LineItem  │  │  ISBN     │  │  compare  │  │ err tree  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO AMBIENT CLOCK • NO PANICS • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │          ┌─────────────────────┴─────────────────────┐                 │
//! │          ▼                                           ▼                 │
//! │  Typed CheckoutRequest                    CheckoutErrors tree          │
//! │  (order processing, out of scope)    (form rendering, out of scope)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Immutable checkout value objects
//! - [`checks`] - Per-field validators and checksum predicates
//! - [`expiry`] - Card expiration parsing and month/year comparison
//! - [`error`] - Rule-level errors and the path-keyed violation report
//! - [`schema`] - The whole-record validator
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same input + same injected date = same output
//! 2. **No Panics**: Missing or wrongly-typed fields are violations, not errors
//! 3. **All Failures Surface**: Every violated rule is reported, not just the first
//! 4. **Explicit Clock**: The current month/year is a parameter, never a global read
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{CheckoutValidator, CurrentMonth};
//! use serde_json::json;
//!
//! let validator = CheckoutValidator::new();
//!
//! // An empty cart is a modeled rejection, not a panic
//! let report = validator
//!     .validate_at(&json!({ "items": [] }), CurrentMonth::new(6, 26))
//!     .unwrap_err();
//!
//! assert!(report.iter().any(|v| v.path.to_string() == "items"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checks;
pub mod error;
pub mod expiry;
pub mod schema;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use checkout_core::CheckoutValidator` instead of
// `use checkout_core::schema::CheckoutValidator`

pub use error::{CheckoutErrors, FieldPath, FieldViolation, PathSegment, ValidationError};
pub use expiry::{CurrentMonth, ExpirationDate};
pub use schema::CheckoutValidator;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum quantity of a single line item.
pub const MIN_ITEM_QUANTITY: i64 = 1;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// The store caps each title at five copies per order to keep resellers
/// from draining stock in a single checkout.
pub const MAX_ITEM_QUANTITY: i64 = 5;

/// Minimum number of line items in a checkout.
///
/// ## Business Reason
/// A checkout with nothing in the cart has nothing to charge or ship;
/// the form should prompt the customer to select at least one book.
pub const MIN_CART_ITEMS: usize = 1;
