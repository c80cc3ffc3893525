//! # Checkout Types
//!
//! Immutable value objects for one checkout validation pass.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CheckoutRequest                                  │
//! │                                                                         │
//! │  ┌───────────────┐ ┌─────────────────┐ ┌────────────────┐ ┌─────────┐ │
//! │  │ CustomerInfo  │ │ ShippingAddress │ │ PaymentDetails │ │LineItem │ │
//! │  │ ───────────── │ │ ─────────────── │ │ ────────────── │ │ ─────── │ │
//! │  │ name          │ │ address_line1/2 │ │ card_number    │ │ isbn    │ │
//! │  │ email         │ │ city, state     │ │ expiration_date│ │ quantity│ │
//! │  │ phone_number  │ │ postal, country │ │ cvv            │ │  (×N)   │ │
//! │  └───────────────┘ └─────────────────┘ └────────────────┘ └─────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A value of any of these types only ever comes out of a successful
//! validation pass, so holding one is a guarantee that every field rule
//! held at that point. The structs are constructed transiently per call;
//! nothing here persists or mutates.
//!
//! Wire names are camelCase (`addressLine1`, `phoneNumber`) so that a
//! validated record serializes back to exactly the shape it was decoded
//! from.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Customer Info
// =============================================================================

/// Who is placing the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    /// Customer's full name (4-50 characters).
    pub name: String,

    /// Contact email address.
    pub email: String,

    /// Contact phone number, exactly 10 digits, no separators.
    pub phone_number: String,
}

// =============================================================================
// Shipping Address
// =============================================================================

/// Where the order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Street address (5-100 characters).
    pub address_line1: String,

    /// Apartment, suite, etc. May be empty, but the field itself is required.
    pub address_line2: String,

    /// City name (2-50 characters).
    pub city: String,

    /// State or province name (2-50 characters).
    pub state: String,

    /// US postal code, `12345` or `12345-6789`.
    pub postal_code: String,

    /// ISO 3166-1 alpha-3 country code (`"USA"`, not `"US"`).
    pub country: String,
}

// =============================================================================
// Payment Details
// =============================================================================

/// How the order is paid for.
///
/// Card data is kept as the customer typed it (the Luhn check tolerates
/// spaces and hyphens); masking and vaulting are the payment processor's
/// concern, not this crate's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// Credit card number, Luhn-valid.
    pub card_number: String,

    /// Card expiration in strict `MM/YY` form, not already past.
    pub expiration_date: String,

    /// Card verification value, exactly 3 digits.
    pub cvv: String,
}

// =============================================================================
// Line Item
// =============================================================================

/// One book in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// ISBN-10 or ISBN-13 with a valid checksum.
    pub isbn: String,

    /// Copies ordered, 1-5 inclusive.
    pub quantity: i64,
}

// =============================================================================
// Checkout Request
// =============================================================================

/// A fully validated checkout record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer_info: CustomerInfo,
    pub shipping_address: ShippingAddress,
    pub payment_details: PaymentDetails,
    /// At least one item, in the order the customer added them.
    pub items: Vec<LineItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================
