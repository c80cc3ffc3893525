//! # Checkout Schema
//!
//! The whole-record validator: untyped JSON in, typed record or violation
//! report out.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  serde_json::Value (from the web layer)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Walk section by section                                                │
//! │  ├── customerInfo      name, email, phoneNumber                         │
//! │  ├── shippingAddress   lines, city, state, postalCode, country          │
//! │  ├── paymentDetails    cardNumber, expirationDate (vs now), cvv         │
//! │  └── items[]           isbn, quantity per element, non-empty overall    │
//! │       │                                                                 │
//! │       ├── every violation lands in one CheckoutErrors report            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  report empty?  ──yes──►  Ok(CheckoutRequest)                           │
//! │       │                                                                 │
//! │       no ──►  Err(CheckoutErrors)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Missing fields, wrong JSON types, and violated rules are all modeled as
//! violations; nothing in this module panics on bad input. A section that
//! produced any violation yields no typed value, and `Ok` is returned only
//! when the report is empty, so a returned [`CheckoutRequest`] carries every
//! guarantee the field rules make.

use serde_json::{Map, Value};

use crate::checks::{
    validate_address_line1, validate_address_line2, validate_card_number, validate_city,
    validate_country, validate_cvv, validate_email, validate_isbn, validate_item_count,
    validate_name, validate_phone_number, validate_postal_code, validate_quantity, validate_state,
    ValidationResult,
};
use crate::error::{CheckoutErrors, FieldPath, ValidationError};
use crate::expiry::{CurrentMonth, ExpirationDate};
use crate::types::{CheckoutRequest, CustomerInfo, LineItem, PaymentDetails, ShippingAddress};

// =============================================================================
// Checkout Validator
// =============================================================================

/// Stateless validator for the checkout form.
///
/// ## Example
/// ```rust
/// use checkout_core::{CheckoutValidator, CurrentMonth};
/// use serde_json::json;
///
/// let input = json!({
///     "customerInfo": {
///         "name": "Joanna Doe",
///         "email": "jo@example.com",
///         "phoneNumber": "5125551234"
///     },
///     "shippingAddress": {
///         "addressLine1": "123 Main Street",
///         "addressLine2": "",
///         "city": "Austin",
///         "state": "Texas",
///         "postalCode": "73301",
///         "country": "USA"
///     },
///     "paymentDetails": {
///         "cardNumber": "4111111111111111",
///         "expirationDate": "06/26",
///         "cvv": "123"
///     },
///     "items": [
///         { "isbn": "9780306406157", "quantity": 2 }
///     ]
/// });
///
/// let validator = CheckoutValidator::new();
/// let request = validator
///     .validate_at(&input, CurrentMonth::new(6, 26))
///     .expect("record satisfies every rule");
///
/// assert_eq!(request.customer_info.name, "Joanna Doe");
/// assert_eq!(request.items.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutValidator;

impl CheckoutValidator {
    /// Creates a validator. It holds no state; one instance can serve any
    /// number of threads.
    pub fn new() -> Self {
        CheckoutValidator
    }

    /// Validates against the local clock, sampled once per call.
    ///
    /// Prefer [`CheckoutValidator::validate_at`] anywhere determinism
    /// matters (tests, replays).
    pub fn validate(&self, input: &Value) -> Result<CheckoutRequest, CheckoutErrors> {
        self.validate_at(input, CurrentMonth::from_local_clock())
    }

    /// Validates `input` as of the given month/year.
    ///
    /// Total over its input: any JSON value is either accepted as a
    /// [`CheckoutRequest`] or rejected with the full violation report.
    pub fn validate_at(
        &self,
        input: &Value,
        now: CurrentMonth,
    ) -> Result<CheckoutRequest, CheckoutErrors> {
        let mut errors = CheckoutErrors::new();

        let root = match input {
            Value::Object(map) => Some(map),
            _ => {
                errors.push(
                    FieldPath::root(),
                    ValidationError::WrongType {
                        field: "checkout".to_string(),
                        expected: "object".to_string(),
                    },
                );
                None
            }
        };

        let sections = root.map(|map| {
            (
                customer_info(map, &mut errors),
                shipping_address(map, &mut errors),
                payment_details(map, now, &mut errors),
                cart_items(map, &mut errors),
            )
        });

        if let Some((Some(customer_info), Some(shipping_address), Some(payment_details), Some(items))) =
            sections
        {
            if errors.is_empty() {
                return Ok(CheckoutRequest {
                    customer_info,
                    shipping_address,
                    payment_details,
                    items,
                });
            }
        }

        Err(errors)
    }
}

// =============================================================================
// Section Builders
// =============================================================================

fn customer_info(root: &Map<String, Value>, errors: &mut CheckoutErrors) -> Option<CustomerInfo> {
    let base = FieldPath::field("customerInfo");
    let section = object_field(root, &FieldPath::root(), "customerInfo", errors)?;

    // Every field is checked before any `?` so all violations surface
    let name = checked_string(section, &base, "name", validate_name, errors);
    let email = checked_string(section, &base, "email", validate_email, errors);
    let phone_number = checked_string(section, &base, "phoneNumber", validate_phone_number, errors);

    Some(CustomerInfo {
        name: name?,
        email: email?,
        phone_number: phone_number?,
    })
}

fn shipping_address(
    root: &Map<String, Value>,
    errors: &mut CheckoutErrors,
) -> Option<ShippingAddress> {
    let base = FieldPath::field("shippingAddress");
    let section = object_field(root, &FieldPath::root(), "shippingAddress", errors)?;

    let address_line1 = checked_string(section, &base, "addressLine1", validate_address_line1, errors);
    let address_line2 = checked_string(section, &base, "addressLine2", validate_address_line2, errors);
    let city = checked_string(section, &base, "city", validate_city, errors);
    let state = checked_string(section, &base, "state", validate_state, errors);
    let postal_code = checked_string(section, &base, "postalCode", validate_postal_code, errors);
    let country = checked_string(section, &base, "country", validate_country, errors);

    Some(ShippingAddress {
        address_line1: address_line1?,
        address_line2: address_line2?,
        city: city?,
        state: state?,
        postal_code: postal_code?,
        country: country?,
    })
}

fn payment_details(
    root: &Map<String, Value>,
    now: CurrentMonth,
    errors: &mut CheckoutErrors,
) -> Option<PaymentDetails> {
    let base = FieldPath::field("paymentDetails");
    let section = object_field(root, &FieldPath::root(), "paymentDetails", errors)?;

    let card_number = checked_string(section, &base, "cardNumber", validate_card_number, errors);
    let cvv = checked_string(section, &base, "cvv", validate_cvv, errors);

    // Expiration is shape-checked, then compared against the injected month
    let expiration_date = match string_field(section, &base, "expirationDate", errors) {
        None => None,
        Some(raw) => match ExpirationDate::parse(raw) {
            Err(error) => {
                errors.push(base.child("expirationDate"), error);
                None
            }
            Ok(date) if !date.is_valid_at(now) => {
                errors.push(
                    base.child("expirationDate"),
                    ValidationError::Expired {
                        field: "expirationDate".to_string(),
                    },
                );
                None
            }
            Ok(_) => Some(raw.to_string()),
        },
    };

    Some(PaymentDetails {
        card_number: card_number?,
        expiration_date: expiration_date?,
        cvv: cvv?,
    })
}

fn cart_items(root: &Map<String, Value>, errors: &mut CheckoutErrors) -> Option<Vec<LineItem>> {
    let base = FieldPath::field("items");

    let entries = match root.get("items") {
        None | Some(Value::Null) => {
            errors.push(
                base,
                ValidationError::Required {
                    field: "items".to_string(),
                },
            );
            return None;
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            errors.push(
                base,
                ValidationError::WrongType {
                    field: "items".to_string(),
                    expected: "array".to_string(),
                },
            );
            return None;
        }
    };

    if let Err(error) = validate_item_count(entries.len()) {
        errors.push(base, error);
        return None;
    }

    let mut items = Vec::with_capacity(entries.len());
    let mut complete = true;

    for (i, entry) in entries.iter().enumerate() {
        let item_path = base.index(i);

        let section = match entry {
            Value::Object(map) => map,
            _ => {
                errors.push(
                    item_path,
                    ValidationError::WrongType {
                        field: "item".to_string(),
                        expected: "object".to_string(),
                    },
                );
                complete = false;
                continue;
            }
        };

        let isbn = checked_string(section, &item_path, "isbn", validate_isbn, errors);
        let quantity = integer_field(section, &item_path, "quantity", errors).and_then(|value| {
            match validate_quantity(value) {
                Ok(()) => Some(value),
                Err(error) => {
                    errors.push(item_path.child("quantity"), error);
                    None
                }
            }
        });

        match (isbn, quantity) {
            (Some(isbn), Some(quantity)) => items.push(LineItem { isbn, quantity }),
            _ => complete = false,
        }
    }

    complete.then_some(items)
}

// =============================================================================
// Field Extraction
// =============================================================================
// Missing and wrongly-typed fields are violations, never panics. `None`
// from any of these means the violation has already been recorded.

fn object_field<'a>(
    parent: &'a Map<String, Value>,
    base: &FieldPath,
    field: &'static str,
    errors: &mut CheckoutErrors,
) -> Option<&'a Map<String, Value>> {
    match parent.get(field) {
        None | Some(Value::Null) => {
            errors.push(
                base.child(field),
                ValidationError::Required {
                    field: field.to_string(),
                },
            );
            None
        }
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            errors.push(
                base.child(field),
                ValidationError::WrongType {
                    field: field.to_string(),
                    expected: "object".to_string(),
                },
            );
            None
        }
    }
}

fn string_field<'a>(
    section: &'a Map<String, Value>,
    base: &FieldPath,
    field: &'static str,
    errors: &mut CheckoutErrors,
) -> Option<&'a str> {
    match section.get(field) {
        None | Some(Value::Null) => {
            errors.push(
                base.child(field),
                ValidationError::Required {
                    field: field.to_string(),
                },
            );
            None
        }
        Some(Value::String(value)) => Some(value),
        Some(_) => {
            errors.push(
                base.child(field),
                ValidationError::WrongType {
                    field: field.to_string(),
                    expected: "string".to_string(),
                },
            );
            None
        }
    }
}

fn integer_field(
    section: &Map<String, Value>,
    base: &FieldPath,
    field: &'static str,
    errors: &mut CheckoutErrors,
) -> Option<i64> {
    match section.get(field) {
        None | Some(Value::Null) => {
            errors.push(
                base.child(field),
                ValidationError::Required {
                    field: field.to_string(),
                },
            );
            None
        }
        Some(Value::Number(value)) => match value.as_i64() {
            Some(integer) => Some(integer),
            // 2.5 is a number but not a quantity
            None => {
                errors.push(
                    base.child(field),
                    ValidationError::WrongType {
                        field: field.to_string(),
                        expected: "integer".to_string(),
                    },
                );
                None
            }
        },
        Some(_) => {
            errors.push(
                base.child(field),
                ValidationError::WrongType {
                    field: field.to_string(),
                    expected: "integer".to_string(),
                },
            );
            None
        }
    }
}

/// Extracts a string field and applies one rule to it, recording the
/// violation under `base.field` on failure.
fn checked_string(
    section: &Map<String, Value>,
    base: &FieldPath,
    field: &'static str,
    rule: impl Fn(&str) -> ValidationResult<()>,
    errors: &mut CheckoutErrors,
) -> Option<String> {
    let value = string_field(section, base, field, errors)?;

    match rule(value) {
        Ok(()) => Some(value.to_string()),
        Err(error) => {
            errors.push(base.child(field), error);
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// June 2026, the fixed "now" for every test
    fn now() -> CurrentMonth {
        CurrentMonth::new(6, 26)
    }

    fn valid_input() -> Value {
        json!({
            "customerInfo": {
                "name": "Joanna Doe",
                "email": "jo@example.com",
                "phoneNumber": "5125551234"
            },
            "shippingAddress": {
                "addressLine1": "123 Main Street",
                "addressLine2": "",
                "city": "Austin",
                "state": "Texas",
                "postalCode": "73301",
                "country": "USA"
            },
            "paymentDetails": {
                "cardNumber": "4111111111111111",
                "expirationDate": "06/26",
                "cvv": "123"
            },
            "items": [
                { "isbn": "9780306406157", "quantity": 2 },
                { "isbn": "0306406152", "quantity": 5 }
            ]
        })
    }

    fn paths(errors: &CheckoutErrors) -> Vec<String> {
        errors.iter().map(|v| v.path.to_string()).collect()
    }

    #[test]
    fn test_valid_record_is_accepted() {
        let request = CheckoutValidator::new()
            .validate_at(&valid_input(), now())
            .expect("every rule holds");

        assert_eq!(request.customer_info.name, "Joanna Doe");
        assert_eq!(request.shipping_address.country, "USA");
        assert_eq!(request.payment_details.expiration_date, "06/26");
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[1].quantity, 5);
    }

    #[test]
    fn test_short_name_fails_independently_of_other_fields() {
        let mut input = valid_input();
        input["customerInfo"]["name"] = json!("Jo");

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();

        assert_eq!(paths(&errors), vec!["customerInfo.name"]);
        assert_eq!(
            errors.violations()[0].error,
            ValidationError::TooShort {
                field: "name".to_string(),
                min: 4,
            }
        );
    }

    #[test]
    fn test_missing_section_is_a_violation_at_its_path() {
        let mut input = valid_input();
        input.as_object_mut().expect("object").remove("paymentDetails");

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();

        assert_eq!(paths(&errors), vec!["paymentDetails"]);
    }

    #[test]
    fn test_missing_field_names_its_full_path() {
        let mut input = valid_input();
        input["shippingAddress"]
            .as_object_mut()
            .expect("object")
            .remove("postalCode");

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();

        assert_eq!(paths(&errors), vec!["shippingAddress.postalCode"]);
        assert_eq!(
            errors.violations()[0].error,
            ValidationError::Required {
                field: "postalCode".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut input = valid_input();
        input["items"] = json!([]);

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();

        assert_eq!(paths(&errors), vec!["items"]);
        assert_eq!(
            errors.violations()[0].error,
            ValidationError::TooFewItems {
                field: "items".to_string(),
                min: 1,
            }
        );
    }

    #[test]
    fn test_quantity_boundaries() {
        for quantity in 1..=5 {
            let mut input = valid_input();
            input["items"][0]["quantity"] = json!(quantity);
            assert!(
                CheckoutValidator::new().validate_at(&input, now()).is_ok(),
                "quantity {quantity} should pass"
            );
        }

        for quantity in [0, 6] {
            let mut input = valid_input();
            input["items"][0]["quantity"] = json!(quantity);
            let errors = CheckoutValidator::new()
                .validate_at(&input, now())
                .unwrap_err();
            assert_eq!(paths(&errors), vec!["items[0].quantity"]);
        }
    }

    #[test]
    fn test_fractional_quantity_is_a_type_violation() {
        let mut input = valid_input();
        input["items"][0]["quantity"] = json!(2.5);

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();

        assert_eq!(
            errors.violations()[0].error,
            ValidationError::WrongType {
                field: "quantity".to_string(),
                expected: "integer".to_string(),
            }
        );
    }

    #[test]
    fn test_alpha2_country_rejected() {
        let mut input = valid_input();
        input["shippingAddress"]["country"] = json!("US");

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();

        assert_eq!(paths(&errors), vec!["shippingAddress.country"]);
    }

    #[test]
    fn test_expiration_boundaries() {
        // Current month passes
        assert!(CheckoutValidator::new()
            .validate_at(&valid_input(), now())
            .is_ok());

        // One month earlier, same year: expired
        let mut input = valid_input();
        input["paymentDetails"]["expirationDate"] = json!("05/26");
        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();
        assert_eq!(paths(&errors), vec!["paymentDetails.expirationDate"]);
        assert_eq!(
            errors.violations()[0].error,
            ValidationError::Expired {
                field: "expirationDate".to_string(),
            }
        );

        // Future year passes regardless of month
        let mut input = valid_input();
        input["paymentDetails"]["expirationDate"] = json!("01/27");
        assert!(CheckoutValidator::new().validate_at(&input, now()).is_ok());

        // Month outside 1-12 is invalid even in a future year
        let mut input = valid_input();
        input["paymentDetails"]["expirationDate"] = json!("13/30");
        assert!(CheckoutValidator::new()
            .validate_at(&input, now())
            .is_err());
    }

    #[test]
    fn test_malformed_expiration_is_a_format_violation() {
        let mut input = valid_input();
        input["paymentDetails"]["expirationDate"] = json!("6/26");

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();

        assert_eq!(
            errors.violations()[0].error,
            ValidationError::InvalidFormat {
                field: "expirationDate".to_string(),
                reason: "expected MM/YY".to_string(),
            }
        );
    }

    #[test]
    fn test_all_violations_surface_together() {
        let mut input = valid_input();
        input["customerInfo"]["name"] = json!("Jo");
        input["customerInfo"]["email"] = json!("not-an-email");
        input["items"][1]["isbn"] = json!("9780306406158");

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();

        assert_eq!(
            paths(&errors),
            vec!["customerInfo.name", "customerInfo.email", "items[1].isbn"]
        );
    }

    #[test]
    fn test_wrongly_typed_field_is_a_violation() {
        let mut input = valid_input();
        input["customerInfo"]["name"] = json!(42);

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();

        assert_eq!(
            errors.violations()[0].error,
            ValidationError::WrongType {
                field: "name".to_string(),
                expected: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_non_object_input_rejected_at_root() {
        let errors = CheckoutValidator::new()
            .validate_at(&json!("not a record"), now())
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors.violations()[0].path.is_root());
    }

    #[test]
    fn test_idempotent_under_fixed_date() {
        let validator = CheckoutValidator::new();

        let first = validator.validate_at(&valid_input(), now());
        let second = validator.validate_at(&valid_input(), now());
        assert_eq!(first, second);

        let mut input = valid_input();
        input["customerInfo"]["name"] = json!("Jo");
        let first = validator.validate_at(&input, now());
        let second = validator.validate_at(&input, now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trip_revalidates_identically() {
        let validator = CheckoutValidator::new();
        let request = validator
            .validate_at(&valid_input(), now())
            .expect("valid record");

        let reserialized = serde_json::to_value(&request).expect("serializes");
        let again = validator
            .validate_at(&reserialized, now())
            .expect("still valid");

        assert_eq!(again, request);
    }

    #[test]
    fn test_payment_section_scenario() {
        // cardNumber 4111111111111111, current-month expiry, cvv 123:
        // nothing in the report may point into paymentDetails even when
        // other sections fail
        let mut input = valid_input();
        input["customerInfo"]["name"] = json!("Jo");

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();

        assert!(errors
            .iter()
            .all(|v| !v.path.to_string().starts_with("paymentDetails")));
    }

    #[test]
    fn test_error_tree_nests_by_path() {
        let mut input = valid_input();
        input["customerInfo"]["name"] = json!("Jo");
        input["items"][0]["quantity"] = json!(9);

        let errors = CheckoutValidator::new()
            .validate_at(&input, now())
            .unwrap_err();
        let tree = errors.to_tree();

        assert_eq!(
            tree["customerInfo"]["name"]["_errors"],
            json!(["name must be at least 4 characters"])
        );
        assert_eq!(
            tree["items"]["0"]["quantity"]["_errors"],
            json!(["quantity must be between 1 and 5"])
        );
    }
}
