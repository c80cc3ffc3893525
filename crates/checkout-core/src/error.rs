//! # Error Types
//!
//! Rule-level errors and the path-keyed violation report.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError   - one violated rule ("name must be at least 4 ...")  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FieldViolation    - rule failure + where it happened (FieldPath)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutErrors    - every violation in the record, in walk order,      │
//! │                      renderable as a nested tree for the form layer     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Rejection is a normal outcome: the validator never panics on bad input
//! 4. Every variant maps to a user-facing message

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A single violated validation rule.
///
/// The `field` in each variant is the short field name (`"name"`, `"isbn"`);
/// the full location lives in the [`FieldPath`] of the enclosing
/// [`FieldViolation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or null.
    #[error("{field} is required")]
    Required { field: String },

    /// A field is present but has the wrong JSON type.
    #[error("{field} must be a {expected}")]
    WrongType { field: String, expected: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A collection has fewer elements than allowed.
    #[error("{field} must contain at least {min} item(s)")]
    TooFewItems { field: String, min: usize },

    /// Invalid format (e.g., malformed email, failed checksum).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A card expiration date that is in the past or not a calendar month.
    #[error("{field} is expired or invalid")]
    Expired { field: String },
}

// =============================================================================
// Field Path
// =============================================================================

/// One step into the nested input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A named field of an object, e.g. `customerInfo`.
    Field(&'static str),
    /// An element of an array, e.g. `items[2]`.
    Index(usize),
}

impl PathSegment {
    /// The tree key for this segment (`"name"`, `"0"`).
    fn key(&self) -> String {
        match self {
            PathSegment::Field(name) => (*name).to_string(),
            PathSegment::Index(i) => i.to_string(),
        }
    }
}

/// The location of a field in the input record, from the root down.
///
/// Renders as the form layer expects it: `customerInfo.name`,
/// `items[2].isbn`. The empty path is the record root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The record root (empty path).
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    /// A path starting at a top-level field.
    pub fn field(name: &'static str) -> Self {
        FieldPath(vec![PathSegment::Field(name)])
    }

    /// Extends the path with a named field.
    pub fn child(&self, name: &'static str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name));
        FieldPath(segments)
    }

    /// Extends the path with an array index.
    pub fn index(&self, i: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(i));
        FieldPath(segments)
    }

    /// The segments from the root down.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Whether this is the record root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// Field Violation
// =============================================================================

/// One rule failure tied to one field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Where in the record the rule failed.
    pub path: FieldPath,
    /// Which rule failed.
    pub error: ValidationError,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.error)
        } else {
            write!(f, "{}: {}", self.path, self.error)
        }
    }
}

// =============================================================================
// Checkout Errors
// =============================================================================

/// The full violation report for one validation pass.
///
/// Violations appear in record-walk order. No partial success: when this
/// report is non-empty the whole record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckoutErrors {
    violations: Vec<FieldViolation>,
}

impl CheckoutErrors {
    /// An empty report.
    pub fn new() -> Self {
        CheckoutErrors::default()
    }

    /// Records one violation.
    pub(crate) fn push(&mut self, path: FieldPath, error: ValidationError) {
        self.violations.push(FieldViolation { path, error });
    }

    /// Whether any rule was violated.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations in the report.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// The violations, in record-walk order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Iterates over the violations.
    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.violations.iter()
    }

    /// Renders the report as a nested tree keyed by field path.
    ///
    /// Each node on a violated path is an object; the messages for a field
    /// collect under its `"_errors"` key, array elements under their index:
    ///
    /// ```json
    /// {
    ///   "customerInfo": { "name": { "_errors": ["name must be at least 4 characters"] } },
    ///   "items": { "0": { "isbn": { "_errors": ["isbn has invalid format: ..."] } } }
    /// }
    /// ```
    pub fn to_tree(&self) -> Value {
        let mut root = Map::new();
        for violation in &self.violations {
            insert_message(
                &mut root,
                violation.path.segments(),
                violation.error.to_string(),
            );
        }
        Value::Object(root)
    }
}

/// Walks `segments` down from `map`, creating objects as needed, and appends
/// `message` to the `"_errors"` array at the end of the path.
fn insert_message(map: &mut Map<String, Value>, segments: &[PathSegment], message: String) {
    match segments.split_first() {
        None => {
            let entry = map
                .entry("_errors")
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(messages) = entry {
                messages.push(Value::String(message));
            }
        }
        Some((head, rest)) => {
            let child = map
                .entry(head.key())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child_map) = child {
                insert_message(child_map, rest, message);
            }
        }
    }
}

impl fmt::Display for CheckoutErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CheckoutErrors {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "name".to_string(),
            min: 4,
        };
        assert_eq!(err.to_string(), "name must be at least 4 characters");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 5,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 5");

        let err = ValidationError::Expired {
            field: "expirationDate".to_string(),
        };
        assert_eq!(err.to_string(), "expirationDate is expired or invalid");
    }

    #[test]
    fn test_field_path_display() {
        assert_eq!(FieldPath::root().to_string(), "");
        assert_eq!(
            FieldPath::field("customerInfo").child("name").to_string(),
            "customerInfo.name"
        );
        assert_eq!(
            FieldPath::field("items").index(2).child("isbn").to_string(),
            "items[2].isbn"
        );
    }

    #[test]
    fn test_report_collects_in_order() {
        let mut report = CheckoutErrors::new();
        report.push(
            FieldPath::field("customerInfo").child("name"),
            ValidationError::TooShort {
                field: "name".to_string(),
                min: 4,
            },
        );
        report.push(
            FieldPath::field("items"),
            ValidationError::TooFewItems {
                field: "items".to_string(),
                min: 1,
            },
        );

        assert_eq!(report.len(), 2);
        assert_eq!(
            report.violations()[0].path.to_string(),
            "customerInfo.name"
        );
        assert_eq!(report.violations()[1].path.to_string(), "items");
    }

    #[test]
    fn test_tree_shape() {
        let mut report = CheckoutErrors::new();
        report.push(
            FieldPath::field("customerInfo").child("name"),
            ValidationError::TooShort {
                field: "name".to_string(),
                min: 4,
            },
        );
        report.push(
            FieldPath::field("items").index(0).child("quantity"),
            ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: 5,
            },
        );

        assert_eq!(
            report.to_tree(),
            json!({
                "customerInfo": {
                    "name": { "_errors": ["name must be at least 4 characters"] }
                },
                "items": {
                    "0": { "quantity": { "_errors": ["quantity must be between 1 and 5"] } }
                }
            })
        );
    }

    #[test]
    fn test_tree_merges_same_field() {
        let mut report = CheckoutErrors::new();
        let path = FieldPath::field("paymentDetails").child("cvv");
        report.push(
            path.clone(),
            ValidationError::InvalidFormat {
                field: "cvv".to_string(),
                reason: "expected exactly 3 digits".to_string(),
            },
        );
        report.push(
            path,
            ValidationError::WrongType {
                field: "cvv".to_string(),
                expected: "string".to_string(),
            },
        );

        let tree = report.to_tree();
        let messages = &tree["paymentDetails"]["cvv"]["_errors"];
        assert_eq!(messages.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_display_one_violation_per_line() {
        let mut report = CheckoutErrors::new();
        report.push(
            FieldPath::field("items"),
            ValidationError::Required {
                field: "items".to_string(),
            },
        );
        report.push(
            FieldPath::root(),
            ValidationError::WrongType {
                field: "checkout".to_string(),
                expected: "object".to_string(),
            },
        );

        let rendered = report.to_string();
        assert_eq!(
            rendered,
            "items: items is required\ncheckout must be a object"
        );
    }
}
