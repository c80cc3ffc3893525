//! # Field Checks
//!
//! Per-field validators for the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: schema module (Rust)                                         │
//! │  ├── Shape validation (field present, right JSON type)                 │
//! │  └── THIS MODULE: field rules and checksum refinements                 │
//! │                                                                         │
//! │  Defense in depth: the frontend is advisory, this module is the truth  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator takes the already-extracted string or number and reports
//! at most the rules it can judge on its own; field paths are attached by
//! the caller. Length rules count Unicode scalar values, not bytes, so a
//! name like "José" counts 4 characters.
//!
//! ## Usage
//! ```rust
//! use checkout_core::checks::{validate_isbn, validate_quantity};
//!
//! validate_isbn("9780306406157").unwrap();
//! validate_quantity(3).unwrap();
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MIN_CART_ITEMS, MIN_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Length Bounds
// =============================================================================

const NAME_MIN: usize = 4;
const NAME_MAX: usize = 50;
const ADDRESS_LINE_MIN: usize = 5;
const ADDRESS_LINE_MAX: usize = 100;
const LOCALITY_MIN: usize = 2;
const LOCALITY_MAX: usize = 50;

/// Checks a character-count range and reports `TooShort`/`TooLong`.
fn check_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let length = value.chars().count();

    if length < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if length > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Checks that a value is an exact run of ASCII digits.
fn check_digits(field: &str, value: &str, count: usize) -> ValidationResult<()> {
    if value.chars().count() != count || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("expected exactly {count} digits"),
        });
    }

    Ok(())
}

// =============================================================================
// Compiled Patterns
// =============================================================================

/// Pragmatic email shape: local part, `@`, dotted domain, no whitespace.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// US postal code: ZIP or ZIP+4.
static US_POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("postal code pattern compiles"));

// =============================================================================
// Customer Info Validators
// =============================================================================

/// Validates the customer name.
///
/// ## Rules
/// - Must be between 4 and 50 characters
///
/// ## Example
/// ```rust
/// use checkout_core::checks::validate_name;
///
/// assert!(validate_name("Joanna Doe").is_ok());
/// assert!(validate_name("Jo").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    check_length("name", name, NAME_MIN, NAME_MAX)
}

/// Validates an email address shape.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if !EMAIL.is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected a valid email address".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Exactly 10 decimal digits, no separators
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    check_digits("phoneNumber", phone, 10)
}

// =============================================================================
// Shipping Address Validators
// =============================================================================

/// Validates the street address line (5-100 characters).
pub fn validate_address_line1(line: &str) -> ValidationResult<()> {
    check_length("addressLine1", line, ADDRESS_LINE_MIN, ADDRESS_LINE_MAX)
}

/// Validates the secondary address line (up to 100 characters, may be empty).
pub fn validate_address_line2(line: &str) -> ValidationResult<()> {
    check_length("addressLine2", line, 0, ADDRESS_LINE_MAX)
}

/// Validates a city name (2-50 characters).
pub fn validate_city(city: &str) -> ValidationResult<()> {
    check_length("city", city, LOCALITY_MIN, LOCALITY_MAX)
}

/// Validates a state or province name (2-50 characters).
pub fn validate_state(state: &str) -> ValidationResult<()> {
    check_length("state", state, LOCALITY_MIN, LOCALITY_MAX)
}

/// Validates a US postal code.
///
/// ## Rules
/// - `12345` or `12345-6789`
/// - The shop only ships domestically, so the country for the postal-code
///   pattern is fixed to US
pub fn validate_postal_code(code: &str) -> ValidationResult<()> {
    if !US_POSTAL_CODE.is_match(code) {
        return Err(ValidationError::InvalidFormat {
            field: "postalCode".to_string(),
            reason: "expected a valid US postal code".to_string(),
        });
    }

    Ok(())
}

/// Validates an ISO 3166-1 alpha-3 country code.
///
/// Case-sensitive exact match: `"USA"` passes, `"US"` and `"usa"` do not.
pub fn validate_country(country: &str) -> ValidationResult<()> {
    if ISO_3166_1_ALPHA3.binary_search(&country).is_err() {
        return Err(ValidationError::InvalidFormat {
            field: "country".to_string(),
            reason: "expected an ISO 3166-1 alpha-3 country code".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Payment Validators
// =============================================================================

/// Validates a credit card number.
///
/// ## Rules
/// - Spaces and hyphens are stripped before checking
/// - 12 to 19 digits
/// - Luhn checksum must hold
///
/// ## Example
/// ```rust
/// use checkout_core::checks::validate_card_number;
///
/// assert!(validate_card_number("4111111111111111").is_ok());
/// assert!(validate_card_number("4111 1111 1111 1111").is_ok());
/// assert!(validate_card_number("4111111111111112").is_err());
/// ```
pub fn validate_card_number(card_number: &str) -> ValidationResult<()> {
    let digits: String = card_number
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    let well_formed = (12..=19).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && luhn_checksum_holds(&digits);

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "cardNumber".to_string(),
            reason: "expected a valid credit card number".to_string(),
        });
    }

    Ok(())
}

/// Luhn checksum over a run of ASCII digits.
///
/// Walking right to left, every second digit is doubled (minus 9 when the
/// double exceeds 9); the total must be divisible by 10.
fn luhn_checksum_holds(digits: &str) -> bool {
    let mut sum = 0u32;

    for (i, c) in digits.chars().rev().enumerate() {
        let mut digit = c.to_digit(10).unwrap_or(0);
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }

    sum % 10 == 0
}

/// Validates a card verification value (exactly 3 digits).
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    check_digits("cvv", cvv, 3)
}

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates an ISBN.
///
/// ## Rules
/// - Hyphens and spaces are stripped before checking
/// - 10 characters: ISBN-10 (9 digits + digit-or-X check character, mod 11)
/// - 13 characters: ISBN-13 (13 digits, alternating 1/3 weights, mod 10)
pub fn validate_isbn(isbn: &str) -> ValidationResult<()> {
    let compact: String = isbn.chars().filter(|c| *c != '-' && *c != ' ').collect();

    let valid = match compact.len() {
        10 => isbn10_checksum_holds(&compact),
        13 => isbn13_checksum_holds(&compact),
        _ => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "isbn".to_string(),
            reason: "expected a valid ISBN-10 or ISBN-13".to_string(),
        });
    }

    Ok(())
}

/// ISBN-10: Σ (10-i)·dᵢ over the first 9 digits plus the check character
/// (where `X` counts 10) must be divisible by 11.
fn isbn10_checksum_holds(compact: &str) -> bool {
    let chars: Vec<char> = compact.chars().collect();
    if chars.len() != 10 {
        return false;
    }

    let mut sum = 0u32;

    for (i, c) in chars.iter().take(9).enumerate() {
        match c.to_digit(10) {
            Some(digit) => sum += (10 - i as u32) * digit,
            None => return false,
        }
    }

    let check = match chars[9] {
        'X' | 'x' => 10,
        c => match c.to_digit(10) {
            Some(digit) => digit,
            None => return false,
        },
    };

    (sum + check) % 11 == 0
}

/// ISBN-13: digits weighted 1,3,1,3,... must sum to a multiple of 10.
fn isbn13_checksum_holds(compact: &str) -> bool {
    let mut sum = 0u32;

    for (i, c) in compact.chars().enumerate() {
        match c.to_digit(10) {
            Some(digit) => sum += if i % 2 == 0 { digit } else { 3 * digit },
            None => return false,
        }
    }

    sum % 10 == 0
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be between MIN_ITEM_QUANTITY (1) and MAX_ITEM_QUANTITY (5)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if !(MIN_ITEM_QUANTITY..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_ITEM_QUANTITY,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the cart size (at least one book selected).
pub fn validate_item_count(count: usize) -> ValidationResult<()> {
    if count < MIN_CART_ITEMS {
        return Err(ValidationError::TooFewItems {
            field: "items".to_string(),
            min: MIN_CART_ITEMS,
        });
    }

    Ok(())
}

// =============================================================================
// Country Codes
// =============================================================================

/// ISO 3166-1 alpha-3, officially assigned codes. Sorted for binary search.
const ISO_3166_1_ALPHA3: [&str; 249] = [
    "ABW", "AFG", "AGO", "AIA", "ALA", "ALB", "AND", "ARE", "ARG", "ARM", "ASM", "ATA", "ATF",
    "ATG", "AUS", "AUT", "AZE", "BDI", "BEL", "BEN", "BES", "BFA", "BGD", "BGR", "BHR", "BHS",
    "BIH", "BLM", "BLR", "BLZ", "BMU", "BOL", "BRA", "BRB", "BRN", "BTN", "BVT", "BWA", "CAF",
    "CAN", "CCK", "CHE", "CHL", "CHN", "CIV", "CMR", "COD", "COG", "COK", "COL", "COM", "CPV",
    "CRI", "CUB", "CUW", "CXR", "CYM", "CYP", "CZE", "DEU", "DJI", "DMA", "DNK", "DOM", "DZA",
    "ECU", "EGY", "ERI", "ESH", "ESP", "EST", "ETH", "FIN", "FJI", "FLK", "FRA", "FRO", "FSM",
    "GAB", "GBR", "GEO", "GGY", "GHA", "GIB", "GIN", "GLP", "GMB", "GNB", "GNQ", "GRC", "GRD",
    "GRL", "GTM", "GUF", "GUM", "GUY", "HKG", "HMD", "HND", "HRV", "HTI", "HUN", "IDN", "IMN",
    "IND", "IOT", "IRL", "IRN", "IRQ", "ISL", "ISR", "ITA", "JAM", "JEY", "JOR", "JPN", "KAZ",
    "KEN", "KGZ", "KHM", "KIR", "KNA", "KOR", "KWT", "LAO", "LBN", "LBR", "LBY", "LCA", "LIE",
    "LKA", "LSO", "LTU", "LUX", "LVA", "MAC", "MAF", "MAR", "MCO", "MDA", "MDG", "MDV", "MEX",
    "MHL", "MKD", "MLI", "MLT", "MMR", "MNE", "MNG", "MNP", "MOZ", "MRT", "MSR", "MTQ", "MUS",
    "MWI", "MYS", "MYT", "NAM", "NCL", "NER", "NFK", "NGA", "NIC", "NIU", "NLD", "NOR", "NPL",
    "NRU", "NZL", "OMN", "PAK", "PAN", "PCN", "PER", "PHL", "PLW", "PNG", "POL", "PRI", "PRK",
    "PRT", "PRY", "PSE", "PYF", "QAT", "REU", "ROU", "RUS", "RWA", "SAU", "SDN", "SEN", "SGP",
    "SGS", "SHN", "SJM", "SLB", "SLE", "SLV", "SMR", "SOM", "SPM", "SRB", "SSD", "STP", "SUR",
    "SVK", "SVN", "SWE", "SWZ", "SXM", "SYC", "SYR", "TCA", "TCD", "TGO", "THA", "TJK", "TKL",
    "TKM", "TLS", "TON", "TTO", "TUN", "TUR", "TUV", "TWN", "TZA", "UGA", "UKR", "UMI", "URY",
    "USA", "UZB", "VAT", "VCT", "VEN", "VGB", "VIR", "VNM", "VUT", "WLF", "WSM", "YEM", "ZAF",
    "ZMB", "ZWE",
];

// =============================================================================
// Unit Tests
// =============================================================================
