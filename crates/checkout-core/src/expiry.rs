//! # Card Expiration
//!
//! Parsing and comparison for the `MM/YY` card expiration field.
//!
//! This is deliberately a coarse month/year comparison: no calendar-day
//! resolution, and the two-digit year is compared as-is with no century
//! disambiguation (`"12/99"` reads as year 99 and sorts after year 26).
//! The checkout form has always worked this way and downstream systems
//! expect it, so the ambiguity is kept.
//!
//! The current month/year is never read inside the comparison. Callers
//! sample the clock once via [`CurrentMonth::from_local_clock`] (or build
//! a fixed value in tests) and pass it in, which keeps the whole crate a
//! deterministic function of its inputs.

use chrono::{Datelike, Local};

use crate::checks::ValidationResult;
use crate::error::ValidationError;

// =============================================================================
// Current Month
// =============================================================================

/// A sample of the wall clock, reduced to month and two-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentMonth {
    month: u32,
    year: u32,
}

impl CurrentMonth {
    /// Builds a fixed month/year, e.g. `CurrentMonth::new(6, 26)` for
    /// June 2026. The year is reduced modulo 100.
    pub fn new(month: u32, year: u32) -> Self {
        CurrentMonth {
            month,
            year: year % 100,
        }
    }

    /// Samples the local clock. The only place in the crate that reads it.
    pub fn from_local_clock() -> Self {
        let now = Local::now();
        CurrentMonth {
            month: now.month(),
            year: now.year().rem_euclid(100) as u32,
        }
    }

    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Two-digit year, 0-99.
    pub fn year(&self) -> u32 {
        self.year
    }
}

// =============================================================================
// Expiration Date
// =============================================================================

/// A parsed `MM/YY` expiration date.
///
/// Parsing only enforces the shape (two digits, slash, two digits); whether
/// the month is a real calendar month is judged together with the
/// past/future comparison in [`ExpirationDate::is_valid_at`], mirroring how
/// the form treats "13/26" and "01/20" as the same user error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationDate {
    month: u32,
    year: u32,
}

impl ExpirationDate {
    /// Parses a strict `MM/YY` string.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::expiry::ExpirationDate;
    ///
    /// let date = ExpirationDate::parse("06/26").unwrap();
    /// assert_eq!(date.month(), 6);
    /// assert_eq!(date.year(), 26);
    ///
    /// assert!(ExpirationDate::parse("6/26").is_err());
    /// assert!(ExpirationDate::parse("06-26").is_err());
    /// ```
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let bytes = raw.as_bytes();

        let shaped = bytes.len() == 5
            && bytes[0].is_ascii_digit()
            && bytes[1].is_ascii_digit()
            && bytes[2] == b'/'
            && bytes[3].is_ascii_digit()
            && bytes[4].is_ascii_digit();

        if !shaped {
            return Err(ValidationError::InvalidFormat {
                field: "expirationDate".to_string(),
                reason: "expected MM/YY".to_string(),
            });
        }

        Ok(ExpirationDate {
            month: u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0'),
            year: u32::from(bytes[3] - b'0') * 10 + u32::from(bytes[4] - b'0'),
        })
    }

    /// Month as written, 0-99 (not yet bounds-checked).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Two-digit year as written, 0-99.
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Whether the card is usable at `now`.
    ///
    /// The month must be a real calendar month, and the date must not be
    /// before `now`: a later year always passes, the same year passes from
    /// the current month onward.
    pub fn is_valid_at(&self, now: CurrentMonth) -> bool {
        if self.month < 1 || self.month > 12 {
            return false;
        }

        self.year > now.year() || (self.year == now.year() && self.month >= now.month())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
