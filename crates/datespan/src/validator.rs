//! Validation for date token candidates.
//!
//! Candidates flow out of the codec as normalized `YYYY-MM-DD` strings and
//! are checked here before a commit. Input can be in one of three states:
//!
//! - [`ValidationState::Invalid`]: the token cannot be a calendar date
//! - [`ValidationState::Intermediate`]: the token is incomplete but could
//!   become valid with more typing
//! - [`ValidationState::Acceptable`]: the token is a real calendar date
//!
//! Intermediate tokens are the normal case while the user is mid-edit; they
//! are not errors and are never surfaced as such.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::format::ISO_TOKEN_LEN;

/// The result of validating input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationState {
    /// The input is clearly invalid and cannot be made valid by further editing.
    Invalid,
    /// The input is incomplete but could potentially become valid with more input.
    Intermediate,
    /// The input is valid and acceptable as a final result.
    #[default]
    Acceptable,
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationState::Invalid => write!(f, "Invalid"),
            ValidationState::Intermediate => write!(f, "Intermediate"),
            ValidationState::Acceptable => write!(f, "Acceptable"),
        }
    }
}

/// Trait for input validators.
///
/// # Thread Safety
///
/// Validators must be `Send + Sync` to work with the signal system.
pub trait Validator: Send + Sync {
    /// Validate the input string.
    fn validate(&self, input: &str) -> ValidationState;
}

// Allow using Arc<dyn Validator> as a Validator
impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, input: &str) -> ValidationState {
        (**self).validate(input)
    }
}

// Allow using Box<dyn Validator> as a Validator
impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, input: &str) -> ValidationState {
        (**self).validate(input)
    }
}

/// Validator for normalized `YYYY-MM-DD` candidate tokens.
///
/// A candidate shorter than ten characters is intermediate (the user is
/// still typing); a ten-character candidate must parse into a real calendar
/// date, which rejects impossible dates like `2023-02-30`.
///
/// # Example
///
/// ```
/// use datespan::{DateTokenValidator, ValidationState, Validator};
///
/// let validator = DateTokenValidator::new();
/// assert_eq!(validator.validate("2024-01-05"), ValidationState::Acceptable);
/// assert_eq!(validator.validate("2024-01-0"), ValidationState::Intermediate);
/// assert_eq!(validator.validate("2023-02-30"), ValidationState::Invalid);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTokenValidator;

impl DateTokenValidator {
    /// Create a new date token validator.
    pub fn new() -> Self {
        Self
    }

    /// Check whether `candidate` is a real calendar date.
    ///
    /// Pure predicate: no side effects, no panics. This is the whole
    /// validity contract — anything `chrono` cannot parse as a calendar
    /// date, including out-of-range days, is simply not valid.
    pub fn date_is_valid(candidate: &str) -> bool {
        Self::parse(candidate).is_some()
    }

    /// Parse a normalized candidate into a date, if it is one.
    pub fn parse(candidate: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(candidate, "%Y-%m-%d").ok()
    }
}

impl Validator for DateTokenValidator {
    fn validate(&self, input: &str) -> ValidationState {
        if input.chars().count() < ISO_TOKEN_LEN {
            return ValidationState::Intermediate;
        }
        if Self::date_is_valid(input) {
            ValidationState::Acceptable
        } else {
            ValidationState::Invalid
        }
    }
}
