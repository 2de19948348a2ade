//! Validated scalar fields of a trip plan.

use super::{TripPlanField, TripPlanValidationError, ViolationReason};

/// Text is kept exactly as submitted; only the empty string is refused.
fn non_empty_text(field: TripPlanField, raw: &str) -> Result<String, TripPlanValidationError> {
    if raw.is_empty() {
        return Err(TripPlanValidationError::new(field, ViolationReason::Empty));
    }
    Ok(raw.to_owned())
}

/// Trip title, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripTitle(String);

impl TripTitle {
    /// # Errors
    /// Rejects the empty string.
    pub fn new(raw: &str) -> Result<Self, TripPlanValidationError> {
        non_empty_text(TripPlanField::Title, raw).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Destination name, never empty. Filters match it exactly, whitespace
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination(String);

impl Destination {
    /// # Errors
    /// Rejects the empty string.
    pub fn new(raw: &str) -> Result<Self, TripPlanValidationError> {
        non_empty_text(TripPlanField::Destination, raw).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Trip length in whole days, at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Days(i32);

impl Days {
    /// # Errors
    /// Rejects values below one.
    pub const fn new(value: i32) -> Result<Self, TripPlanValidationError> {
        if value < 1 {
            return Err(TripPlanValidationError::new(
                TripPlanField::Days,
                ViolationReason::OutOfRange,
            ));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Non-negative finite budget amount. Currency is not modelled.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Budget(f64);

impl Budget {
    /// Validate a budget reported against `field`, which lets query bounds
    /// reuse the rule under their own names.
    ///
    /// # Errors
    /// Rejects negative and non-finite values.
    pub fn for_field(field: TripPlanField, value: f64) -> Result<Self, TripPlanValidationError> {
        if !value.is_finite() {
            return Err(TripPlanValidationError::new(field, ViolationReason::InvalidType));
        }
        if value < 0.0 {
            return Err(TripPlanValidationError::new(field, ViolationReason::OutOfRange));
        }
        Ok(Self(value))
    }

    /// # Errors
    /// Rejects negative and non-finite values.
    pub fn new(value: f64) -> Result<Self, TripPlanValidationError> {
        Self::for_field(TripPlanField::Budget, value)
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}
