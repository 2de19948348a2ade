//! Trip plan domain types and payload validation.
//!
//! A trip plan is a small travel record (title, destination, days, budget)
//! stamped with a creation time and an identifier assigned by storage. Raw
//! payloads enter through [`validate_create`], [`validate_update`] and
//! [`validate_query`]; every violation is collected so callers can report
//! them together.

use std::fmt;

use serde_json::{Value, json};

use crate::domain::Error;

mod fields;
mod filter;
mod id;
mod record;
mod validation;

pub use fields::{Budget, Days, Destination, TripTitle};
pub use filter::TripPlanFilter;
pub use id::{TRIP_PLAN_ID_LEN, TripPlanId};
pub use record::{NewTripPlan, TripPlan, TripPlanDraft, TripPlanPatch};
pub use validation::{validate_create, validate_query, validate_update};

/// Field a validation violation refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TripPlanField {
    Id,
    Title,
    Destination,
    Days,
    Budget,
    Page,
    Limit,
    MinBudget,
    MaxBudget,
    /// The payload as a whole, e.g. when it is not a JSON object.
    Body,
    /// A key the payload schema does not declare.
    Unknown(String),
}

impl TripPlanField {
    /// Wire name of the field as clients spell it.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Destination => "destination",
            Self::Days => "days",
            Self::Budget => "budget",
            Self::Page => "page",
            Self::Limit => "limit",
            Self::MinBudget => "minBudget",
            Self::MaxBudget => "maxBudget",
            Self::Body => "body",
            Self::Unknown(name) => name.as_str(),
        }
    }

    const fn expected_type(&self) -> &'static str {
        match self {
            Self::Title | Self::Destination | Self::Id => "a string",
            Self::Days | Self::Page | Self::Limit => "an integer",
            Self::Budget | Self::MinBudget | Self::MaxBudget => "a number",
            Self::Body | Self::Unknown(_) => "a JSON object",
        }
    }

    const fn expected_range(&self) -> &'static str {
        match self {
            Self::Limit => "between 1 and 100",
            Self::Days => "between 1 and 2147483647",
            Self::Page => "between 1 and 4294967295",
            _ => "at least 0",
        }
    }
}

impl fmt::Display for TripPlanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category of a validation violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationReason {
    Missing,
    InvalidType,
    Empty,
    OutOfRange,
    NotInteger,
    UnknownField,
    InvalidFormat,
}

impl ViolationReason {
    /// Stable machine-readable code reported in error details.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Missing => "required",
            Self::InvalidType => "invalid_type",
            Self::Empty => "empty",
            Self::OutOfRange => "out_of_range",
            Self::NotInteger => "not_integer",
            Self::UnknownField => "unknown_field",
            Self::InvalidFormat => "invalid_format",
        }
    }
}

/// One rule a payload broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPlanValidationError {
    field: TripPlanField,
    reason: ViolationReason,
}

impl TripPlanValidationError {
    /// Pair a field with the rule it broke.
    #[must_use]
    pub const fn new(field: TripPlanField, reason: ViolationReason) -> Self {
        Self { field, reason }
    }

    #[must_use]
    pub const fn field(&self) -> &TripPlanField {
        &self.field
    }

    #[must_use]
    pub const fn reason(&self) -> ViolationReason {
        self.reason
    }

    fn to_json(&self) -> Value {
        json!({
            "field": self.field.name(),
            "code": self.reason.code(),
            "message": self.to_string(),
        })
    }
}

impl fmt::Display for TripPlanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = &self.field;
        match self.reason {
            ViolationReason::Missing => write!(f, "{field} is required"),
            ViolationReason::InvalidType => write!(f, "{field} must be {}", field.expected_type()),
            ViolationReason::Empty => write!(f, "{field} must not be empty"),
            ViolationReason::OutOfRange => write!(f, "{field} must be {}", field.expected_range()),
            ViolationReason::NotInteger => write!(f, "{field} must be a whole number"),
            ViolationReason::UnknownField => write!(f, "{field} is not an accepted field"),
            ViolationReason::InvalidFormat => {
                write!(f, "{field} must be a 24-character hexadecimal identifier")
            }
        }
    }
}

impl std::error::Error for TripPlanValidationError {}

/// Every violation found in one payload, in discovery order.
///
/// ## Invariants
/// - Never empty; validators only return it on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPlanValidationErrors(Vec<TripPlanValidationError>);

impl TripPlanValidationErrors {
    pub(crate) fn from_violations(
        violations: Vec<TripPlanValidationError>,
    ) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self(violations))
        }
    }

    /// Violations in the order they were found.
    #[must_use]
    pub fn violations(&self) -> &[TripPlanValidationError] {
        self.0.as_slice()
    }

    /// Whether any violation refers to `field`.
    #[must_use]
    pub fn mentions(&self, field: &TripPlanField) -> bool {
        self.0.iter().any(|violation| violation.field() == field)
    }
}

impl From<TripPlanValidationError> for TripPlanValidationErrors {
    fn from(value: TripPlanValidationError) -> Self {
        Self(vec![value])
    }
}

impl fmt::Display for TripPlanValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TripPlanValidationErrors {}

impl From<TripPlanValidationErrors> for Error {
    fn from(value: TripPlanValidationErrors) -> Self {
        let errors: Vec<Value> = value.0.iter().map(TripPlanValidationError::to_json).collect();
        let mut details = json!({ "errors": errors });
        if let (Some(first), Value::Object(map)) = (value.0.first(), &mut details) {
            map.insert("field".to_owned(), json!(first.field.name()));
            map.insert("code".to_owned(), json!(first.reason.code()));
        }
        let message = value
            .0
            .first()
            .map_or_else(|| "invalid trip plan payload".to_owned(), ToString::to_string);
        Self::invalid_request(message).with_details(details)
    }
}

impl From<TripPlanValidationError> for Error {
    fn from(value: TripPlanValidationError) -> Self {
        TripPlanValidationErrors::from(value).into()
    }
}
