//! Payload validation for create, update and list requests.
//!
//! JSON bodies are type strict: strings are never coerced to numbers and
//! `null` is a type violation. Query parameters arrive as text and are parsed.

use std::collections::BTreeMap;

use pagination::{MAX_LIMIT, PageRequest, PageRequestError};
use serde_json::{Map, Value};

use super::{
    Budget, Days, Destination, TripPlanDraft, TripPlanField, TripPlanFilter, TripPlanPatch,
    TripPlanValidationError, TripPlanValidationErrors, TripTitle, ViolationReason,
};

const BODY_KEYS: [&str; 4] = ["title", "destination", "days", "budget"];
const QUERY_KEYS: [&str; 5] = ["destination", "minBudget", "maxBudget", "page", "limit"];

type FieldResult<T> = Result<T, TripPlanValidationError>;

#[derive(Default)]
struct Violations(Vec<TripPlanValidationError>);

impl Violations {
    fn keep<T>(&mut self, result: FieldResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.0.push(violation);
                None
            }
        }
    }

    fn push(&mut self, field: TripPlanField, reason: ViolationReason) {
        self.0.push(TripPlanValidationError::new(field, reason));
    }

    fn reject_unknown<'a>(&mut self, keys: impl Iterator<Item = &'a String>, allowed: &[&str]) {
        for key in keys.filter(|key| !allowed.contains(&key.as_str())) {
            self.push(
                TripPlanField::Unknown(key.clone()),
                ViolationReason::UnknownField,
            );
        }
    }

    fn finish(self) -> Result<(), TripPlanValidationErrors> {
        TripPlanValidationErrors::from_violations(self.0)
    }
}

fn required<T>(
    object: &Map<String, Value>,
    field: TripPlanField,
    parse: fn(&Value) -> FieldResult<T>,
    violations: &mut Violations,
) -> Option<T> {
    match object.get(field.name()) {
        Some(value) => violations.keep(parse(value)),
        None => {
            violations.push(field, ViolationReason::Missing);
            None
        }
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, TripPlanValidationErrors> {
    payload.as_object().ok_or_else(|| {
        TripPlanValidationError::new(TripPlanField::Body, ViolationReason::InvalidType).into()
    })
}

fn parse_title(value: &Value) -> FieldResult<TripTitle> {
    match value {
        Value::String(raw) => TripTitle::new(raw),
        _ => Err(TripPlanValidationError::new(
            TripPlanField::Title,
            ViolationReason::InvalidType,
        )),
    }
}

fn parse_destination(value: &Value) -> FieldResult<Destination> {
    match value {
        Value::String(raw) => Destination::new(raw),
        _ => Err(TripPlanValidationError::new(
            TripPlanField::Destination,
            ViolationReason::InvalidType,
        )),
    }
}

fn parse_days(value: &Value) -> FieldResult<Days> {
    let violation = |reason| TripPlanValidationError::new(TripPlanField::Days, reason);
    let Value::Number(number) = value else {
        return Err(violation(ViolationReason::InvalidType));
    };
    if let Some(whole) = number.as_i64() {
        let days = i32::try_from(whole).map_err(|_| violation(ViolationReason::OutOfRange))?;
        return Days::new(days);
    }
    // Large unsigned values and floats such as `3.0` land here.
    let float = number
        .as_f64()
        .ok_or_else(|| violation(ViolationReason::InvalidType))?;
    if float.fract() != 0.0 {
        return Err(violation(ViolationReason::NotInteger));
    }
    if float < 1.0 || float > f64::from(i32::MAX) {
        return Err(violation(ViolationReason::OutOfRange));
    }
    Days::new(float as i32)
}

fn parse_budget(value: &Value) -> FieldResult<Budget> {
    match value {
        Value::Number(number) => number.as_f64().map_or_else(
            || {
                Err(TripPlanValidationError::new(
                    TripPlanField::Budget,
                    ViolationReason::InvalidType,
                ))
            },
            Budget::new,
        ),
        _ => Err(TripPlanValidationError::new(
            TripPlanField::Budget,
            ViolationReason::InvalidType,
        )),
    }
}

/// Validate a create payload into a [`TripPlanDraft`].
///
/// All four fields are required. Every violation is reported, and keys other
/// than the four declared fields are rejected.
///
/// # Errors
/// Returns every violation found when the payload is not acceptable.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use trip_planner::domain::validate_create;
///
/// let draft = validate_create(&json!({
///     "title": "Beach week",
///     "destination": "Goa",
///     "days": 5,
///     "budget": 500,
/// }))?;
/// assert_eq!(draft.destination.as_str(), "Goa");
/// # Ok::<(), trip_planner::domain::TripPlanValidationErrors>(())
/// ```
pub fn validate_create(payload: &Value) -> Result<TripPlanDraft, TripPlanValidationErrors> {
    let object = as_object(payload)?;
    let mut violations = Violations::default();

    // Declared order, so the first violation is the first offending field.
    let title = required(object, TripPlanField::Title, parse_title, &mut violations);
    let destination = required(object, TripPlanField::Destination, parse_destination, &mut violations);
    let days = required(object, TripPlanField::Days, parse_days, &mut violations);
    let budget = required(object, TripPlanField::Budget, parse_budget, &mut violations);
    violations.reject_unknown(object.keys(), &BODY_KEYS);

    match (title, destination, days, budget) {
        (Some(title), Some(destination), Some(days), Some(budget)) => {
            violations.finish()?;
            Ok(TripPlanDraft {
                title,
                destination,
                days,
                budget,
            })
        }
        _ => Err(TripPlanValidationErrors(violations.0)),
    }
}

/// Validate an update payload into a [`TripPlanPatch`].
///
/// Every field is optional and follows the create rules when present. An
/// empty object is a valid patch that changes nothing. `id` and `createdAt`
/// are immutable and therefore rejected like any other undeclared key.
///
/// # Errors
/// Returns every violation found when the payload is not acceptable.
pub fn validate_update(payload: &Value) -> Result<TripPlanPatch, TripPlanValidationErrors> {
    let object = as_object(payload)?;
    let mut violations = Violations::default();

    let patch = TripPlanPatch {
        title: object
            .get(TripPlanField::Title.name())
            .and_then(|value| violations.keep(parse_title(value))),
        destination: object
            .get(TripPlanField::Destination.name())
            .and_then(|value| violations.keep(parse_destination(value))),
        days: object
            .get(TripPlanField::Days.name())
            .and_then(|value| violations.keep(parse_days(value))),
        budget: object
            .get(TripPlanField::Budget.name())
            .and_then(|value| violations.keep(parse_budget(value))),
    };
    violations.reject_unknown(object.keys(), &BODY_KEYS);
    violations.finish()?;
    Ok(patch)
}

/// Whole-number query value. Integral decimals such as `2.0` are accepted,
/// matching how JSON bodies treat `days`.
fn query_count(field: TripPlanField, raw: &str) -> FieldResult<u32> {
    let trimmed = raw.trim();
    let violation = |reason| TripPlanValidationError::new(field.clone(), reason);
    if let Ok(value) = trimmed.parse::<u64>() {
        return u32::try_from(value).map_err(|_| violation(ViolationReason::OutOfRange));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if !value.is_finite() => Err(violation(ViolationReason::InvalidType)),
        Ok(value) if value.fract() != 0.0 => Err(violation(ViolationReason::NotInteger)),
        Ok(value) if value < 0.0 || value > f64::from(u32::MAX) => {
            Err(violation(ViolationReason::OutOfRange))
        }
        Ok(value) => Ok(value as u32),
        Err(_) => Err(violation(ViolationReason::InvalidType)),
    }
}

fn query_budget(field: TripPlanField, raw: &str) -> FieldResult<Budget> {
    raw.trim().parse::<f64>().map_or_else(
        |_| {
            Err(TripPlanValidationError::new(
                field.clone(),
                ViolationReason::InvalidType,
            ))
        },
        |value| Budget::for_field(field.clone(), value),
    )
}

fn page_request(
    page: Option<u32>,
    limit: Option<u32>,
    violations: &mut Violations,
) -> Option<PageRequest> {
    if page == Some(0) {
        violations.push(TripPlanField::Page, ViolationReason::OutOfRange);
    }
    if limit.is_some_and(|limit| limit == 0 || limit > MAX_LIMIT) {
        violations.push(TripPlanField::Limit, ViolationReason::OutOfRange);
    }
    match PageRequest::from_optional(page, limit) {
        Ok(request) => Some(request),
        Err(PageRequestError::PageOutOfRange | PageRequestError::LimitOutOfRange { .. }) => None,
    }
}

/// Validate list query parameters into a [`TripPlanFilter`].
///
/// `page` defaults to 1 and `limit` to 10 (at most 100). An empty
/// `destination` means no destination filter. Unknown parameters are
/// rejected.
///
/// # Errors
/// Returns every violation found when a parameter is not acceptable.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use trip_planner::domain::validate_query;
///
/// let params = BTreeMap::from([("minBudget".to_owned(), "100".to_owned())]);
/// let filter = validate_query(&params)?;
/// assert_eq!(filter.page.page(), 1);
/// assert_eq!(filter.page.limit(), 10);
/// # Ok::<(), trip_planner::domain::TripPlanValidationErrors>(())
/// ```
pub fn validate_query(
    params: &BTreeMap<String, String>,
) -> Result<TripPlanFilter, TripPlanValidationErrors> {
    let mut violations = Violations::default();

    let destination = params
        .get("destination")
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| violations.keep(Destination::new(raw)));
    let min_budget = params
        .get("minBudget")
        .and_then(|raw| violations.keep(query_budget(TripPlanField::MinBudget, raw)));
    let max_budget = params
        .get("maxBudget")
        .and_then(|raw| violations.keep(query_budget(TripPlanField::MaxBudget, raw)));
    let page = params
        .get("page")
        .and_then(|raw| violations.keep(query_count(TripPlanField::Page, raw)));
    let limit = params
        .get("limit")
        .and_then(|raw| violations.keep(query_count(TripPlanField::Limit, raw)));
    let selection = page_request(page, limit, &mut violations);
    violations.reject_unknown(params.keys(), &QUERY_KEYS);

    match selection {
        Some(page) => {
            violations.finish()?;
            Ok(TripPlanFilter {
                destination,
                min_budget,
                max_budget,
                page,
            })
        }
        None => Err(TripPlanValidationErrors(violations.0)),
    }
}
