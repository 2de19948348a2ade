//! Storage-assigned trip plan identifier.

use std::fmt;

use super::{TripPlanField, TripPlanValidationError, ViolationReason};

/// Length of the textual identifier form.
pub const TRIP_PLAN_ID_LEN: usize = 24;

/// Opaque 24-character lowercase hexadecimal identifier.
///
/// Adapters mint identifiers from 12 raw bytes; callers parse them from
/// path segments with [`TripPlanId::parse`].
///
/// # Examples
/// ```
/// use trip_planner::domain::TripPlanId;
///
/// let id = TripPlanId::parse("65A1B2C3D4E5F60718293A4B")?;
/// assert_eq!(id.as_str(), "65a1b2c3d4e5f60718293a4b");
/// # Ok::<(), trip_planner::domain::TripPlanValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripPlanId(String);

impl TripPlanId {
    /// Validate and normalise an identifier supplied by a caller.
    ///
    /// # Errors
    /// Returns a violation on `id` unless `raw` is exactly 24 ASCII hex
    /// characters.
    pub fn parse(raw: &str) -> Result<Self, TripPlanValidationError> {
        if raw.len() != TRIP_PLAN_ID_LEN || !raw.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(TripPlanValidationError::new(
                TripPlanField::Id,
                ViolationReason::InvalidFormat,
            ));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Encode twelve identifier bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Borrow the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TripPlanId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TripPlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TripPlanId> for String {
    fn from(value: TripPlanId) -> Self {
        value.0
    }
}
