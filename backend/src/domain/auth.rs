//! Login gate primitives.
//!
//! A single operator account guards the trip plan API. Credentials are
//! validated here before any login service compares them.

use zeroize::Zeroizing;

/// Reasons a login payload is rejected before authentication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Login credentials with the password wiped from memory on drop.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
///
/// # Examples
/// ```
/// use trip_planner::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" operator ", "s3cret")?;
/// assert_eq!(creds.username(), "operator");
/// # Ok::<(), trip_planner::domain::LoginValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw username and password inputs.
    ///
    /// # Errors
    /// Returns [`LoginValidationError`] when either part is empty.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Compare against another credential pair without short-circuiting on
    /// the first differing byte.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        let username = bytes_equal(self.username.as_bytes(), other.username.as_bytes());
        let password = bytes_equal(self.password.as_bytes(), other.password.as_bytes());
        username & password
    }
}

fn bytes_equal(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Identity recorded in the session after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: String,
}

impl AuthenticatedUser {
    /// Wrap a username that has already passed authentication.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn blank_parts_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("justwravel", "justwravel", true)]
    #[case("justwravel", "justwravel ", false)]
    #[case("justwravel", "wrong", false)]
    #[case("someone", "justwravel", false)]
    fn matches_requires_both_parts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: bool,
    ) {
        let configured =
            LoginCredentials::try_from_parts("justwravel", "justwravel").expect("valid pair");
        let supplied = LoginCredentials::try_from_parts(username, password).expect("valid pair");
        assert_eq!(configured.matches(&supplied), expected);
    }
}
