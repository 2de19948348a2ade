//! Single-account login gate backed by configured credentials.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::LoginService;
use crate::domain::{AuthenticatedUser, Error, LoginCredentials};

/// Authenticates against one configured username and password.
///
/// # Examples
/// ```
/// use trip_planner::domain::{CredentialLoginService, LoginCredentials};
///
/// let configured = LoginCredentials::try_from_parts("justwravel", "justwravel")?;
/// let _service = CredentialLoginService::new(configured);
/// # Ok::<(), trip_planner::domain::LoginValidationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CredentialLoginService {
    expected: LoginCredentials,
}

impl CredentialLoginService {
    #[must_use]
    pub const fn new(expected: LoginCredentials) -> Self {
        Self { expected }
    }
}

#[async_trait]
impl LoginService for CredentialLoginService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        if self.expected.matches(credentials) {
            info!(username = credentials.username(), "login accepted");
            Ok(AuthenticatedUser::new(credentials.username()))
        } else {
            info!("login rejected");
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;

    #[fixture]
    fn service() -> CredentialLoginService {
        CredentialLoginService::new(
            LoginCredentials::try_from_parts("justwravel", "justwravel").expect("valid pair"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn configured_pair_is_accepted(service: CredentialLoginService) {
        let creds = LoginCredentials::try_from_parts(" justwravel ", "justwravel").expect("shape");
        let user = service.authenticate(&creds).await.expect("accepted");
        assert_eq!(user.username(), "justwravel");
    }

    #[rstest]
    #[case("justwravel", "JustWravel")]
    #[case("admin", "justwravel")]
    #[tokio::test]
    async fn other_pairs_are_unauthorized(
        service: CredentialLoginService,
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("shape");
        let err = service.authenticate(&creds).await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
