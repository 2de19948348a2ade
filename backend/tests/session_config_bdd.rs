//! Behaviour tests for session cookie configuration.
//!
//! Release builds must reject missing or insecure toggles; debug builds fall
//! back to defaults but never accept a truncated key.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

use actix_web::cookie::SameSite;
use mockable::MockEnv;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::NamedTempFile;
use trip_planner::inbound::http::session_config::{
    ALLOW_EPHEMERAL_ENV, BuildMode, COOKIE_SECURE_ENV, KEY_FILE_ENV, SAMESITE_ENV,
    SessionConfigError, SessionSettings, session_settings_from_env,
};

struct SessionConfigWorld {
    vars: RefCell<HashMap<String, String>>,
    mode: RefCell<BuildMode>,
    outcome: RefCell<Option<Result<SessionSettings, SessionConfigError>>>,
    key_files: RefCell<Vec<NamedTempFile>>,
}

impl SessionConfigWorld {
    fn new() -> Self {
        Self {
            vars: RefCell::new(HashMap::new()),
            mode: RefCell::new(BuildMode::Release),
            outcome: RefCell::new(None),
            key_files: RefCell::new(Vec::new()),
        }
    }

    fn set_env_var(&self, name: &str, value: &str) {
        self.vars
            .borrow_mut()
            .insert(name.to_owned(), value.trim_matches('"').to_owned());
    }

    fn add_key_file(&self, len: usize) {
        let mut file = NamedTempFile::new().expect("temporary key file");
        file.write_all(&vec![b'k'; len]).expect("write key bytes");
        let path = file.path().to_str().expect("utf-8 temp path").to_owned();
        self.set_env_var(KEY_FILE_ENV, &path);
        self.key_files.borrow_mut().push(file);
    }

    fn evaluate(&self) {
        let vars = self.vars.borrow().clone();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        let result = session_settings_from_env(&env, *self.mode.borrow());
        *self.outcome.borrow_mut() = Some(result);
    }

    fn settings<R>(&self, check: impl FnOnce(&SessionSettings) -> R) -> R {
        let outcome = self.outcome.borrow();
        match outcome.as_ref().expect("evaluation result") {
            Ok(settings) => check(settings),
            Err(error) => panic!("expected settings, got {error}"),
        }
    }

    fn error<R>(&self, check: impl FnOnce(&SessionConfigError) -> R) -> R {
        let outcome = self.outcome.borrow();
        match outcome.as_ref().expect("evaluation result") {
            Ok(_) => panic!("expected settings to fail"),
            Err(error) => check(error),
        }
    }
}

#[fixture]
fn world() -> SessionConfigWorld {
    SessionConfigWorld::new()
}

#[given("a release build configuration")]
fn a_release_build_configuration(world: &SessionConfigWorld) {
    *world.mode.borrow_mut() = BuildMode::Release;
}

#[given("a debug build configuration")]
fn a_debug_build_configuration(world: &SessionConfigWorld) {
    *world.mode.borrow_mut() = BuildMode::Debug;
}

#[given("SESSION_COOKIE_SECURE is set to {value}")]
fn session_cookie_secure_is_set(world: &SessionConfigWorld, value: String) {
    world.set_env_var(COOKIE_SECURE_ENV, &value);
}

#[given("SESSION_SAMESITE is set to {value}")]
fn session_same_site_is_set(world: &SessionConfigWorld, value: String) {
    world.set_env_var(SAMESITE_ENV, &value);
}

#[given("SESSION_ALLOW_EPHEMERAL is set to {value}")]
fn session_allow_ephemeral_is_set(world: &SessionConfigWorld, value: String) {
    world.set_env_var(ALLOW_EPHEMERAL_ENV, &value);
}

#[given("a session key file with {len} bytes")]
fn a_session_key_file_with_bytes(world: &SessionConfigWorld, len: usize) {
    world.add_key_file(len);
}

#[when("the session configuration is loaded")]
fn the_session_configuration_is_loaded(world: &SessionConfigWorld) {
    world.evaluate();
}

#[then("the configuration load succeeds")]
fn the_configuration_load_succeeds(world: &SessionConfigWorld) {
    world.settings(|_| ());
}

#[then("the cookie secure flag is true")]
fn the_cookie_secure_flag_is_true(world: &SessionConfigWorld) {
    assert!(world.settings(|settings| settings.cookie_secure));
}

#[then("the SameSite policy is Strict")]
fn the_same_site_policy_is_strict(world: &SessionConfigWorld) {
    assert_eq!(world.settings(|settings| settings.same_site), SameSite::Strict);
}

#[then("the configuration load fails due to missing SESSION_COOKIE_SECURE")]
fn configuration_fails_missing_cookie_secure(world: &SessionConfigWorld) {
    world.error(|error| {
        assert!(matches!(
            error,
            SessionConfigError::MissingEnv {
                name: COOKIE_SECURE_ENV
            }
        ));
    });
}

#[then("the configuration load fails because ephemeral keys are not allowed")]
fn configuration_fails_ephemeral_not_allowed(world: &SessionConfigWorld) {
    world.error(|error| assert!(matches!(error, SessionConfigError::EphemeralNotAllowed)));
}

#[then("the configuration load fails because SameSite=None requires secure cookies")]
fn configuration_fails_insecure_same_site_none(world: &SessionConfigWorld) {
    world.error(|error| assert!(matches!(error, SessionConfigError::InsecureSameSiteNone)));
}

#[then("the configuration load fails because the key is too short")]
fn configuration_fails_key_too_short(world: &SessionConfigWorld) {
    world.error(|error| {
        assert!(matches!(
            error,
            SessionConfigError::KeyTooShort { length: 16, .. }
        ));
    });
}

#[scenario(
    path = "tests/features/session_config.feature",
    name = "Release builds accept a complete configuration"
)]
fn release_builds_accept_a_complete_configuration(world: SessionConfigWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_config.feature",
    name = "Release builds require the secure cookie toggle"
)]
fn release_builds_require_the_secure_cookie_toggle(world: SessionConfigWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_config.feature",
    name = "Release builds refuse ephemeral keys"
)]
fn release_builds_refuse_ephemeral_keys(world: SessionConfigWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_config.feature",
    name = "SameSite None needs secure cookies"
)]
fn samesite_none_needs_secure_cookies(world: SessionConfigWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_config.feature",
    name = "Short keys are rejected even in debug builds"
)]
fn short_keys_are_rejected_even_in_debug_builds(world: SessionConfigWorld) {
    drop(world);
}
