//! Tests for session settings validation.

use std::collections::HashMap;

use mockable::MockEnv;
use rstest::rstest;
use uuid::Uuid;

use super::*;

struct KeyFile(PathBuf);

impl KeyFile {
    fn with_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("shipments-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write key file");
        Self(path)
    }

    fn path(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn env_with(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_env(key: &KeyFile, overrides: &[(&str, &str)]) -> MockEnv {
    let path = key.path();
    let mut vars = vec![
        (KEY_FILE_ENV, path.as_str()),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ];
    for (name, value) in overrides {
        vars.retain(|(existing, _)| existing != name);
        vars.push((*name, *value));
    }
    env_with(&vars)
}

#[rstest]
fn release_accepts_explicit_valid_settings() {
    let key = KeyFile::with_len(64);
    let settings = session_settings_from_env(&release_env(&key, &[]), BuildMode::Release)
        .expect("valid release settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(#[case] missing: &'static str) {
    let key = KeyFile::with_len(64);
    let path = key.path();
    let vars: Vec<(&str, &str)> = [
        (KEY_FILE_ENV, path.as_str()),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]
    .into_iter()
    .filter(|(name, _)| *name != missing)
    .collect();

    let error = session_settings_from_env(&env_with(&vars), BuildMode::Release)
        .err()
        .expect("missing toggle rejected");
    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sometimes")]
fn release_rejects_invalid_values(#[case] name: &'static str, #[case] value: &str) {
    let key = KeyFile::with_len(64);
    let error = session_settings_from_env(&release_env(&key, &[(name, value)]), BuildMode::Release)
        .err()
        .expect("invalid toggle rejected");
    assert!(matches!(error, SessionConfigError::InvalidEnv { name: n, .. } if n == name));
}

#[rstest]
fn release_rejects_short_key() {
    let key = KeyFile::with_len(40);
    let error = session_settings_from_env(&release_env(&key, &[]), BuildMode::Release)
        .err()
        .expect("short key rejected");
    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length: 40, min_len: 64, .. }
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let key = KeyFile::with_len(64);
    let error = session_settings_from_env(
        &release_env(&key, &[(ALLOW_EPHEMERAL_ENV, "1")]),
        BuildMode::Release,
    )
    .err()
    .expect("ephemeral rejected");
    assert!(matches!(error, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_same_site_none_without_secure_cookie() {
    let key = KeyFile::with_len(64);
    let error = session_settings_from_env(
        &release_env(&key, &[(SAMESITE_ENV, "None"), (COOKIE_SECURE_ENV, "0")]),
        BuildMode::Release,
    )
    .err()
    .expect("insecure SameSite=None rejected");
    assert!(matches!(error, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn debug_defaults_to_secure_lax_and_ephemeral_key() {
    let env = env_with(&[(KEY_FILE_ENV, "/nonexistent/shipments/session_key")]);
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug falls back to defaults");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_without_ephemeral_requires_key_file() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/shipments/session_key"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]);
    let error = session_settings_from_env(&env, BuildMode::Debug)
        .err()
        .expect("missing key file rejected");
    assert!(matches!(error, SessionConfigError::KeyRead { .. }));
}

#[rstest]
#[case("1", Some(true))]
#[case("YES", Some(true))]
#[case("false", Some(false))]
#[case("2", None)]
fn bool_toggles_parse(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}

#[rstest]
fn process_environment_is_read_through_the_default_adapter() {
    if std::env::var_os(COOKIE_SECURE_ENV).is_some() {
        return;
    }
    let error = session_settings_from_process_env(BuildMode::Release)
        .err()
        .expect("release mode needs explicit toggles");
    assert!(matches!(
        error,
        SessionConfigError::MissingEnv {
            name: COOKIE_SECURE_ENV
        }
    ));
}
