//! Unit tests for token secret loading.

use std::collections::HashMap;

use env_lock::lock_env;
use mockable::MockEnv;
use rstest::rstest;
use uuid::Uuid;

use super::*;

struct TempSecretFile {
    path: PathBuf,
}

impl TempSecretFile {
    fn with_contents(contents: &[u8]) -> Self {
        let path = std::env::temp_dir().join(format!("token-secret-{}", Uuid::new_v4()));
        std::fs::write(&path, contents).expect("write temporary secret");
        Self { path }
    }

    fn path_str(&self) -> String {
        self.path
            .to_str()
            .expect("temporary path should be valid UTF-8")
            .to_owned()
    }
}

impl Drop for TempSecretFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: &[(&str, String)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| ((*name).to_owned(), value.clone()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

fn missing_file() -> String {
    std::env::temp_dir()
        .join(format!("token-secret-missing-{}", Uuid::new_v4()))
        .to_str()
        .expect("temporary path should be valid UTF-8")
        .to_owned()
}

#[rstest]
fn inline_secret_takes_precedence_over_file() {
    let file = TempSecretFile::with_contents(&[b'f'; 40]);
    let env = mock_env(&[
        (SECRET_ENV, "i".repeat(TOKEN_SECRET_MIN_LEN)),
        (SECRET_FILE_ENV, file.path_str()),
    ]);

    let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret loads");
    assert_eq!(secret.as_bytes(), "i".repeat(TOKEN_SECRET_MIN_LEN).as_bytes());
}

#[rstest]
fn file_secret_drops_trailing_newline() {
    let mut contents = vec![b'k'; TOKEN_SECRET_MIN_LEN];
    contents.push(b'\n');
    let file = TempSecretFile::with_contents(&contents);
    let env = mock_env(&[(SECRET_FILE_ENV, file.path_str())]);

    let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret loads");
    assert_eq!(secret.as_bytes().len(), TOKEN_SECRET_MIN_LEN);
}

#[rstest]
#[case(BuildMode::Release, true)]
#[case(BuildMode::Debug, false)]
fn short_secret_is_only_rejected_in_release(#[case] mode: BuildMode, #[case] rejected: bool) {
    let env = mock_env(&[(SECRET_ENV, "short".to_owned())]);

    let result = token_secret_from_env(&env, mode);
    assert_eq!(
        matches!(result, Err(TokenSecretError::TooShort { length: 5, .. })),
        rejected
    );
}

#[rstest]
#[case(BuildMode::Release, b"".as_slice())]
#[case(BuildMode::Debug, b"".as_slice())]
#[case(BuildMode::Debug, b" \n\t\n".as_slice())]
fn blank_secret_file_is_rejected(#[case] mode: BuildMode, #[case] contents: &[u8]) {
    let file = TempSecretFile::with_contents(contents);
    let env = mock_env(&[(SECRET_FILE_ENV, file.path_str())]);

    let err = token_secret_from_env(&env, mode).expect_err("blank secret");
    assert!(matches!(err, TokenSecretError::Empty { .. }));
}

#[rstest]
fn process_environment_supplies_inline_secret() {
    let _guard = lock_env([
        (SECRET_ENV, Some("p".repeat(TOKEN_SECRET_MIN_LEN))),
        (SECRET_FILE_ENV, None),
        (ALLOW_EPHEMERAL_ENV, None),
    ]);

    let secret = token_secret_from_process(BuildMode::Release).expect("secret loads");
    assert_eq!(secret.as_bytes(), "p".repeat(TOKEN_SECRET_MIN_LEN).as_bytes());
}

#[rstest]
fn missing_secret_fails_without_ephemeral_opt_in() {
    let env = mock_env(&[(SECRET_FILE_ENV, missing_file())]);

    let result = token_secret_from_env(&env, BuildMode::Debug);
    assert!(matches!(result, Err(TokenSecretError::Read { .. })));
}

#[rstest]
fn debug_build_may_opt_into_ephemeral_secret() {
    let env = mock_env(&[
        (SECRET_FILE_ENV, missing_file()),
        (ALLOW_EPHEMERAL_ENV, "1".to_owned()),
    ]);

    let secret = token_secret_from_env(&env, BuildMode::Debug).expect("ephemeral secret");
    assert_eq!(secret.as_bytes().len(), EPHEMERAL_LEN);
}

#[rstest]
#[case("1", true)]
#[case("maybe", false)]
fn release_rejects_ephemeral_toggle(#[case] value: &str, #[case] ephemeral: bool) {
    let env = mock_env(&[
        (SECRET_ENV, "s".repeat(TOKEN_SECRET_MIN_LEN)),
        (ALLOW_EPHEMERAL_ENV, value.to_owned()),
    ]);

    let err = token_secret_from_env(&env, BuildMode::Release).expect_err("toggle rejected");
    if ephemeral {
        assert!(matches!(err, TokenSecretError::EphemeralNotAllowed));
    } else {
        assert!(matches!(
            err,
            TokenSecretError::InvalidEnv {
                name: ALLOW_EPHEMERAL_ENV,
                ..
            }
        ));
    }
}

#[rstest]
fn debug_output_redacts_key_material() {
    let secret = TokenSecret::from_bytes("super-secret-value");

    let rendered = format!("{secret:?}");
    assert!(!rendered.contains("super-secret-value"));
    assert_eq!(secret.fingerprint().len(), 16);
}
