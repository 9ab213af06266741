//! Tests for the credential service.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockAccessTokenService, MockPasswordHasher, MockUserRepository};
use crate::domain::{AccessToken, Email, ErrorCode, StoredCredentials, UserName};

type Service = CredentialService<MockUserRepository, MockPasswordHasher, MockAccessTokenService>;

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockAccessTokenService,
) -> Service {
    CredentialService::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens))
}

#[fixture]
fn ada() -> User {
    User {
        id: UserId::random(),
        name: UserName::new("Ada").expect("valid name"),
        email: Email::new("ada@example.com").expect("valid email"),
        created_at: Utc::now(),
    }
}

fn stored(user: &User) -> StoredCredentials {
    StoredCredentials {
        user: user.clone(),
        password_hash: PasswordHash::new("stored-hash"),
    }
}

fn signin(password: &str) -> SigninCredentials {
    SigninCredentials::try_from_parts("ada@example.com", password).expect("valid credentials")
}

#[rstest]
#[tokio::test]
async fn register_hashes_password_and_inserts_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().times(1).return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|user, hash| user.email.as_str() == "ada@example.com" && hash.as_str() == "hashed")
        .times(1)
        .return_once(|_, _| Ok(()));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|password| password.expose() == "s3cret")
        .times(1)
        .return_once(|_| Ok(PasswordHash::new("hashed")));

    let service = make_service(users, hasher, MockAccessTokenService::new());
    let details =
        SignupDetails::try_from_parts("Ada", "Ada@Example.com", "s3cret").expect("valid signup");

    let user = service.register(details).await.expect("registration succeeds");
    assert_eq!(user.name.as_str(), "Ada");
    assert_eq!(user.email.as_str(), "ada@example.com");
}

#[rstest]
#[tokio::test]
async fn register_rejects_existing_email(ada: User) {
    let existing = stored(&ada);
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    users.expect_insert().never();

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokenService::new());
    let details =
        SignupDetails::try_from_parts("Ada", "ada@example.com", "pw").expect("valid signup");

    let err = service.register(details).await.expect_err("duplicate email");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Email is already in use");
}

#[rstest]
#[tokio::test]
async fn register_maps_insert_race_to_duplicate_email() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .return_once(|_, _| Err(UserRepositoryError::duplicate_email("ada@example.com")));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("hashed")));

    let service = make_service(users, hasher, MockAccessTokenService::new());
    let details =
        SignupDetails::try_from_parts("Ada", "ada@example.com", "pw").expect("valid signup");

    let err = service.register(details).await.expect_err("duplicate email");
    assert_eq!(err.message(), "Email is already in use");
}

#[rstest]
#[tokio::test]
async fn authenticate_reports_unknown_email() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokenService::new());
    let err = service
        .authenticate(signin("pw"))
        .await
        .expect_err("unknown email");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "Authentication failed. User not found.");
}

#[rstest]
#[tokio::test]
async fn sign_in_with_wrong_password_issues_no_token(ada: User) {
    let existing = stored(&ada);
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(existing)));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().return_once(|_, _| Ok(false));
    let mut tokens = MockAccessTokenService::new();
    tokens.expect_issue().never();

    let service = make_service(users, hasher, tokens);
    let err = service.sign_in(signin("wrong")).await.expect_err("bad password");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "Authentication failed. Incorrect password.");
}

#[rstest]
#[tokio::test]
async fn sign_in_issues_token_for_user(ada: User) {
    let existing = stored(&ada);
    let user_id = ada.id;
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(existing)));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|password, hash| password.expose() == "pw" && hash.as_str() == "stored-hash")
        .return_once(|_, _| Ok(true));
    let mut tokens = MockAccessTokenService::new();
    tokens
        .expect_issue()
        .withf(move |id| *id == user_id)
        .return_once(|_| Ok(AccessToken::new("signed")));

    let service = make_service(users, hasher, tokens);
    let session = service.sign_in(signin("pw")).await.expect("sign in succeeds");
    assert_eq!(session.token.as_str(), "signed");
    assert_eq!(session.user, ada);
}

#[rstest]
#[tokio::test]
async fn get_by_id_reports_missing_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokenService::new());
    let err = service
        .get_by_id(&UserId::random())
        .await
        .expect_err("missing user");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found");
}

#[rstest]
#[tokio::test]
async fn repository_failures_become_internal_errors() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Err(UserRepositoryError::connection("pool exhausted")));

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokenService::new());
    let err = service
        .get_by_id(&UserId::random())
        .await
        .expect_err("store down");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
