//! Tests for the account handlers.

use actix_web::http::header;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{api_app, memory_state, send_json as send};

fn signup(name: &str, email: &str, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/v1/auth/signup")
        .set_json(json!({"name": name, "email": email, "password": password}))
}

fn signin(email: &str, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/v1/auth/signin")
        .set_json(json!({"email": email, "password": password}))
}

#[rstest]
#[actix_web::test]
async fn signup_signin_and_profile() {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let (status, created) = send(&app, signup("Ada", "Ada@Example.com", "s3cret")).await;
    assert_eq!(status, 201);
    assert_eq!(created["message"], "User registration successful");
    assert_eq!(created["data"]["email"], "ada@example.com");
    assert!(created["data"].get("password").is_none());

    let (status, session) = send(&app, signin("ada@example.com", "s3cret")).await;
    assert_eq!(status, 200);
    assert_eq!(session["message"], "Authentication successful");
    assert_eq!(session["data"]["id"], created["data"]["id"]);
    let token = session["token"].as_str().expect("token issued").to_owned();

    let (status, profile) = send(
        &app,
        actix_test::TestRequest::get()
            .uri("/v1/auth/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}"))),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(profile["message"], "User details fetched successfully");
    assert_eq!(profile["data"]["name"], "Ada");
}

#[rstest]
#[actix_web::test]
async fn reused_email_is_rejected() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    send(&app, signup("Ada", "ada@example.com", "s3cret")).await;

    let (status, body) = send(&app, signup("Imposter", "ada@example.com", "other")).await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email is already in use");
}

#[rstest]
#[case("ada@example.com", "wrong", "Authentication failed. Incorrect password.")]
#[case("nobody@example.com", "s3cret", "Authentication failed. User not found.")]
#[actix_web::test]
async fn failed_signin_yields_no_token(
    #[case] email: &str,
    #[case] password: &str,
    #[case] message: &str,
) {
    let app = actix_test::init_service(api_app(memory_state())).await;
    send(&app, signup("Ada", "ada@example.com", "s3cret")).await;

    let (status, body) = send(&app, signin(email, password)).await;

    assert_eq!(status, 401);
    assert_eq!(body["message"], message);
    assert!(body.get("token").is_none());
}

#[rstest]
#[case(json!({"name": " ", "email": "a@b.c", "password": "pw"}), "name")]
#[case(json!({"name": "Ada", "email": "not-an-email", "password": "pw"}), "email")]
#[case(json!({"name": "Ada", "email": "a@b.c", "password": ""}), "password")]
#[actix_web::test]
async fn invalid_signup_names_the_field(#[case] payload: Value, #[case] field: &str) {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/v1/auth/signup")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_the_error_envelope() {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/v1/auth/signin")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"email\":"),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn profile_requires_a_token() {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/v1/auth/me")).await;

    assert_eq!(status, 401);
    assert_eq!(body["message"], "Access token is missing");
}
