//! Tests for the community handlers, driven through the in-memory store.

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{api_app, memory_state, send_json as send};

struct Account {
    id: String,
    token: String,
}

async fn account<S, B>(app: &S, name: &str, email: &str) -> Account
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (_, created) = send(
        app,
        actix_test::TestRequest::post()
            .uri("/v1/auth/signup")
            .set_json(json!({"name": name, "email": email, "password": "s3cret"})),
    )
    .await;
    let (_, session) = send(
        app,
        actix_test::TestRequest::post()
            .uri("/v1/auth/signin")
            .set_json(json!({"email": email, "password": "s3cret"})),
    )
    .await;
    Account {
        id: created["data"]["id"].as_str().expect("user id").to_owned(),
        token: session["token"].as_str().expect("token").to_owned(),
    }
}

fn create(name: &str, slug: &str, owner: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/v1/community")
        .set_json(json!({"name": name, "slug": slug, "ownerId": owner}))
}

fn bearer(uri: &str, token: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::get()
        .uri(uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
}

fn ids(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .map(|items| items.iter().filter_map(|item| item["id"].as_str()).collect())
        .unwrap_or_default()
}

#[rstest]
#[actix_web::test]
async fn creating_a_community_enrols_the_owner() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let ada = account(&app, "Ada", "ada@example.com").await;

    let (status, created) = send(&app, create("Foo", "foo", &ada.id)).await;
    assert_eq!(status, 201);
    assert_eq!(created["message"], "Community created successfully");
    assert_eq!(created["data"]["owner"], ada.id.as_str());
    let community = created["data"]["id"].as_str().expect("community id");

    let (status, members) = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/v1/community/{community}/members")),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        members["message"],
        "All members of the community fetched with pagination"
    );
    assert_eq!(members["meta"], json!({"total": 1, "pages": 1, "page": 1}));
    assert_eq!(members["data"][0]["user"], json!({"id": ada.id, "name": "Ada"}));
    assert_eq!(members["data"][0]["role"]["name"], "owner");
}

#[rstest]
#[case("Foo", "Not A Slug", "slug")]
#[case(" ", "foo", "name")]
#[actix_web::test]
async fn invalid_fields_are_reported(#[case] name: &str, #[case] slug: &str, #[case] field: &str) {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let ada = account(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(&app, create(name, slug, &ada.id)).await;

    assert_eq!(status, 400);
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn malformed_owner_id_is_rejected() {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let (status, body) = send(&app, create("Foo", "foo", "nope")).await;

    assert_eq!(status, 400);
    assert_eq!(body["details"], json!({"field": "ownerId", "code": "invalid_uuid"}));
}

#[rstest]
#[actix_web::test]
async fn unknown_owner_is_not_found() {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let (status, body) = send(
        &app,
        create("Foo", "foo", "3fa85f64-5717-4562-b3fc-2c963f66afa6"),
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(body["message"], "Owner not found");
}

#[rstest]
#[actix_web::test]
async fn duplicate_slug_is_rejected() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let ada = account(&app, "Ada", "ada@example.com").await;
    send(&app, create("Foo", "foo", &ada.id)).await;

    let (status, body) = send(&app, create("Other Foo", "foo", &ada.id)).await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], "Slug is already in use");
}

#[rstest]
#[actix_web::test]
async fn caller_scoped_listings() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let ada = account(&app, "Ada", "ada@example.com").await;
    let bob = account(&app, "Bob", "bob@example.com").await;
    let (_, foo) = send(&app, create("Foo", "foo", &ada.id)).await;
    let (_, bar) = send(&app, create("Bar", "bar", &bob.id)).await;
    let (_, roles) = send(&app, actix_test::TestRequest::get().uri("/v1/role")).await;
    let owner_role = roles["data"][0]["id"].as_str().expect("owner role").to_owned();
    let (status, _) = send(
        &app,
        actix_test::TestRequest::post().uri("/v1/member").set_json(json!({
            "userId": bob.id,
            "communityId": foo["data"]["id"],
            "roleId": owner_role,
        })),
    )
    .await;
    assert_eq!(status, 201);

    let (status, owned) = send(&app, bearer("/v1/community/me/owner", &ada.token)).await;
    assert_eq!(status, 200);
    assert_eq!(owned["message"], "Owned communities fetched with pagination");
    assert_eq!(ids(&owned), vec![foo["data"]["id"].as_str().expect("foo id")]);

    let (status, joined) = send(&app, bearer("/v1/community/me/member", &bob.token)).await;
    assert_eq!(status, 200);
    assert_eq!(joined["message"], "Member communities fetched with pagination");
    assert_eq!(
        ids(&joined),
        vec![
            foo["data"]["id"].as_str().expect("foo id"),
            bar["data"]["id"].as_str().expect("bar id"),
        ]
    );
    assert_eq!(joined["meta"]["total"], 2);
    assert_eq!(joined["data"][0]["owner"]["name"], "Ada");

    let (status, all) = send(
        &app,
        actix_test::TestRequest::get().uri("/v1/community?page=2&limit=1"),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(all["meta"], json!({"total": 2, "pages": 2, "page": 2}));
    assert_eq!(ids(&all), vec![bar["data"]["id"].as_str().expect("bar id")]);
}

#[rstest]
#[case("/v1/community/me/owner")]
#[case("/v1/community/me/member")]
#[actix_web::test]
async fn caller_listings_require_a_token(#[case] uri: &str) {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let (status, body) = send(&app, bearer(uri, "forged")).await;

    assert_eq!(status, 401);
    assert_eq!(body["message"], "Invalid access token");
}

#[rstest]
#[actix_web::test]
async fn members_of_malformed_community_id() {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::get().uri("/v1/community/nope/members"),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["details"]["code"], "invalid_uuid");
}
