//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, test as actix_test, web};
use mockable::DefaultClock;
use serde_json::Value;

use super::state::{Adapters, HttpState};
use crate::domain::ports::{
    MockAccessTokenService, MockCommunityRegistry, MockCredentialStore, MockMembershipLedger,
    MockRoleRegistry,
};
use crate::middleware::Trace;
use crate::outbound::memory::MemoryStore;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService, TokenSecret};

/// State whose ports are expectation-free mocks.
///
/// Tests replace the port they exercise; any call to another port panics.
pub fn mock_state() -> HttpState {
    HttpState {
        credentials: Arc::new(MockCredentialStore::new()),
        tokens: Arc::new(MockAccessTokenService::new()),
        roles: Arc::new(MockRoleRegistry::new()),
        communities: Arc::new(MockCommunityRegistry::new()),
        members: Arc::new(MockMembershipLedger::new()),
    }
}

/// State backed by a fresh in-memory store, a cheap Argon2 configuration and
/// tokens signed with an ephemeral secret.
pub fn memory_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    let hasher = Argon2PasswordHasher::with_params(8, 1, 1).expect("valid argon2 params");
    let tokens = JwtTokenService::new(&TokenSecret::ephemeral(), Arc::new(DefaultClock));
    HttpState::from_adapters(Adapters {
        users: Arc::clone(&store),
        roles: Arc::clone(&store),
        communities: Arc::clone(&store),
        members: store,
        hasher: Arc::new(hasher),
        tokens: Arc::new(tokens),
    })
}

/// Application with tracing and the full `/v1` surface over `state`.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .app_data(web::Data::new(state))
        .service(super::api_scope())
}

/// Send `req` and decode the JSON body alongside the status code.
pub async fn send_json<S, B>(app: &S, req: actix_test::TestRequest) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status().as_u16();
    (status, actix_test::read_body_json(res).await)
}
