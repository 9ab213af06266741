//! Bearer-token gate for protected routes.
//!
//! [`RequireBearer`] wraps individual handlers. It reads
//! `Authorization: Bearer <token>`, verifies the token through the
//! [`AccessTokenService`](crate::domain::ports::AccessTokenService) held in
//! [`HttpState`], and stores the caller in request extensions for the
//! [`AuthenticatedUser`] extractor. Rejections use the standard error
//! envelope with status 401.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{DomainError, UserId};
use crate::inbound::http::state::HttpState;

const MISSING_TOKEN: &str = "Access token is missing";
const INVALID_TOKEN: &str = "Invalid access token";

/// Caller identity resolved by [`RequireBearer`].
///
/// Extracting it from a route without the gate fails with 401.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, get};
/// use backend::middleware::{AuthenticatedUser, RequireBearer};
///
/// #[get("/whoami", wrap = "RequireBearer")]
/// async fn whoami(caller: AuthenticatedUser) -> HttpResponse {
///     HttpResponse::Ok().body(caller.id().to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// Identifier bound by the verified token.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Self>()
                .copied()
                .ok_or_else(|| DomainError::unauthorized(MISSING_TOKEN)),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Missing,
    Invalid,
    Unconfigured,
}

impl Rejection {
    fn into_error(self) -> DomainError {
        match self {
            Self::Missing => DomainError::unauthorized(MISSING_TOKEN),
            Self::Invalid => DomainError::unauthorized(INVALID_TOKEN),
            Self::Unconfigured => DomainError::internal("HTTP state missing for bearer gate"),
        }
    }
}

/// Extract the token from an `Authorization` header value.
fn bearer_token(header: Option<&str>) -> Option<&str> {
    let (scheme, token) = header?.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn authenticate(req: &ServiceRequest) -> Result<UserId, Rejection> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = bearer_token(header).ok_or(Rejection::Missing)?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or(Rejection::Unconfigured)?;
    state.tokens.verify(token).map_err(|error| {
        debug!(%error, "bearer token rejected");
        Rejection::Invalid
    })
}

/// Middleware requiring a valid bearer token.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, web};
/// use backend::middleware::RequireBearer;
///
/// let _protected = web::resource("/private")
///     .wrap(RequireBearer)
///     .route(web::get().to(HttpResponse::Ok));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireBearer;

impl<S, B> Transform<S, ServiceRequest> for RequireBearer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireBearerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireBearerMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequireBearer`].
pub struct RequireBearerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireBearerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(user) => {
                req.extensions_mut().insert(AuthenticatedUser(user));
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            // Built inside the future so the error captures the request's trace id.
            Err(rejection) => Box::pin(async move {
                Ok(req
                    .error_response(rejection.into_error())
                    .map_into_right_body())
            }),
        }
    }
}
