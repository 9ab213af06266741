//! Account handlers: signup, signin and the caller's profile.
//!
//! ```text
//! POST /v1/auth/signup {"name":"Ada","email":"ada@example.com","password":"pw"}
//! POST /v1/auth/signin {"email":"ada@example.com","password":"pw"}
//! GET /v1/auth/me      Authorization: Bearer <token>
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{SigninCredentials, SignupDetails, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::UserResponse;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::ErrorEnvelopeSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::user_validation_error;
use crate::middleware::{AuthenticatedUser, RequireBearer};

/// Signup request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Email address; matched case-insensitively.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
}

impl TryFrom<SignupRequest> for SignupDetails {
    type Error = UserValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email, &value.password)
    }
}

/// Signin request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    /// Registered email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl TryFrom<SigninRequest> for SigninCredentials {
    type Error = UserValidationError;

    fn try_from(value: SigninRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = Envelope<UserResponse>),
        (status = 400, description = "Invalid request or email in use", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let details = SignupDetails::try_from(payload.into_inner()).map_err(user_validation_error)?;
    let user = state.credentials.register(details).await?;
    Ok(
        Envelope::with_data("User registration successful", UserResponse::from(&user))
            .respond(StatusCode::CREATED),
    )
}

/// Authenticate and receive a bearer token.
///
/// The token sits at the top level of the envelope next to the profile.
#[utoipa::path(
    post,
    path = "/v1/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Authenticated", body = Envelope<UserResponse>),
        (status = 400, description = "Invalid request", body = ErrorEnvelopeSchema),
        (status = 401, description = "Unknown user or incorrect password", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["auth"],
    operation_id = "signin",
    security([])
)]
#[post("/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    payload: web::Json<SigninRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        SigninCredentials::try_from(payload.into_inner()).map_err(user_validation_error)?;
    let session = state.credentials.sign_in(credentials).await?;
    debug!(user_id = %session.user.id, "token issued");
    Ok(
        Envelope::with_data("Authentication successful", UserResponse::from(&session.user))
            .with_token(session.token.into_inner())
            .respond(StatusCode::OK),
    )
}

/// Fetch the authenticated caller's profile.
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Profile", body = Envelope<UserResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelopeSchema),
        (status = 404, description = "User not found", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["auth"],
    operation_id = "me",
    security(("bearer" = []))
)]
#[get("/me", wrap = "RequireBearer")]
pub async fn me(state: web::Data<HttpState>, caller: AuthenticatedUser) -> ApiResult<HttpResponse> {
    let user = state.credentials.get_by_id(caller.id()).await?;
    Ok(
        Envelope::with_data("User details fetched successfully", UserResponse::from(&user))
            .respond(StatusCode::OK),
    )
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
