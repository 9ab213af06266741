//! Success envelope shared by every JSON endpoint.
//!
//! Bodies take the shape `{success: true, message, data?, meta?}`; sign-in
//! adds a top-level `token`.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use pagination::{Page, PageMeta, PageRequest};
use serde::Serialize;
use utoipa::ToSchema;

use super::schemas::PageMetaSchema;

/// Successful response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope<T> {
    /// Always `true`.
    pub success: bool,
    /// Human readable outcome.
    #[schema(example = "Role created successfully")]
    pub message: String,
    /// Payload, when the endpoint returns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Pagination metadata for list endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<PageMetaSchema>)]
    pub meta: Option<PageMeta>,
    /// Bearer token issued by sign-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// Envelope carrying `data`.
    #[must_use]
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: None,
            token: None,
        }
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Serialise with the given status.
    #[must_use]
    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

impl<U: Serialize> Envelope<Vec<U>> {
    /// Envelope for one page of results, converting each item.
    #[must_use]
    pub fn paged<T>(
        message: impl Into<String>,
        page: Page<T>,
        request: PageRequest,
        convert: impl FnMut(T) -> U,
    ) -> Self {
        let meta = request.meta(page.total);
        Self {
            success: true,
            message: message.into(),
            data: Some(page.items.into_iter().map(convert).collect()),
            meta: Some(meta),
            token: None,
        }
    }
}

impl Envelope<()> {
    /// Envelope with a message and no payload.
    #[must_use]
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            meta: None,
            token: None,
        }
    }
}
