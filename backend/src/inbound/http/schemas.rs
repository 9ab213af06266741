//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! The domain error and the pagination metadata stay framework agnostic, so
//! their documented shapes are mirrored here.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, fails validation, or duplicates existing
    /// state.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// A referenced resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error envelope returned by every failing endpoint.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorEnvelopeSchema {
    /// Always `false`.
    success: bool,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "User is already a member of the community")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending `field`.
    details: Option<serde_json::Value>,
}

/// Pagination metadata attached to list responses.
#[derive(ToSchema)]
#[schema(as = PageMeta)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PageMetaSchema {
    /// Total number of matching records.
    #[schema(example = 42)]
    total: u64,
    /// `ceil(total / limit)`.
    #[schema(example = 5)]
    pages: u64,
    /// One-based page number echoed back.
    #[schema(example = 1)]
    page: u32,
}

/// Success envelope for endpoints that return no payload.
#[derive(ToSchema)]
#[schema(as = MessageEnvelope)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct MessageEnvelopeSchema {
    /// Always `true`.
    success: bool,
    /// Human-readable outcome.
    #[schema(example = "Member removed from the community")]
    message: String,
}
