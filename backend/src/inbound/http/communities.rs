//! Community handlers.
//!
//! ```text
//! POST /v1/community {"name":"Foo","slug":"foo","ownerId":"<uuid>"}
//! GET /v1/community
//! GET /v1/community/me/owner    Authorization: Bearer <token>
//! GET /v1/community/me/member   Authorization: Bearer <token>
//! GET /v1/community/{id}/members
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use pagination::{PageQuery, PageRequest};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{CommunityId, NewCommunity, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CommunityListingResponse, CommunityResponse, MemberListingResponse};
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::ErrorEnvelopeSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{community_validation_error, parse_id};
use crate::middleware::{AuthenticatedUser, RequireBearer};

/// Community creation body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityRequest {
    /// Display name.
    #[schema(example = "Rust Berlin")]
    pub name: String,
    /// Lowercase letters, digits and `-`.
    #[schema(example = "rust-berlin")]
    pub slug: String,
    /// Owning user, as a UUID string.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub owner_id: String,
}

/// Create a community and enrol its owner.
#[utoipa::path(
    post,
    path = "/v1/community",
    request_body = CreateCommunityRequest,
    responses(
        (status = 201, description = "Community created", body = Envelope<CommunityResponse>),
        (status = 400, description = "Invalid request or slug in use", body = ErrorEnvelopeSchema),
        (status = 404, description = "Owner not found", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["communities"],
    operation_id = "createCommunity",
    security([])
)]
#[post("")]
pub async fn create_community(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCommunityRequest>,
) -> ApiResult<HttpResponse> {
    let owner: UserId = parse_id("ownerId", &payload.owner_id)?;
    let community = NewCommunity::try_from_parts(&payload.name, &payload.slug, owner)
        .map_err(community_validation_error)?;
    let created = state.communities.create(community).await?;
    Ok(
        Envelope::with_data("Community created successfully", CommunityResponse::from(&created))
            .respond(StatusCode::CREATED),
    )
}

/// List every community with its owner.
#[utoipa::path(
    get,
    path = "/v1/community",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 10, at most 100")
    ),
    responses(
        (status = 200, description = "One page of communities", body = Envelope<Vec<CommunityListingResponse>>),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["communities"],
    operation_id = "listCommunities",
    security([])
)]
#[get("")]
pub async fn list_communities(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let request = PageRequest::from_query(&query);
    let page = state.communities.list(request).await?;
    Ok(Envelope::paged(
        "All communities fetched with pagination",
        page,
        request,
        CommunityListingResponse::from,
    )
    .respond(StatusCode::OK))
}

/// List communities owned by the caller.
#[utoipa::path(
    get,
    path = "/v1/community/me/owner",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 10, at most 100")
    ),
    responses(
        (status = 200, description = "One page of owned communities", body = Envelope<Vec<CommunityListingResponse>>),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["communities"],
    operation_id = "listOwnedCommunities",
    security(("bearer" = []))
)]
#[get("/me/owner", wrap = "RequireBearer")]
pub async fn list_owned(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let request = PageRequest::from_query(&query);
    let page = state.communities.list_owned_by(caller.id(), request).await?;
    Ok(Envelope::paged(
        "Owned communities fetched with pagination",
        page,
        request,
        CommunityListingResponse::from,
    )
    .respond(StatusCode::OK))
}

/// List communities the caller belongs to.
#[utoipa::path(
    get,
    path = "/v1/community/me/member",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 10, at most 100")
    ),
    responses(
        (status = 200, description = "One page of joined communities", body = Envelope<Vec<CommunityListingResponse>>),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["communities"],
    operation_id = "listJoinedCommunities",
    security(("bearer" = []))
)]
#[get("/me/member", wrap = "RequireBearer")]
pub async fn list_joined(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let request = PageRequest::from_query(&query);
    let page = state.communities.list_member_of(caller.id(), request).await?;
    Ok(Envelope::paged(
        "Member communities fetched with pagination",
        page,
        request,
        CommunityListingResponse::from,
    )
    .respond(StatusCode::OK))
}

/// List the members of a community with user and role resolved.
#[utoipa::path(
    get,
    path = "/v1/community/{id}/members",
    params(
        ("id" = String, Path, description = "Community id"),
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 10, at most 100")
    ),
    responses(
        (status = 200, description = "One page of members", body = Envelope<Vec<MemberListingResponse>>),
        (status = 400, description = "Malformed community id", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["communities"],
    operation_id = "listCommunityMembers",
    security([])
)]
#[get("/{id}/members")]
pub async fn list_members(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let community: CommunityId = parse_id("id", &path)?;
    let request = PageRequest::from_query(&query);
    let page = state.members.list_by_community(&community, request).await?;
    Ok(Envelope::paged(
        "All members of the community fetched with pagination",
        page,
        request,
        MemberListingResponse::from,
    )
    .respond(StatusCode::OK))
}

#[cfg(test)]
#[path = "communities_tests.rs"]
mod tests;
