//! Membership handlers.
//!
//! ```text
//! POST /v1/member {"userId":"<uuid>","communityId":"<uuid>","roleId":"<uuid>"}
//! DELETE /v1/member/{id}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{DomainError, MemberId, NewMember};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::MemberResponse;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, MessageEnvelopeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_id;

/// Membership creation body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    /// User to enrol, as a UUID string.
    pub user_id: String,
    /// Target community, as a UUID string.
    pub community_id: String,
    /// Role to grant, as a UUID string.
    pub role_id: String,
}

impl TryFrom<&AddMemberRequest> for NewMember {
    type Error = DomainError;

    fn try_from(value: &AddMemberRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user: parse_id("userId", &value.user_id)?,
            community: parse_id("communityId", &value.community_id)?,
            role: parse_id("roleId", &value.role_id)?,
        })
    }
}

/// Add a user to a community under a role.
#[utoipa::path(
    post,
    path = "/v1/member",
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added", body = Envelope<MemberResponse>),
        (status = 400, description = "Invalid request or already a member", body = ErrorEnvelopeSchema),
        (status = 404, description = "User, community, or role not found", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["members"],
    operation_id = "addMember",
    security([])
)]
#[post("")]
pub async fn add_member(
    state: web::Data<HttpState>,
    payload: web::Json<AddMemberRequest>,
) -> ApiResult<HttpResponse> {
    let member = NewMember::try_from(&*payload)?;
    let added = state.members.add(member).await?;
    Ok(Envelope::with_data(
        "User added as a member to the community",
        MemberResponse::from(&added),
    )
    .respond(StatusCode::CREATED))
}

/// Remove a membership by id.
#[utoipa::path(
    delete,
    path = "/v1/member/{id}",
    params(("id" = String, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member removed", body = MessageEnvelopeSchema),
        (status = 400, description = "Malformed member id", body = ErrorEnvelopeSchema),
        (status = 404, description = "Member not found", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["members"],
    operation_id = "removeMember",
    security([])
)]
#[delete("/{id}")]
pub async fn remove_member(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: MemberId = parse_id("id", &path)?;
    state.members.remove(&id).await?;
    Ok(Envelope::message_only("Member removed from the community").respond(StatusCode::OK))
}
