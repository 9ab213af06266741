//! Role handlers.
//!
//! ```text
//! POST /v1/role {"name":"member"}
//! GET /v1/role?page=1&limit=10
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use pagination::{PageQuery, PageRequest};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::RoleName;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::RoleResponse;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::ErrorEnvelopeSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::role_validation_error;

/// Role creation body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoleRequest {
    /// Unique role name.
    #[schema(example = "member")]
    pub name: String,
}

/// Create a role with a globally unique name.
#[utoipa::path(
    post,
    path = "/v1/role",
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = Envelope<RoleResponse>),
        (status = 400, description = "Invalid request or name in use", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["roles"],
    operation_id = "createRole",
    security([])
)]
#[post("")]
pub async fn create_role(
    state: web::Data<HttpState>,
    payload: web::Json<CreateRoleRequest>,
) -> ApiResult<HttpResponse> {
    let name = RoleName::new(&payload.name).map_err(role_validation_error)?;
    let role = state.roles.create(name).await?;
    Ok(Envelope::with_data("Role created successfully", RoleResponse::from(&role))
        .respond(StatusCode::CREATED))
}

/// List roles in creation order.
#[utoipa::path(
    get,
    path = "/v1/role",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 10, at most 100")
    ),
    responses(
        (status = 200, description = "One page of roles", body = Envelope<Vec<RoleResponse>>),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["roles"],
    operation_id = "listRoles",
    security([])
)]
#[get("")]
pub async fn list_roles(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let request = PageRequest::from_query(&query);
    let page = state.roles.list(request).await?;
    Ok(Envelope::paged(
        "All roles fetched with pagination",
        page,
        request,
        |role| RoleResponse::from(&role),
    )
    .respond(StatusCode::OK))
}
