//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/v1` endpoint and the health probes, the
//! documented envelope schemas, and the bearer security scheme used by the
//! protected routes. The document is served by Swagger UI in debug builds and
//! printed by the `openapi-dump` binary.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorEnvelopeSchema, MessageEnvelopeSchema, PageMetaSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /v1/auth/signin."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Communities backend API",
        description = "Users, roles, communities and memberships behind a bearer-token gate."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::signin,
        crate::inbound::http::accounts::me,
        crate::inbound::http::roles::create_role,
        crate::inbound::http::roles::list_roles,
        crate::inbound::http::communities::create_community,
        crate::inbound::http::communities::list_communities,
        crate::inbound::http::communities::list_owned,
        crate::inbound::http::communities::list_joined,
        crate::inbound::http::communities::list_members,
        crate::inbound::http::members::add_member,
        crate::inbound::http::members::remove_member,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelopeSchema,
        ErrorCodeSchema,
        MessageEnvelopeSchema,
        PageMetaSchema
    )),
    tags(
        (name = "auth", description = "Signup, signin and the caller's profile"),
        (name = "roles", description = "Named roles attached to memberships"),
        (name = "communities", description = "Communities and their members"),
        (name = "members", description = "Adding and removing members"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
