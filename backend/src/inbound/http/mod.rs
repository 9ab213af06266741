//! HTTP inbound adapter exposing the `/v1` REST endpoints.

pub mod accounts;
pub mod communities;
pub mod dto;
pub mod envelope;
pub mod error;
pub mod health;
pub mod members;
pub mod roles;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::{Scope, web};

pub use error::{ApiResult, json_error_handler};

/// Every versioned endpoint, mounted under `/v1`.
///
/// Handlers expect [`state::HttpState`] in application data. Malformed JSON
/// bodies are answered with the standard error envelope.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use backend::inbound::http::api_scope;
/// # use backend::inbound::http::state::HttpState;
/// # fn state() -> HttpState { unimplemented!() }
///
/// let app = App::new()
///     .app_data(web::Data::new(state()))
///     .service(api_scope());
/// ```
#[must_use]
pub fn api_scope() -> Scope {
    web::scope("/v1")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/auth")
                .service(accounts::signup)
                .service(accounts::signin)
                .service(accounts::me),
        )
        .service(
            web::scope("/role")
                .service(roles::create_role)
                .service(roles::list_roles),
        )
        .service(
            web::scope("/community")
                .service(communities::create_community)
                .service(communities::list_communities)
                .service(communities::list_owned)
                .service(communities::list_joined)
                .service(communities::list_members),
        )
        .service(
            web::scope("/member")
                .service(members::add_member)
                .service(members::remove_member),
        )
}
