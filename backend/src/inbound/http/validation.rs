//! Shared validation helpers for inbound HTTP adapters.
//!
//! Failures become `invalid_request` errors whose `details` name the
//! offending request field.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{
    CommunityValidationError, DomainError, InvalidId, RoleValidationError, UserValidationError,
};

fn field_error(field: &str, message: impl Into<String>, code: &str) -> DomainError {
    DomainError::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn user_validation_error(err: UserValidationError) -> DomainError {
    let code = match err {
        UserValidationError::EmptyName
        | UserValidationError::EmptyEmail
        | UserValidationError::EmptyPassword => "empty",
        UserValidationError::NameTooLong { .. } | UserValidationError::EmailTooLong { .. } => {
            "too_long"
        }
        UserValidationError::InvalidEmail => "invalid_email",
    };
    field_error(err.field(), err.to_string(), code)
}

pub(crate) fn community_validation_error(err: CommunityValidationError) -> DomainError {
    let code = match err {
        CommunityValidationError::EmptyName => "empty",
        CommunityValidationError::NameTooLong { .. } => "too_long",
        CommunityValidationError::Slug(_) => "invalid_slug",
    };
    field_error(err.field(), err.to_string(), code)
}

pub(crate) fn role_validation_error(err: RoleValidationError) -> DomainError {
    let code = match err {
        RoleValidationError::EmptyName => "empty",
        RoleValidationError::NameTooLong { .. } => "too_long",
    };
    field_error("name", err.to_string(), code)
}

/// Parse an identifier from a body field or path segment.
pub(crate) fn parse_id<T>(field: &str, raw: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = InvalidId>,
{
    raw.trim()
        .parse()
        .map_err(|err: InvalidId| field_error(field, err.to_string(), "invalid_uuid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, SlugError, UserId};
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(error: &'a DomainError, key: &str) -> Option<&'a str> {
        error
            .details()
            .and_then(|details| details.get(key))
            .and_then(Value::as_str)
    }

    #[rstest]
    #[case(UserValidationError::EmptyName, "name", "empty")]
    #[case(UserValidationError::InvalidEmail, "email", "invalid_email")]
    #[case(UserValidationError::EmptyPassword, "password", "empty")]
    fn user_errors_name_their_field(
        #[case] err: UserValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = user_validation_error(err);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&error, "field"), Some(field));
        assert_eq!(detail(&error, "code"), Some(code));
    }

    #[rstest]
    fn slug_errors_point_at_slug() {
        let error = community_validation_error(CommunityValidationError::Slug(
            SlugError::InvalidCharacters,
        ));
        assert_eq!(detail(&error, "field"), Some("slug"));
    }

    #[rstest]
    fn ids_parse_or_report_the_field() {
        let id = UserId::random();
        let parsed: UserId = parse_id("userId", &id.to_string()).expect("valid id");
        assert_eq!(parsed, id);

        let error = parse_id::<UserId>("userId", "nope").expect_err("invalid id");
        assert_eq!(error.message(), "user id must be a valid UUID");
        assert_eq!(detail(&error, "field"), Some("userId"));
        assert_eq!(detail(&error, "code"), Some("invalid_uuid"));
    }
}
