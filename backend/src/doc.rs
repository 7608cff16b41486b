//! OpenAPI documentation.
//!
//! [`ApiDoc`] backs Swagger UI in debug builds and the `openapi-dump`
//! binary. Protected routes inherit the session cookie requirement; the
//! register, login and health routes opt out with `security([])`.

use crate::domain::{
    DeleteOutcome, EditOutcome, Exercise, ExerciseAttributes, FollowAction, FollowActionOutcome,
    FollowOutcome, RegistrationOutcome, ToggleOutcome, UnfollowOutcome, VerificationOutcome,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::social::FollowingResponse;
use crate::inbound::http::users::{LoginRequest, RegisterRequest, SessionResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/register or /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Workout planner API",
        description = "Accounts, follow lists, exercises and feeds behind a session cookie."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_session,
        crate::inbound::http::social::list_following,
        crate::inbound::http::social::update_following,
        crate::inbound::http::exercises::create_exercise,
        crate::inbound::http::exercises::get_exercise,
        crate::inbound::http::exercises::edit_exercise,
        crate::inbound::http::exercises::toggle_exercise,
        crate::inbound::http::exercises::delete_exercise,
        crate::inbound::http::exercises::clone_exercise,
        crate::inbound::http::feeds::my_feed,
        crate::inbound::http::feeds::following_feed,
        crate::inbound::http::feeds::global_feed,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        SessionResponse,
        RegistrationOutcome,
        VerificationOutcome,
        FollowingResponse,
        FollowAction,
        FollowOutcome,
        UnfollowOutcome,
        FollowActionOutcome,
        Exercise,
        ExerciseAttributes,
        EditOutcome,
        ToggleOutcome,
        DeleteOutcome,
    )),
    tags(
        (name = "users", description = "Registration, login and session status"),
        (name = "social", description = "Follow lists"),
        (name = "exercises", description = "Exercise records"),
        (name = "feeds", description = "Exercise feeds"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in aliased schema names.
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn object_fields(schema: &RefOr<Schema>) -> Vec<&str> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().map(String::as_str).collect(),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get(ERROR_SCHEMA_NAME).expect("Error schema"));
        for field in ["code", "message", "traceId", "details"] {
            assert!(fields.contains(&field), "missing {field}");
        }
    }

    #[rstest]
    fn exercise_schema_nests_attributes() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get("Exercise").expect("Exercise schema"));
        for field in ["id", "owner", "attributes", "complete", "createdAt"] {
            assert!(fields.contains(&field), "missing {field}");
        }
    }

    #[rstest]
    #[case("/api/v1/register")]
    #[case("/api/v1/login")]
    #[case("/api/v1/following")]
    #[case("/api/v1/exercises/{id}")]
    #[case("/api/v1/exercises/{id}/clone")]
    #[case("/api/v1/feeds/following")]
    #[case("/health/ready")]
    fn documents_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} not documented");
    }

    #[rstest]
    fn registers_session_cookie_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
