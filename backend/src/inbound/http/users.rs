//! Account and session handlers.
//!
//! ```text
//! POST /api/v1/register {"username":"alice","email":"alice@example.com","password":"pw"}
//! POST /api/v1/login {"username":"alice","password":"pw"}
//! POST /api/v1/logout
//! GET /api/v1/session
//! ```
//!
//! Register and login are exempt from the session gate. Calling either
//! while already signed in re-binds the session to the new identity.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, RegistrationDetails, RegistrationOutcome,
    RegistrationValidationError, Username, VerificationOutcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl TryFrom<&RegisterRequest> for RegistrationDetails {
    type Error = RegistrationValidationError;

    fn try_from(value: &RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.email, &value.password)
    }
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Session status body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl SessionResponse {
    fn signed_in(username: &Username) -> Self {
        Self {
            authenticated: true,
            username: Some(username.to_string()),
        }
    }
}

fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn rejected_login(outcome: VerificationOutcome) -> Error {
    Error::unauthorized("invalid credentials").with_details(json!({
        "found": outcome.found,
        "verified": outcome.verified,
    }))
}

/// Create an account and sign in as it.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegistrationOutcome,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username or email taken", body = RegistrationOutcome),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let details =
        RegistrationDetails::try_from(&payload.into_inner()).map_err(map_registration_validation_error)?;
    let outcome = state.credentials.register(&details).await?;
    if !outcome.created {
        return Ok(HttpResponse::Conflict().json(outcome));
    }

    session.persist_user(details.username())?;
    Ok(HttpResponse::Created().json(outcome))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(&payload.into_inner()).map_err(map_login_validation_error)?;
    let outcome = state.credentials.verify(&credentials).await?;
    if !outcome.verified {
        return Err(rejected_login(outcome));
    }

    let username = Username::new(credentials.username())
        .map_err(|err| Error::internal(format!("verified username is invalid: {err}")))?;
    session.persist_user(&username)?;
    Ok(HttpResponse::Ok().json(SessionResponse::signed_in(&username)))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.logout();
    HttpResponse::NoContent().finish()
}

/// Report whether the caller is signed in.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses((status = 200, description = "Session status", body = SessionResponse)),
    tags = ["users"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<SessionResponse>> {
    let state = session.state()?;
    Ok(web::Json(SessionResponse {
        authenticated: state.is_authenticated(),
        username: state.identity().map(ToString::to_string),
    }))
}
