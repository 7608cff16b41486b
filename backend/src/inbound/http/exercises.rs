//! Exercise handlers.
//!
//! ```text
//! POST /api/v1/exercises {"name":"press","sets":3}
//! GET /api/v1/exercises/{id}
//! PATCH /api/v1/exercises/{id} {"reps":10}
//! POST /api/v1/exercises/{id}/toggle
//! DELETE /api/v1/exercises/{id}
//! POST /api/v1/exercises/{id}/clone {"weight":40}
//! ```
//!
//! Request bodies are the attribute object itself. Reserved keys (`id`,
//! `_id`, `owner`, `complete`) are dropped before they reach the store.
//! Edit, toggle and delete answer `200` with `applied=false` both for a
//! missing exercise and for one owned by someone else.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde_json::{Value, json};

use crate::domain::{
    DeleteOutcome, EditOutcome, Error, Exercise, ExerciseAttributes, ExerciseId,
    ExerciseValidationError, ToggleOutcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::decode_json;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

fn parse_id(raw: &str) -> Result<ExerciseId, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request("exercise id must be a UUID")
            .with_details(json!({ "field": "id", "value": raw }))
    })
}

fn parse_attributes(value: Value) -> Result<ExerciseAttributes, Error> {
    ExerciseAttributes::from_value(value).map_err(|err: ExerciseValidationError| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "attributes" }))
    })
}

fn not_found(id: ExerciseId) -> Error {
    Error::not_found(format!("exercise {id} not found")).with_details(json!({ "id": id }))
}

/// Create an exercise owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/exercises",
    request_body(content = Value, description = "Exercise attributes"),
    responses(
        (status = 201, description = "Exercise created", body = Exercise),
        (status = 400, description = "Attributes are not an object", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "createExercise"
)]
#[post("/exercises")]
pub async fn create_exercise(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let owner = session.require_session("/api/v1/exercises")?;
    let attributes = parse_attributes(decode_json(&body)?)?;
    let exercise = state.exercises.create(&owner, attributes).await?;
    Ok(HttpResponse::Created().json(exercise))
}

/// Fetch one exercise by id.
#[utoipa::path(
    get,
    path = "/api/v1/exercises/{id}",
    params(("id" = String, Path, description = "Exercise id (UUID)")),
    responses(
        (status = 200, description = "Exercise", body = Exercise),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such exercise", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "getExercise"
)]
#[get("/exercises/{id}")]
pub async fn get_exercise(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Exercise>> {
    session.require_session(&format!("/api/v1/exercises/{path}"))?;
    let id = parse_id(&path)?;
    let exercise = state
        .exercises_query
        .get(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(web::Json(exercise))
}

/// Merge attributes into an exercise the caller owns.
#[utoipa::path(
    patch,
    path = "/api/v1/exercises/{id}",
    params(("id" = String, Path, description = "Exercise id (UUID)")),
    request_body(content = Value, description = "Attributes to merge"),
    responses(
        (status = 200, description = "Edit outcome", body = EditOutcome),
        (status = 400, description = "Malformed id or attributes", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "editExercise"
)]
#[patch("/exercises/{id}")]
pub async fn edit_exercise(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<EditOutcome>> {
    let requester = session.require_session(&format!("/api/v1/exercises/{path}"))?;
    let id = parse_id(&path)?;
    let attributes = parse_attributes(decode_json(&body)?)?;
    let outcome = state.exercises.edit(id, &requester, attributes).await?;
    Ok(web::Json(outcome))
}

/// Flip the completion flag of an exercise the caller owns.
#[utoipa::path(
    post,
    path = "/api/v1/exercises/{id}/toggle",
    params(("id" = String, Path, description = "Exercise id (UUID)")),
    responses(
        (status = 200, description = "Toggle outcome", body = ToggleOutcome),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "toggleExercise"
)]
#[post("/exercises/{id}/toggle")]
pub async fn toggle_exercise(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ToggleOutcome>> {
    let requester = session.require_session(&format!("/api/v1/exercises/{path}/toggle"))?;
    let id = parse_id(&path)?;
    let outcome = state.exercises.toggle_complete(id, &requester).await?;
    Ok(web::Json(outcome))
}

/// Delete an exercise the caller owns.
#[utoipa::path(
    delete,
    path = "/api/v1/exercises/{id}",
    params(("id" = String, Path, description = "Exercise id (UUID)")),
    responses(
        (status = 200, description = "Delete outcome", body = DeleteOutcome),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "deleteExercise"
)]
#[delete("/exercises/{id}")]
pub async fn delete_exercise(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteOutcome>> {
    let requester = session.require_session(&format!("/api/v1/exercises/{path}"))?;
    let id = parse_id(&path)?;
    let outcome = state.exercises.delete(id, &requester).await?;
    Ok(web::Json(outcome))
}

/// Copy any exercise into a new one owned by the caller.
///
/// The body is optional; when present it must be an attribute object whose
/// entries override the source's.
#[utoipa::path(
    post,
    path = "/api/v1/exercises/{id}/clone",
    params(("id" = String, Path, description = "Source exercise id (UUID)")),
    request_body(content = Value, description = "Attribute overrides"),
    responses(
        (status = 201, description = "Clone created", body = Exercise),
        (status = 400, description = "Malformed id or overrides", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such source exercise", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "cloneExercise"
)]
#[post("/exercises/{id}/clone")]
pub async fn clone_exercise(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let requester = session.require_session(&format!("/api/v1/exercises/{path}/clone"))?;
    let id = parse_id(&path)?;
    let overrides = if body.iter().all(u8::is_ascii_whitespace) {
        ExerciseAttributes::default()
    } else {
        parse_attributes(decode_json(&body)?)?
    };

    let copy = state
        .exercises
        .clone_exercise(id, &requester, overrides)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(HttpResponse::Created().json(copy))
}
