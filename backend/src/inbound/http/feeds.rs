//! Feed handlers.
//!
//! ```text
//! GET /api/v1/feeds/mine
//! GET /api/v1/feeds/following
//! GET /api/v1/feeds/global
//! ```

use actix_web::{get, web};

use crate::domain::Exercise;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Exercises owned by the caller.
#[utoipa::path(
    get,
    path = "/api/v1/feeds/mine",
    responses(
        (status = 200, description = "Caller's exercises", body = [Exercise]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["feeds"],
    operation_id = "myExercises"
)]
#[get("/feeds/mine")]
pub async fn my_feed(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Exercise>>> {
    let me = session.require_session("/api/v1/feeds/mine")?;
    Ok(web::Json(state.feeds.my_exercises(&me).await?))
}

/// Exercises owned by users the caller follows, grouped by follow order.
#[utoipa::path(
    get,
    path = "/api/v1/feeds/following",
    responses(
        (status = 200, description = "Followed users' exercises", body = [Exercise]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["feeds"],
    operation_id = "followingFeed"
)]
#[get("/feeds/following")]
pub async fn following_feed(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Exercise>>> {
    let me = session.require_session("/api/v1/feeds/following")?;
    Ok(web::Json(state.feeds.following_feed(&me).await?))
}

/// Every exercise in the store.
#[utoipa::path(
    get,
    path = "/api/v1/feeds/global",
    responses(
        (status = 200, description = "All exercises", body = [Exercise]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["feeds"],
    operation_id = "globalFeed"
)]
#[get("/feeds/global")]
pub async fn global_feed(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Exercise>>> {
    session.require_session("/api/v1/feeds/global")?;
    Ok(web::Json(state.feeds.global_feed().await?))
}
