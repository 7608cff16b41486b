//! Follow-list handlers.
//!
//! ```text
//! GET /api/v1/following
//! POST /api/v1/following {"follow":"bob"}
//! POST /api/v1/following {"unfollow":"bob"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FollowAction, FollowActionOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::decode_json;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Usernames the caller follows, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowingResponse {
    pub following: Vec<String>,
}

/// List the caller's follow targets.
#[utoipa::path(
    get,
    path = "/api/v1/following",
    responses(
        (status = 200, description = "Follow targets", body = FollowingResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["social"],
    operation_id = "listFollowing"
)]
#[get("/following")]
pub async fn list_following(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FollowingResponse>> {
    let me = session.require_session("/api/v1/following")?;
    let following = state.social.list_following(&me).await?;
    Ok(web::Json(FollowingResponse {
        following: following.iter().map(ToString::to_string).collect(),
    }))
}

/// Follow or unfollow one user, chosen by the payload key.
#[utoipa::path(
    post,
    path = "/api/v1/following",
    request_body = FollowAction,
    responses(
        (status = 200, description = "Follow list updated", body = FollowActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["social"],
    operation_id = "updateFollowing"
)]
#[post("/following")]
pub async fn update_following(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<web::Json<FollowActionOutcome>> {
    let me = session.require_session("/api/v1/following")?;
    let outcome = match decode_json(&body)? {
        FollowAction::Follow(target) => {
            FollowActionOutcome::Follow(state.social.follow(&me, &target).await?)
        }
        FollowAction::Unfollow(target) => {
            FollowActionOutcome::Unfollow(state.social.unfollow(&me, &target).await?)
        }
    };
    Ok(web::Json(outcome))
}
