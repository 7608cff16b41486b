//! Following-relation outcomes and requests.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Username;

/// Result of a follow request.
///
/// Re-following is a distinct no-op: `already_following` is set and
/// `added` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowOutcome {
    pub already_following: bool,
    pub added: bool,
}

impl FollowOutcome {
    /// The target was appended to the following set.
    pub fn added() -> Self {
        Self {
            already_following: false,
            added: true,
        }
    }

    /// The target was already present; nothing changed.
    pub fn already_following() -> Self {
        Self {
            already_following: true,
            added: false,
        }
    }
}

/// Result of an unfollow request. Unfollowing a non-followed user is a
/// no-op reported as `removed = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnfollowOutcome {
    pub removed: bool,
}

/// Follow-list mutation, discriminated by which key is present.
///
/// # Examples
/// ```
/// use workout_planner::domain::FollowAction;
///
/// let action: FollowAction = serde_json::from_str(r#"{"follow":"bob"}"#).unwrap();
/// assert!(matches!(action, FollowAction::Follow(name) if name.as_ref() == "bob"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FollowAction {
    #[schema(value_type = String)]
    Follow(Username),
    #[schema(value_type = String)]
    Unfollow(Username),
}

/// Outcome of a [`FollowAction`], tagged like the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FollowActionOutcome {
    Follow(FollowOutcome),
    Unfollow(UnfollowOutcome),
}
