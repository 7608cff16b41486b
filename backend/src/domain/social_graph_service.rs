//! Social graph service implementing [`SocialGraph`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::credential_service::map_user_error;
use crate::domain::ports::{SocialGraph, UserRepository};
use crate::domain::{Error, FollowOutcome, UnfollowOutcome, Username};

/// Following-relation service over a [`UserRepository`].
#[derive(Clone)]
pub struct SocialGraphService<U> {
    users: Arc<U>,
}

impl<U> SocialGraphService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> SocialGraph for SocialGraphService<U>
where
    U: UserRepository,
{
    async fn list_following(&self, me: &Username) -> Result<Vec<Username>, Error> {
        self.users.following(me).await.map_err(map_user_error)
    }

    async fn follow(&self, me: &Username, target: &Username) -> Result<FollowOutcome, Error> {
        if me == target {
            return Err(Error::invalid_request("cannot follow yourself")
                .with_details(json!({ "field": "follow", "code": "self_follow" })));
        }

        let added = self
            .users
            .add_following(me, target)
            .await
            .map_err(map_user_error)?;
        if added {
            info!(username = %me, target = %target, "follow added");
            Ok(FollowOutcome::added())
        } else {
            Ok(FollowOutcome::already_following())
        }
    }

    async fn unfollow(&self, me: &Username, target: &Username) -> Result<UnfollowOutcome, Error> {
        let removed = self
            .users
            .remove_following(me, target)
            .await
            .map_err(map_user_error)?;
        if removed {
            info!(username = %me, target = %target, "follow removed");
        }
        Ok(UnfollowOutcome { removed })
    }
}
