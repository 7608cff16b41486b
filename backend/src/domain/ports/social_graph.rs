//! Driving port for the following relation.

use async_trait::async_trait;

use crate::domain::{Error, FollowOutcome, UnfollowOutcome, Username};

/// Follow-list operations on behalf of the session identity.
///
/// Targets need not exist: following someone before they register is
/// allowed and their exercises appear once they do.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// Fresh read of the users `me` follows, in the order they were added.
    async fn list_following(&self, me: &Username) -> Result<Vec<Username>, Error>;

    /// Add `target` to `me`'s following set.
    async fn follow(&self, me: &Username, target: &Username) -> Result<FollowOutcome, Error>;

    /// Remove `target` from `me`'s following set.
    async fn unfollow(&self, me: &Username, target: &Username) -> Result<UnfollowOutcome, Error>;
}
