//! Driving port for the three exercise feeds.

use async_trait::async_trait;

use crate::domain::{Error, Exercise, Username};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Exercises owned by `me`.
    async fn my_exercises(&self, me: &Username) -> Result<Vec<Exercise>, Error>;

    /// Exercises of everyone `me` follows, grouped per followed user in
    /// following order. Users who have not registered contribute nothing.
    async fn following_feed(&self, me: &Username) -> Result<Vec<Exercise>, Error>;

    /// Every exercise.
    async fn global_feed(&self) -> Result<Vec<Exercise>, Error>;
}
