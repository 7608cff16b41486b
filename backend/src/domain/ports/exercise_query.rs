//! Driving port for reading exercises.
//!
//! Listings are produced from a fresh store query on every call and are
//! ordered oldest first.

use async_trait::async_trait;

use crate::domain::{Error, Exercise, ExerciseId, Username};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseQuery: Send + Sync {
    /// Fetch one exercise by id.
    async fn get(&self, id: ExerciseId) -> Result<Option<Exercise>, Error>;

    /// Exercises owned by `owner`. Unknown owners yield an empty list.
    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<Exercise>, Error>;

    /// Every exercise in the store.
    async fn list_all(&self) -> Result<Vec<Exercise>, Error>;
}
