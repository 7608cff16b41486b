//! Port for exercise persistence.
//!
//! Owner-scoped mutations take the requester and apply only when the stored
//! owner matches, inside the same store operation that performs the change.
//! A missing record and a foreign record are reported identically.

use async_trait::async_trait;

use crate::domain::{Exercise, ExerciseAttributes, ExerciseId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by exercise repository adapters.
    pub enum ExerciseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "exercise repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "exercise repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Store a new exercise.
    async fn insert(&self, exercise: &Exercise) -> Result<(), ExerciseRepositoryError>;

    /// Fetch one exercise.
    async fn find_by_id(&self, id: ExerciseId)
    -> Result<Option<Exercise>, ExerciseRepositoryError>;

    /// All exercises owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: &Username)
    -> Result<Vec<Exercise>, ExerciseRepositoryError>;

    /// Every stored exercise, oldest first.
    async fn list_all(&self) -> Result<Vec<Exercise>, ExerciseRepositoryError>;

    /// Merge `attributes` into the exercise when `owner` owns it.
    ///
    /// Returns whether the merge applied.
    async fn merge_attributes(
        &self,
        id: ExerciseId,
        owner: &Username,
        attributes: &ExerciseAttributes,
    ) -> Result<bool, ExerciseRepositoryError>;

    /// Flip the completion flag when `owner` owns the exercise.
    ///
    /// Returns the new value, or `None` when nothing matched.
    async fn toggle_complete(
        &self,
        id: ExerciseId,
        owner: &Username,
    ) -> Result<Option<bool>, ExerciseRepositoryError>;

    /// Delete the exercise when `owner` owns it.
    ///
    /// Returns whether a record was removed.
    async fn delete(&self, id: ExerciseId, owner: &Username)
    -> Result<bool, ExerciseRepositoryError>;
}
