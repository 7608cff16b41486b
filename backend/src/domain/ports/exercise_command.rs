//! Driving port for exercise mutations.
//!
//! Every operation takes the session identity. Create and clone stamp it as
//! the owner of the new record; edit, toggle and delete apply only when it
//! matches the stored owner.

use async_trait::async_trait;

use crate::domain::{
    DeleteOutcome, EditOutcome, Error, Exercise, ExerciseAttributes, ExerciseId, ToggleOutcome,
    Username,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseCommand: Send + Sync {
    /// Log a new, incomplete exercise owned by `owner`.
    async fn create(
        &self,
        owner: &Username,
        attributes: ExerciseAttributes,
    ) -> Result<Exercise, Error>;

    /// Merge `attributes` into an exercise `requester` owns.
    async fn edit(
        &self,
        id: ExerciseId,
        requester: &Username,
        attributes: ExerciseAttributes,
    ) -> Result<EditOutcome, Error>;

    /// Flip completion on an exercise `requester` owns.
    async fn toggle_complete(
        &self,
        id: ExerciseId,
        requester: &Username,
    ) -> Result<ToggleOutcome, Error>;

    /// Delete an exercise `requester` owns.
    async fn delete(&self, id: ExerciseId, requester: &Username) -> Result<DeleteOutcome, Error>;

    /// Copy any exercise into a new one owned by `requester`.
    ///
    /// Returns `None` when the source does not exist.
    async fn clone_exercise(
        &self,
        id: ExerciseId,
        requester: &Username,
        overrides: ExerciseAttributes,
    ) -> Result<Option<Exercise>, Error>;
}
