//! Exercise service implementing [`ExerciseCommand`] and [`ExerciseQuery`].
//!
//! Ownership checks are delegated to the repository's owner-scoped
//! mutations so the check and the change happen in one store operation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    ExerciseCommand, ExerciseQuery, ExerciseRepository, ExerciseRepositoryError,
};
use crate::domain::{
    DeleteOutcome, EditOutcome, Error, Exercise, ExerciseAttributes, ExerciseId, ToggleOutcome,
    Username,
};

/// Exercise use cases over an [`ExerciseRepository`].
#[derive(Clone)]
pub struct ExerciseService<E> {
    exercises: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<E> ExerciseService<E> {
    pub fn new(exercises: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self { exercises, clock }
    }
}

fn map_exercise_error(error: ExerciseRepositoryError) -> Error {
    match error {
        ExerciseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("exercise repository unavailable: {message}"))
        }
        ExerciseRepositoryError::Query { message } => {
            Error::internal(format!("exercise repository error: {message}"))
        }
    }
}

#[async_trait]
impl<E> ExerciseCommand for ExerciseService<E>
where
    E: ExerciseRepository,
{
    async fn create(
        &self,
        owner: &Username,
        attributes: ExerciseAttributes,
    ) -> Result<Exercise, Error> {
        let exercise = Exercise::new(
            ExerciseId::random(),
            owner.clone(),
            attributes,
            self.clock.utc(),
        );
        self.exercises
            .insert(&exercise)
            .await
            .map_err(map_exercise_error)?;
        info!(username = %owner, exercise_id = %exercise.id(), "exercise created");
        Ok(exercise)
    }

    async fn edit(
        &self,
        id: ExerciseId,
        requester: &Username,
        attributes: ExerciseAttributes,
    ) -> Result<EditOutcome, Error> {
        let applied = self
            .exercises
            .merge_attributes(id, requester, &attributes)
            .await
            .map_err(map_exercise_error)?;
        debug!(username = %requester, exercise_id = %id, applied, "exercise edit");
        Ok(EditOutcome { applied })
    }

    async fn toggle_complete(
        &self,
        id: ExerciseId,
        requester: &Username,
    ) -> Result<ToggleOutcome, Error> {
        let toggled = self
            .exercises
            .toggle_complete(id, requester)
            .await
            .map_err(map_exercise_error)?;
        debug!(username = %requester, exercise_id = %id, ?toggled, "exercise toggle");
        Ok(toggled.map_or_else(ToggleOutcome::rejected, ToggleOutcome::applied))
    }

    async fn delete(&self, id: ExerciseId, requester: &Username) -> Result<DeleteOutcome, Error> {
        let applied = self
            .exercises
            .delete(id, requester)
            .await
            .map_err(map_exercise_error)?;
        if applied {
            info!(username = %requester, exercise_id = %id, "exercise deleted");
        }
        Ok(DeleteOutcome { applied })
    }

    async fn clone_exercise(
        &self,
        id: ExerciseId,
        requester: &Username,
        overrides: ExerciseAttributes,
    ) -> Result<Option<Exercise>, Error> {
        let Some(source) = self
            .exercises
            .find_by_id(id)
            .await
            .map_err(map_exercise_error)?
        else {
            return Ok(None);
        };

        let copy = source.clone_for(
            ExerciseId::random(),
            requester.clone(),
            &overrides,
            self.clock.utc(),
        );
        self.exercises
            .insert(&copy)
            .await
            .map_err(map_exercise_error)?;
        info!(
            username = %requester,
            source_id = %id,
            exercise_id = %copy.id(),
            "exercise cloned"
        );
        Ok(Some(copy))
    }
}

#[async_trait]
impl<E> ExerciseQuery for ExerciseService<E>
where
    E: ExerciseRepository,
{
    async fn get(&self, id: ExerciseId) -> Result<Option<Exercise>, Error> {
        self.exercises
            .find_by_id(id)
            .await
            .map_err(map_exercise_error)
    }

    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<Exercise>, Error> {
        self.exercises
            .list_by_owner(owner)
            .await
            .map_err(map_exercise_error)
    }

    async fn list_all(&self) -> Result<Vec<Exercise>, Error> {
        self.exercises.list_all().await.map_err(map_exercise_error)
    }
}
