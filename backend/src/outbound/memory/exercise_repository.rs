//! In-memory `ExerciseRepository`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{ExerciseRepository, ExerciseRepositoryError};
use crate::domain::{Exercise, ExerciseAttributes, ExerciseId, Username};

/// Process-local exercise store.
///
/// Records are kept in insertion order, which is also creation order, so
/// listings need no sort.
#[derive(Debug, Default)]
pub struct InMemoryExerciseRepository {
    exercises: Mutex<Vec<Exercise>>,
}

impl InMemoryExerciseRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Exercise>>, ExerciseRepositoryError> {
        self.exercises
            .lock()
            .map_err(|_| ExerciseRepositoryError::query("exercise store lock poisoned"))
    }
}

fn owned_mut<'a>(
    exercises: &'a mut [Exercise],
    id: ExerciseId,
    owner: &Username,
) -> Option<&'a mut Exercise> {
    exercises
        .iter_mut()
        .find(|exercise| exercise.id() == id && exercise.is_owned_by(owner))
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    async fn insert(&self, exercise: &Exercise) -> Result<(), ExerciseRepositoryError> {
        let mut exercises = self.lock()?;
        if exercises.iter().any(|existing| existing.id() == exercise.id()) {
            return Err(ExerciseRepositoryError::query(format!(
                "exercise {} already exists",
                exercise.id()
            )));
        }
        exercises.push(exercise.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ExerciseId,
    ) -> Result<Option<Exercise>, ExerciseRepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .find(|exercise| exercise.id() == id)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &Username,
    ) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|exercise| exercise.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        Ok(self.lock()?.clone())
    }

    async fn merge_attributes(
        &self,
        id: ExerciseId,
        owner: &Username,
        attributes: &ExerciseAttributes,
    ) -> Result<bool, ExerciseRepositoryError> {
        let mut exercises = self.lock()?;
        let Some(exercise) = owned_mut(&mut exercises, id, owner) else {
            return Ok(false);
        };
        exercise.merge_attributes(attributes);
        Ok(true)
    }

    async fn toggle_complete(
        &self,
        id: ExerciseId,
        owner: &Username,
    ) -> Result<Option<bool>, ExerciseRepositoryError> {
        let mut exercises = self.lock()?;
        Ok(owned_mut(&mut exercises, id, owner).map(Exercise::flip_complete))
    }

    async fn delete(
        &self,
        id: ExerciseId,
        owner: &Username,
    ) -> Result<bool, ExerciseRepositoryError> {
        let mut exercises = self.lock()?;
        let before = exercises.len();
        exercises.retain(|exercise| !(exercise.id() == id && exercise.is_owned_by(owner)));
        Ok(exercises.len() != before)
    }
}
