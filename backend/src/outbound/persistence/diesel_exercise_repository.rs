//! PostgreSQL-backed `ExerciseRepository`.
//!
//! Owner-scoped mutations are single `UPDATE`/`DELETE` statements filtered
//! by both id and owner, so the ownership check and the change cannot be
//! interleaved with another request.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ExerciseRepository, ExerciseRepositoryError};
use crate::domain::{Exercise, ExerciseAttributes, ExerciseId, Username};

use super::store_errors::StoreError as _;
use super::models::{ExerciseRow, NewExerciseRow};
use super::pool::DbPool;
use super::schema::exercises;

/// Diesel-backed implementation of the `ExerciseRepository` port.
#[derive(Clone)]
pub struct DieselExerciseRepository {
    pool: DbPool,
}

impl DieselExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_exercise(row: ExerciseRow) -> Result<Exercise, ExerciseRepositoryError> {
    let owner = Username::new(&row.owner).map_err(|err| {
        ExerciseRepositoryError::query(format!("stored exercise owner is invalid: {err}"))
    })?;
    let attributes = ExerciseAttributes::from_value(row.attributes).map_err(|err| {
        ExerciseRepositoryError::query(format!("stored exercise attributes are invalid: {err}"))
    })?;
    Ok(Exercise::from_parts(
        ExerciseId::from_uuid(row.id),
        owner,
        attributes,
        row.complete,
        row.created_at,
    ))
}

fn rows_to_exercises(rows: Vec<ExerciseRow>) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
    rows.into_iter().map(row_to_exercise).collect()
}

fn owned_by(
    id: ExerciseId,
    owner: &Username,
) -> diesel::dsl::Filter<
    diesel::dsl::Filter<exercises::table, diesel::dsl::Eq<exercises::id, Uuid>>,
    diesel::dsl::Eq<exercises::owner, String>,
> {
    exercises::table
        .filter(exercises::id.eq(*id.as_uuid()))
        .filter(exercises::owner.eq(owner.as_ref().to_owned()))
}

#[async_trait]
impl ExerciseRepository for DieselExerciseRepository {
    async fn insert(&self, exercise: &Exercise) -> Result<(), ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ExerciseRepositoryError::from_pool)?;
        let attributes = exercise.attributes().clone().into_value();
        let row = NewExerciseRow {
            id: *exercise.id().as_uuid(),
            owner: exercise.owner().as_ref(),
            attributes: &attributes,
            complete: exercise.complete(),
            created_at: exercise.created_at(),
        };
        diesel::insert_into(exercises::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(ExerciseRepositoryError::from_diesel)
    }

    async fn find_by_id(
        &self,
        id: ExerciseId,
    ) -> Result<Option<Exercise>, ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ExerciseRepositoryError::from_pool)?;
        let row: Option<ExerciseRow> = exercises::table
            .filter(exercises::id.eq(*id.as_uuid()))
            .select(ExerciseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(ExerciseRepositoryError::from_diesel)?;
        row.map(row_to_exercise).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: &Username,
    ) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ExerciseRepositoryError::from_pool)?;
        let rows: Vec<ExerciseRow> = exercises::table
            .filter(exercises::owner.eq(owner.as_ref()))
            .order((exercises::created_at.asc(), exercises::position.asc()))
            .select(ExerciseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(ExerciseRepositoryError::from_diesel)?;
        rows_to_exercises(rows)
    }

    async fn list_all(&self) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ExerciseRepositoryError::from_pool)?;
        let rows: Vec<ExerciseRow> = exercises::table
            .order((exercises::created_at.asc(), exercises::position.asc()))
            .select(ExerciseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(ExerciseRepositoryError::from_diesel)?;
        rows_to_exercises(rows)
    }

    async fn merge_attributes(
        &self,
        id: ExerciseId,
        owner: &Username,
        attributes: &ExerciseAttributes,
    ) -> Result<bool, ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ExerciseRepositoryError::from_pool)?;
        let overrides = attributes.clone().into_value();
        let updated = diesel::update(owned_by(id, owner))
            .set(exercises::attributes.eq(exercises::attributes.concat(overrides)))
            .execute(&mut conn)
            .await
            .map_err(ExerciseRepositoryError::from_diesel)?;
        Ok(updated > 0)
    }

    async fn toggle_complete(
        &self,
        id: ExerciseId,
        owner: &Username,
    ) -> Result<Option<bool>, ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ExerciseRepositoryError::from_pool)?;
        diesel::update(owned_by(id, owner))
            .set(exercises::complete.eq(diesel::dsl::not(exercises::complete)))
            .returning(exercises::complete)
            .get_result::<bool>(&mut conn)
            .await
            .optional()
            .map_err(ExerciseRepositoryError::from_diesel)
    }

    async fn delete(
        &self,
        id: ExerciseId,
        owner: &Username,
    ) -> Result<bool, ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ExerciseRepositoryError::from_pool)?;
        let deleted = diesel::delete(owned_by(id, owner))
            .execute(&mut conn)
            .await
            .map_err(ExerciseRepositoryError::from_diesel)?;
        Ok(deleted > 0)
    }
}
