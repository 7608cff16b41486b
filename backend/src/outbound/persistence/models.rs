//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{exercises, user_following, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub username: String,
    pub email: String,
    pub password_verifier: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_verifier: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Insertable following edge. `position` is assigned by the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_following)]
pub(crate) struct NewFollowingRow<'a> {
    pub username: &'a str,
    pub target: &'a str,
}

/// Row struct for reading from the exercises table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExerciseRow {
    pub id: Uuid,
    pub owner: String,
    pub attributes: serde_json::Value,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating exercise records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exercises)]
pub(crate) struct NewExerciseRow<'a> {
    pub id: Uuid,
    pub owner: &'a str,
    pub attributes: &'a serde_json::Value,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
}
