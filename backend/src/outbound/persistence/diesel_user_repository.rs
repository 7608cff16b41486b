//! PostgreSQL-backed `UserRepository`.
//!
//! Following edges live in `user_following`; each follow or unfollow is a
//! single statement keyed by the `(username, target)` primary key, which is
//! what keeps the set duplicate-free under concurrent requests.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, FollowingSet, PasswordVerifier, User, Username};

use super::store_errors::{StoreError as _, violated_unique_index};
use super::models::{NewFollowingRow, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::{user_following, users};

const USERNAME_CONSTRAINT: &str = "users_pkey";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_username(raw: &str) -> Result<Username, UserPersistenceError> {
    Username::new(raw)
        .map_err(|err| UserPersistenceError::query(format!("stored username is invalid: {err}")))
}

fn row_to_user(row: UserRow, following: FollowingSet) -> Result<User, UserPersistenceError> {
    let username = parse_username(&row.username)?;
    let email = EmailAddress::new(&row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email is invalid: {err}")))?;
    Ok(User::from_parts(
        username,
        email,
        PasswordVerifier::new(row.password_verifier),
        following,
        row.created_at,
    ))
}

async fn load_following<C>(
    conn: &mut C,
    username: &Username,
) -> Result<Vec<Username>, UserPersistenceError>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let targets: Vec<String> = user_following::table
        .filter(user_following::username.eq(username.as_ref()))
        .order(user_following::position.asc())
        .select(user_following::target)
        .load(conn)
        .await
        .map_err(UserPersistenceError::from_diesel)?;
    targets.iter().map(|raw| parse_username(raw)).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        let row = NewUserRow {
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            password_verifier: user.password_verifier().as_str(),
            created_at: user.created_at(),
        };

        match diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => match violated_unique_index(&err) {
                Some(USERNAME_CONSTRAINT) => Err(UserPersistenceError::duplicate_username()),
                Some(EMAIL_CONSTRAINT) => Err(UserPersistenceError::duplicate_email()),
                _ => Err(UserPersistenceError::from_diesel(err)),
            },
        }
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(UserPersistenceError::from_diesel)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let following = load_following(&mut conn, username).await?;
        row_to_user(row, following.into_iter().collect()).map(Some)
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(email.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(UserPersistenceError::from_diesel)
    }

    async fn following(
        &self,
        username: &Username,
    ) -> Result<Vec<Username>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        load_following(&mut conn, username).await
    }

    async fn add_following(
        &self,
        username: &Username,
        target: &Username,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        let inserted = diesel::insert_into(user_following::table)
            .values(&NewFollowingRow {
                username: username.as_ref(),
                target: target.as_ref(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(UserPersistenceError::from_diesel)?;
        Ok(inserted > 0)
    }

    async fn remove_following(
        &self,
        username: &Username,
        target: &Username,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        let deleted = diesel::delete(
            user_following::table
                .filter(user_following::username.eq(username.as_ref()))
                .filter(user_following::target.eq(target.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map_err(UserPersistenceError::from_diesel)?;
        Ok(deleted > 0)
    }
}
