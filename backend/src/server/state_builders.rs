//! Wiring of driven adapters into the driving ports held by [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use workout_planner::domain::ports::{ExerciseRepository, UserRepository};
use workout_planner::domain::{CredentialService, ExerciseService, FeedService, SocialGraphService};
use workout_planner::inbound::http::state::HttpState;
use workout_planner::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
use workout_planner::outbound::persistence::{DieselExerciseRepository, DieselUserRepository};
use workout_planner::outbound::security::Argon2CredentialHasher;

use super::Store;

/// Build every service over one user store and one exercise store.
fn wire<U, E>(users: Arc<U>, exercises: Arc<E>, clock: Arc<dyn Clock>) -> HttpState
where
    U: UserRepository + 'static,
    E: ExerciseRepository + 'static,
{
    let credentials = Arc::new(CredentialService::new(
        users.clone(),
        Arc::new(Argon2CredentialHasher),
        clock.clone(),
    ));
    let social = Arc::new(SocialGraphService::new(users));
    let exercises = Arc::new(ExerciseService::new(exercises, clock));
    let feeds = Arc::new(FeedService::new(social.clone(), exercises.clone()));
    HttpState::new(credentials, social, exercises.clone(), exercises, feeds)
}

/// Wire every port over the chosen store.
pub(super) fn build_http_state(store: &Store) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match store {
        Store::Postgres(pool) => {
            info!("using PostgreSQL store");
            wire(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselExerciseRepository::new(pool.clone())),
                clock,
            )
        }
        Store::Memory => {
            info!("no database configured; using in-memory store");
            wire(
                Arc::new(InMemoryUserRepository::default()),
                Arc::new(InMemoryExerciseRepository::default()),
                clock,
            )
        }
    };
    web::Data::new(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use workout_planner::domain::{
        ExerciseAttributes, LoginCredentials, RegistrationDetails, Username,
    };

    #[rstest]
    #[tokio::test]
    async fn memory_wiring_shares_one_store_across_ports() {
        let state = build_http_state(&Store::Memory);
        let details = RegistrationDetails::try_from_parts("alice", "alice@x.com", "pw1")
            .expect("valid registration");
        assert!(state.credentials.register(&details).await.expect("register").created);

        let login = LoginCredentials::try_from_parts("alice", "pw1").expect("valid login");
        assert!(state.credentials.verify(&login).await.expect("verify").verified);

        let alice = Username::new("alice").expect("valid");
        let bob = Username::new("bob").expect("valid");
        assert!(state.social.follow(&alice, &bob).await.expect("follow").added);

        state
            .exercises
            .create(
                &bob,
                ExerciseAttributes::from_value(json!({ "name": "press" })).expect("object"),
            )
            .await
            .expect("create");
        let feed = state.feeds.following_feed(&alice).await.expect("feed");
        assert_eq!(feed.len(), 1);
        assert_eq!(state.exercises_query.list_all().await.expect("list").len(), 1);
    }
}
