//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend only on the
//! driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CredentialStore, ExerciseCommand, ExerciseQuery, FeedQuery, SocialGraph};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub credentials: Arc<dyn CredentialStore>,
    pub social: Arc<dyn SocialGraph>,
    pub exercises: Arc<dyn ExerciseCommand>,
    pub exercises_query: Arc<dyn ExerciseQuery>,
    pub feeds: Arc<dyn FeedQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use workout_planner::domain::{
    ///     CredentialService, ExerciseService, FeedService, SocialGraphService,
    /// };
    /// use workout_planner::inbound::http::state::HttpState;
    /// use workout_planner::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
    /// use workout_planner::outbound::security::Argon2CredentialHasher;
    ///
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let exercises = Arc::new(ExerciseService::new(
    ///     Arc::new(InMemoryExerciseRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let social = Arc::new(SocialGraphService::new(users.clone()));
    /// let state = HttpState::new(
    ///     Arc::new(CredentialService::new(users, Arc::new(Argon2CredentialHasher), Arc::new(DefaultClock))),
    ///     social.clone(),
    ///     exercises.clone(),
    ///     exercises.clone(),
    ///     Arc::new(FeedService::new(social, exercises)),
    /// );
    /// let _feeds = state.feeds.clone();
    /// ```
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        social: Arc<dyn SocialGraph>,
        exercises: Arc<dyn ExerciseCommand>,
        exercises_query: Arc<dyn ExerciseQuery>,
        feeds: Arc<dyn FeedQuery>,
    ) -> Self {
        Self {
            credentials,
            social,
            exercises,
            exercises_query,
            feeds,
        }
    }
}
