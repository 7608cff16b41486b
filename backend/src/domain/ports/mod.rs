//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (`CredentialStore`, `SocialGraph`, `ExerciseCommand`,
//! `ExerciseQuery`, `FeedQuery`) are what inbound adapters call. Driven
//! ports (`UserRepository`, `ExerciseRepository`, `CredentialHasher`) are
//! what the services call; each exposes a typed error so adapters map their
//! failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_hasher;
mod credential_store;
mod exercise_command;
mod exercise_query;
mod exercise_repository;
mod feed_query;
mod social_graph;
mod user_repository;

#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::CredentialStore;
#[cfg(test)]
pub use exercise_command::MockExerciseCommand;
pub use exercise_command::ExerciseCommand;
#[cfg(test)]
pub use exercise_query::MockExerciseQuery;
pub use exercise_query::ExerciseQuery;
#[cfg(test)]
pub use exercise_repository::MockExerciseRepository;
pub use exercise_repository::{ExerciseRepository, ExerciseRepositoryError};
#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::FeedQuery;
#[cfg(test)]
pub use social_graph::MockSocialGraph;
pub use social_graph::SocialGraph;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
