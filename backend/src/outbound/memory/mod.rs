//! Process-local document store.
//!
//! Used when no database URL is configured and by the behaviour tests. It
//! mirrors the PostgreSQL layout: a user collection whose documents carry
//! their following sets, and an exercise collection.

mod exercise_repository;
mod user_repository;

pub use exercise_repository::InMemoryExerciseRepository;
pub use user_repository::InMemoryUserRepository;
