//! Outbound adapters implementing the driven ports.
//!
//! - **memory**: process-local store used without a database and in tests
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **security**: Argon2 password verifiers
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
