//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `username` is the primary key; `email` carries a
    /// unique index.
    users (username) {
        username -> Varchar,
        email -> Varchar,
        /// PHC-encoded password verifier.
        password_verifier -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Following edges. `position` preserves insertion order per user.
    user_following (username, target) {
        username -> Varchar,
        target -> Varchar,
        position -> Int8,
    }
}

diesel::table! {
    /// Logged exercises with their open attribute document.
    exercises (id) {
        id -> Uuid,
        owner -> Varchar,
        attributes -> Jsonb,
        complete -> Bool,
        created_at -> Timestamptz,
        position -> Int8,
    }
}

diesel::joinable!(user_following -> users (username));

diesel::allow_tables_to_appear_in_same_query!(users, user_following, exercises);
