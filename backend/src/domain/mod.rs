//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, the ports through which those adapters talk to the core, and
//! the services implementing the driving ports. Types document their
//! invariants and serialisation contracts in their own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Username, EmailAddress, User, FollowingSet: identity records.
//! - LoginCredentials, RegistrationDetails and their outcomes.
//! - SessionState, GateDecision, require_session: the session gate.
//! - Exercise, ExerciseAttributes, ExerciseId and mutation outcomes.
//! - FollowOutcome, UnfollowOutcome, FollowAction: social graph results.
//! - CredentialService, SocialGraphService, ExerciseService, FeedService.

pub mod auth;
pub mod credential_service;
pub mod error;
pub mod exercise;
pub mod exercise_service;
pub mod feed_service;
pub mod ports;
pub mod session;
pub mod social;
pub mod social_graph_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PasswordVerifier, RegistrationDetails,
    RegistrationOutcome, RegistrationValidationError, VerificationOutcome,
};
pub use self::credential_service::CredentialService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exercise::{
    DeleteOutcome, EditOutcome, Exercise, ExerciseAttributes, ExerciseId,
    ExerciseValidationError, RESERVED_ATTRIBUTE_KEYS, ToggleOutcome,
};
pub use self::exercise_service::ExerciseService;
pub use self::feed_service::FeedService;
pub use self::session::{GateDecision, LOGIN_ROUTE, SessionState, require_session};
pub use self::social::{FollowAction, FollowActionOutcome, FollowOutcome, UnfollowOutcome};
pub use self::social_graph_service::SocialGraphService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, FollowingSet, User, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use workout_planner::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such exercise"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
