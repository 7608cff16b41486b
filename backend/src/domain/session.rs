//! Session gate.
//!
//! A request is either anonymous or carries exactly one authenticated
//! identity. Protected operations consult [`require_session`] before any
//! port is called; the inbound adapter turns a denied decision into a
//! redirect-style error pointing at the login entry point.

use serde::Serialize;
use utoipa::ToSchema;

use super::Username;

/// Route clients are sent to when the gate denies access.
pub const LOGIN_ROUTE: &str = "/api/v1/login";

/// Identity attached to the current request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Username),
}

impl SessionState {
    /// The bound identity, if any.
    pub fn identity(&self) -> Option<&Username> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(username) => Some(username),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Outcome of checking a request against the session gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GateDecision {
    pub authenticated: bool,
    #[schema(value_type = Option<String>)]
    pub identity: Option<Username>,
    /// Where to send an anonymous caller; `None` once authenticated.
    pub login_route: Option<String>,
    /// The route the caller asked for.
    pub route: String,
}

impl GateDecision {
    /// Identity for an admitted request.
    pub fn into_identity(self) -> Option<Username> {
        self.identity
    }
}

/// Decide whether `route` may proceed for the given session.
///
/// # Examples
/// ```
/// use workout_planner::domain::{require_session, SessionState, Username, LOGIN_ROUTE};
///
/// let denied = require_session(&SessionState::Anonymous, "/api/v1/feeds/mine");
/// assert!(!denied.authenticated);
/// assert_eq!(denied.login_route.as_deref(), Some(LOGIN_ROUTE));
///
/// let alice = Username::new("alice").unwrap();
/// let admitted = require_session(&SessionState::Authenticated(alice.clone()), "/x");
/// assert_eq!(admitted.identity, Some(alice));
/// ```
pub fn require_session(state: &SessionState, route: &str) -> GateDecision {
    match state {
        SessionState::Anonymous => GateDecision {
            authenticated: false,
            identity: None,
            login_route: Some(LOGIN_ROUTE.to_owned()),
            route: route.to_owned(),
        },
        SessionState::Authenticated(username) => GateDecision {
            authenticated: true,
            identity: Some(username.clone()),
            login_route: None,
            route: route.to_owned(),
        },
    }
}
