//! Session gate for HTTP handlers.
//!
//! Wraps the Actix cookie session so handlers deal in [`SessionState`] and
//! [`Username`] instead of raw session keys. Protected handlers call
//! [`SessionContext::require_session`] first; a denied request never
//! reaches a port.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde_json::json;

use crate::domain::{Error, SessionState, Username, require_session};

pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind `username` to the session under a fresh session id.
    ///
    /// Any previous identity is replaced.
    pub fn persist_user(&self, username: &Username) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, username.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Current gate state. A cookie holding an invalid username is treated
    /// as anonymous.
    pub fn state(&self) -> Result<SessionState, Error> {
        let raw = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(SessionState::Anonymous);
        };
        match Username::new(raw) {
            Ok(username) => Ok(SessionState::Authenticated(username)),
            Err(error) => {
                tracing::warn!("invalid username in session cookie: {error}");
                Ok(SessionState::Anonymous)
            }
        }
    }

    /// Admit the request for `route` or fail with `401 Unauthorized`
    /// pointing at the login entry point.
    pub fn require_session(&self, route: &str) -> Result<Username, Error> {
        let decision = require_session(&self.state()?, route);
        let login_route = decision.login_route.clone();
        decision.into_identity().ok_or_else(|| {
            Error::unauthorized("login required").with_details(json!({
                "loginUrl": login_route,
                "route": route,
            }))
        })
    }

    /// Drop every value held by the session.
    pub fn logout(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
