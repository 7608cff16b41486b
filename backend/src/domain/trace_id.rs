//! Request correlation identifier.
//!
//! One `TraceId` is bound per HTTP request in Tokio task-local storage, so
//! services and [`crate::domain::Error`] can read it without it appearing
//! in any port signature. Spawned tasks do not inherit it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

/// Response (and optional request) header carrying the identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static CURRENT: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use workout_planner::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::from_client(Some("6f1c2f4e-8a8b-4d7e-9c55-0b7c1e1a2d3f"));
/// let seen = id.in_scope(async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Adopt a caller-supplied identifier when it is a UUID, otherwise mint
    /// a new one.
    pub fn from_client(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Identifier bound to the running task.
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Poll `fut` with this identifier bound.
    pub async fn in_scope<F: Future>(self, fut: F) -> F::Output {
        CURRENT.scope(self, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn bound_only_inside_scope() {
        assert_eq!(TraceId::current(), None);
        let id = TraceId::generate();
        assert_eq!(id.in_scope(async { TraceId::current() }).await, Some(id));
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    #[case(Some(" 6f1c2f4e-8a8b-4d7e-9c55-0b7c1e1a2d3f "), true)]
    #[case(Some("not-a-uuid"), false)]
    #[case(None, false)]
    fn client_identifiers_are_adopted_when_valid(#[case] raw: Option<&str>, #[case] kept: bool) {
        let id = TraceId::from_client(raw);
        let expected = raw.map(str::trim).unwrap_or_default();
        assert_eq!(id.to_string() == expected, kept);
    }
}
