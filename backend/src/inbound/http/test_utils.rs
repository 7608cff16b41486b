//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServiceResponse;
use actix_web::{App, HttpResponse, test, web};

use crate::domain::{Error, Username};
use crate::domain::ports::{
    MockCredentialStore, MockExerciseCommand, MockExerciseQuery, MockFeedQuery, MockSocialGraph,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_config, path_config};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::session_config::{SESSION_COOKIE, SessionSettings};
use crate::inbound::http::state::HttpState;

/// Production session middleware over a throwaway key, without `Secure`
/// so plain-HTTP test requests keep their cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
    .middleware()
}

/// Extract the session cookie a response set.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie set")
        .into_owned()
}

/// One mock per driving port; configure the ones a test touches.
#[derive(Default)]
pub struct MockPorts {
    pub credentials: MockCredentialStore,
    pub social: MockSocialGraph,
    pub exercises: MockExerciseCommand,
    pub exercises_query: MockExerciseQuery,
    pub feeds: MockFeedQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.credentials),
            Arc::new(self.social),
            Arc::new(self.exercises),
            Arc::new(self.exercises_query),
            Arc::new(self.feeds),
        )
    }
}

/// Path under which [`bind_test_session`] is mounted in handler tests.
pub const TEST_SESSION_PATH: &str = "/test/session/{username}";

/// Test-only handler binding `username` to the session, so protected
/// handlers can be exercised without going through the credential store.
pub async fn bind_test_session(
    session: SessionContext,
    username: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let username = Username::new(username.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&username)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Send `request` to `routes` mounted under `/api/v1`, optionally signed in
/// as `username` first.
pub async fn call_api(
    ports: MockPorts,
    routes: fn(&mut web::ServiceConfig),
    username: Option<&str>,
    request: test::TestRequest,
) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .app_data(json_config())
            .app_data(path_config())
            .wrap(test_session_middleware())
            .route(TEST_SESSION_PATH, web::post().to(bind_test_session))
            .service(web::scope("/api/v1").configure(routes)),
    )
    .await;

    let request = match username {
        Some(username) => {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri(&format!("/test/session/{username}"))
                    .to_request(),
            )
            .await;
            request.cookie(session_cookie(&res))
        }
        None => request,
    };
    test::call_service(&app, request.to_request()).await
}
