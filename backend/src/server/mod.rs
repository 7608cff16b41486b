//! Assembly of the Actix application and listener.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;
mod state_builders;

pub use config::{ServerConfig, Store};
#[cfg(feature = "metrics")]
pub(crate) use metrics::build_metrics;
pub use settings::AppSettings;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use workout_planner::ApiDoc;
use workout_planner::inbound::http::error::{json_config, path_config};
use workout_planner::inbound::http::health::{HealthState, live, ready};
use workout_planner::inbound::http::session_config::SessionSettings;
use workout_planner::inbound::http::state::HttpState;
use workout_planner::inbound::http::{exercises, feeds, social, users};
use workout_planner::trace;

/// Routes mounted under `/api/v1`, behind the session middleware.
fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_session)
        .service(social::list_following)
        .service(social::update_following)
        .service(exercises::create_exercise)
        .service(exercises::get_exercise)
        .service(exercises::edit_exercise)
        .service(exercises::toggle_exercise)
        .service(exercises::delete_exercise)
        .service(exercises::clone_exercise)
        .service(feeds::my_feed)
        .service(feeds::following_feed)
        .service(feeds::global_feed);
}

/// Build one worker's app. Probes and docs sit outside the session scope so
/// they never issue cookies.
fn build_app(
    health: web::Data<HealthState>,
    state: web::Data<HttpState>,
    session: &SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = App::new()
        .app_data(health)
        .app_data(state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(from_fn(trace))
        .service(
            web::scope("/api/v1")
                .wrap(session.middleware())
                .configure(api_routes),
        )
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind `config.bind_addr` and return the running server.
///
/// `health` flips to ready once the socket is bound.
///
/// # Errors
/// Fails when the address cannot be bound.
pub fn create_server(
    health: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let state = build_http_state(&config.store);
    let session = config.session;
    #[cfg(feature = "metrics")]
    let metrics = MetricsLayer::from_option(config.prometheus);

    let worker_health = health.clone();
    let server = HttpServer::new(move || {
        let app = build_app(worker_health.clone(), state.clone(), &session);
        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());
        app
    })
    .bind(config.bind_addr)?
    .run();

    health.mark_ready();
    Ok(server)
}
