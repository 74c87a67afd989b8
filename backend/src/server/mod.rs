//! Server construction and middleware wiring.
//!
//! Middleware order, outermost first: [`Trace`], CORS, then [`BasicAuth`] on
//! the `/auth` and `/incidents` scopes. Extractor configs turn malformed
//! bodies, queries and paths into `422` responses.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::LoginService;
use crate::inbound::http::auth::BasicAuth;
use crate::inbound::http::cors::cors;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::incidents;
use crate::inbound::http::index::root;
use crate::inbound::http::login::login;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_config, path_config, query_config};

/// Everything one application instance needs.
///
/// `HttpServer` builds an [`App`] per worker, so each field is cheap to clone.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub login: Arc<dyn LoginService>,
    pub cors_origins: Vec<String>,
}

/// Assemble the application: routes, extractor configs and middleware.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        login: login_service,
        cors_origins,
    } = deps;

    let auth = web::scope("/auth")
        .wrap(BasicAuth::new(login_service.clone()))
        .service(login);

    let incident_routes = web::scope("/incidents")
        .wrap(BasicAuth::new(login_service))
        .configure(incidents::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(cors(&cors_origins))
        .wrap(Trace)
        .service(root)
        .service(auth)
        .service(incident_routes)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once the socket is bound.
/// - `config`: pre-built [`ServerConfig`] holding the bind address, pool,
///   login service and CORS allow-list.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config.db_pool);
    let ServerConfig {
        bind_addr,
        db_pool: _,
        login: login_service,
        cors_origins,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            login: login_service.clone(),
            cors_origins: cors_origins.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness checks, then stop the server once in-flight requests finish.
pub async fn shutdown(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    handle.stop(true).await;
}
