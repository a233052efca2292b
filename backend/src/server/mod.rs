//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::RequestGate;
use backend::domain::RoutePolicy;
use backend::domain::ports::{FixtureListingSearch, FixtureLoginService, ListingSearch};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::listings::search_listings;
use backend::inbound::http::sessions::{login, logout};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::DieselListingSearch;
use backend::token::CredentialVerifier;
#[cfg(debug_assertions)]
use backend::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Pick the listing search implementation based on configuration.
///
/// Uses the Diesel adapter when a pool is available and the in-memory
/// fixture store otherwise, so the server always starts even without a
/// database.
fn build_listing_search(config: &ServerConfig) -> Arc<dyn ListingSearch> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselListingSearch::new(pool.clone())),
        None => Arc::new(FixtureListingSearch::default()),
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    verifier: CredentialVerifier,
    policy: RoutePolicy,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        verifier,
        policy,
    } = deps;

    let api = web::scope("/api/v1")
        .service(login)
        .service(logout)
        .service(search_listings);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(RequestGate::new(verifier, policy))
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let listings = build_listing_search(&config);
    let ServerConfig {
        verifier,
        tokens,
        policy,
        cookie_secure,
        bind_addr,
        db_pool: _,
    } = config;

    let http_state = web::Data::new(HttpState::new(
        Arc::new(FixtureLoginService),
        listings,
        tokens,
        cookie_secure,
    ));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            verifier: verifier.clone(),
            policy: policy.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
