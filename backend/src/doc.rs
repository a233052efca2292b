//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: session endpoints, listing search, and health probes. The
//! generated document backs Swagger UI in debug builds.

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

use crate::domain::{Error, ErrorCode, ListingSummary};
use crate::inbound::http::sessions::LoginRequest;

/// Enrich the generated document with the credential cookie security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                crate::token::SESSION_COOKIE,
                "Signed session credential issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Roomlet backend API",
        description = "HTTP interface for listing search and session management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::sessions::login,
        crate::inbound::http::sessions::logout,
        crate::inbound::http::listings::search_listings,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(LoginRequest, ListingSummary, Error, ErrorCode)),
    tags(
        (name = "sessions", description = "Login and logout"),
        (name = "listings", description = "Listing search"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
