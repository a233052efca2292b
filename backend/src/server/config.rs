//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::domain::RoutePolicy;
use backend::outbound::persistence::DbPool;
use backend::token::{CredentialVerifier, SigningSecret, TokenIssuer};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) verifier: CredentialVerifier,
    pub(crate) tokens: TokenIssuer,
    pub(crate) policy: RoutePolicy,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from the signing secret and
    /// application preferences.
    #[must_use]
    pub fn new(secret: &SigningSecret, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            verifier: CredentialVerifier::new(secret),
            tokens: TokenIssuer::new(secret),
            policy: RoutePolicy::default(),
            cookie_secure,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses the Diesel-backed listing search;
    /// otherwise the in-memory fixture store serves results.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the default route policy.
    #[must_use]
    pub fn with_route_policy(mut self, policy: RoutePolicy) -> Self {
        self.policy = policy;
        self
    }
}
