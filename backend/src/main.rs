//! Backend entry-point: wires the access-control gate, REST endpoints, and
//! OpenAPI docs.

mod server;

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{PoolConfig, build_pool};
use backend::token::SigningSecret;
use server::{ServerConfig, create_server};

/// Load the process signing secret.
///
/// Order: `AUTH_TOKEN_SECRET_FILE`, then `AUTH_TOKEN_SECRET`. Absence is a
/// fatal configuration error in release builds — the server must not run
/// authenticated routes without a secret. Debug builds (or an explicit
/// `AUTH_ALLOW_EPHEMERAL_SECRET=1`) fall back to a random per-process
/// secret so local development is not blocked.
fn load_signing_secret() -> std::io::Result<SigningSecret> {
    if let Ok(path) = env::var("AUTH_TOKEN_SECRET_FILE") {
        let bytes = std::fs::read(&path).map_err(|e| {
            std::io::Error::other(format!("failed to read signing secret at {path}: {e}"))
        })?;
        return Ok(SigningSecret::from_bytes(bytes));
    }
    if let Ok(secret) = env::var("AUTH_TOKEN_SECRET") {
        if !secret.trim().is_empty() {
            return Ok(SigningSecret::from_bytes(secret.into_bytes()));
        }
    }

    let allow_dev = env::var("AUTH_ALLOW_EPHEMERAL_SECRET").ok().as_deref() == Some("1");
    if cfg!(debug_assertions) || allow_dev {
        warn!("using ephemeral signing secret (dev only); sessions will not survive restarts");
        Ok(SigningSecret::generate())
    } else {
        Err(std::io::Error::other(
            "no signing secret configured: set AUTH_TOKEN_SECRET or AUTH_TOKEN_SECRET_FILE",
        ))
    }
}

fn bind_addr() -> std::io::Result<SocketAddr> {
    let raw = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    raw.parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR {raw}: {e}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let secret = load_signing_secret()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let mut config = ServerConfig::new(&secret, cookie_secure, bind_addr()?);
    if let Ok(database_url) = env::var("DATABASE_URL") {
        let pool = build_pool(&PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("DATABASE_URL not set; serving fixture listings");
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
