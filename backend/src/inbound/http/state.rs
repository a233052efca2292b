//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and the token issuer, and remain testable with
//! in-memory doubles.

use std::sync::Arc;

use crate::domain::ports::{ListingSearch, LoginService};
use crate::token::TokenIssuer;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication use-case port.
    pub login: Arc<dyn LoginService>,
    /// Listing search use-case port.
    pub listings: Arc<dyn ListingSearch>,
    /// Issues the signed session credential at login.
    pub tokens: TokenIssuer,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl HttpState {
    /// Bundle the handler dependencies.
    pub fn new(
        login: Arc<dyn LoginService>,
        listings: Arc<dyn ListingSearch>,
        tokens: TokenIssuer,
        cookie_secure: bool,
    ) -> Self {
        Self {
            login,
            listings,
            tokens,
            cookie_secure,
        }
    }
}
