//! Domain ports defining the edges of the hexagon.
//!
//! In hexagonal terms these are *driving* ports: inbound adapters call them
//! without knowing (or importing) the backing infrastructure, which keeps
//! handler tests deterministic because a test double can stand in for
//! persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Listing, ListingFilter, LoginCredentials, Role, Session, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated session value.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, Error>;
}

/// Domain use-case port for listing search.
#[async_trait]
pub trait ListingSearch: Send + Sync {
    /// Return the listings matching the filter, ratings attached.
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, Error>;
}

/// Seeded accounts accepted by [`FixtureLoginService`], one per role.
const FIXTURE_PASSWORD: &str = "password";
const FIXTURE_ACCOUNTS: [(&str, &str, Role); 3] = [
    (
        "student@example.edu",
        "7c2e0d6a-8f50-4f2e-9b31-5d1f2a9c0e11",
        Role::Student,
    ),
    (
        "landlord@example.edu",
        "b3a1f6d2-4c8e-4b7a-a2d5-9e0c7f3b1a22",
        Role::Landlord,
    ),
    (
        "admin@example.edu",
        "e9d4c2b0-1a6f-4e8d-b7c3-2f5a8d0e6c33",
        Role::Admin,
    ),
];

/// In-memory authenticator used until account persistence is wired.
///
/// One fixture account per role, all sharing the password `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, Error> {
        let account = FIXTURE_ACCOUNTS
            .iter()
            .find(|(email, _, _)| email.eq_ignore_ascii_case(credentials.email()));
        match account {
            Some((email, id, role)) if credentials.password() == FIXTURE_PASSWORD => {
                let user_id: UserId = id
                    .parse()
                    .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
                Ok(Session::new(user_id, *email, *role))
            }
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}

/// In-memory listing store evaluating [`ListingFilter::matches`] directly.
///
/// Used when no database pool is configured and as a deterministic double
/// in handler tests.
#[derive(Debug, Clone)]
pub struct FixtureListingSearch {
    listings: Vec<Listing>,
}

impl FixtureListingSearch {
    /// Build a store over an explicit set of listings.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl Default for FixtureListingSearch {
    fn default() -> Self {
        let uuid = |n: u128| Uuid::from_u128(n);
        Self::with_listings(vec![
            Listing::new(uuid(1), "Sunny room near campus", "Brooklyn", 950)
                .with_amenities(["WiFi", "Laundry"])
                .with_ratings(vec![4, 5]),
            Listing::new(uuid(2), "Shared loft", "Queens", 700)
                .with_amenities(["WiFi"])
                .with_ratings(vec![3, 4, 4]),
            Listing::new(uuid(3), "Studio with gym access", "Manhattan", 1800)
                .with_amenities(["Gym", "WiFi", "Doorman"]),
            Listing::new(uuid(4), "Quiet basement room", "Bronx", 600),
        ])
    }
}

#[async_trait]
impl ListingSearch for FixtureListingSearch {
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, Error> {
        Ok(self
            .listings
            .iter()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect())
    }
}
