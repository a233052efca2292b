//! Signed session credentials: issuing, verification, and the signing secret.
//!
//! The credential is a compact HS256 JWT carried in a single HTTP-only
//! cookie. Verification fails closed: a signature mismatch, expiry, or a
//! malformed claim yields an error and never partial session data. The
//! middleware treats any verification failure as "not logged in".

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::{Role, Session, UserId};

/// Name of the cookie carrying the session credential.
pub const SESSION_COOKIE: &str = "session_token";

/// Credential lifetime; matches the cookie max-age.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Claims embedded in every credential issued by the server.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the account UUID.
    sub: String,
    /// Email address of the account at issue time.
    email: String,
    /// Wire form of the account role, one of the closed set.
    role: String,
    /// Issued-at (Unix timestamp, seconds).
    iat: i64,
    /// Expiry (Unix timestamp, seconds).
    exp: i64,
}

/// Error returned when a presented credential cannot be accepted.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// Signature, structure, or expiry check failed.
    #[error("token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    /// The subject claim is not a valid account identifier.
    #[error("token subject is not a valid user id")]
    BadSubject,
    /// The role claim is outside the closed role set.
    #[error("token role is not recognised: {0}")]
    BadRole(String),
}

/// Process-wide signing secret for session credentials.
///
/// Loaded once at startup; absence is fatal in release builds (the server
/// must refuse to run authenticated routes without one) and tolerated with
/// an ephemeral secret only in development.
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    /// Wrap secret bytes read from configuration.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Generate a random secret.
    ///
    /// Development only: credentials signed with it do not survive a
    /// process restart.
    pub fn generate() -> Self {
        let bytes: [u8; 32] = rand::random();
        Self(Zeroizing::new(bytes.to_vec()))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Verifies presented credentials and reconstructs the session value.
#[derive(Clone)]
pub struct CredentialVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl CredentialVerifier {
    /// Build a verifier over the process signing secret.
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify a token and decode it into a [`Session`].
    ///
    /// # Errors
    /// Fails closed on any signature, expiry, or claim-shape problem; no
    /// partial session data is ever produced.
    pub fn verify(&self, token: &str) -> Result<Session, VerifyError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;
        let user_id: UserId = claims.sub.parse().map_err(|_| VerifyError::BadSubject)?;
        let role: Role = claims
            .role
            .parse()
            .map_err(|_| VerifyError::BadRole(claims.role.clone()))?;
        Ok(Session::new(user_id, claims.email, role))
    }
}

/// Issues signed credentials at login.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Build an issuer over the process signing secret with the standard
    /// 7-day lifetime.
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_ttl(secret, Duration::days(TOKEN_TTL_DAYS))
    }

    /// Build an issuer with an explicit lifetime.
    pub fn with_ttl(secret: &SigningSecret, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Sign a credential for the authenticated session.
    ///
    /// # Errors
    /// Propagates serialization or signing failures from the JWT library.
    pub fn issue(&self, session: &Session) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: session.user_id().to_string(),
            email: session.email().to_owned(),
            role: session.role().as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }
}
