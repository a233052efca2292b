//! Authenticated session value.
//!
//! The decoded credential is threaded explicitly through the gate's decision
//! logic as a value; nothing reads it from ambient framework context.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Role;

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Decoded, verified session credential.
///
/// Only the credential verifier constructs these, so holding a `Session`
/// means the token's signature and expiry checks have already passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    email: String,
    role: Role,
}

impl Session {
    /// Assemble a session from verified credential fields.
    pub fn new(user_id: UserId, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            email: email.into(),
            role,
        }
    }

    /// Subject identifier of the authenticated account.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Email address carried by the credential.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Account role used by the gate's decision table.
    pub fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn user_id_parses_canonical_uuid_strings() {
        let id: UserId = "3fa85f64-5717-4562-b3fc-2c963f66afa6"
            .parse()
            .expect("valid uuid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[test]
    fn user_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[test]
    fn session_exposes_credential_fields() {
        let id = UserId::random();
        let session = Session::new(id, "amira@example.edu", Role::Student);
        assert_eq!(session.user_id(), &id);
        assert_eq!(session.email(), "amira@example.edu");
        assert_eq!(session.role(), Role::Student);
    }
}
