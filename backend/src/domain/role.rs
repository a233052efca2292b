//! The closed set of account roles.
//!
//! Role is an enumeration rather than a free-form string so the gate's
//! decision table can be checked exhaustively by the compiler.

use std::fmt;
use std::str::FromStr;

/// Account role carried in the session credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A student browsing and enquiring about listings.
    Student,
    /// A landlord managing their own listings.
    Landlord,
    /// A platform administrator.
    Admin,
}

/// Error returned when a role string is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl Role {
    /// Canonical wire form used in token claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Landlord => "LANDLORD",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDENT" => Ok(Self::Student),
            "LANDLORD" => Ok(Self::Landlord),
            "ADMIN" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Student, "STUDENT")]
    #[case(Role::Landlord, "LANDLORD")]
    #[case(Role::Admin, "ADMIN")]
    fn wire_form_round_trips(#[case] role: Role, #[case] wire: &str) {
        assert_eq!(role.as_str(), wire);
        assert_eq!(wire.parse::<Role>().expect("known role"), role);
    }

    #[rstest]
    #[case("")]
    #[case("student")]
    #[case("SUPERUSER")]
    fn unknown_roles_are_rejected(#[case] raw: &str) {
        let err = raw.parse::<Role>().expect_err("unknown role must fail");
        assert_eq!(err, UnknownRole(raw.to_owned()));
    }
}
