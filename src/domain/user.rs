//! Caretaker accounts and roles

use super::errors::CaredeskError;
use super::ids::Username;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role granted to a caretaker account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Nurse,
    Receptionist,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Receptionist => "receptionist",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CaredeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "doctor" => Ok(Role::Doctor),
            "nurse" => Ok(Role::Nurse),
            "receptionist" => Ok(Role::Receptionist),
            "admin" => Ok(Role::Admin),
            _ => Err(CaredeskError::malformed("role", s)),
        }
    }
}

/// A stored caretaker account
///
/// The secret is only ever held as an encoded salted hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: Username,
    pub secret_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Doctor, Role::Nurse, Role::Receptionist, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_role_parse_case_insensitive() {
        assert_eq!(Role::from_str("Doctor").unwrap(), Role::Doctor);
    }

    #[test]
    fn test_role_unknown() {
        assert!(matches!(
            Role::from_str("surgeon"),
            Err(CaredeskError::MalformedInput { .. })
        ));
    }
}
