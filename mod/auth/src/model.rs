use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed role vocabulary.
///
/// The system has exactly two kinds of authenticated user; role-based
/// dispatch is modeled as a tagged variant over this set rather than
/// open-ended strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            _ => Err(()),
        }
    }
}

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id.
    pub sub: String,

    /// Role granted to the subject.
    pub role: Role,

    /// Issuer (fixed by configuration).
    pub iss: String,

    /// Audience (fixed by configuration).
    pub aud: String,

    /// Issued at (unix timestamp).
    pub iat: i64,

    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// The verified identity + role attached to an in-flight request.
///
/// Produced only by [`crate::TokenService::verify`]; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub role: Role,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"doctor\"");
    }

    #[test]
    fn role_from_str() {
        assert_eq!("admin".parse(), Ok(Role::Admin));
        assert_eq!("doctor".parse(), Ok(Role::Doctor));
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn principal_from_claims() {
        let claims = Claims {
            sub: "u1".into(),
            role: Role::Doctor,
            iss: "pharmacyd".into(),
            aud: "pharmacy-api".into(),
            iat: 0,
            exp: 1,
        };
        let principal = Principal::from(claims);
        assert_eq!(principal.subject, "u1");
        assert_eq!(principal.role, Role::Doctor);
    }
}
