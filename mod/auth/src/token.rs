use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use pharmacy_core::ServiceError;

use crate::error::{AuthError, ConfigError};
use crate::model::{Claims, Principal, Role};

/// Minimum accepted signing secret length, in bytes.
const MIN_SECRET_LEN: usize = 32;

/// Token issuance/verification configuration.
///
/// Supplied by the server configuration at startup and never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HS256 signing secret (shared key).
    pub secret: String,
    /// Value of the `iss` claim on issued tokens.
    pub issuer: String,
    /// Value of the `aud` claim on issued tokens.
    pub audience: String,
    /// Token lifetime in seconds.
    pub expire_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "pharmacy-dev-secret-change-me-now!!".to_string(),
            issuer: "pharmacyd".to_string(),
            audience: "pharmacy-api".to_string(),
            expire_secs: 86400, // 24h
        }
    }
}

/// Mints and verifies HS256-signed bearer tokens.
///
/// Construction fails if the signing secret is unusable; once constructed
/// the service is immutable, so verification is a pure function of the
/// token.
pub struct TokenService {
    issuer: String,
    audience: String,
    expire_secs: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expire_secs", &self.expire_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Result<Self, ConfigError> {
        if config.secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if config.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret {
                got: config.secret.len(),
                min: MIN_SECRET_LEN,
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        // Zero leeway: a token with `exp` in the past is expired, full stop.
        validation.leeway = 0;

        Ok(Self {
            issuer: config.issuer,
            audience: config.audience,
            expire_secs: config.expire_secs,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Issue a signed token for the given subject and role.
    pub fn issue(&self, subject: &str, role: Role) -> Result<String, ServiceError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: now + self.expire_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(format!("JWT encode failed: {}", e)))
    }

    /// Verify a token and resolve its Principal.
    ///
    /// Pure: no I/O, no side effects. Expiry is checked here, once — a
    /// long-running request is not re-checked mid-flight.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(map_decode_error)?;
        Ok(Principal::from(data.claims))
    }

    /// Token lifetime in seconds, for login responses.
    pub fn expire_secs(&self) -> i64 {
        self.expire_secs
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::BadSignature,
        ErrorKind::InvalidIssuer => AuthError::WrongIssuer,
        ErrorKind::InvalidAudience => AuthError::WrongAudience,
        _ => AuthError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(TokenConfig::default()).unwrap()
    }

    /// Encode arbitrary claims with the default secret, bypassing `issue`.
    fn raw_token(claims: &Claims) -> String {
        let key = EncodingKey::from_secret(TokenConfig::default().secret.as_bytes());
        encode(&Header::default(), claims, &key).unwrap()
    }

    fn claims(iss: &str, aud: &str, exp: i64) -> Claims {
        Claims {
            sub: "u1".into(),
            role: Role::Doctor,
            iss: iss.into(),
            aud: aud.into(),
            iat: chrono::Utc::now().timestamp(),
            exp,
        }
    }

    #[test]
    fn issue_verify_round_trip() {
        let svc = service();
        let token = svc.issue("alice", Role::Admin).unwrap();
        let principal = svc.verify(&token).unwrap();
        assert_eq!(principal.subject, "alice");
        assert_eq!(principal.role, Role::Admin);

        let token = svc.issue("bob", Role::Doctor).unwrap();
        let principal = svc.verify(&token).unwrap();
        assert_eq!(principal.subject, "bob");
        assert_eq!(principal.role, Role::Doctor);
    }

    #[test]
    fn expired_token_rejected() {
        let svc = service();
        let past = chrono::Utc::now().timestamp() - 3600;
        let token = raw_token(&claims("pharmacyd", "pharmacy-api", past));
        assert_eq!(svc.verify(&token), Err(AuthError::Expired));
    }

    #[test]
    fn wrong_issuer_rejected() {
        let svc = service();
        let future = chrono::Utc::now().timestamp() + 3600;
        let token = raw_token(&claims("someone-else", "pharmacy-api", future));
        assert_eq!(svc.verify(&token), Err(AuthError::WrongIssuer));
    }

    #[test]
    fn wrong_audience_rejected() {
        let svc = service();
        let future = chrono::Utc::now().timestamp() + 3600;
        let token = raw_token(&claims("pharmacyd", "another-api", future));
        assert_eq!(svc.verify(&token), Err(AuthError::WrongAudience));
    }

    #[test]
    fn foreign_signature_rejected() {
        let svc = service();
        let other = TokenService::new(TokenConfig {
            secret: "a-completely-different-signing-secret!!".to_string(),
            ..TokenConfig::default()
        })
        .unwrap();
        let token = other.issue("alice", Role::Admin).unwrap();
        assert_eq!(svc.verify(&token), Err(AuthError::BadSignature));
    }

    #[test]
    fn garbage_is_malformed() {
        let svc = service();
        assert_eq!(svc.verify("not-a-token"), Err(AuthError::Malformed));
        assert_eq!(svc.verify(""), Err(AuthError::Malformed));
    }

    #[test]
    fn doctor_token_denied_by_admin_policy() {
        use crate::policy::{ADMIN_POLICY, PolicyRegistry};

        let svc = service();
        let registry = PolicyRegistry::with_defaults().unwrap();

        let token = svc.issue("dr_jones", Role::Doctor).unwrap();
        let principal = svc.verify(&token).unwrap();
        assert_eq!(
            registry.authorize(&principal, ADMIN_POLICY),
            crate::policy::Decision::Deny
        );
    }

    #[test]
    fn missing_secret_is_fatal() {
        let err = TokenService::new(TokenConfig {
            secret: String::new(),
            ..TokenConfig::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret);
    }

    #[test]
    fn short_secret_is_fatal() {
        let err = TokenService::new(TokenConfig {
            secret: "too-short".to_string(),
            ..TokenConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::WeakSecret { got: 9, min: 32 }));
    }
}
