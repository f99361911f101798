//! Bearer-token middleware.
//!
//! Extracts the credential from `Authorization: Bearer <token>`, verifies
//! it, and stores the resolved [`Principal`] in request extensions for
//! handlers to pick up via `Extension<Principal>`.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use pharmacy_core::ServiceError;

use crate::error::AuthError;
use crate::model::Principal;
use crate::token::TokenService;

/// Paths that don't require authentication.
const PUBLIC_PATHS: &[&str] = &["/auth/login", "/health", "/version"];

/// Verify the bearer credential on every non-public request.
///
/// Verification happens exactly once per request; downstream stages only
/// see the resolved Principal.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    if is_public_path(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let token = extract_bearer(request.headers()).ok_or(AuthError::Malformed)?;
    let principal = tokens.verify(token)?;

    tracing::debug!(subject = %principal.subject, role = %principal.role, "request authenticated");
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Extract the Bearer token from the Authorization header.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();
    if token.is_empty() { None } else { Some(token) }
}

fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers_with("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_non_bearer_schemes() {
        assert_eq!(extract_bearer(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }

    #[test]
    fn public_paths() {
        assert!(is_public_path("/auth/login"));
        assert!(is_public_path("/health"));
        assert!(!is_public_path("/rx/v1/drugs"));
    }
}
