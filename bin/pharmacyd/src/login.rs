//! Login endpoint — verifies a stored password hash, issues a bearer token
//! with the matching role claim.

use axum::Router;
use axum::extract::State;
use axum::routing::post;
use axum::Json;
use serde::{Deserialize, Serialize};

use pharmacy_auth::password::verify_password;
use pharmacy_auth::Role;
use pharmacy_core::ServiceError;

use crate::routes::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login_handler))
}

/// Handle POST /auth/login.
///
/// Admin users are tried first, then doctor users. Unknown usernames and
/// wrong passwords get the same answer.
async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServiceError> {
    if let Some(user) = state.repos.admin_users.find_by_username(&body.username)? {
        if verify_password(&body.password, &user.password_hash) {
            return issue(&state, &user.username, Role::Admin);
        }
        return Err(invalid_credentials());
    }

    if let Some(user) = state.repos.doctor_users.find_by_username(&body.username)? {
        if verify_password(&body.password, &user.password_hash) {
            return issue(&state, &user.username, Role::Doctor);
        }
    }

    Err(invalid_credentials())
}

fn issue(state: &AppState, subject: &str, role: Role) -> Result<Json<LoginResponse>, ServiceError> {
    let token = state.tokens.issue(subject, role)?;
    tracing::info!(subject = %subject, role = %role, "login succeeded");
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expire_secs(),
    }))
}

fn invalid_credentials() -> ServiceError {
    ServiceError::Unauthorized("invalid credentials".to_string())
}
