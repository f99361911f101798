//! Route registration — login + entity routes + system endpoints, with
//! the bearer middleware layered over everything non-public.

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Router, middleware};

use pharmacy_auth::middleware::auth_middleware;
use pharmacy_auth::{PolicyRegistry, TokenService};
use pharmacy_rx::repo::Repositories;

use crate::login;

/// Application shared state.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<Repositories>,
    pub policies: Arc<PolicyRegistry>,
    pub tokens: Arc<TokenService>,
}

/// Build the complete router.
pub fn build_router(state: AppState) -> Router {
    let rx_router = pharmacy_rx::api::router(pharmacy_rx::api::AppState {
        repos: Arc::clone(&state.repos),
        policies: Arc::clone(&state.policies),
    });

    let tokens = Arc::clone(&state.tokens);

    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .merge(login::routes().with_state(state))
        .merge(rx_router)
        .layer(middleware::from_fn_with_state(tokens, auth_middleware))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "pharmacyd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
