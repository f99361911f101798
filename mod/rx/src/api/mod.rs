//! Rx HTTP surface.
//!
//! Handlers are the per-request orchestrator: policy check, then DTO
//! validation, then the repository call — in that order, short-circuiting
//! on the first failed stage. The bearer middleware (pharmacy-auth) has
//! already resolved the Principal by the time a handler runs.

pub mod drugs;
pub mod orders;
pub mod sales_reports;
pub mod suppliers;
pub mod users;

use std::sync::Arc;

use axum::Router;

use pharmacy_auth::PolicyRegistry;

use crate::repo::Repositories;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<Repositories>,
    pub policies: Arc<PolicyRegistry>,
}

/// Build the Rx API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/rx/v1", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(drugs::routes())
        .merge(suppliers::routes())
        .merge(orders::routes())
        .merge(sales_reports::routes())
        .merge(users::routes())
}
