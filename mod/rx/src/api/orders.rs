use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use pharmacy_auth::policy::{ADMIN_POLICY, STAFF_POLICY};
use pharmacy_auth::Principal;
use pharmacy_core::{ListParams, ListResult, ServiceError, Validate};

use crate::api::AppState;
use crate::model::{Order, OrderDto};
use crate::repo::Repository;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/{id}", get(get_order).put(update_order).delete(delete_order))
}

/// Any authenticated role may place an order; the placing identity is the
/// verified Principal's subject, never payload data.
async fn create_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(dto): Json<OrderDto>,
) -> Result<Json<Order>, ServiceError> {
    state.policies.require(&principal, STAFF_POLICY)?;
    dto.validate()?;
    let order = Order::new(&dto, &principal.subject);
    state.repos.orders.create(&order)?;
    Ok(Json(order))
}

async fn get_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ServiceError> {
    state.policies.require(&principal, STAFF_POLICY)?;
    Ok(Json(state.repos.orders.get_by_id(&id)?))
}

async fn list_orders(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<Order>>, ServiceError> {
    state.policies.require(&principal, STAFF_POLICY)?;
    Ok(Json(state.repos.orders.list(&params)?))
}

async fn update_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(dto): Json<OrderDto>,
) -> Result<Json<Order>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let current = state.repos.orders.get_by_id(&id)?;
    let updated = current.apply(&dto);
    state.repos.orders.update(&id, &updated)?;
    Ok(Json(updated))
}

async fn delete_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    state.repos.orders.delete(&id)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
