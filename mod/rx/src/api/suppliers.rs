use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use pharmacy_auth::policy::ADMIN_POLICY;
use pharmacy_auth::Principal;
use pharmacy_core::{ListParams, ListResult, ServiceError, Validate};

use crate::api::AppState;
use crate::model::{Supplier, SupplierDto};
use crate::repo::Repository;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", post(create_supplier).get(list_suppliers))
        .route(
            "/suppliers/{id}",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
}

async fn create_supplier(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(dto): Json<SupplierDto>,
) -> Result<Json<Supplier>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let supplier = Supplier::new(&dto);
    state.repos.suppliers.create(&supplier)?;
    Ok(Json(supplier))
}

async fn get_supplier(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<Supplier>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    Ok(Json(state.repos.suppliers.get_by_id(&id)?))
}

async fn list_suppliers(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<Supplier>>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    Ok(Json(state.repos.suppliers.list(&params)?))
}

async fn update_supplier(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(dto): Json<SupplierDto>,
) -> Result<Json<Supplier>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let current = state.repos.suppliers.get_by_id(&id)?;
    let updated = current.apply(&dto);
    state.repos.suppliers.update(&id, &updated)?;
    Ok(Json(updated))
}

async fn delete_supplier(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    state.repos.suppliers.delete(&id)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
