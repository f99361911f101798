use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use pharmacy_auth::policy::{ADMIN_POLICY, STAFF_POLICY};
use pharmacy_auth::Principal;
use pharmacy_core::{ListParams, ListResult, ServiceError, Validate};

use crate::api::AppState;
use crate::model::{Drug, DrugDto};
use crate::repo::Repository;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drugs", post(create_drug).get(list_drugs))
        .route("/drugs/{id}", get(get_drug).put(update_drug).delete(delete_drug))
}

async fn create_drug(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(dto): Json<DrugDto>,
) -> Result<Json<Drug>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let drug = Drug::new(&dto);
    state.repos.drugs.create(&drug)?;
    Ok(Json(drug))
}

async fn get_drug(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<Drug>, ServiceError> {
    state.policies.require(&principal, STAFF_POLICY)?;
    Ok(Json(state.repos.drugs.get_by_id(&id)?))
}

async fn list_drugs(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<Drug>>, ServiceError> {
    state.policies.require(&principal, STAFF_POLICY)?;
    Ok(Json(state.repos.drugs.list(&params)?))
}

async fn update_drug(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(dto): Json<DrugDto>,
) -> Result<Json<Drug>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let current = state.repos.drugs.get_by_id(&id)?;
    let updated = current.apply(&dto);
    state.repos.drugs.update(&id, &updated)?;
    Ok(Json(updated))
}

async fn delete_drug(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    state.repos.drugs.delete(&id)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
