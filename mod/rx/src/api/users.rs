//! Admin- and doctor-user management. Admin-only — these records carry
//! login credentials; responses go through `UserView` to keep password
//! material out of the wire format.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use pharmacy_auth::password::hash_password;
use pharmacy_auth::policy::ADMIN_POLICY;
use pharmacy_auth::Principal;
use pharmacy_core::{ListParams, ListResult, ServiceError, Validate};

use crate::api::AppState;
use crate::model::{AdminUser, AdminUserDto, DoctorUser, DoctorUserDto, UserView};
use crate::repo::Repository;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin-users", post(create_admin).get(list_admins))
        .route(
            "/admin-users/{id}",
            get(get_admin).put(update_admin).delete(delete_admin),
        )
        .route("/doctor-users", post(create_doctor).get(list_doctors))
        .route(
            "/doctor-users/{id}",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
}

// ── Admin users ──

async fn create_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(dto): Json<AdminUserDto>,
) -> Result<Json<UserView>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let user = AdminUser::new(&dto, hash_password(&dto.password)?);
    state.repos.admin_users.create(&user)?;
    Ok(Json(UserView::from(&user)))
}

async fn get_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<UserView>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    let user = state.repos.admin_users.get_by_id(&id)?;
    Ok(Json(UserView::from(&user)))
}

async fn list_admins(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<UserView>>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    let page = state.repos.admin_users.list(&params)?;
    Ok(Json(ListResult {
        items: page.items.iter().map(UserView::from).collect(),
        total: page.total,
    }))
}

async fn update_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(dto): Json<AdminUserDto>,
) -> Result<Json<UserView>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let current = state.repos.admin_users.get_by_id(&id)?;
    let updated = current.apply(&dto, hash_password(&dto.password)?);
    state.repos.admin_users.update(&id, &updated)?;
    Ok(Json(UserView::from(&updated)))
}

async fn delete_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    state.repos.admin_users.delete(&id)?;
    Ok(Json(serde_json::json!({"ok": true})))
}

// ── Doctor users ──

async fn create_doctor(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(dto): Json<DoctorUserDto>,
) -> Result<Json<UserView>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let user = DoctorUser::new(&dto, hash_password(&dto.password)?);
    state.repos.doctor_users.create(&user)?;
    Ok(Json(UserView::from(&user)))
}

async fn get_doctor(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<UserView>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    let user = state.repos.doctor_users.get_by_id(&id)?;
    Ok(Json(UserView::from(&user)))
}

async fn list_doctors(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<UserView>>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    let page = state.repos.doctor_users.list(&params)?;
    Ok(Json(ListResult {
        items: page.items.iter().map(UserView::from).collect(),
        total: page.total,
    }))
}

async fn update_doctor(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(dto): Json<DoctorUserDto>,
) -> Result<Json<UserView>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let current = state.repos.doctor_users.get_by_id(&id)?;
    let updated = current.apply(&dto, hash_password(&dto.password)?);
    state.repos.doctor_users.update(&id, &updated)?;
    Ok(Json(UserView::from(&updated)))
}

async fn delete_doctor(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    state.repos.doctor_users.delete(&id)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
