use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use pharmacy_auth::policy::ADMIN_POLICY;
use pharmacy_auth::Principal;
use pharmacy_core::{ListParams, ListResult, ServiceError, Validate};

use crate::api::AppState;
use crate::model::{SalesReport, SalesReportDto};
use crate::repo::Repository;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales-reports", post(create_report).get(list_reports))
        .route(
            "/sales-reports/{id}",
            get(get_report).put(update_report).delete(delete_report),
        )
}

async fn create_report(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(dto): Json<SalesReportDto>,
) -> Result<Json<SalesReport>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let report = SalesReport::new(&dto, &principal.subject);
    state.repos.sales_reports.create(&report)?;
    Ok(Json(report))
}

async fn get_report(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<SalesReport>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    Ok(Json(state.repos.sales_reports.get_by_id(&id)?))
}

async fn list_reports(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<SalesReport>>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    Ok(Json(state.repos.sales_reports.list(&params)?))
}

async fn update_report(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(dto): Json<SalesReportDto>,
) -> Result<Json<SalesReport>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    dto.validate()?;
    let current = state.repos.sales_reports.get_by_id(&id)?;
    let updated = current.apply(&dto);
    state.repos.sales_reports.update(&id, &updated)?;
    Ok(Json(updated))
}

async fn delete_report(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    state.policies.require(&principal, ADMIN_POLICY)?;
    state.repos.sales_reports.delete(&id)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
