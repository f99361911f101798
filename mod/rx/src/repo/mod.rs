//! Repository layer — one capability set per entity type.
//!
//! Repositories own all access to the persistent store. They do not
//! re-validate DTO fields (that happened before the entity was built) but
//! they DO enforce store-level invariants: uniqueness (`Conflict`) and
//! referential integrity (`NotFound` on a dangling foreign key). Every
//! operation is a single SQL statement, atomic with respect to the store.

pub mod drug;
pub mod order;
pub mod sales_report;
pub mod schema;
pub mod supplier;
pub mod user;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use pharmacy_core::{ListParams, ListResult, ServiceError};
use pharmacy_sql::{SQLError, SQLStore, Value};

pub use drug::DrugRepository;
pub use order::OrderRepository;
pub use sales_report::SalesReportRepository;
pub use supplier::SupplierRepository;
pub use user::{AdminUserRepository, DoctorUserRepository};

/// The capability set every entity repository provides.
///
/// Entity lifecycle: `NonExistent -(create)-> Active -(update)*-> Active
/// -(delete)-> NonExistent`. Delete is terminal; there is no archival
/// state.
pub trait Repository<T: Serialize>: Send + Sync {
    /// Persist a new entity; returns its id. `Conflict` on a uniqueness
    /// violation, `NotFound` on a dangling foreign key.
    fn create(&self, entity: &T) -> Result<String, ServiceError>;

    fn get_by_id(&self, id: &str) -> Result<T, ServiceError>;

    /// Finite, restartable listing — every call re-runs the query, no
    /// cursor is shared across calls.
    fn list(&self, params: &ListParams) -> Result<ListResult<T>, ServiceError>;

    fn update(&self, id: &str, entity: &T) -> Result<(), ServiceError>;

    fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

/// All repositories over one store, schema initialized.
pub struct Repositories {
    pub drugs: DrugRepository,
    pub suppliers: SupplierRepository,
    pub orders: OrderRepository,
    pub sales_reports: SalesReportRepository,
    pub admin_users: AdminUserRepository,
    pub doctor_users: DoctorUserRepository,
}

impl Repositories {
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Self {
            drugs: DrugRepository::new(Arc::clone(&sql)),
            suppliers: SupplierRepository::new(Arc::clone(&sql)),
            orders: OrderRepository::new(Arc::clone(&sql)),
            sales_reports: SalesReportRepository::new(Arc::clone(&sql)),
            admin_users: AdminUserRepository::new(Arc::clone(&sql)),
            doctor_users: DoctorUserRepository::new(sql),
        })
    }
}

// ── Generic record helpers ──
//
// Records are stored as a JSON `data` column plus indexed columns for
// querying and constraints.

fn conflict_or_storage(err: SQLError) -> ServiceError {
    if err.is_unique_violation() {
        ServiceError::Conflict(err.to_string())
    } else if err.is_foreign_key_violation() {
        ServiceError::NotFound(err.to_string())
    } else {
        ServiceError::Storage(err.to_string())
    }
}

/// Insert a record as JSON into a table with indexed columns.
pub(crate) fn insert_record<T: Serialize>(
    sql: &dyn SQLStore,
    table: &str,
    id: &str,
    record: &T,
    indexes: &[(&str, Value)],
) -> Result<(), ServiceError> {
    let json = serde_json::to_string(record)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    let mut cols = vec!["id", "data"];
    let mut placeholders = vec!["?1".to_string(), "?2".to_string()];
    let mut params = vec![Value::Text(id.to_string()), Value::Text(json)];

    for (i, (col, val)) in indexes.iter().enumerate() {
        cols.push(*col);
        placeholders.push(format!("?{}", i + 3));
        params.push(val.clone());
    }

    let stmt = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        cols.join(", "),
        placeholders.join(", "),
    );

    sql.exec(&stmt, &params).map_err(conflict_or_storage)?;
    Ok(())
}

/// Get a record by id, deserializing the JSON `data` column.
pub(crate) fn get_record<T: DeserializeOwned>(
    sql: &dyn SQLStore,
    table: &str,
    id: &str,
) -> Result<T, ServiceError> {
    let stmt = format!("SELECT data FROM {} WHERE id = ?1", table);
    let rows = sql
        .query(&stmt, &[Value::Text(id.to_string())])
        .map_err(|e| ServiceError::Storage(e.to_string()))?;
    let row = rows
        .first()
        .ok_or_else(|| ServiceError::NotFound(format!("{}/{}", table, id)))?;
    let data = row
        .get_str("data")
        .ok_or_else(|| ServiceError::Internal("missing data column".into()))?;
    serde_json::from_str(data).map_err(|e| ServiceError::Internal(e.to_string()))
}

/// Update a record's JSON data and indexed columns.
pub(crate) fn update_record<T: Serialize>(
    sql: &dyn SQLStore,
    table: &str,
    id: &str,
    record: &T,
    indexes: &[(&str, Value)],
) -> Result<(), ServiceError> {
    let json = serde_json::to_string(record)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    let mut sets = vec!["data = ?1".to_string()];
    let mut params: Vec<Value> = vec![Value::Text(json)];

    for (i, (col, val)) in indexes.iter().enumerate() {
        sets.push(format!("{} = ?{}", col, i + 2));
        params.push(val.clone());
    }

    let id_idx = params.len() + 1;
    params.push(Value::Text(id.to_string()));

    let stmt = format!("UPDATE {} SET {} WHERE id = ?{}", table, sets.join(", "), id_idx);

    let affected = sql.exec(&stmt, &params).map_err(conflict_or_storage)?;
    if affected == 0 {
        return Err(ServiceError::NotFound(format!("{}/{}", table, id)));
    }
    Ok(())
}

/// Delete a record by id. A foreign-key restriction (the record is still
/// referenced) surfaces as `Conflict`.
pub(crate) fn delete_record(
    sql: &dyn SQLStore,
    table: &str,
    id: &str,
) -> Result<(), ServiceError> {
    let stmt = format!("DELETE FROM {} WHERE id = ?1", table);
    let affected = sql
        .exec(&stmt, &[Value::Text(id.to_string())])
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                ServiceError::Conflict(format!("{}/{} is still referenced", table, id))
            } else {
                ServiceError::Storage(e.to_string())
            }
        })?;
    if affected == 0 {
        return Err(ServiceError::NotFound(format!("{}/{}", table, id)));
    }
    Ok(())
}

/// List records, newest first, with pagination and a total count.
pub(crate) fn list_records<T: DeserializeOwned + Serialize>(
    sql: &dyn SQLStore,
    table: &str,
    params: &ListParams,
) -> Result<ListResult<T>, ServiceError> {
    let count_stmt = format!("SELECT COUNT(*) AS cnt FROM {}", table);
    let rows = sql
        .query(&count_stmt, &[])
        .map_err(|e| ServiceError::Storage(e.to_string()))?;
    let total = rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0) as usize;

    let stmt = format!(
        "SELECT data FROM {} ORDER BY created_at DESC, id LIMIT ?1 OFFSET ?2",
        table,
    );
    let rows = sql
        .query(
            &stmt,
            &[
                Value::Integer(params.limit as i64),
                Value::Integer(params.offset as i64),
            ],
        )
        .map_err(|e| ServiceError::Storage(e.to_string()))?;

    let mut items = Vec::with_capacity(rows.len());
    for row in &rows {
        let data = row
            .get_str("data")
            .ok_or_else(|| ServiceError::Internal("missing data column".into()))?;
        items.push(serde_json::from_str(data).map_err(|e| ServiceError::Internal(e.to_string()))?);
    }

    Ok(ListResult { items, total })
}

/// Whether a row with this id exists.
pub(crate) fn record_exists(
    sql: &dyn SQLStore,
    table: &str,
    id: &str,
) -> Result<bool, ServiceError> {
    let stmt = format!("SELECT 1 AS one FROM {} WHERE id = ?1", table);
    let rows = sql
        .query(&stmt, &[Value::Text(id.to_string())])
        .map_err(|e| ServiceError::Storage(e.to_string()))?;
    Ok(!rows.is_empty())
}

/// Text value or NULL for an optional column.
pub(crate) fn opt_text(value: Option<&String>) -> Value {
    match value {
        Some(s) => Value::Text(s.clone()),
        None => Value::Null,
    }
}
