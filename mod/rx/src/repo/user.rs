use std::sync::Arc;

use pharmacy_core::{ListParams, ListResult, ServiceError};
use pharmacy_sql::{SQLStore, Value};

use crate::model::{AdminUser, DoctorUser};
use crate::repo::{
    Repository, delete_record, get_record, insert_record, list_records, update_record,
};

pub struct AdminUserRepository {
    sql: Arc<dyn SQLStore>,
}

pub struct DoctorUserRepository {
    sql: Arc<dyn SQLStore>,
}

fn find_by_username<T: serde::de::DeserializeOwned>(
    sql: &dyn SQLStore,
    table: &str,
    username: &str,
) -> Result<Option<T>, ServiceError> {
    let stmt = format!("SELECT data FROM {} WHERE username = ?1", table);
    let rows = sql
        .query(&stmt, &[Value::Text(username.to_string())])
        .map_err(|e| ServiceError::Storage(e.to_string()))?;
    match rows.first().and_then(|r| r.get_str("data")) {
        Some(data) => serde_json::from_str(data)
            .map(Some)
            .map_err(|e| ServiceError::Internal(e.to_string())),
        None => Ok(None),
    }
}

impl AdminUserRepository {
    pub fn new(sql: Arc<dyn SQLStore>) -> Self {
        Self { sql }
    }

    /// Lookup for login: `None` when the username is unknown.
    pub fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, ServiceError> {
        find_by_username(self.sql.as_ref(), "admin_users", username)
    }

    fn indexes(user: &AdminUser) -> Vec<(&'static str, Value)> {
        vec![
            ("username", Value::Text(user.username.clone())),
            ("created_at", Value::Text(user.created_at.clone())),
            ("updated_at", Value::Text(user.updated_at.clone())),
        ]
    }
}

impl Repository<AdminUser> for AdminUserRepository {
    fn create(&self, user: &AdminUser) -> Result<String, ServiceError> {
        insert_record(self.sql.as_ref(), "admin_users", &user.id, user, &Self::indexes(user))?;
        tracing::info!(id = %user.id, username = %user.username, "admin user created");
        Ok(user.id.clone())
    }

    fn get_by_id(&self, id: &str) -> Result<AdminUser, ServiceError> {
        get_record(self.sql.as_ref(), "admin_users", id)
    }

    fn list(&self, params: &ListParams) -> Result<ListResult<AdminUser>, ServiceError> {
        list_records(self.sql.as_ref(), "admin_users", params)
    }

    fn update(&self, id: &str, user: &AdminUser) -> Result<(), ServiceError> {
        update_record(self.sql.as_ref(), "admin_users", id, user, &Self::indexes(user))
    }

    fn delete(&self, id: &str) -> Result<(), ServiceError> {
        delete_record(self.sql.as_ref(), "admin_users", id)
    }
}

impl DoctorUserRepository {
    pub fn new(sql: Arc<dyn SQLStore>) -> Self {
        Self { sql }
    }

    /// Lookup for login: `None` when the username is unknown.
    pub fn find_by_username(&self, username: &str) -> Result<Option<DoctorUser>, ServiceError> {
        find_by_username(self.sql.as_ref(), "doctor_users", username)
    }

    fn indexes(user: &DoctorUser) -> Vec<(&'static str, Value)> {
        vec![
            ("username", Value::Text(user.username.clone())),
            ("created_at", Value::Text(user.created_at.clone())),
            ("updated_at", Value::Text(user.updated_at.clone())),
        ]
    }
}

impl Repository<DoctorUser> for DoctorUserRepository {
    fn create(&self, user: &DoctorUser) -> Result<String, ServiceError> {
        insert_record(self.sql.as_ref(), "doctor_users", &user.id, user, &Self::indexes(user))?;
        tracing::info!(id = %user.id, username = %user.username, "doctor user created");
        Ok(user.id.clone())
    }

    fn get_by_id(&self, id: &str) -> Result<DoctorUser, ServiceError> {
        get_record(self.sql.as_ref(), "doctor_users", id)
    }

    fn list(&self, params: &ListParams) -> Result<ListResult<DoctorUser>, ServiceError> {
        list_records(self.sql.as_ref(), "doctor_users", params)
    }

    fn update(&self, id: &str, user: &DoctorUser) -> Result<(), ServiceError> {
        update_record(self.sql.as_ref(), "doctor_users", id, user, &Self::indexes(user))
    }

    fn delete(&self, id: &str) -> Result<(), ServiceError> {
        delete_record(self.sql.as_ref(), "doctor_users", id)
    }
}
