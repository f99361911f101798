use std::sync::Arc;

use pharmacy_core::{ListParams, ListResult, ServiceError};
use pharmacy_sql::{SQLStore, Value};

use crate::model::Drug;
use crate::repo::{
    Repository, delete_record, get_record, insert_record, list_records, opt_text, record_exists,
    update_record,
};

const TABLE: &str = "drugs";

pub struct DrugRepository {
    sql: Arc<dyn SQLStore>,
}

impl DrugRepository {
    pub fn new(sql: Arc<dyn SQLStore>) -> Self {
        Self { sql }
    }

    /// A drug may only point at an existing supplier.
    fn check_supplier(&self, drug: &Drug) -> Result<(), ServiceError> {
        if let Some(supplier_id) = &drug.supplier_id {
            if !record_exists(self.sql.as_ref(), "suppliers", supplier_id)? {
                return Err(ServiceError::NotFound(format!("suppliers/{}", supplier_id)));
            }
        }
        Ok(())
    }

    fn indexes(drug: &Drug) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::Text(drug.name.clone())),
            ("price", Value::Real(drug.price)),
            ("stock", Value::Integer(drug.stock)),
            ("supplier_id", opt_text(drug.supplier_id.as_ref())),
            ("created_at", Value::Text(drug.created_at.clone())),
            ("updated_at", Value::Text(drug.updated_at.clone())),
        ]
    }
}

impl Repository<Drug> for DrugRepository {
    fn create(&self, drug: &Drug) -> Result<String, ServiceError> {
        self.check_supplier(drug)?;
        insert_record(self.sql.as_ref(), TABLE, &drug.id, drug, &Self::indexes(drug))?;
        tracing::info!(id = %drug.id, name = %drug.name, "drug created");
        Ok(drug.id.clone())
    }

    fn get_by_id(&self, id: &str) -> Result<Drug, ServiceError> {
        get_record(self.sql.as_ref(), TABLE, id)
    }

    fn list(&self, params: &ListParams) -> Result<ListResult<Drug>, ServiceError> {
        list_records(self.sql.as_ref(), TABLE, params)
    }

    fn update(&self, id: &str, drug: &Drug) -> Result<(), ServiceError> {
        self.check_supplier(drug)?;
        update_record(self.sql.as_ref(), TABLE, id, drug, &Self::indexes(drug))
    }

    fn delete(&self, id: &str) -> Result<(), ServiceError> {
        delete_record(self.sql.as_ref(), TABLE, id)
    }
}
