use std::sync::Arc;

use pharmacy_core::{ListParams, ListResult, ServiceError};
use pharmacy_sql::{SQLStore, Value};

use crate::model::Supplier;
use crate::repo::{
    Repository, delete_record, get_record, insert_record, list_records, update_record,
};

const TABLE: &str = "suppliers";

pub struct SupplierRepository {
    sql: Arc<dyn SQLStore>,
}

impl SupplierRepository {
    pub fn new(sql: Arc<dyn SQLStore>) -> Self {
        Self { sql }
    }

    fn indexes(supplier: &Supplier) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::Text(supplier.name.clone())),
            ("created_at", Value::Text(supplier.created_at.clone())),
            ("updated_at", Value::Text(supplier.updated_at.clone())),
        ]
    }
}

impl Repository<Supplier> for SupplierRepository {
    fn create(&self, supplier: &Supplier) -> Result<String, ServiceError> {
        insert_record(
            self.sql.as_ref(),
            TABLE,
            &supplier.id,
            supplier,
            &Self::indexes(supplier),
        )?;
        tracing::info!(id = %supplier.id, name = %supplier.name, "supplier created");
        Ok(supplier.id.clone())
    }

    fn get_by_id(&self, id: &str) -> Result<Supplier, ServiceError> {
        get_record(self.sql.as_ref(), TABLE, id)
    }

    fn list(&self, params: &ListParams) -> Result<ListResult<Supplier>, ServiceError> {
        list_records(self.sql.as_ref(), TABLE, params)
    }

    fn update(&self, id: &str, supplier: &Supplier) -> Result<(), ServiceError> {
        update_record(self.sql.as_ref(), TABLE, id, supplier, &Self::indexes(supplier))
    }

    fn delete(&self, id: &str) -> Result<(), ServiceError> {
        delete_record(self.sql.as_ref(), TABLE, id)
    }
}

#[cfg(test)]
mod tests {
    use pharmacy_sql::SqliteStore;

    use super::*;
    use crate::model::{Drug, DrugDto, SupplierDto};
    use crate::repo::Repositories;

    fn repos() -> Repositories {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        Repositories::new(sql).unwrap()
    }

    fn supplier(name: &str) -> Supplier {
        Supplier::new(&SupplierDto {
            name: name.into(),
            email: "sales@acme.example".into(),
            phone: "+1 555 0100".into(),
            address: None,
        })
    }

    #[test]
    fn duplicate_name_conflicts_and_leaves_original_intact() {
        let repos = repos();
        let original = supplier("Acme Pharma");
        let id = repos.suppliers.create(&original).unwrap();

        let mut dup = supplier("Acme Pharma");
        dup.email = "other@acme.example".into();
        let err = repos.suppliers.create(&dup).unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_EXISTS");

        // The pre-existing record is unchanged.
        let loaded = repos.suppliers.get_by_id(&id).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn rename_to_taken_name_conflicts() {
        let repos = repos();
        repos.suppliers.create(&supplier("Acme Pharma")).unwrap();
        let second = supplier("Globex Meds");
        let id = repos.suppliers.create(&second).unwrap();

        let renamed = Supplier {
            name: "Acme Pharma".into(),
            ..second
        };
        let err = repos.suppliers.update(&id, &renamed).unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_EXISTS");
    }

    #[test]
    fn delete_twice_then_not_found() {
        let repos = repos();
        let id = repos.suppliers.create(&supplier("Acme Pharma")).unwrap();
        assert!(repos.suppliers.delete(&id).is_ok());
        assert_eq!(repos.suppliers.delete(&id).unwrap_err().error_code(), "NOT_FOUND");
        assert_eq!(repos.suppliers.get_by_id(&id).unwrap_err().error_code(), "NOT_FOUND");
    }

    #[test]
    fn referenced_supplier_cannot_be_deleted() {
        let repos = repos();
        let s = supplier("Acme Pharma");
        let supplier_id = repos.suppliers.create(&s).unwrap();

        let mut d = Drug::new(&DrugDto {
            name: "Aspirin".into(),
            description: None,
            price: 1.0,
            stock: 5,
            supplier_id: None,
        });
        d.supplier_id = Some(supplier_id.clone());
        repos.drugs.create(&d).unwrap();

        let err = repos.suppliers.delete(&supplier_id).unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_EXISTS");
    }
}
