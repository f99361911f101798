use std::sync::Arc;

use pharmacy_core::{ListParams, ListResult, ServiceError};
use pharmacy_sql::{SQLStore, Value};

use crate::model::Order;
use crate::repo::{
    Repository, delete_record, get_record, insert_record, list_records, update_record,
};

const TABLE: &str = "orders";

pub struct OrderRepository {
    sql: Arc<dyn SQLStore>,
}

impl OrderRepository {
    pub fn new(sql: Arc<dyn SQLStore>) -> Self {
        Self { sql }
    }

    /// The ordered drug must exist and have enough stock at order time.
    ///
    /// Both are store lookups, so they live here rather than in the pure
    /// validation pipeline. Stock is not decremented — that stays a drug
    /// update.
    fn check_drug(&self, order: &Order) -> Result<(), ServiceError> {
        let rows = self
            .sql
            .query(
                "SELECT stock FROM drugs WHERE id = ?1",
                &[Value::Text(order.drug_id.clone())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("drugs/{}", order.drug_id)))?;
        let stock = row.get_i64("stock").unwrap_or(0);

        if order.quantity > stock {
            return Err(ServiceError::Conflict(format!(
                "insufficient stock for drug {}: {} in stock, {} ordered",
                order.drug_id, stock, order.quantity
            )));
        }
        Ok(())
    }

    fn indexes(order: &Order) -> Vec<(&'static str, Value)> {
        vec![
            ("drug_id", Value::Text(order.drug_id.clone())),
            ("quantity", Value::Integer(order.quantity)),
            ("placed_by", Value::Text(order.placed_by.clone())),
            ("created_at", Value::Text(order.created_at.clone())),
            ("updated_at", Value::Text(order.updated_at.clone())),
        ]
    }
}

impl Repository<Order> for OrderRepository {
    fn create(&self, order: &Order) -> Result<String, ServiceError> {
        self.check_drug(order)?;
        insert_record(self.sql.as_ref(), TABLE, &order.id, order, &Self::indexes(order))?;
        tracing::info!(
            id = %order.id,
            drug = %order.drug_id,
            quantity = order.quantity,
            "order placed"
        );
        Ok(order.id.clone())
    }

    fn get_by_id(&self, id: &str) -> Result<Order, ServiceError> {
        get_record(self.sql.as_ref(), TABLE, id)
    }

    fn list(&self, params: &ListParams) -> Result<ListResult<Order>, ServiceError> {
        list_records(self.sql.as_ref(), TABLE, params)
    }

    fn update(&self, id: &str, order: &Order) -> Result<(), ServiceError> {
        self.check_drug(order)?;
        update_record(self.sql.as_ref(), TABLE, id, order, &Self::indexes(order))
    }

    fn delete(&self, id: &str) -> Result<(), ServiceError> {
        delete_record(self.sql.as_ref(), TABLE, id)
    }
}

#[cfg(test)]
mod tests {
    use pharmacy_sql::SqliteStore;

    use super::*;
    use crate::model::{Drug, DrugDto, OrderDto};
    use crate::repo::Repositories;

    fn repos() -> Repositories {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        Repositories::new(sql).unwrap()
    }

    fn seeded_drug(repos: &Repositories, stock: i64) -> Drug {
        let drug = Drug::new(&DrugDto {
            name: "Amoxicillin".into(),
            description: None,
            price: 8.0,
            stock,
            supplier_id: None,
        });
        repos.drugs.create(&drug).unwrap();
        drug
    }

    fn order_for(drug_id: &str, quantity: i64) -> Order {
        Order::new(
            &OrderDto {
                drug_id: drug_id.into(),
                quantity,
                note: None,
            },
            "dr_jones",
        )
    }

    #[test]
    fn order_against_existing_drug() {
        let repos = repos();
        let drug = seeded_drug(&repos, 10);
        let order = order_for(&drug.id, 3);
        let id = repos.orders.create(&order).unwrap();
        assert_eq!(repos.orders.get_by_id(&id).unwrap(), order);
    }

    #[test]
    fn unknown_drug_is_not_found() {
        let repos = repos();
        let err = repos.orders.create(&order_for("missing", 1)).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn over_stock_order_conflicts() {
        let repos = repos();
        let drug = seeded_drug(&repos, 2);
        let err = repos.orders.create(&order_for(&drug.id, 3)).unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_EXISTS");

        // Exactly the stock is still fine.
        repos.orders.create(&order_for(&drug.id, 2)).unwrap();
    }

    #[test]
    fn delete_twice_then_not_found() {
        let repos = repos();
        let drug = seeded_drug(&repos, 10);
        let id = repos.orders.create(&order_for(&drug.id, 1)).unwrap();
        assert!(repos.orders.delete(&id).is_ok());
        assert_eq!(repos.orders.delete(&id).unwrap_err().error_code(), "NOT_FOUND");
    }
}
