use std::sync::Arc;

use pharmacy_core::{ListParams, ListResult, ServiceError};
use pharmacy_sql::{SQLStore, Value};

use crate::model::SalesReport;
use crate::repo::{
    Repository, delete_record, get_record, insert_record, list_records, update_record,
};

const TABLE: &str = "sales_reports";

pub struct SalesReportRepository {
    sql: Arc<dyn SQLStore>,
}

impl SalesReportRepository {
    pub fn new(sql: Arc<dyn SQLStore>) -> Self {
        Self { sql }
    }

    fn indexes(report: &SalesReport) -> Vec<(&'static str, Value)> {
        vec![
            ("period_start", Value::Text(report.period_start.clone())),
            ("period_end", Value::Text(report.period_end.clone())),
            ("generated_by", Value::Text(report.generated_by.clone())),
            ("created_at", Value::Text(report.created_at.clone())),
            ("updated_at", Value::Text(report.updated_at.clone())),
        ]
    }
}

impl Repository<SalesReport> for SalesReportRepository {
    fn create(&self, report: &SalesReport) -> Result<String, ServiceError> {
        insert_record(self.sql.as_ref(), TABLE, &report.id, report, &Self::indexes(report))?;
        Ok(report.id.clone())
    }

    fn get_by_id(&self, id: &str) -> Result<SalesReport, ServiceError> {
        get_record(self.sql.as_ref(), TABLE, id)
    }

    fn list(&self, params: &ListParams) -> Result<ListResult<SalesReport>, ServiceError> {
        list_records(self.sql.as_ref(), TABLE, params)
    }

    fn update(&self, id: &str, report: &SalesReport) -> Result<(), ServiceError> {
        update_record(self.sql.as_ref(), TABLE, id, report, &Self::indexes(report))
    }

    fn delete(&self, id: &str) -> Result<(), ServiceError> {
        delete_record(self.sql.as_ref(), TABLE, id)
    }
}

#[cfg(test)]
mod tests {
    use pharmacy_sql::SqliteStore;

    use super::*;
    use crate::model::SalesReportDto;
    use crate::repo::Repositories;

    fn repos() -> Repositories {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        Repositories::new(sql).unwrap()
    }

    fn report() -> SalesReport {
        SalesReport::new(
            &SalesReportDto {
                period_start: "2026-01-01T00:00:00+00:00".into(),
                period_end: "2026-01-31T23:59:59+00:00".into(),
                total_sales: 999.5,
                units_sold: 42,
            },
            "alice",
        )
    }

    #[test]
    fn crud_cycle() {
        let repos = repos();
        let r = report();
        let id = repos.sales_reports.create(&r).unwrap();
        assert_eq!(repos.sales_reports.get_by_id(&id).unwrap(), r);

        let updated = r.apply(&SalesReportDto {
            period_start: r.period_start.clone(),
            period_end: r.period_end.clone(),
            total_sales: 1000.0,
            units_sold: 43,
        });
        repos.sales_reports.update(&id, &updated).unwrap();
        assert_eq!(repos.sales_reports.get_by_id(&id).unwrap().units_sold, 43);

        repos.sales_reports.delete(&id).unwrap();
        assert_eq!(
            repos.sales_reports.get_by_id(&id).unwrap_err().error_code(),
            "NOT_FOUND"
        );
    }
}
