use serde::{Deserialize, Serialize};

use pharmacy_core::validation::rule;
use pharmacy_core::{Validate, ValidationError, new_id, now_rfc3339};

use crate::validate::{check_min_i64, check_non_negative_f64, check_rfc3339, require};

/// SalesReport — aggregated sales figures for a reporting period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Period start, RFC 3339.
    pub period_start: String,

    /// Period end, RFC 3339. Never before the start.
    pub period_end: String,

    /// Total sales value over the period.
    pub total_sales: f64,

    /// Units sold over the period.
    pub units_sold: i64,

    /// Subject of the principal that generated the report.
    pub generated_by: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

/// Input shape for creating or replacing a sales report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportDto {
    pub period_start: String,
    pub period_end: String,
    pub total_sales: f64,
    pub units_sold: i64,
}

impl SalesReport {
    pub fn new(dto: &SalesReportDto, generated_by: &str) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            period_start: dto.period_start.clone(),
            period_end: dto.period_end.clone(),
            total_sales: dto.total_sales,
            units_sold: dto.units_sold,
            generated_by: generated_by.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn apply(&self, dto: &SalesReportDto) -> Self {
        Self {
            id: self.id.clone(),
            period_start: dto.period_start.clone(),
            period_end: dto.period_end.clone(),
            total_sales: dto.total_sales,
            units_sold: dto.units_sold,
            generated_by: self.generated_by.clone(),
            created_at: self.created_at.clone(),
            updated_at: now_rfc3339(),
        }
    }
}

impl Validate for SalesReportDto {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::new();

        require(&mut err, "periodStart", &self.period_start);
        require(&mut err, "periodEnd", &self.period_end);
        check_rfc3339(&mut err, "periodStart", &self.period_start);
        check_rfc3339(&mut err, "periodEnd", &self.period_end);

        // Cross-field rule, only meaningful once both ends parse.
        if let (Ok(start), Ok(end)) = (
            chrono::DateTime::parse_from_rfc3339(&self.period_start),
            chrono::DateTime::parse_from_rfc3339(&self.period_end),
        ) {
            if start > end {
                err.push(
                    "periodEnd",
                    rule::CROSS_FIELD,
                    "periodEnd must not be before periodStart",
                );
            }
        }

        check_non_negative_f64(&mut err, "totalSales", self.total_sales);
        check_min_i64(&mut err, "unitsSold", self.units_sold, 0);
        err.into_result()
    }
}
