use serde::{Deserialize, Serialize};

use pharmacy_core::{Validate, ValidationError, new_id, now_rfc3339};

use crate::validate::{check_min_i64, check_positive_f64, require};

/// Drug — a stock item in the pharmacy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Drug {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Trade name.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price.
    pub price: f64,

    /// Units currently in stock. Never negative.
    pub stock: i64,

    /// Supplier this drug is sourced from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

/// Input shape for creating or replacing a drug.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub supplier_id: Option<String>,
}

impl Drug {
    /// Build a fresh entity from a validated DTO.
    pub fn new(dto: &DrugDto) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            name: dto.name.clone(),
            description: dto.description.clone(),
            price: dto.price,
            stock: dto.stock,
            supplier_id: dto.supplier_id.clone(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replace the mutable fields from a validated DTO, keeping identity
    /// and creation time.
    pub fn apply(&self, dto: &DrugDto) -> Self {
        Self {
            id: self.id.clone(),
            name: dto.name.clone(),
            description: dto.description.clone(),
            price: dto.price,
            stock: dto.stock,
            supplier_id: dto.supplier_id.clone(),
            created_at: self.created_at.clone(),
            updated_at: now_rfc3339(),
        }
    }
}

impl Validate for DrugDto {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::new();
        require(&mut err, "name", &self.name);
        check_positive_f64(&mut err, "price", self.price);
        check_min_i64(&mut err, "stock", self.stock, 0);
        err.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> DrugDto {
        DrugDto {
            name: "Aspirin 500mg".into(),
            description: None,
            price: 4.99,
            stock: 120,
            supplier_id: None,
        }
    }

    #[test]
    fn valid_dto_passes() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn negative_stock_is_range_violation() {
        let err = DrugDto { stock: -1, ..dto() }.validate().unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "stock");
        assert_eq!(err.violations[0].rule, "range");
    }

    #[test]
    fn all_violations_collected() {
        // Three independent rules broken, three violations reported.
        let err = DrugDto {
            name: "".into(),
            price: 0.0,
            stock: -5,
            ..dto()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.violations.len(), 3);
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "price", "stock"]);
    }

    #[test]
    fn apply_keeps_identity() {
        let drug = Drug::new(&dto());
        let updated = drug.apply(&DrugDto { stock: 80, ..dto() });
        assert_eq!(updated.id, drug.id);
        assert_eq!(updated.created_at, drug.created_at);
        assert_eq!(updated.stock, 80);
    }
}
