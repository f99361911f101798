use serde::{Deserialize, Serialize};

use pharmacy_core::{Validate, ValidationError, new_id, now_rfc3339};

use crate::validate::{check_min_i64, require};

/// Order — a request for a quantity of one drug.
///
/// Referential integrity (the drug must exist) and the stock ceiling are
/// store-level invariants checked by the order repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// The ordered drug.
    pub drug_id: String,

    /// Ordered units. At least 1.
    pub quantity: i64,

    /// Subject of the principal that placed the order.
    pub placed_by: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

/// Input shape for placing or replacing an order. The placing identity
/// comes from the verified Principal, never from the payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub drug_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub note: Option<String>,
}

impl Order {
    pub fn new(dto: &OrderDto, placed_by: &str) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            drug_id: dto.drug_id.clone(),
            quantity: dto.quantity,
            placed_by: placed_by.to_string(),
            note: dto.note.clone(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn apply(&self, dto: &OrderDto) -> Self {
        Self {
            id: self.id.clone(),
            drug_id: dto.drug_id.clone(),
            quantity: dto.quantity,
            placed_by: self.placed_by.clone(),
            note: dto.note.clone(),
            created_at: self.created_at.clone(),
            updated_at: now_rfc3339(),
        }
    }
}

impl Validate for OrderDto {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::new();
        require(&mut err, "drugId", &self.drug_id);
        check_min_i64(&mut err, "quantity", self.quantity, 1);
        err.into_result()
    }
}
