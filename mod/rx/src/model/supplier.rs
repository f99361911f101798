use serde::{Deserialize, Serialize};

use pharmacy_core::{Validate, ValidationError, new_id, now_rfc3339};

use crate::validate::{check_email, check_phone, require};

/// Supplier — a drug source. Names are unique across the pharmacy
/// (enforced by the repository, not here).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Company name, unique.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

/// Input shape for creating or replacing a supplier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl Supplier {
    pub fn new(dto: &SupplierDto) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            name: dto.name.clone(),
            email: dto.email.clone(),
            phone: dto.phone.clone(),
            address: dto.address.clone(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn apply(&self, dto: &SupplierDto) -> Self {
        Self {
            id: self.id.clone(),
            name: dto.name.clone(),
            email: dto.email.clone(),
            phone: dto.phone.clone(),
            address: dto.address.clone(),
            created_at: self.created_at.clone(),
            updated_at: now_rfc3339(),
        }
    }
}

impl Validate for SupplierDto {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::new();
        require(&mut err, "name", &self.name);
        require(&mut err, "email", &self.email);
        check_email(&mut err, "email", &self.email);
        require(&mut err, "phone", &self.phone);
        check_phone(&mut err, "phone", &self.phone);
        err.into_result()
    }
}
