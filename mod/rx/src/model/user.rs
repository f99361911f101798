use serde::{Deserialize, Serialize};

use pharmacy_core::{Validate, ValidationError, new_id, now_rfc3339};

use crate::validate::{check_email, check_license_number, check_min_len, check_username, require};

/// AdminUser — a login identity with the `admin` role.
///
/// The stored JSON carries the argon2id hash, never the plain password;
/// API responses go through [`UserView`] which omits it entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Login name, unique.
    pub username: String,

    /// Argon2id password hash.
    pub password_hash: String,

    pub full_name: String,

    pub email: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

/// DoctorUser — a login identity with the `doctor` role, carrying the
/// medical license number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorUser {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Login name, unique.
    pub username: String,

    /// Argon2id password hash.
    pub password_hash: String,

    pub full_name: String,

    pub email: String,

    /// Medical license number (XX-00000).
    pub license_number: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

/// Input shape for creating or replacing an admin user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserDto {
    pub username: String,
    /// Plain password; hashed before the entity is built.
    pub password: String,
    pub full_name: String,
    pub email: String,
}

/// Input shape for creating or replacing a doctor user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorUserDto {
    pub username: String,
    /// Plain password; hashed before the entity is built.
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub license_number: String,
}

/// Response shape for both user kinds — no password material.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl AdminUser {
    pub fn new(dto: &AdminUserDto, password_hash: String) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            username: dto.username.clone(),
            password_hash,
            full_name: dto.full_name.clone(),
            email: dto.email.clone(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn apply(&self, dto: &AdminUserDto, password_hash: String) -> Self {
        Self {
            id: self.id.clone(),
            username: dto.username.clone(),
            password_hash,
            full_name: dto.full_name.clone(),
            email: dto.email.clone(),
            created_at: self.created_at.clone(),
            updated_at: now_rfc3339(),
        }
    }
}

impl DoctorUser {
    pub fn new(dto: &DoctorUserDto, password_hash: String) -> Self {
        let now = now_rfc3339();
        Self {
            id: new_id(),
            username: dto.username.clone(),
            password_hash,
            full_name: dto.full_name.clone(),
            email: dto.email.clone(),
            license_number: dto.license_number.clone(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn apply(&self, dto: &DoctorUserDto, password_hash: String) -> Self {
        Self {
            id: self.id.clone(),
            username: dto.username.clone(),
            password_hash,
            full_name: dto.full_name.clone(),
            email: dto.email.clone(),
            license_number: dto.license_number.clone(),
            created_at: self.created_at.clone(),
            updated_at: now_rfc3339(),
        }
    }
}

impl From<&AdminUser> for UserView {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            license_number: None,
            created_at: user.created_at.clone(),
            updated_at: user.updated_at.clone(),
        }
    }
}

impl From<&DoctorUser> for UserView {
    fn from(user: &DoctorUser) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            license_number: Some(user.license_number.clone()),
            created_at: user.created_at.clone(),
            updated_at: user.updated_at.clone(),
        }
    }
}

impl Validate for AdminUserDto {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::new();
        require(&mut err, "username", &self.username);
        check_username(&mut err, "username", &self.username);
        require(&mut err, "password", &self.password);
        check_min_len(&mut err, "password", &self.password, 8);
        require(&mut err, "fullName", &self.full_name);
        require(&mut err, "email", &self.email);
        check_email(&mut err, "email", &self.email);
        err.into_result()
    }
}

impl Validate for DoctorUserDto {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::new();
        require(&mut err, "username", &self.username);
        check_username(&mut err, "username", &self.username);
        require(&mut err, "password", &self.password);
        check_min_len(&mut err, "password", &self.password, 8);
        require(&mut err, "fullName", &self.full_name);
        require(&mut err, "email", &self.email);
        check_email(&mut err, "email", &self.email);
        require(&mut err, "licenseNumber", &self.license_number);
        check_license_number(&mut err, "licenseNumber", &self.license_number);
        err.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor_dto() -> DoctorUserDto {
        DoctorUserDto {
            username: "dr_jones".into(),
            password: "correct-horse".into(),
            full_name: "Indiana Jones".into(),
            email: "jones@clinic.example".into(),
            license_number: "MD-48291".into(),
        }
    }

    #[test]
    fn valid_doctor_passes() {
        assert!(doctor_dto().validate().is_ok());
    }

    #[test]
    fn bad_license_is_format_violation() {
        let err = DoctorUserDto {
            license_number: "48291".into(),
            ..doctor_dto()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "licenseNumber");
        assert_eq!(err.violations[0].rule, "format");
    }

    #[test]
    fn short_password_is_range_violation() {
        let err = AdminUserDto {
            username: "alice".into(),
            password: "short".into(),
            full_name: "Alice".into(),
            email: "alice@example.com".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, "range");
    }

    #[test]
    fn uppercase_username_rejected() {
        let err = AdminUserDto {
            username: "Alice".into(),
            password: "long-enough".into(),
            full_name: "Alice".into(),
            email: "alice@example.com".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.violations[0].field, "username");
    }

    #[test]
    fn view_omits_password_material() {
        let user = AdminUser::new(
            &AdminUserDto {
                username: "alice".into(),
                password: "irrelevant-here".into(),
                full_name: "Alice".into(),
                email: "alice@example.com".into(),
            },
            "fake-hash".into(),
        );
        let view = UserView::from(&user);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("fake-hash"));
        assert!(!json.contains("password"));
    }
}
