use std::collections::HashMap;

use pharmacy_core::ServiceError;

use crate::error::ConfigError;
use crate::model::{Principal, Role};

/// Well-known policy names, referenced by the routing layer per endpoint.
pub const ADMIN_POLICY: &str = "AdminPolicy";
pub const DOCTOR_POLICY: &str = "DoctorPolicy";
pub const STAFF_POLICY: &str = "StaffPolicy";

/// A rule over a Principal's role claim.
///
/// Authorization in this system is purely role-based, so rules form a
/// closed set and evaluation is O(1) and side-effect-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyRule {
    /// Principal's role must equal the given role.
    RequireRole(Role),

    /// Any verified Principal passes (still requires authentication).
    AnyRole,
}

impl PolicyRule {
    fn matches(&self, principal: &Principal) -> bool {
        match self {
            PolicyRule::RequireRole(role) => principal.role == *role,
            PolicyRule::AnyRole => true,
        }
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Named policy table. Registered once at startup, write-once per name,
/// then shared immutably for the process lifetime.
#[derive(Debug, Default)]
pub struct PolicyRegistry {
    rules: HashMap<String, PolicyRule>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named rule. Re-registering an existing name is a
    /// configuration error.
    pub fn register(&mut self, name: &str, rule: PolicyRule) -> Result<(), ConfigError> {
        if self.rules.contains_key(name) {
            return Err(ConfigError::DuplicatePolicy(name.to_string()));
        }
        self.rules.insert(name.to_string(), rule);
        Ok(())
    }

    /// Evaluate a named policy against a Principal.
    ///
    /// Unknown policy names deny (fail-closed).
    pub fn authorize(&self, principal: &Principal, policy: &str) -> Decision {
        match self.rules.get(policy) {
            Some(rule) if rule.matches(principal) => Decision::Allow,
            _ => Decision::Deny,
        }
    }

    /// [`Self::authorize`] adapted to handler signatures: `Deny` becomes a
    /// `PermissionDenied` service error.
    pub fn require(&self, principal: &Principal, policy: &str) -> Result<(), ServiceError> {
        match self.authorize(principal, policy) {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(ServiceError::PermissionDenied(format!(
                "role '{}' does not satisfy policy '{}'",
                principal.role, policy
            ))),
        }
    }

    /// The default policy set registered by the server binary.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.register(ADMIN_POLICY, PolicyRule::RequireRole(Role::Admin))?;
        registry.register(DOCTOR_POLICY, PolicyRule::RequireRole(Role::Doctor))?;
        registry.register(STAFF_POLICY, PolicyRule::AnyRole)?;
        Ok(registry)
    }
}
