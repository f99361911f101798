//! Bootstrap — first-start checks and the initial admin account.
//!
//! When pharmacyd starts:
//! 1. Verify the configuration is usable — if not, refuse to start.
//! 2. Ensure the configured admin user exists in the database.

use pharmacy_core::{new_id, now_rfc3339};
use pharmacy_rx::model::AdminUser;
use pharmacy_rx::repo::{Repositories, Repository};
use tracing::info;

use crate::config::ServerConfig;

/// Verify server configuration is ready for use. The JWT secret gets its
/// own strength check when the token service is constructed.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.bootstrap.admin_username.is_empty() {
        anyhow::bail!("bootstrap.admin_username is empty in configuration");
    }
    if config.bootstrap.admin_password_hash.is_empty() {
        anyhow::bail!(
            "No admin password hash found in configuration.\n\
             Generate one with an argon2id tool and set bootstrap.admin_password_hash."
        );
    }
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("storage.data_dir is empty in configuration");
    }
    Ok(())
}

/// Ensure the configured admin user exists. Creates it if missing.
pub fn ensure_admin(repos: &Repositories, config: &ServerConfig) -> anyhow::Result<()> {
    let username = &config.bootstrap.admin_username;

    if repos.admin_users.find_by_username(username)?.is_some() {
        info!(username = %username, "bootstrap admin already exists");
        return Ok(());
    }

    let now = now_rfc3339();
    let admin = AdminUser {
        id: new_id(),
        username: username.clone(),
        password_hash: config.bootstrap.admin_password_hash.clone(),
        full_name: "Administrator".to_string(),
        email: "admin@pharmacy.local".to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    repos.admin_users.create(&admin)?;
    info!(username = %username, "created bootstrap admin");
    Ok(())
}
