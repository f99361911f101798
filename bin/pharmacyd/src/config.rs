use std::path::Path;

use serde::Deserialize;

/// Server configuration, loaded from a TOML file at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// HS256 signing secret. Strength is checked when the token service
    /// is built; an unusable secret refuses startup.
    pub secret: String,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_audience")]
    pub audience: String,

    #[serde(default = "default_expire_secs")]
    pub expire_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the SQLite database.
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Admin account ensured at first start.
    pub admin_username: String,

    /// Argon2id hash of the admin password. Plain passwords never appear
    /// in configuration.
    pub admin_password_hash: String,
}

fn default_issuer() -> String {
    "pharmacyd".to_string()
}

fn default_audience() -> String {
    "pharmacy-api".to_string()
}

fn default_expire_secs() -> i64 {
    86400 // 24h
}

impl ServerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("cannot parse config {}: {}", path.display(), e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let raw = r#"
            [jwt]
            secret = "0123456789abcdef0123456789abcdef"

            [storage]
            data_dir = "/var/lib/pharmacy"

            [bootstrap]
            admin_username = "admin"
            admin_password_hash = "$argon2id$v=19$m=19456,t=2,p=1$abc$def"
        "#;
        let config: ServerConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.jwt.issuer, "pharmacyd");
        assert_eq!(config.jwt.audience, "pharmacy-api");
        assert_eq!(config.jwt.expire_secs, 86400);
        assert_eq!(config.storage.data_dir, "/var/lib/pharmacy");
        assert_eq!(config.bootstrap.admin_username, "admin");
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pharmacyd.toml");
        std::fs::write(
            &path,
            r#"
                [jwt]
                secret = "0123456789abcdef0123456789abcdef"

                [storage]
                data_dir = "/tmp"

                [bootstrap]
                admin_username = "admin"
                admin_password_hash = "hash"
            "#,
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.bootstrap.admin_username, "admin");
        assert!(ServerConfig::load(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn explicit_values_win() {
        let raw = r#"
            [jwt]
            secret = "0123456789abcdef0123456789abcdef"
            issuer = "test-issuer"
            audience = "test-audience"
            expire_secs = 60

            [storage]
            data_dir = "/tmp"

            [bootstrap]
            admin_username = "root"
            admin_password_hash = "hash"
        "#;
        let config: ServerConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.jwt.issuer, "test-issuer");
        assert_eq!(config.jwt.expire_secs, 60);
    }
}
