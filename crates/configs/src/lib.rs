use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub keepalive: KeepAliveConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Pre-built admin/public bundle served for unmatched paths.
    #[serde(default)]
    pub static_dir: Option<String>,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            worker_threads: Some(4),
            static_dir: None,
            log_format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// Admin account created at startup when missing.
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            admin_email: None,
            admin_password: None,
            admin_name: default_admin_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeepAliveConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_keepalive_interval")]
    pub interval_secs: u64,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self { enabled: true, interval_secs: default_keepalive_interval() }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }
fn default_log_format() -> String { "compact".into() }
fn default_token_ttl_hours() -> i64 { 12 }
fn default_admin_name() -> String { "Administrator".into() }
fn default_keepalive_interval() -> u64 { 300 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Config file when present, otherwise environment only; then normalized.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.keepalive.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Some(host) = env_opt("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = env_opt("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(w) = env_opt("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
        if let Some(fmt) = env_opt("LOG_FORMAT") {
            self.log_format = fmt;
        }
        if self.static_dir.is_none() {
            self.static_dir = env_opt("STATIC_DIR");
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Some(url) = env_opt("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        let supported = ["postgresql://", "postgres://", "sqlite:"];
        if !supported.iter().any(|p| lower.starts_with(p)) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.jwt_secret.trim().is_empty() {
            if let Some(secret) = env_opt("JWT_SECRET") {
                self.jwt_secret = secret;
            }
        }
        if self.admin_email.is_none() {
            self.admin_email = env_opt("ADMIN_EMAIL");
        }
        if self.admin_password.is_none() {
            self.admin_password = env_opt("ADMIN_PASSWORD");
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret is empty; set it in config.toml or JWT_SECRET"));
        }
        if self.token_ttl_hours <= 0 {
            return Err(anyhow!("auth.token_ttl_hours must be positive"));
        }
        if self.admin_email.is_some() != self.admin_password.is_some() {
            return Err(anyhow!("auth.admin_email and auth.admin_password must be set together"));
        }
        Ok(())
    }

    /// Bootstrap admin credentials, when both halves are configured.
    pub fn bootstrap_admin(&self) -> Option<(&str, &str)> {
        match (&self.admin_email, &self.admin_password) {
            (Some(e), Some(p)) => Some((e.as_str(), p.as_str())),
            _ => None,
        }
    }
}

impl KeepAliveConfig {
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.interval_secs == 0 {
            return Err(anyhow!("keepalive.interval_secs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[server]
host = "0.0.0.0"
port = 9000
static_dir = "public"

[database]
url = "sqlite::memory:"
max_connections = 4
min_connections = 1

[auth]
jwt_secret = "s3cret"
admin_email = "admin@example.com"
admin_password = "changeme123"

[keepalive]
interval_secs = 60
"#;

    #[test]
    fn parses_full_document() {
        let cfg = parse(SAMPLE).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.static_dir.as_deref(), Some("public"));
        assert_eq!(cfg.database.max_connections, 4);
        assert!(cfg.database.auto_migrate);
        assert_eq!(cfg.auth.token_ttl_hours, 12);
        assert_eq!(cfg.auth.bootstrap_admin(), Some(("admin@example.com", "changeme123")));
        assert_eq!(cfg.keepalive.interval_secs, 60);
        assert!(cfg.keepalive.enabled);
    }

    #[test]
    fn sections_default_when_missing() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.database.min_connections, 2);
        assert_eq!(cfg.keepalive.interval_secs, 300);
        assert_eq!(cfg.server.log_format, "compact");
    }

    #[test]
    fn database_validation_rejects_bad_values() {
        let mut db = DatabaseConfig { url: "mysql://x".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
        db.url = "postgres://localhost/portfolio".into();
        assert!(db.validate().is_ok());
        db.min_connections = 5;
        db.max_connections = 2;
        assert!(db.validate().is_err());
        db.max_connections = 5;
        db.acquire_timeout_secs = 0;
        assert!(db.validate().is_err());
    }

    #[test]
    fn auth_requires_secret_and_paired_admin() {
        let mut auth = AuthConfig::default();
        assert!(auth.validate().is_err());
        auth.jwt_secret = "k".into();
        assert!(auth.validate().is_ok());
        auth.admin_email = Some("a@b.c".into());
        assert!(auth.validate().is_err());
        auth.admin_password = Some("pw".into());
        assert!(auth.validate().is_ok());
    }

    #[test]
    fn server_normalize_fills_defaults() {
        let mut s = ServerConfig { host: " ".into(), port: 80, worker_threads: Some(0), ..ServerConfig::default() };
        s.normalize().unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.worker_threads, Some(4));
        s.port = 0;
        assert!(s.normalize().is_err());
    }

    #[test]
    fn keepalive_zero_interval_only_matters_when_enabled() {
        let mut k = KeepAliveConfig { enabled: true, interval_secs: 0 };
        assert!(k.validate().is_err());
        k.enabled = false;
        assert!(k.validate().is_ok());
    }
}
