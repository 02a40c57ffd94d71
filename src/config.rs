//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/quicklegal/config.toml`,
//! overridable with the `QUICKLEGAL_CONFIG` environment variable). Every
//! section is optional; missing sections fall back to their defaults, so
//! an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quicklegal")
        .join("config.toml")
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// REST API listener
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Storage backend
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSection {
    /// SeaORM connection URL
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./quicklegal.db?mode=rwc".to_string(),
        }
    }
}

/// Lock backend and shared cache
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
        }
    }
}

/// Outbound mail relay. Left empty, the service falls back to a logging
/// no-op mailer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmtpConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub from_address: String,
}

fn default_smtp_port() -> u16 {
    587
}

impl SmtpConfig {
    /// SMTP is used only when a relay host and sender address are set.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.from_address.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// tracing env-filter directive, e.g. "info" or "quicklegal_booking=debug"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.address(), "0.0.0.0:8000");
        assert_eq!(cfg.redis.url, "redis://localhost:6379");
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.smtp.is_configured());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9001

            [smtp]
            host = "smtp.example.com"
            from_address = "noreply@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.address(), "127.0.0.1:9001");
        assert!(cfg.smtp.is_configured());
        assert_eq!(cfg.smtp.port, 587);
        assert_eq!(cfg.database.url, "sqlite://./quicklegal.db?mode=rwc");
    }

    #[test]
    fn smtp_needs_host_and_sender() {
        let mut cfg = SmtpConfig::default();
        assert!(!cfg.is_configured());
        cfg.host = "smtp.example.com".to_string();
        assert!(!cfg.is_configured());
        cfg.from_address = "noreply@example.com".to_string();
        assert!(cfg.is_configured());
    }

    #[test]
    fn garbage_fails_to_parse() {
        assert!(toml::from_str::<AppConfig>("server = 5").is_err());
    }
}
