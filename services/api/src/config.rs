//! Server configuration

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// HTTP server settings
///
/// # Environment Variables
/// - `APP_HOST`: bind address (default: "0.0.0.0")
/// - `APP_PORT`: bind port (default: 8080)
/// - `APP_MIGRATIONS_DIR`: directory with SQL migrations (default: "migrations")
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub migrations_dir: String,
}

impl AppConfig {
    /// Load settings from the environment on top of the defaults
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("migrations_dir", "migrations")?
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_apply_without_environment() {
        unsafe {
            std::env::remove_var("APP_HOST");
            std::env::remove_var("APP_PORT");
            std::env::remove_var("APP_MIGRATIONS_DIR");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.migrations_dir, "migrations");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn environment_overrides_defaults() {
        unsafe {
            std::env::set_var("APP_HOST", "127.0.0.1");
            std::env::set_var("APP_PORT", "3001");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3001");

        unsafe {
            std::env::remove_var("APP_HOST");
            std::env::remove_var("APP_PORT");
        }
    }

    #[test]
    #[serial]
    fn invalid_port_is_an_error() {
        unsafe {
            std::env::set_var("APP_PORT", "not-a-port");
        }

        assert!(AppConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("APP_PORT");
        }
    }
}
