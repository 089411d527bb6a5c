//! Service configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::{Deserialize, Serialize};

/// Rateplan service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// Seed pricing profiles at start-up
    pub seed_on_start: bool,
    /// Seed file replacing the embedded seed
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
    /// Filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_PORT,
            seed_on_start: true,
            seed_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from `.env` and `RATEPLAN_` prefixed variables.
    ///
    /// A bare `PORT` variable takes priority over `RATEPLAN_PORT`.
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::from_env(Environment::with_prefix("RATEPLAN"))?;

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }

        Ok(cfg)
    }

    /// Layer an environment source over the defaults
    pub fn from_env(env: Environment) -> Result<Self> {
        let defaults = Self::default();
        Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("seed_on_start", defaults.seed_on_start)?
            .set_default("log_filter", defaults.log_filter)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
            .context("invalid service configuration")
    }

    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("RATEPLAN").source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let cfg = ServiceConfig::from_env(env(&[])).unwrap();
        assert_eq!(cfg, ServiceConfig::default());
        assert_eq!(cfg.addr().unwrap().port(), crate::DEFAULT_PORT);
    }

    #[test]
    fn test_environment_overrides() {
        let cfg = ServiceConfig::from_env(env(&[
            ("RATEPLAN_HOST", "127.0.0.1"),
            ("RATEPLAN_PORT", "9090"),
            ("RATEPLAN_SEED_ON_START", "false"),
            ("RATEPLAN_SEED_PATH", "/etc/rateplan/seed.json"),
        ]))
        .unwrap();

        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9090);
        assert!(!cfg.seed_on_start);
        assert_eq!(cfg.seed_path, Some(PathBuf::from("/etc/rateplan/seed.json")));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(ServiceConfig::from_env(env(&[("RATEPLAN_PORT", "not-a-port")])).is_err());
    }
}
