#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::domain::model::{ServiceIdentity, DEFAULT_VERSION};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BenchError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(BenchError::invalid_value(
                "log_format",
                other,
                "expected 'compact' or 'json'",
            )),
        }
    }
}

/// Fully resolved settings for one service process. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub identity: ServiceIdentity,
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
    pub log_format: LogFormat,
    pub monitor: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            identity: ServiceIdentity::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            worker_threads: None,
            log_format: LogFormat::Compact,
            monitor: false,
        }
    }
}

impl ServiceConfig {
    /// Merges layers ordered from highest to lowest precedence; values no
    /// layer sets fall back to the defaults.
    pub fn resolve(layers: &[&dyn ConfigProvider]) -> Self {
        fn first<T>(
            layers: &[&dyn ConfigProvider],
            pick: impl Fn(&dyn ConfigProvider) -> Option<T>,
        ) -> Option<T> {
            layers.iter().find_map(|layer| pick(*layer))
        }

        let version = first(layers, |l| l.app_version().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let json_logs = first(layers, |l| l.json_logs()).unwrap_or(false);

        Self {
            identity: ServiceIdentity::new(version),
            host: first(layers, |l| l.host().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: first(layers, |l| l.port()).unwrap_or(DEFAULT_PORT),
            worker_threads: first(layers, |l| l.worker_threads()),
            log_format: if json_logs {
                LogFormat::Json
            } else {
                LogFormat::Compact
            },
            monitor: first(layers, |l| l.monitor()).unwrap_or(false),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_non_empty_string("app_version", &self.identity.version)?;
        validate_positive_number("port", self.port as usize, 1)?;
        if let Some(threads) = self.worker_threads {
            validate_positive_number("worker_threads", threads, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::EnvConfig;
    use crate::config::toml_config::TomlConfig;

    #[test]
    fn test_defaults_without_layers() {
        let config = ServiceConfig::resolve(&[]);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.identity.version, "v1");
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_higher_layer_wins() {
        let env = EnvConfig {
            app_version: Some("v-env".to_string()),
            port: Some(9000),
            ..EnvConfig::default()
        };
        let file = TomlConfig::from_toml_str(
            "[service]\nversion = \"v-file\"\n[server]\nhost = \"127.0.0.1\"\nport = 7000\n",
        )
        .unwrap();

        let config = ServiceConfig::resolve(&[&env, &file]);
        assert_eq!(config.identity.version, "v-env");
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" Compact ".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_validation() {
        assert!(ServiceConfig::default().validate().is_ok());

        let zero_port = ServiceConfig {
            port: 0,
            ..ServiceConfig::default()
        };
        assert!(zero_port.validate().is_err());

        let blank_version = ServiceConfig {
            identity: ServiceIdentity::new(" "),
            ..ServiceConfig::default()
        };
        assert!(blank_version.validate().is_err());
    }
}
