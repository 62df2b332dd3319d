use crate::config::LogFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BenchError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: Option<ServiceSection>,
    pub server: Option<ServerSection>,
    pub logging: Option<LoggingSection>,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSection {
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub worker_threads: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
}

fn env_placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BenchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| BenchError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${NAME}` with the environment value; unknown names are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn app_version(&self) -> Option<&str> {
        self.service.as_ref()?.version.as_deref()
    }

    fn host(&self) -> Option<&str> {
        self.server.as_ref()?.host.as_deref()
    }

    fn port(&self) -> Option<u16> {
        self.server.as_ref()?.port
    }

    fn worker_threads(&self) -> Option<usize> {
        self.server.as_ref()?.worker_threads
    }

    fn json_logs(&self) -> Option<bool> {
        self.logging
            .as_ref()?
            .format
            .map(|format| format == LogFormat::Json)
    }

    fn monitor(&self) -> Option<bool> {
        self.monitoring.as_ref().map(|m| m.enabled)
    }
}
