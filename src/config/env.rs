use crate::config::LogFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BenchError, Result};
use std::env;

/// Settings read from the process environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub app_version: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub worker_threads: Option<usize>,
    pub log_format: Option<LogFormat>,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the layer from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|e| {
                BenchError::invalid_value("PORT", &raw, format!("not a valid port: {}", e))
            })?),
            None => None,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => Some(raw.parse::<LogFormat>()?),
            None => None,
        };

        Ok(Self {
            app_version: lookup("APP_VERSION"),
            host: lookup("HOST"),
            port,
            worker_threads: lookup("WORKER_THREADS").and_then(|raw| parse_worker_threads(&raw)),
            log_format,
        })
    }
}

/// Zero, blank or garbage falls back to the runtime default.
fn parse_worker_threads(raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<usize>() {
        Ok(0) => {
            eprintln!("Warning: WORKER_THREADS=0 is invalid (must be > 0), using default");
            None
        }
        Ok(n) => Some(n),
        Err(e) => {
            eprintln!(
                "Warning: WORKER_THREADS='{}' is not a valid number ({}), using default",
                trimmed, e
            );
            None
        }
    }
}

impl ConfigProvider for EnvConfig {
    fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }

    fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    fn port(&self) -> Option<u16> {
        self.port
    }

    fn worker_threads(&self) -> Option<usize> {
        self.worker_threads
    }

    fn json_logs(&self) -> Option<bool> {
        self.log_format.map(|format| format == LogFormat::Json)
    }

    fn monitor(&self) -> Option<bool> {
        None
    }
}
