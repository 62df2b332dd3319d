use crate::domain::ports::ConfigProvider;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "bench-service")]
#[command(about = "HTTP microbenchmark service: health, prime counting and payload endpoints")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Version reported by every endpoint (overrides APP_VERSION)
    #[arg(long)]
    pub app_version: Option<String>,

    /// Tokio worker threads (overrides WORKER_THREADS)
    #[arg(long)]
    pub worker_threads: Option<usize>,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    /// Log process CPU and memory after startup and at shutdown
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
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

    // flags only override when set
    fn json_logs(&self) -> Option<bool> {
        self.json_logs.then_some(true)
    }

    fn monitor(&self) -> Option<bool> {
        self.monitor.then_some(true)
    }
}
