use std::time::Instant;

use anyhow::Context;
use bench_service::config::{env::EnvConfig, toml_config::TomlConfig};
use bench_service::utils::{logger, validation::Validate};
use bench_service::{server, CliConfig, ServiceConfig};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let boot_start = Instant::now();
    let cli = CliConfig::parse();

    let file = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => TomlConfig::default(),
    };
    let env = EnvConfig::from_env().context("invalid environment")?;

    // flags beat environment, environment beats the file
    let config = ServiceConfig::resolve(&[&cli, &env, &file]);

    logger::init_logger(cli.verbose, config.log_format);
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        return Err(e.into());
    }

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = config.worker_threads {
        builder.worker_threads(threads);
        tracing::debug!("Tokio worker_threads set to: {}", threads);
    }
    let runtime = builder.build().context("failed to build tokio runtime")?;

    runtime.block_on(server::run(config, boot_start)).map_err(|e| {
        tracing::error!("Service failed: {}", e);
        anyhow::Error::from(e)
    })
}
