//! Process bootstrap: bind, announce, serve until a shutdown signal.

use std::future::Future;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::Router;
use tokio::net::TcpListener;

use crate::api::build_router;
use crate::config::ServiceConfig;
use crate::utils::error::{BenchError, Result};
use crate::utils::monitor::ProcessMonitor;

/// A listener bound to its address with the router ready to serve.
pub struct BoundServer {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
}

impl BoundServer {
    pub async fn bind(config: &ServiceConfig) -> Result<Self> {
        let address = config.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| BenchError::BindError {
                address: address.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            router: build_router(config.identity.clone()),
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

/// The single line announcing readiness, with the measured startup latency.
pub fn startup_line(config: &ServiceConfig, local_addr: SocketAddr, startup: Duration) -> String {
    let startup_us = startup.as_micros();
    format!(
        "{} {} listening on {} (startup: {}us / {:.3}ms)",
        config.identity.app,
        config.identity.version,
        local_addr,
        startup_us,
        startup_us as f64 / 1000.0
    )
}

/// Binds, logs the startup line and serves until Ctrl-C or SIGTERM.
pub async fn run(config: ServiceConfig, boot_start: Instant) -> Result<()> {
    let server = BoundServer::bind(&config).await?;
    let startup = boot_start.elapsed();
    tracing::info!("{}", startup_line(&config, server.local_addr(), startup));

    let mut monitor = ProcessMonitor::start(config.monitor);
    if let Some(monitor) = monitor.as_mut() {
        monitor.log_startup(startup);
    }

    server.serve(shutdown_signal()).await?;

    if let Some(monitor) = monitor.as_mut() {
        monitor.log_shutdown();
    }
    tracing::info!("{} {} stopped", config.identity.app, config.identity.version);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
