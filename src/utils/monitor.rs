//! Resident memory and CPU of the service's own process.
//!
//! The sample taken right after bind is the startup footprint, reported
//! next to startup latency; the last one at shutdown carries the peak.

#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
const MB: u64 = 1024 * 1024;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSample {
    pub memory_mb: u64,
    pub cpu_usage: f32,
}

#[cfg(feature = "cli")]
pub struct ProcessMonitor {
    system: System,
    pid: Pid,
    started: Instant,
    peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
impl ProcessMonitor {
    /// `None` when monitoring is off or the current pid is unavailable.
    pub fn start(enabled: bool) -> Option<Self> {
        if !enabled {
            return None;
        }
        let pid = sysinfo::get_current_pid()
            .map_err(|e| tracing::warn!("Process monitoring unavailable: {}", e))
            .ok()?;

        Some(Self {
            system: System::new(),
            pid,
            started: Instant::now(),
            peak_memory_mb: 0,
        })
    }

    /// Refreshes this process only and folds the reading into the peak.
    pub fn sample(&mut self) -> Option<ProcessSample> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            false,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        let process = self.system.process(self.pid)?;

        let sample = ProcessSample {
            memory_mb: process.memory() / MB,
            cpu_usage: process.cpu_usage(),
        };
        self.peak_memory_mb = self.peak_memory_mb.max(sample.memory_mb);
        Some(sample)
    }

    pub fn peak_memory_mb(&self) -> u64 {
        self.peak_memory_mb
    }

    pub fn log_startup(&mut self, startup: Duration) {
        if let Some(sample) = self.sample() {
            tracing::info!(
                memory_mb = sample.memory_mb,
                startup_us = startup.as_micros() as u64,
                "Startup footprint: {}MB resident after {:?}",
                sample.memory_mb,
                startup
            );
        }
    }

    pub fn log_shutdown(&mut self) {
        if let Some(sample) = self.sample() {
            tracing::info!(
                memory_mb = sample.memory_mb,
                peak_memory_mb = self.peak_memory_mb,
                cpu = sample.cpu_usage,
                "At shutdown: {}MB resident, peak {}MB, CPU {:.1}%, uptime {:?}",
                sample.memory_mb,
                self.peak_memory_mb,
                sample.cpu_usage,
                self.started.elapsed()
            );
        }
    }
}

// sysinfo is only pulled in with the CLI feature
#[cfg(not(feature = "cli"))]
pub struct ProcessMonitor;

#[cfg(not(feature = "cli"))]
impl ProcessMonitor {
    pub fn start(_enabled: bool) -> Option<Self> {
        None
    }

    pub fn log_startup(&mut self, _startup: std::time::Duration) {}

    pub fn log_shutdown(&mut self) {}
}
