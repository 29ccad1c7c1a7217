//! Resident-memory measurements around write stages.
//!
//! Streaming writes should leave RSS flat no matter how many terms are
//! drained; a [`MemoryProbe`] records the RSS before and after each stage so
//! that property can be checked on real model sizes.

use std::time::Instant;
use sysinfo::System;

/// RSS of this process at one point in time.
#[derive(Debug, Clone)]
pub struct MemorySnapshot {
    /// Resident set size in bytes
    pub rss_bytes: u64,
    pub taken_at: Instant,
}

/// Errors produced by memory instrumentation.
#[derive(Debug, Clone)]
pub enum MemoryError {
    ProcessNotFound { pid: u32 },
}

impl std::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryError::ProcessNotFound { pid } => {
                write!(f, "failed to locate process {}", pid)
            }
        }
    }
}

impl std::error::Error for MemoryError {}

impl MemorySnapshot {
    /// Capture the current RSS.
    ///
    /// # Errors
    ///
    /// Returns an error if the current process cannot be located.
    pub fn capture() -> Result<Self, MemoryError> {
        let pid = sysinfo::Pid::from(std::process::id() as usize);

        // Only refresh this process, not the whole system.
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            sysinfo::ProcessesToUpdate::Some(&[pid]),
            true,
            sysinfo::ProcessRefreshKind::nothing().with_memory(),
        );

        let process = sys.process(pid).ok_or(MemoryError::ProcessNotFound {
            pid: std::process::id(),
        })?;

        Ok(MemorySnapshot {
            rss_bytes: process.memory(),
            taken_at: Instant::now(),
        })
    }

    /// RSS growth from `earlier` to `self` (negative when memory was freed).
    pub fn delta_since(&self, earlier: &Self) -> i64 {
        self.rss_bytes as i64 - earlier.rss_bytes as i64
    }
}

/// Duration and RSS around one named stage.
#[derive(Debug, Clone)]
pub struct StageMeasurement {
    pub stage: String,
    pub duration_ms: f64,
    pub rss_before_bytes: Option<u64>,
    pub rss_after_bytes: Option<u64>,
}

impl StageMeasurement {
    pub fn rss_delta_bytes(&self) -> Option<i64> {
        match (self.rss_before_bytes, self.rss_after_bytes) {
            (Some(before), Some(after)) => Some(after as i64 - before as i64),
            _ => None,
        }
    }
}

/// Records a [`StageMeasurement`] for every stage run through it.
#[derive(Debug, Default)]
pub struct MemoryProbe {
    stages: Vec<StageMeasurement>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` as stage `stage`, recording its duration and RSS.
    ///
    /// A failed memory capture is recorded as `None` rather than failing the
    /// stage.
    pub fn measure<T>(&mut self, stage: &str, work: impl FnOnce() -> T) -> T {
        let before = capture_or_log(stage);
        let started = Instant::now();
        let output = work();
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        let after = capture_or_log(stage);

        self.stages.push(StageMeasurement {
            stage: stage.to_string(),
            duration_ms,
            rss_before_bytes: before.map(|s| s.rss_bytes),
            rss_after_bytes: after.map(|s| s.rss_bytes),
        });
        output
    }

    pub fn stages(&self) -> &[StageMeasurement] {
        &self.stages
    }

    /// Drain the recorded stages, leaving the probe empty.
    pub fn take_stages(&mut self) -> Vec<StageMeasurement> {
        std::mem::take(&mut self.stages)
    }
}

fn capture_or_log(stage: &str) -> Option<MemorySnapshot> {
    match MemorySnapshot::capture() {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            tracing::warn!(
                component = "memory",
                operation = "capture",
                status = "error",
                stage,
                "{err}"
            );
            None
        }
    }
}
