//! Tick outcome counters, readable while the scheduler runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Default)]
pub struct LifecycleStatus {
    ticks_succeeded: AtomicU64,
    ticks_failed: AtomicU64,
    consecutive_failures: AtomicU64,
    last_error: Mutex<Option<String>>,
    last_tick_at: Mutex<Option<DateTime<Utc>>>,
}

/// Point-in-time copy of [`LifecycleStatus`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub ticks_succeeded: u64,
    pub ticks_failed: u64,
    pub consecutive_failures: u64,
    pub last_error: Option<String>,
    pub last_tick_at: Option<DateTime<Utc>>,
}

impl StatusSnapshot {
    /// True once a tick has run and the latest one succeeded.
    pub fn is_healthy(&self) -> bool {
        self.last_tick_at.is_some() && self.consecutive_failures == 0
    }
}

impl LifecycleStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, at: DateTime<Utc>) {
        self.ticks_succeeded.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.store(0, Ordering::Relaxed);
        self.set_last_tick(at);
    }

    /// Returns the consecutive failure count including this one.
    pub fn record_failure(&self, at: DateTime<Utc>, error: impl Into<String>) -> u64 {
        self.ticks_failed.fetch_add(1, Ordering::Relaxed);
        let streak = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        if let Ok(mut guard) = self.last_error.lock() {
            *guard = Some(error.into());
        }
        self.set_last_tick(at);
        streak
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            ticks_succeeded: self.ticks_succeeded.load(Ordering::Relaxed),
            ticks_failed: self.ticks_failed.load(Ordering::Relaxed),
            consecutive_failures: self.consecutive_failures.load(Ordering::Relaxed),
            last_error: self.last_error.lock().ok().and_then(|g| g.clone()),
            last_tick_at: self.last_tick_at.lock().ok().and_then(|g| *g),
        }
    }

    fn set_last_tick(&self, at: DateTime<Utc>) {
        if let Ok(mut guard) = self.last_tick_at.lock() {
            *guard = Some(at);
        }
    }
}
