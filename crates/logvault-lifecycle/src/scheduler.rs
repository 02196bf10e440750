//! Background worker that runs a lifecycle tick on an interval.
//!
//! The worker waits on a `crossbeam_channel::tick` ticker and a stop channel.
//! `stop` wakes it immediately; a tick already running finishes first.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::{bounded, select, tick, Sender};

use logvault_core::errors::{LifecycleError, LogVaultResult};

use crate::engine::LifecycleEngine;

pub struct ArchivalScheduler {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ArchivalScheduler {
    /// Spawn the worker. With `run_on_start` one tick runs immediately.
    pub fn start(
        engine: Arc<LifecycleEngine>,
        interval: Duration,
        run_on_start: bool,
    ) -> LogVaultResult<Self> {
        let interval = interval.max(Duration::from_secs(1));
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("logvault-archival".to_string())
            .spawn(move || {
                let ticker = tick(interval);
                if run_on_start {
                    engine.run_tick(Utc::now());
                }
                loop {
                    select! {
                        recv(stop_rx) -> _ => break,
                        recv(ticker) -> _ => {
                            engine.run_tick(Utc::now());
                        }
                    }
                }
                tracing::debug!("archival scheduler stopped");
            })
            .map_err(|e| LifecycleError::SchedulerStartFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the worker and wait for it. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // A full or disconnected channel means the worker is already leaving.
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("archival scheduler worker panicked");
            }
        }
    }
}

impl Drop for ArchivalScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
