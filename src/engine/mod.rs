// src/engine/mod.rs

//! The driver loop around the watch and exec layers.
//!
//! - [`runtime`] polls the [`WatcherManager`](crate::watch::WatcherManager),
//!   dispatches doers for changed files, and sleeps between cycles.
//! - [`banner`] formats the header/footer shown around doer output.
//!
//! Policy decisions that belong to the driver rather than the core live
//! here: how many of a cycle's changed files trigger the doers.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Settings;
use crate::exec::DoerOutcome;

pub mod banner;
pub mod runtime;

pub use runtime::Runtime;

/// Display and pacing options for the runtime.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    pub interval: Duration,
    pub wait_time: Duration,
    pub disable_banners: bool,
    pub disable_clear: bool,
    /// Run the doers once per changed file rather than once per cycle.
    pub multi: bool,
}

impl RuntimeOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            interval: settings.interval(),
            wait_time: settings.wait_time(),
            disable_banners: settings.disable_banners(),
            disable_clear: settings.disable_clear(),
            multi: settings.multi(),
        }
    }
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            wait_time: Duration::ZERO,
            disable_banners: false,
            disable_clear: false,
            multi: false,
        }
    }
}

/// What a single polling cycle did.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Every file reported as changed (including during the wait time).
    pub changed: BTreeSet<PathBuf>,
    /// Files the doers were run for, in order.
    pub dispatched: Vec<PathBuf>,
    /// Outcome of every doer run, in order.
    pub outcomes: Vec<DoerOutcome>,
}

impl CycleReport {
    /// Whether anything ran this cycle.
    pub fn triggered(&self) -> bool {
        !self.dispatched.is_empty()
    }
}

/// Pick the files the doers run for.
///
/// With `multi`, every changed file, in sorted order. Otherwise only the
/// first one: a burst of changes in one cycle runs the doers once.
pub fn select_dispatch_targets(changed: &BTreeSet<PathBuf>, multi: bool) -> Vec<PathBuf> {
    if multi {
        changed.iter().cloned().collect()
    } else {
        changed.iter().take(1).cloned().collect()
    }
}
