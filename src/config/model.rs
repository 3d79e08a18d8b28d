// src/config/model.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::types::{DoerKind, WatchMethod};

/// Settings as read from a TOML file, before CLI overrides and validation.
///
/// Every key is optional:
///
/// ```toml
/// watch = ["src/**/*.rs"]
/// do = ["cargo test", "shell::echo %f changed"]
/// watcher_method = "hash"
/// default_doer = "shell"
/// interval = 1.5
/// wait_time = 0.2
/// disable_banners = false
/// disable_clear = true
/// reglob = true
/// run_on_remove = false
/// multi = false
/// ```
///
/// Method and doer names stay strings here so that unknown names surface as
/// `UnknownWatcher` / `UnknownDoer` during validation rather than as TOML
/// errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    #[serde(default)]
    pub watch: Vec<String>,

    #[serde(default, rename = "do")]
    pub commands: Vec<String>,

    #[serde(default)]
    pub watcher_method: Option<String>,

    #[serde(default)]
    pub default_doer: Option<String>,

    /// Seconds between polling cycles.
    #[serde(default)]
    pub interval: Option<f64>,

    /// Seconds to wait between detecting a change and running the doers.
    #[serde(default)]
    pub wait_time: Option<f64>,

    #[serde(default)]
    pub disable_banners: Option<bool>,

    #[serde(default)]
    pub disable_clear: Option<bool>,

    #[serde(default)]
    pub reglob: Option<bool>,

    #[serde(default)]
    pub run_on_remove: Option<bool>,

    #[serde(default)]
    pub multi: Option<bool>,
}

pub const DEFAULT_INTERVAL_SECS: f64 = 2.0;

/// Validated settings the runtime is built from.
///
/// Only constructible through `TryFrom<RawSettings>` (see `validate.rs`), so
/// holding one means the invariants below were checked:
/// - at least one glob and one command,
/// - `interval` is non-zero.
#[derive(Debug, Clone)]
pub struct Settings {
    pub(crate) globs: Vec<String>,
    pub(crate) commands: Vec<String>,
    pub(crate) method: WatchMethod,
    pub(crate) default_doer: DoerKind,
    pub(crate) interval: Duration,
    pub(crate) wait_time: Duration,
    pub(crate) disable_banners: bool,
    pub(crate) disable_clear: bool,
    pub(crate) reglob: bool,
    pub(crate) run_on_remove: bool,
    pub(crate) multi: bool,
    pub(crate) config_path: Option<PathBuf>,
}

impl Settings {
    pub fn globs(&self) -> &[String] {
        &self.globs
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn method(&self) -> WatchMethod {
        self.method
    }

    pub fn default_doer(&self) -> DoerKind {
        self.default_doer
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn wait_time(&self) -> Duration {
        self.wait_time
    }

    pub fn disable_banners(&self) -> bool {
        self.disable_banners
    }

    pub fn disable_clear(&self) -> bool {
        self.disable_clear
    }

    pub fn reglob(&self) -> bool {
        self.reglob
    }

    pub fn run_on_remove(&self) -> bool {
        self.run_on_remove
    }

    pub fn multi(&self) -> bool {
        self.multi
    }

    /// The TOML file these settings were read from, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
