// src/watch/manager.rs

//! Reconciles glob results with per-file watchers on every polling cycle.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{Result, WatchdoError};
use crate::fs::FileSystem;
use crate::types::WatchMethod;
use crate::watch::glob::GlobManager;
use crate::watch::watcher::FileWatcher;

/// Creates and manages one [`FileWatcher`] per file returned by a
/// [`GlobManager`].
///
/// - `reglob`: re-evaluate the globs on every call to
///   [`get_changed_files`](Self::get_changed_files) instead of only the first.
/// - `changed_on_remove`: report files that disappeared from the glob result.
#[derive(Debug)]
pub struct WatcherManager {
    fs: Arc<dyn FileSystem>,
    method: WatchMethod,
    glob_manager: GlobManager,
    reglob: bool,
    changed_on_remove: bool,

    first_call: bool,
    files: BTreeSet<PathBuf>,
    watchers: BTreeMap<PathBuf, FileWatcher>,
}

impl WatcherManager {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        method: WatchMethod,
        glob_manager: GlobManager,
        reglob: bool,
        changed_on_remove: bool,
    ) -> Self {
        Self {
            fs,
            method,
            glob_manager,
            reglob,
            changed_on_remove,
            first_call: true,
            files: BTreeSet::new(),
            watchers: BTreeMap::new(),
        }
    }

    pub fn method(&self) -> WatchMethod {
        self.method
    }

    pub fn glob_manager(&self) -> &GlobManager {
        &self.glob_manager
    }

    pub fn reglob(&self) -> bool {
        self.reglob
    }

    pub fn changed_on_remove(&self) -> bool {
        self.changed_on_remove
    }

    /// Files currently being watched.
    pub fn files(&self) -> &BTreeSet<PathBuf> {
        &self.files
    }

    /// Files that changed since the previous call.
    ///
    /// Added files (after the first call), files whose watcher reports a
    /// change, and removed files (if `changed_on_remove`) are all counted.
    ///
    /// A watched file that vanished is a [`WatchdoError::FileNotFound`] when
    /// re-globbing is enabled: the next call re-globs and drops it, so the
    /// caller should just retry after its interval. Without re-globbing the
    /// file can never be dropped, so the error is swallowed and the file is
    /// treated as unchanged. Any other observation error (e.g. permission
    /// denied) is logged and the file treated as unchanged, since re-globbing
    /// would not drop it.
    pub fn get_changed_files(&mut self) -> Result<BTreeSet<PathBuf>> {
        let mut added = BTreeSet::new();
        let mut removed = BTreeSet::new();

        if self.reglob || self.first_call {
            let new_files = self.glob_manager.get_files();

            added = new_files.difference(&self.files).cloned().collect();
            removed = self.files.difference(&new_files).cloned().collect();

            self.files = new_files;
        }

        let mut changed = BTreeSet::new();

        for file_name in added {
            debug!(file = ?file_name, "watching new file");
            let watcher = FileWatcher::new(Arc::clone(&self.fs), self.method, file_name.clone());
            self.watchers.insert(file_name.clone(), watcher);

            if !self.first_call {
                info!(file = ?file_name, "file added");
                changed.insert(file_name);
            }
        }

        for file_name in removed {
            self.watchers.remove(&file_name);
            info!(file = ?file_name, "file removed");

            if self.changed_on_remove {
                changed.insert(file_name);
            }
        }

        for (file_name, watcher) in self.watchers.iter_mut() {
            match watcher.has_changed() {
                Ok(true) => {
                    debug!(file = ?file_name, "file changed");
                    changed.insert(file_name.clone());
                }
                Ok(false) => {}
                Err(WatchdoError::FileNotFound { path }) if !self.reglob => {
                    debug!(file = ?path, "watched file missing; ignoring without reglob");
                }
                Err(err @ WatchdoError::FileNotFound { .. }) => return Err(err),
                Err(err) => {
                    warn!(file = ?file_name, error = %err, "cannot read watched file; treating as unchanged");
                }
            }
        }

        self.first_call = false;

        Ok(changed)
    }
}
