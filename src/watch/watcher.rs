// src/watch/watcher.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::trace;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::WatchMethod;

/// Change detector for a single file.
///
/// The file state is only sampled when [`has_changed`](Self::has_changed) is
/// called. The first call never reports a change, so nothing fires merely
/// because watching started.
pub struct FileWatcher {
    fs: Arc<dyn FileSystem>,
    method: WatchMethod,
    file_name: PathBuf,
    /// `None` while the file was missing at the last observation.
    last_value: Option<String>,
    first_check: bool,
}

impl fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileWatcher")
            .field("method", &self.method)
            .field("file_name", &self.file_name)
            .field("last_value", &self.last_value)
            .field("first_check", &self.first_check)
            .finish_non_exhaustive()
    }
}

impl FileWatcher {
    pub fn new(fs: Arc<dyn FileSystem>, method: WatchMethod, file_name: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            method,
            file_name: file_name.into(),
            last_value: None,
            first_check: true,
        }
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    pub fn method(&self) -> WatchMethod {
        self.method
    }

    /// The value recorded by the most recent check.
    pub fn last_value(&self) -> Option<&str> {
        self.last_value.as_deref()
    }

    /// Whether the file changed since the previous call.
    ///
    /// The observed value is recorded on every call, including the first and
    /// including calls where the file is missing (recorded as absent). After
    /// the first call a failed observation is returned as the error, e.g.
    /// [`FileNotFound`](crate::errors::WatchdoError::FileNotFound), so the
    /// caller can decide whether it matters.
    pub fn has_changed(&mut self) -> Result<bool> {
        let observed = self.method.observe(self.fs.as_ref(), &self.file_name);
        let value = observed.as_ref().ok().cloned();

        let changed = value != self.last_value;
        self.last_value = value;

        if self.first_check {
            self.first_check = false;
            if let Err(err) = &observed {
                trace!(file = ?self.file_name, error = %err, "first observation failed");
            }
            return Ok(false);
        }

        observed.map(|_| changed)
    }
}
