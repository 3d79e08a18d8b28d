// src/watch/method.rs

//! The value each [`WatchMethod`] observes for a file.

use std::io::Read;
use std::path::Path;
use std::time::UNIX_EPOCH;

use blake3::Hasher;

use crate::errors::{Result, WatchdoError};
use crate::fs::FileSystem;
use crate::types::WatchMethod;

impl WatchMethod {
    /// Observe the current state of `path`.
    ///
    /// Two observations compare equal iff the method considers the file
    /// unchanged between them. A missing file is reported as
    /// [`WatchdoError::FileNotFound`].
    pub fn observe(self, fs: &dyn FileSystem, path: &Path) -> Result<String> {
        match self {
            WatchMethod::Hash => compute_file_hash(fs, path),
            WatchMethod::ModificationTime => modification_time(fs, path),
        }
    }
}

/// Compute the hash of a single file, reading it in fixed-size chunks.
pub fn compute_file_hash(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut file = fs
        .open_read(path)
        .map_err(|e| WatchdoError::from_io(path, e))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(|e| WatchdoError::from_io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Modification time as fractional seconds since the Unix epoch.
///
/// Formatted with `f64`'s shortest round-trip representation, so parsing the
/// string back yields exactly the same `f64`.
pub fn modification_time(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let modified = fs
        .modified(path)
        .map_err(|e| WatchdoError::from_io(path, e))?;

    let secs = match modified.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(before_epoch) => -before_epoch.duration().as_secs_f64(),
    };

    Ok(secs.to_string())
}
