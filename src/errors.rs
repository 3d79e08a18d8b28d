// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchdoError {
    #[error("invalid glob pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A watched file disappeared between globbing and observing it.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("unknown doer: {0}")]
    UnknownDoer(String),

    #[error("unknown watcher method: {0}")]
    UnknownWatcher(String),

    #[error("no files matched any of the given globs")]
    NoFiles,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WatchdoError {
    /// Map an IO error on `path` to `FileNotFound` when that is what it is.
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            WatchdoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            WatchdoError::IoError(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchdoError>;
