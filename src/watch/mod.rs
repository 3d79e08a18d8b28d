// src/watch/mod.rs

//! Polling-based change detection.
//!
//! This module is responsible for:
//! - Expanding `--watch` glob patterns into the set of watched files.
//! - Observing each file with a [`WatchMethod`](crate::types::WatchMethod)
//!   (content hash or modification time).
//! - Reconciling added, removed and changed files on every polling cycle.
//!
//! It does **not** run anything; it only turns filesystem state into a set
//! of changed paths.

pub mod glob;
pub mod manager;
pub mod method;
pub mod watcher;

pub use glob::GlobManager;
pub use manager::WatcherManager;
pub use method::{compute_file_hash, modification_time};
pub use watcher::FileWatcher;
