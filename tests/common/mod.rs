#![allow(dead_code)]

pub use watchdo_test_utils::buffer::SharedBuffer;
pub use watchdo_test_utils::builders::SettingsBuilder;
pub use watchdo_test_utils::{init_tracing, with_timeout};

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

/// Drain every chunk a finished doer run sent.
pub async fn collect_chunks(mut rx: mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut chunks = Vec::new();
    while let Some(chunk) = rx.recv().await {
        chunks.push(chunk);
    }
    chunks
}

/// Glob pattern rooted at `dir`, e.g. `/tmp/xyz/*.txt`.
pub fn pattern_in(dir: &Path, rest: &str) -> String {
    format!("{}/{}", dir.display(), rest)
}

pub fn set(paths: &[&str]) -> std::collections::BTreeSet<PathBuf> {
    paths.iter().map(PathBuf::from).collect()
}
