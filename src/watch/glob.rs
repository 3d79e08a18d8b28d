// src/watch/glob.rs

//! Glob expansion into the current set of watched files.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;

use crate::errors::{Result, WatchdoError};
use crate::fs::{FileSystem, RealFileSystem};

/// A single compiled `--watch` pattern.
///
/// The leading components without glob metacharacters form the directory the
/// walk starts from; everything below it is matched against the full pattern.
#[derive(Clone)]
struct CompiledPattern {
    raw: String,
    /// Walk root. Empty means "relative to the current directory".
    base: PathBuf,
    matcher: Option<GlobMatcher>,
    /// How many levels below `base` can match; `None` when the pattern has `**`.
    max_depth: Option<usize>,
    /// Pattern components below `base`.
    segments: Vec<String>,
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("raw", &self.raw)
            .field("base", &self.base)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

fn is_glob_component(component: &str) -> bool {
    component.contains(['*', '?', '[', '{'])
}

impl CompiledPattern {
    fn compile(pattern: &str) -> Result<Self> {
        let components: Vec<&str> = pattern.split('/').collect();

        let Some(first_glob) = components.iter().position(|c| is_glob_component(c)) else {
            // No metacharacters: the pattern is a plain path.
            return Ok(Self {
                raw: pattern.to_string(),
                base: PathBuf::from(pattern),
                matcher: None,
                max_depth: Some(0),
                segments: Vec::new(),
            });
        };

        let mut base = components[..first_glob].join("/");
        if base.is_empty() && pattern.starts_with('/') {
            base.push('/');
        }

        let rest = &components[first_glob..];
        let max_depth = if rest.iter().any(|c| c.contains("**")) {
            None
        } else {
            Some(rest.len())
        };

        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| WatchdoError::Glob {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(Self {
            raw: pattern.to_string(),
            base: PathBuf::from(base),
            matcher: Some(matcher),
            max_depth,
            segments: rest.iter().map(|c| c.to_string()).collect(),
        })
    }

    /// Whether a dot-name at `depth` below `base` may be matched (files) or
    /// walked into (directories).
    ///
    /// Like a shell glob, wildcards never match a leading `.`; the pattern
    /// component has to spell it out.
    fn admits_hidden(&self, depth: usize, is_file: bool) -> bool {
        let dotted = |c: &String| c.starts_with('.');

        if is_file {
            return self.segments.last().is_some_and(dotted);
        }
        match self.max_depth {
            Some(_) => self.segments.get(depth).is_some_and(dotted),
            // With `**` any non-final component may line up with this directory.
            None => self.segments[..self.segments.len().saturating_sub(1)]
                .iter()
                .any(|c| !c.contains("**") && dotted(c)),
        }
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Expands a list of glob patterns into the regular files they match.
///
/// Directories are never returned, and a path matched by several patterns is
/// returned once. The most recent result stays available via
/// [`GlobManager::last_files`] for display purposes.
pub struct GlobManager {
    fs: Arc<dyn FileSystem>,
    globs: Vec<String>,
    patterns: Vec<CompiledPattern>,
    last_files: BTreeSet<PathBuf>,
}

impl fmt::Debug for GlobManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobManager")
            .field("globs", &self.globs)
            .field("last_files", &self.last_files.len())
            .finish_non_exhaustive()
    }
}

impl GlobManager {
    /// Compile `globs` against the real filesystem.
    pub fn new<I, S>(globs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_fs(Arc::new(RealFileSystem), globs)
    }

    /// Compile `globs` against an arbitrary [`FileSystem`].
    ///
    /// Fails with [`WatchdoError::Glob`] on the first malformed pattern.
    pub fn with_fs<I, S>(fs: Arc<dyn FileSystem>, globs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let globs: Vec<String> = globs.into_iter().map(Into::into).collect();
        let patterns = globs
            .iter()
            .map(|g| CompiledPattern::compile(g))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fs,
            globs,
            patterns,
            last_files: BTreeSet::new(),
        })
    }

    pub fn globs(&self) -> &[String] {
        &self.globs
    }

    /// The result of the most recent [`get_files`](Self::get_files) call.
    pub fn last_files(&self) -> &BTreeSet<PathBuf> {
        &self.last_files
    }

    /// Expand every pattern and return the matching regular files.
    pub fn get_files(&mut self) -> BTreeSet<PathBuf> {
        let mut files = BTreeSet::new();

        for pattern in &self.patterns {
            let before = files.len();
            self.expand(pattern, &mut files);
            debug!(
                pattern = %pattern.raw,
                new_matches = files.len() - before,
                "expanded glob"
            );
        }

        self.last_files = files.clone();
        files
    }

    fn expand(&self, pattern: &CompiledPattern, out: &mut BTreeSet<PathBuf>) {
        let Some(matcher) = &pattern.matcher else {
            if self.fs.is_file(&pattern.base) {
                out.insert(pattern.base.clone());
            }
            return;
        };

        let mut stack: Vec<(PathBuf, usize)> = vec![(pattern.base.clone(), 0)];

        while let Some((dir, depth)) = stack.pop() {
            let listing = if dir.as_os_str().is_empty() {
                Path::new(".")
            } else {
                dir.as_path()
            };

            let entries = match self.fs.read_dir(listing) {
                Ok(entries) => entries,
                Err(err) => {
                    debug!(dir = ?listing, error = %err, "skipping unreadable directory");
                    continue;
                }
            };

            for entry in entries {
                let Some(name) = entry.file_name() else {
                    continue;
                };
                let hidden = is_hidden(name);
                // Rebuild from `dir` so results keep the pattern's own form
                // (no "./" prefix for relative patterns).
                let path = dir.join(name);

                if self.fs.is_file(&path) {
                    if hidden && !pattern.admits_hidden(depth, true) {
                        continue;
                    }
                    let candidate = path.to_string_lossy().replace('\\', "/");
                    if matcher.is_match(candidate.as_str()) {
                        out.insert(path);
                    }
                } else if self.fs.is_dir(&path)
                    && pattern.max_depth.is_none_or(|max| depth + 1 < max)
                    && (!hidden || pattern.admits_hidden(depth, false))
                {
                    stack.push((path, depth + 1));
                }
            }
        }
    }
}
