// src/types.rs

//! Registries of the built-in watcher methods and doer kinds.
//!
//! Both are closed enumerations: adding a new method or doer means adding a
//! variant here and wiring its behaviour in `watch::method` / `exec::doer`.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::errors::WatchdoError;

/// How a watcher decides whether a file changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum WatchMethod {
    /// Compare a digest of the file contents.
    #[value(name = "hash", alias = "md5")]
    Hash,
    /// Compare the file's modification time.
    #[value(name = "modificationtime", alias = "mtime")]
    ModificationTime,
}

impl WatchMethod {
    pub const ALL: [WatchMethod; 2] = [WatchMethod::Hash, WatchMethod::ModificationTime];

    /// Display name, used in banners.
    pub fn identifier(self) -> &'static str {
        match self {
            WatchMethod::Hash => "Hash",
            WatchMethod::ModificationTime => "ModificationTime",
        }
    }
}

impl Default for WatchMethod {
    fn default() -> Self {
        WatchMethod::ModificationTime
    }
}

impl fmt::Display for WatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for WatchMethod {
    type Err = WatchdoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match wanted.as_str() {
            "md5" => return Ok(WatchMethod::Hash),
            "mtime" => return Ok(WatchMethod::ModificationTime),
            _ => {}
        }

        WatchMethod::ALL
            .into_iter()
            .find(|m| m.identifier().to_lowercase() == wanted)
            .ok_or_else(|| WatchdoError::UnknownWatcher(s.to_string()))
    }
}

/// The kind of runner a doer command is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DoerKind {
    /// Run the command through the platform shell.
    #[value(name = "shell")]
    Shell,
}

impl DoerKind {
    pub const ALL: [DoerKind; 1] = [DoerKind::Shell];

    /// Identifier matched against normalized `kind::` tags.
    pub fn identifier(self) -> &'static str {
        match self {
            DoerKind::Shell => "Shell",
        }
    }

    /// Resolve a raw `kind::` tag.
    ///
    /// The tag is title-cased and stripped of spaces before lookup, so
    /// `shell`, `SHELL` and ` shell ` all resolve to [`DoerKind::Shell`].
    pub fn from_tag(tag: &str) -> Result<Self, WatchdoError> {
        let normalized = normalize_tag(tag);
        DoerKind::ALL
            .into_iter()
            .find(|k| k.identifier() == normalized)
            .ok_or(WatchdoError::UnknownDoer(normalized))
    }
}

impl Default for DoerKind {
    fn default() -> Self {
        DoerKind::Shell
    }
}

impl fmt::Display for DoerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for DoerKind {
    type Err = WatchdoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DoerKind::from_tag(s)
    }
}

/// Title-case every alphabetic run, then drop spaces.
fn normalize_tag(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut in_word = false;

    for c in tag.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            in_word = false;
            if c != ' ' {
                out.push(c);
            }
        }
    }

    out
}
