// src/exec/mod.rs

//! Command dispatch.
//!
//! - [`interpolate`] substitutes the changed file into a command template.
//! - [`doer`] defines the `Doer` trait and the doer registry.
//! - [`shell`] is the shell doer, run via `tokio::process::Command`.
//! - [`manager`] parses `[doer::]command` strings and runs the doers in order.

pub mod doer;
pub mod interpolate;
pub mod manager;
pub mod shell;

pub use doer::{Doer, DoerOutcome, OutputSink};
pub use interpolate::interpolate;
pub use manager::{parse_command, DoerManager};
pub use shell::ShellDoer;
