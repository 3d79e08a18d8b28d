// src/config/mod.rs

//! Configuration loading and validation for watchdo.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and validated settings (`model.rs`).
//! - Load a config file and merge CLI flags over it (`loader.rs`).
//! - Validate ranges and resolve method/doer names (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, merge_cli_args, resolve_settings};
pub use model::{RawSettings, Settings};
