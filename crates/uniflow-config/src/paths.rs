//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/uniflow/`
//! - macOS: `~/Library/Application Support/uniflow/`
//! - Windows: `%APPDATA%\uniflow\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "uniflow";

/// Get the uniflow config directory
///
/// The directory is not created; uniflow only ever reads from it.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to the global runtime config file
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
