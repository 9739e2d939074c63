//! Configuration for the uniflow runtime
//!
//! This crate provides:
//! - Config file discovery (CWD, home directory, XDG config directory)
//! - Runtime configuration (RuntimeConfig) consumed by the built-in middleware
//! - Typed errors for explicit config loading

pub mod config_file;
pub mod error;
pub mod paths;
pub mod runtime_config;

pub use config_file::load_config_file;
pub use error::ConfigError;
pub use paths::{config_dir, config_file_path};
pub use runtime_config::RuntimeConfig;
