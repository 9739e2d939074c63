use std::{env, path::PathBuf};

pub(crate) const CONFIG_FILE: &str = ".uniflow.toml";

/// Load config file content from CWD first, then home directory, then the XDG config dir
///
/// Searches for:
/// 1. `.uniflow.toml` in the current working directory
/// 2. `.uniflow.toml` in the home directory
/// 3. `config.toml` in the uniflow config directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    read_first(&candidate_paths())
}

/// Content of the first readable file in `paths`
fn read_first(paths: &[PathBuf]) -> Option<String> {
    paths.iter().find_map(|path| {
        let content = std::fs::read_to_string(path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(content)
    })
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];

    if let Some(home) = env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(CONFIG_FILE));
    }

    match crate::paths::config_file_path() {
        Ok(path) => paths.push(path),
        Err(e) => log::debug!("Skipping global config lookup: {}", e),
    }

    paths
}
