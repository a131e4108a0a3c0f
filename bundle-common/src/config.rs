//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the root data folder.
pub const ROOT_ENV_VAR: &str = "BUNDLE_BOARD_ROOT";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = load_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Path of the SQLite database inside the root folder.
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join("bundle.db")
}

/// Find the configuration file for the platform.
fn load_config_file() -> Result<PathBuf> {
    // ~/.config/bundleboard/config.toml (or the platform equivalent),
    // falling back to /etc/bundleboard/config.toml on Linux
    if let Some(path) = dirs::config_dir().map(|d| d.join("bundleboard").join("config.toml")) {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/bundleboard/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default root folder path.
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("bundleboard"))
        .unwrap_or_else(|| PathBuf::from("./bundleboard_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let root = resolve_root_folder(Some(Path::new("/tmp/bb-test")));
        assert_eq!(root, PathBuf::from("/tmp/bb-test"));
    }

    #[test]
    fn database_lives_in_root_folder() {
        let db = database_path(Path::new("/data/bundleboard"));
        assert_eq!(db, PathBuf::from("/data/bundleboard/bundle.db"));
    }
}
