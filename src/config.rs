use crate::error::{GitVersionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "gitversion.toml";

/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE: &str = ".gitversion.toml";

/// Persistent defaults for gitversion.
///
/// Command-line flags take precedence over anything loaded here.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Tag prefix, e.g. `"v"` for `v1.2.3`
    #[serde(default)]
    pub prefix: String,

    /// Only consider tags merged into the current branch
    #[serde(default)]
    pub merged: bool,
}

impl Config {
    /// Apply command-line overrides on top of the loaded values
    pub fn with_overrides(mut self, prefix: Option<String>, merged: bool) -> Self {
        if let Some(prefix) = prefix {
            self.prefix = prefix;
        }
        self.merged |= merged;
        self
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitversion.toml` in current directory
/// 3. `.gitversion.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return parse_config(&fs::read_to_string(path)?);
    }

    let candidates = std::iter::once(PathBuf::from(LOCAL_CONFIG_FILE))
        .chain(dirs::config_dir().map(|dir| dir.join(USER_CONFIG_FILE)));
    for candidate in candidates {
        if let Some(contents) = read_if_exists(&candidate)? {
            return parse_config(&contents);
        }
    }

    Ok(Config::default())
}

fn read_if_exists(path: &Path) -> Result<Option<String>> {
    if path.exists() {
        Ok(Some(fs::read_to_string(path)?))
    } else {
        Ok(None)
    }
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| GitVersionError::config(e.to_string()))
}
