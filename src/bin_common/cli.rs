//! CLI utilities for binaries
//!
//! Handles configuration path resolution and argument collection.

use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "HYPERSPACE_CONFIG_PATH";

/// Type of configuration to load
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigType {
    /// SDK configuration (config/hyperspace.yaml, or HYPERSPACE_CONFIG_PATH)
    Hyperspace,
    /// Path given with `--config`
    Custom(String),
}

impl ConfigType {
    /// Take `--config <path>` out of `args`, leaving the rest for the command parser
    pub fn from_args(args: &mut Vec<String>) -> Result<Self> {
        let Some(index) = args.iter().position(|a| a == "--config") else {
            return Ok(ConfigType::Hyperspace);
        };

        if index + 1 >= args.len() {
            return Err(anyhow!("--config requires a path"));
        }

        let path = args.remove(index + 1);
        args.remove(index);
        Ok(ConfigType::Custom(path))
    }

    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Hyperspace => "config/hyperspace.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Environment variable that overrides the path; an explicit path has none
    pub fn env_var_name(&self) -> Option<&'static str> {
        match self {
            ConfigType::Hyperspace => Some(CONFIG_PATH_ENV),
            ConfigType::Custom(_) => None,
        }
    }

    /// A missing file is only tolerated for the implicit default
    pub fn is_required(&self) -> bool {
        matches!(self, ConfigType::Custom(_))
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use hyperspace_avax_sdk::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(&ConfigType::Custom("my.yaml".to_string()));
/// assert_eq!(path.to_str(), Some("my.yaml"));
/// ```
pub fn load_config_from_env(config_type: &ConfigType) -> PathBuf {
    config_type
        .env_var_name()
        .and_then(|name| std::env::var(name).ok())
        .unwrap_or_else(|| config_type.default_path().to_string())
        .into()
}

/// Command line arguments, excluding the program name
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}
