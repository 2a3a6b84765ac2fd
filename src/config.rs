use std::path::PathBuf;

use crate::error::{Result, StoreError};
use crate::store::Theme;

pub const ENV_CATALOG: &str = "STOREFRONT_CATALOG";
pub const ENV_ASSET_DIR: &str = "STOREFRONT_ASSET_DIR";
pub const ENV_THEME: &str = "STOREFRONT_THEME";
pub const ENV_LOG: &str = "STOREFRONT_LOG";

const DEFAULT_ASSET_DIR: &str = "assets/images";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Catalog file to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    pub asset_dir: PathBuf,
    pub theme: Theme,
    /// Where log output goes. No file, no logging.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            theme: Theme::Light,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let theme = match get(ENV_THEME) {
            Some(value) => value.parse::<Theme>().map_err(|message| StoreError::Config {
                key: ENV_THEME.to_string(),
                message,
            })?,
            None => Theme::Light,
        };

        Ok(Self {
            catalog_path: get(ENV_CATALOG).map(PathBuf::from),
            asset_dir: get(ENV_ASSET_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR)),
            theme,
            log_file: get(ENV_LOG).map(PathBuf::from),
        })
    }
}
