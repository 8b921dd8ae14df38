use crate::config::ConfigError;
use crate::directory::{DEFAULT_MARKER, ProjectFilter};
use crate::error::Result;
use crate::history::{HISTORY_FILE, HistoryError};
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "RANCHERNS_CONFIG";
pub const RANCHER_CONFIG_DIR_ENV: &str = "RANCHER_CONFIG_DIR";
pub const HISTORY_ENV: &str = "RANCHERNS_HISTORY";
pub const FORCE_COLOR_ENV: &str = "_RANCHERNS_FORCE_COLOR";
pub const NO_COLOR_ENV: &str = "NO_COLOR";
pub const IGNORE_FZF_ENV: &str = "RANCHERNS_IGNORE_FZF";
pub const MARKER_ENV: &str = "RANCHERNS_PROJECT_MARKER";

const RANCHER_DIR: &str = ".rancher";
const CONFIG_FILE: &str = "cli2.json";

/// Everything the environment can tune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: PathBuf,
    pub history_path: PathBuf,
    pub force_color: bool,
    pub no_color: bool,
    pub ignore_selector: bool,
    pub filter: ProjectFilter,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let config_path = match (value(CONFIG_ENV), value(RANCHER_CONFIG_DIR_ENV)) {
            (Some(path), _) => PathBuf::from(path),
            (None, Some(dir)) => PathBuf::from(dir).join(CONFIG_FILE),
            (None, None) => default_config_path()?,
        };

        let history_path = match value(HISTORY_ENV) {
            Some(path) => PathBuf::from(path),
            None => default_history_path()?,
        };

        let marker = lookup(MARKER_ENV).unwrap_or_else(|| DEFAULT_MARKER.to_owned());

        Ok(Self {
            config_path,
            history_path,
            force_color: value(FORCE_COLOR_ENV).is_some(),
            no_color: value(NO_COLOR_ENV).is_some(),
            ignore_selector: value(IGNORE_FZF_ENV).is_some(),
            filter: ProjectFilter::from_marker(&marker),
        })
    }
}

fn default_config_path() -> Result<PathBuf> {
    let dirs = BaseDirs::new().ok_or(ConfigError::MissingHomeDir)?;
    Ok(dirs.home_dir().join(RANCHER_DIR).join(CONFIG_FILE))
}

fn default_history_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("io", "rancherns", "rancherns").ok_or(HistoryError::MissingCacheDir)?;
    Ok(dirs.cache_dir().join(HISTORY_FILE))
}
