//! Where `ara` looks for its configuration file and fixture corpus.
//!
//! `ARA_CONFIG_DIR` and `ARA_DATA_DIR` win when set to a non-empty value;
//! otherwise the platform layout from `directories` applies.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const CONFIG_DIR_ENV: &str = "ARA_CONFIG_DIR";
const DATA_DIR_ENV: &str = "ARA_DATA_DIR";

#[derive(Clone, Copy)]
enum AppDir {
    Config,
    Data,
}

impl AppDir {
    fn override_env(self) -> &'static str {
        match self {
            AppDir::Config => CONFIG_DIR_ENV,
            AppDir::Data => DATA_DIR_ENV,
        }
    }

    fn resolve(self) -> Result<PathBuf> {
        if let Some(dir) = dir_from_env(self.override_env()) {
            return Ok(dir);
        }
        let dirs = ProjectDirs::from("org", "ara", "ara")
            .ok_or_else(|| anyhow!("no home directory to place ara files under"))?;
        let dir = match self {
            AppDir::Config => dirs.config_local_dir(),
            AppDir::Data => dirs.data_local_dir(),
        };
        Ok(dir.to_path_buf())
    }
}

/// An empty override counts as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
    AppDir::Config.resolve()
}

/// Directory where a downloaded fixture corpus may live.
pub fn get_data_dir() -> Result<PathBuf> {
    AppDir::Data.resolve()
}
