use crate::api::FrontDesk;
use crate::config::FrontdeskConfig;
use crate::error::{FrontdeskError, Result};
use crate::store::fs::FileStorage;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const HOME_ENV: &str = "FRONTDESK_HOME";

pub struct FrontdeskContext {
    pub api: FrontDesk<FileStorage>,
    pub data_dir: PathBuf,
}

/// Picks the data directory: the explicit flag, then `FRONTDESK_HOME`, then
/// the platform data dir.
pub fn resolve_data_dir(flag: Option<&Path>, env_value: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "frontdesk", "frontdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FrontdeskError::Config("Could not determine a data directory".into()))
}

pub fn initialize(data_dir_flag: Option<&Path>) -> Result<FrontdeskContext> {
    let env_value = std::env::var(HOME_ENV).ok();
    let data_dir = resolve_data_dir(data_dir_flag, env_value.as_deref())?;
    tracing::debug!(dir = %data_dir.display(), "using data directory");

    let config = FrontdeskConfig::load(&data_dir)?;
    let storage = FileStorage::new(&data_dir);
    let api = FrontDesk::new(storage, config).with_data_dir(&data_dir);

    Ok(FrontdeskContext { api, data_dir })
}
