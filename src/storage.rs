use crate::errors::AppError;
use crate::models::AppData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

const DEFAULT_DATA_PATH: &str = "data/state.json";

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    match env::var("APP_DATA_PATH") {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(PathBuf::from(DEFAULT_DATA_PATH)),
    }
}

/// Reads the snapshot; any problem with the file yields an empty one.
pub async fn load_data(path: &Path) -> AppData {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("no data file at {}, starting empty", path.display());
            return AppData::default();
        }
        Err(err) => {
            error!("failed to read {}: {err}", path.display());
            return AppData::default();
        }
    };

    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        error!("failed to parse {}: {err}", path.display());
        AppData::default()
    })
}

/// Writes next to `path` first and renames over it, so a failed write never
/// leaves a truncated snapshot behind.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let staging = staging_path(path);
    fs::write(&staging, payload).await?;
    if let Err(err) = fs::rename(&staging, path).await {
        let _ = fs::remove_file(&staging).await;
        return Err(err.into());
    }
    debug!(habits = data.habits.len(), logs = data.logs.len(), "snapshot written");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
