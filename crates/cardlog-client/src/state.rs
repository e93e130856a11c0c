use std::fs;
use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

pub const FILE_ENV: &str = "CARDLOG_FILE";
pub const HOME_ENV: &str = "CARDLOG_HOME";
pub const STORE_FILE_NAME: &str = "purchases.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAccess {
    Read,
    Write,
}

/// Resolves the purchase file: explicit override, then `CARDLOG_FILE`, then
/// `CARDLOG_HOME/purchases.csv`, then `~/.cardlog/purchases.csv`.
pub fn resolve_store_path(file_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match file_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(file_path) = std::env::var_os(FILE_ENV) {
                PathBuf::from(file_path)
            } else if let Some(home_path) = std::env::var_os(HOME_ENV) {
                PathBuf::from(home_path).join(STORE_FILE_NAME)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".cardlog").join(STORE_FILE_NAME)
            } else {
                return Err(ClientError::store_home_unresolved());
            }
        }
    };

    absolutize(&candidate)
}

pub fn ensure_parent_directory(path: &Path) -> ClientResult<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }

    fs::create_dir_all(parent).map_err(|error| map_io_error(parent, &error, StoreAccess::Write))?;
    set_private_permissions_best_effort(parent);
    Ok(())
}

pub fn map_io_error(path: &Path, error: &std::io::Error, access: StoreAccess) -> ClientError {
    if error.kind() == std::io::ErrorKind::PermissionDenied {
        return ClientError::store_permission_denied(path, &error.to_string());
    }

    match access {
        StoreAccess::Read => ClientError::store_read_failed(path, &error.to_string()),
        StoreAccess::Write => ClientError::store_write_failed(path, &error.to_string()),
    }
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::store_read_failed(path, &error.to_string()))
}

#[cfg(unix)]
fn set_private_permissions_best_effort(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn set_private_permissions_best_effort(_path: &Path) {}
