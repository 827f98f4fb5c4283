use crate::core::error::ReposError;
use std::path::{Component, Path, PathBuf};

/// File name of the repos store inside the home directory
pub const STORE_FILE_NAME: &str = ".repos.json";

pub fn get_default_store_path() -> Result<PathBuf, ReposError> {
    let home = dirs::home_dir().ok_or(ReposError::StoreLocation)?;
    Ok(home.join(STORE_FILE_NAME))
}

/// Make `path` absolute against the current directory without resolving symlinks
pub fn absolute_path(path: &Path) -> Result<PathBuf, ReposError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let mut clean = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                clean.pop();
            }
            other => clean.push(other.as_os_str()),
        }
    }
    Ok(clean)
}
