//! Filesystem operations
//!
//! Directory handling for the transfer stage.

use std::path::{Path, PathBuf};

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove every entry of a directory, dotfiles included, keeping the
/// directory itself. A missing directory is not an error.
pub fn clear_dir(path: &Path) -> Result<(), FilesystemError> {
    if !path.exists() {
        return Ok(());
    }
    let entries = std::fs::read_dir(path).map_err(|e| FilesystemError::ListDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| FilesystemError::ListDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        let target = entry.path();
        let removed = if target.is_dir() {
            std::fs::remove_dir_all(&target)
        } else {
            std::fs::remove_file(&target)
        };
        removed.map_err(|e| FilesystemError::Remove {
            path: target,
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// List a directory's entries the way a shell `dir/*` glob would:
/// sorted, dotfiles excluded.
pub fn visible_entries(path: &Path) -> Result<Vec<PathBuf>, FilesystemError> {
    let entries = std::fs::read_dir(path).map_err(|e| FilesystemError::ListDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    let mut visible = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FilesystemError::ListDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        let hidden = entry
            .file_name()
            .to_string_lossy()
            .starts_with('.');
        if !hidden {
            visible.push(entry.path());
        }
    }
    visible.sort();
    Ok(visible)
}
