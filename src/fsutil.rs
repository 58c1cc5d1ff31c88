//! Common file system operations with unified error handling

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, SkillfetchError};

pub(crate) fn write_error(path: &Path, e: std::io::Error) -> SkillfetchError {
    SkillfetchError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }
    Ok(())
}

/// Copy a directory recursively
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    if !dst.exists() {
        fs::create_dir_all(dst).map_err(|e| write_error(dst, e))?;
    }

    for entry in fs::read_dir(src).map_err(|e| SkillfetchError::FileReadFailed {
        path: src.display().to_string(),
        reason: e.to_string(),
    })? {
        let entry = entry.map_err(SkillfetchError::from)?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).map_err(|e| write_error(&dst_path, e))?;
        }
    }

    Ok(())
}

/// Calculate directory size in bytes, skipping entries that cannot be read
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Format a byte count as a human-readable string
pub fn formatted_size(size: u64) -> String {
    let bytes = size as f64;
    if bytes < 1024.0 {
        format!("{} B", size)
    } else if bytes < 1024.0 * 1024.0 {
        format!("{:.1} KB", bytes / 1024.0)
    } else if bytes < 1024.0 * 1024.0 * 1024.0 {
        format!("{:.1} MB", bytes / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes / (1024.0 * 1024.0 * 1024.0))
    }
}
