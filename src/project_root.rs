//! Project root discovery for local-scope installs

use std::path::{Path, PathBuf};

/// Find the project root by walking up from `start` looking for a `.git`
/// directory. Falls back to `start` itself when no repository marker is found,
/// so local installs still work in plain directories.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return start.to_path_buf(),
        }
    }
}
