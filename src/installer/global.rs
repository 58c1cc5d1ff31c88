//! Best-effort lookup of a shared global skills installation
//!
//! When a skill is already installed globally, local installs prefer a
//! symlink to that copy over duplicating content. The lookup never fails:
//! anything going wrong just means "not discoverable".

use std::path::PathBuf;

use crate::path_safety::sanitize_name;

/// Directory name under the user data dir holding globally shared skills
const GLOBAL_SKILLS_SUBDIR: &str = "skills";

/// Environment variable overriding the global skills root
pub const GLOBAL_DIR_ENV_VAR: &str = "SKILLFETCH_GLOBAL_DIR";

/// Handle to the (possibly absent) global skills root
pub struct GlobalLookup {
    root: Option<PathBuf>,
}

impl GlobalLookup {
    /// Discover the global skills root: env override first, then the
    /// user data directory. `None` when neither exists on disk.
    pub fn discover() -> Self {
        let candidate = std::env::var(GLOBAL_DIR_ENV_VAR)
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                dirs::data_dir().map(|d| d.join("skillfetch").join(GLOBAL_SKILLS_SUBDIR))
            });

        Self {
            root: candidate.filter(|p| p.is_dir()),
        }
    }

    /// A lookup rooted at an explicit existing directory (tests)
    pub fn at(root: PathBuf) -> Self {
        Self {
            root: Some(root).filter(|p| p.is_dir()),
        }
    }

    /// A lookup that never finds anything
    pub fn none() -> Self {
        Self { root: None }
    }

    /// Path to the global copy of a skill, when one exists
    pub fn skill_path(&self, name: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        let safe = sanitize_name(name);
        if safe.is_empty() {
            return None;
        }
        let path = root.join(safe);
        path.is_dir().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_finds_nothing() {
        let lookup = GlobalLookup::none();
        assert!(lookup.skill_path("my-skill").is_none());
    }

    #[test]
    fn test_at_missing_root_finds_nothing() {
        let temp = tempfile::TempDir::new().unwrap();
        let lookup = GlobalLookup::at(temp.path().join("does-not-exist"));
        assert!(lookup.skill_path("my-skill").is_none());
    }

    #[test]
    fn test_finds_existing_global_skill() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("my-skill")).unwrap();
        let lookup = GlobalLookup::at(temp.path().to_path_buf());

        let path = lookup.skill_path("my-skill").unwrap();
        assert_eq!(path, temp.path().join("my-skill"));
        assert!(lookup.skill_path("other-skill").is_none());
    }

    #[test]
    fn test_invalid_names_never_resolve() {
        let temp = tempfile::TempDir::new().unwrap();
        let lookup = GlobalLookup::at(temp.path().to_path_buf());
        assert!(lookup.skill_path("../../../").is_none());
        assert!(lookup.skill_path("").is_none());
    }
}
