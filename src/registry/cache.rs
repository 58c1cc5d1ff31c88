//! On-disk cache for the registry manifest and downloaded skills
//!
//! ## Cache structure
//!
//! ```text
//! ~/.cache/skillfetch/
//! ├── registry.json          {"fetchedAt": <ms>, "registry": {...}}
//! └── skills/
//!     └── <skill-name>/      mirror of the skill's file tree
//! ```
//!
//! The registry entry carries a fetch timestamp and expires after 24 hours;
//! expired entries are refetched but not deleted, so a stale copy can still be
//! served when both remote hosts are unreachable. Corrupted cache content is
//! treated as a cache miss, never as an error.
//!
//! The store is an explicitly constructed value injected into the resolver and
//! installer; the default root can be overridden with `SKILLFETCH_CACHE_DIR`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SkillfetchError};
use crate::fsutil;
use crate::path_safety::sanitize_name;
use crate::registry::{RegistrySnapshot, SkillMetadata};

/// Cache directory name under the user's cache root
const CACHE_DIR: &str = "skillfetch";

/// Skills subdirectory within the cache
const SKILLS_DIR: &str = "skills";

/// Registry manifest cache file at the cache root
const REGISTRY_CACHE_FILE: &str = "registry.json";

/// Environment variable overriding the cache root
pub const CACHE_DIR_ENV_VAR: &str = "SKILLFETCH_CACHE_DIR";

/// Maximum age of a cached registry manifest. The boundary is exclusive: an
/// entry fetched exactly this long ago is already invalid.
pub const CACHE_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Milliseconds since the Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Persisted registry manifest plus its fetch timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCacheEntry {
    pub fetched_at: u64,
    pub registry: RegistrySnapshot,
}

impl RegistryCacheEntry {
    /// `now - fetched_at < TTL`, boundary exclusive
    pub fn is_valid(&self, now: u64) -> bool {
        now.saturating_sub(self.fetched_at) < CACHE_TTL_MS
    }
}

/// Handle to one cache root
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Open the user-scoped default cache, honoring `SKILLFETCH_CACHE_DIR`
    pub fn open_default() -> Result<Self> {
        if let Ok(dir) = std::env::var(CACHE_DIR_ENV_VAR) {
            return Ok(Self::at(PathBuf::from(dir)));
        }

        let base = dirs::cache_dir().ok_or_else(|| SkillfetchError::CacheOperationFailed {
            message: "could not determine cache directory".to_string(),
        })?;
        Ok(Self::at(base.join(CACHE_DIR)))
    }

    /// Open a cache at an explicit root (tests use isolated temp roots)
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one subdirectory per cached skill
    pub fn skills_dir(&self) -> PathBuf {
        self.root.join(SKILLS_DIR)
    }

    /// Cache directory for a skill; fails when the name sanitizes to empty
    pub fn skill_cache_path(&self, name: &str) -> Result<PathBuf> {
        let safe = sanitize_name(name);
        if safe.is_empty() {
            return Err(SkillfetchError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.skills_dir().join(safe))
    }

    /// Whether a cache directory exists for the skill. Invalid names are
    /// simply not cached; this never fails.
    pub fn is_skill_cached(&self, name: &str) -> bool {
        self.skill_cache_path(name)
            .map(|p| p.is_dir())
            .unwrap_or(false)
    }

    /// Whether every file the manifest lists for this skill is present.
    /// Partial downloads (abandoned or interrupted) fail this check and are
    /// re-fetched on next use.
    pub fn is_skill_complete(&self, skill: &SkillMetadata) -> bool {
        let Ok(root) = self.skill_cache_path(&skill.name) else {
            return false;
        };
        root.is_dir() && skill.files.iter().all(|f| root.join(f).is_file())
    }

    /// Read the cached registry entry. Missing, unreadable or corrupted
    /// content is a cache miss.
    pub fn read_registry_cache(&self) -> Option<RegistryCacheEntry> {
        let path = self.root.join(REGISTRY_CACHE_FILE);
        let content = fs::read(&path).ok()?;
        match serde_json::from_slice(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupted registry cache, treating as miss");
                None
            }
        }
    }

    /// Persist the registry snapshot with the current timestamp. The write is
    /// atomic (temp file + rename) so readers never observe a partial entry.
    pub fn write_registry_cache(&self, snapshot: &RegistrySnapshot) -> Result<()> {
        let entry = RegistryCacheEntry {
            fetched_at: now_ms(),
            registry: snapshot.clone(),
        };
        self.write_registry_entry(&entry)
    }

    fn write_registry_entry(&self, entry: &RegistryCacheEntry) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| SkillfetchError::CacheOperationFailed {
            message: format!("failed to create cache directory: {e}"),
        })?;

        let path = self.root.join(REGISTRY_CACHE_FILE);
        let json = serde_json::to_vec_pretty(entry)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.root).map_err(|e| {
            SkillfetchError::CacheOperationFailed {
                message: format!("failed to create temp file: {e}"),
            }
        })?;
        tmp.write_all(&json)
            .map_err(|e| fsutil::write_error(&path, e))?;
        tmp.persist(&path)
            .map_err(|e| SkillfetchError::CacheOperationFailed {
                message: format!("failed to persist registry cache: {e}"),
            })?;

        debug!(path = %path.display(), "registry cache written");
        Ok(())
    }

    /// Write one downloaded file into a skill's cache directory, atomically.
    /// The destination must be inside the skill's directory; the caller
    /// validates that with [`crate::path_safety::is_path_safe`] first.
    pub fn write_skill_file(&self, dest: &Path, content: &[u8]) -> Result<()> {
        fsutil::ensure_parent_dir(dest)?;
        let dir = dest.parent().ok_or_else(|| SkillfetchError::IoError {
            message: format!("no parent directory for {}", dest.display()),
        })?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| fsutil::write_error(dest, e))?;
        tmp.write_all(content)
            .map_err(|e| fsutil::write_error(dest, e))?;
        tmp.persist(dest)
            .map_err(|e| fsutil::write_error(dest, e.error))?;
        Ok(())
    }

    /// Delete a skill's cache directory. Idempotent; never fails.
    pub fn clear_skill_cache(&self, name: &str) {
        if let Ok(path) = self.skill_cache_path(name) {
            if let Err(e) = fs::remove_dir_all(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "failed to clear skill cache");
                }
            }
        }
    }

    /// Delete the cached registry manifest. Idempotent; never fails.
    pub fn clear_registry_cache(&self) {
        let path = self.root.join(REGISTRY_CACHE_FILE);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "failed to clear registry cache");
            }
        }
    }

    /// Delete everything under the cache root
    pub fn clear_all(&self) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root).map_err(|e| SkillfetchError::CacheOperationFailed {
                message: format!("failed to clear cache: {e}"),
            })?;
        }
        Ok(())
    }

    /// Cached skill names, sorted
    pub fn cached_skills(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.skills_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }

    /// Cache statistics for the `cache` command
    pub fn stats(&self) -> CacheStats {
        let skills = self.cached_skills();
        CacheStats {
            skills: skills.len(),
            total_size: fsutil::dir_size(&self.root),
        }
    }
}

/// Cache statistics
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of cached skills
    pub skills: usize,
    /// Total size in bytes, registry manifest included
    pub total_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::test_skill;
    use std::collections::BTreeMap;

    fn store() -> (tempfile::TempDir, CacheStore) {
        let temp = tempfile::TempDir::new().unwrap();
        let store = CacheStore::at(temp.path().join("cache"));
        (temp, store)
    }

    fn snapshot() -> RegistrySnapshot {
        RegistrySnapshot {
            version: "1.0.0".to_string(),
            generated_at: "2026-01-01T00:00:00Z".to_string(),
            base_url: "https://example.com".to_string(),
            categories: BTreeMap::new(),
            skills: vec![test_skill("my-skill", &["SKILL.md"])],
        }
    }

    #[test]
    fn test_skill_cache_path_contains_name() {
        let (_temp, store) = store();
        let path = store.skill_cache_path("my-skill").unwrap();
        assert!(path.ends_with("skills/my-skill"));
    }

    #[test]
    fn test_skill_cache_path_rejects_invalid_name() {
        let (_temp, store) = store();
        let err = store.skill_cache_path("../../../").unwrap_err();
        assert!(matches!(err, SkillfetchError::InvalidName { .. }));
        assert!(store.skill_cache_path("").is_err());
    }

    #[test]
    fn test_is_skill_cached_never_throws() {
        let (_temp, store) = store();
        assert!(!store.is_skill_cached("absent-skill"));
        assert!(!store.is_skill_cached(""));
        assert!(!store.is_skill_cached("../../../"));
    }

    #[test]
    fn test_is_skill_cached_after_creating_dir() {
        let (_temp, store) = store();
        let path = store.skill_cache_path("my-skill").unwrap();
        fs::create_dir_all(&path).unwrap();
        assert!(store.is_skill_cached("my-skill"));
    }

    #[test]
    fn test_is_skill_complete_checks_every_file() {
        let (_temp, store) = store();
        let skill = test_skill("my-skill", &["SKILL.md", "references/api.md"]);
        assert!(!store.is_skill_complete(&skill));

        let root = store.skill_cache_path("my-skill").unwrap();
        fs::create_dir_all(root.join("references")).unwrap();
        fs::write(root.join("SKILL.md"), "x").unwrap();
        assert!(!store.is_skill_complete(&skill), "partial download must not count");

        fs::write(root.join("references/api.md"), "y").unwrap();
        assert!(store.is_skill_complete(&skill));
    }

    #[test]
    fn test_registry_cache_roundtrip() {
        let (_temp, store) = store();
        assert!(store.read_registry_cache().is_none());

        store.write_registry_cache(&snapshot()).unwrap();
        let entry = store.read_registry_cache().unwrap();
        assert_eq!(entry.registry.version, "1.0.0");
        assert!(entry.fetched_at > 0);
        assert!(entry.is_valid(now_ms()));
    }

    #[test]
    fn test_corrupted_registry_cache_is_a_miss() {
        let (_temp, store) = store();
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.root().join(REGISTRY_CACHE_FILE), "not json at all").unwrap();
        assert!(store.read_registry_cache().is_none());
    }

    #[test]
    fn test_ttl_boundary_is_exclusive() {
        let entry = RegistryCacheEntry {
            fetched_at: 1_000_000,
            registry: snapshot(),
        };
        // One ms short of the TTL: still valid
        assert!(entry.is_valid(1_000_000 + CACHE_TTL_MS - 1));
        // Exactly the TTL: invalid
        assert!(!entry.is_valid(1_000_000 + CACHE_TTL_MS));
        assert!(!entry.is_valid(1_000_000 + CACHE_TTL_MS + 1));
    }

    #[test]
    fn test_ttl_is_24_hours() {
        assert_eq!(CACHE_TTL_MS, 86_400_000);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (_temp, store) = store();
        // Nothing exists yet; none of these may panic or error
        store.clear_skill_cache("absent");
        store.clear_skill_cache("../../../");
        store.clear_registry_cache();

        store.write_registry_cache(&snapshot()).unwrap();
        let skill_dir = store.skill_cache_path("my-skill").unwrap();
        fs::create_dir_all(&skill_dir).unwrap();

        store.clear_registry_cache();
        assert!(store.read_registry_cache().is_none());
        store.clear_skill_cache("my-skill");
        assert!(!store.is_skill_cached("my-skill"));

        // Second round is a no-op
        store.clear_registry_cache();
        store.clear_skill_cache("my-skill");
    }

    #[test]
    fn test_write_skill_file_atomic_into_nested_dir() {
        let (_temp, store) = store();
        let root = store.skill_cache_path("my-skill").unwrap();
        let dest = root.join("references/workers/api.md");
        store.write_skill_file(&dest, b"# API").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "# API");
    }

    #[test]
    fn test_cached_skills_sorted() {
        let (_temp, store) = store();
        for name in ["zeta", "alpha", "mid"] {
            fs::create_dir_all(store.skill_cache_path(name).unwrap()).unwrap();
        }
        // Plain files under skills/ are not skills
        fs::write(store.skills_dir().join("stray.txt"), "x").unwrap();
        assert_eq!(store.cached_skills(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_stats() {
        let (_temp, store) = store();
        assert_eq!(store.stats().skills, 0);

        let root = store.skill_cache_path("my-skill").unwrap();
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("SKILL.md"), "hello").unwrap();

        let stats = store.stats();
        assert_eq!(stats.skills, 1);
        assert!(stats.total_size >= 5);
    }

    #[test]
    #[serial_test::serial]
    fn test_open_default_honors_env_override() {
        let temp = tempfile::TempDir::new().unwrap();
        unsafe {
            std::env::set_var(CACHE_DIR_ENV_VAR, temp.path());
        }
        let store = CacheStore::open_default().unwrap();
        assert_eq!(store.root(), temp.path());
        unsafe {
            std::env::remove_var(CACHE_DIR_ENV_VAR);
        }
    }
}
