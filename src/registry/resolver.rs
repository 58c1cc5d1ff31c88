//! Registry resolution through cache store and fetcher
//!
//! Resolution order for the manifest: valid cache entry, primary host (full
//! retry budget), fallback host (its own full budget), stale cache entry.
//! A stale copy is only an error when no copy exists at all.

use tracing::{debug, warn};

use crate::error::{Result, SkillfetchError};
use crate::progress::DownloadProgress;
use crate::registry::cache::{now_ms, CacheStore};
use crate::registry::download::SkillDownloader;
use crate::registry::http::Fetcher;
use crate::registry::urls::UrlSet;
use crate::registry::{RegistrySnapshot, SkillMetadata};

/// Resolves the remote registry and keeps the local skill cache current
pub struct Resolver<'a> {
    fetcher: &'a Fetcher,
    cache: &'a CacheStore,
    urls: &'a UrlSet,
}

impl<'a> Resolver<'a> {
    pub fn new(fetcher: &'a Fetcher, cache: &'a CacheStore, urls: &'a UrlSet) -> Self {
        Self {
            fetcher,
            cache,
            urls,
        }
    }

    /// Get the registry snapshot, from cache when fresh enough
    pub fn get_registry(&self, force_refresh: bool) -> Result<RegistrySnapshot> {
        if !force_refresh {
            if let Some(entry) = self.cache.read_registry_cache() {
                if entry.is_valid(now_ms()) {
                    debug!("using cached registry");
                    return Ok(entry.registry);
                }
            }
        }

        let (primary, fallback) = self.urls.manifest_urls();
        match self.fetcher.fetch_with_fallback(&primary, &fallback) {
            Ok(body) => {
                let snapshot: RegistrySnapshot = serde_json::from_slice(&body)?;
                let snapshot = snapshot.validated();
                self.cache.write_registry_cache(&snapshot)?;
                Ok(snapshot)
            }
            Err(err) => {
                // Never fail merely because of staleness when a stale copy exists
                if let Some(stale) = self.cache.read_registry_cache() {
                    warn!(error = %err, "registry fetch failed, serving stale cache");
                    return Ok(stale.registry);
                }
                Err(err)
            }
        }
    }

    /// Get one skill's metadata from the registry
    pub fn get_skill(&self, name: &str, force_refresh: bool) -> Result<SkillMetadata> {
        let registry = self.get_registry(force_refresh)?;
        registry
            .skill(name)
            .cloned()
            .ok_or_else(|| SkillfetchError::SkillNotFound {
                name: name.to_string(),
            })
    }

    /// Make sure the skill's files are fully present in the cache,
    /// downloading them when they are not
    pub fn ensure_skill_cached(
        &self,
        skill: &SkillMetadata,
        progress: Option<&DownloadProgress>,
    ) -> Result<std::path::PathBuf> {
        if self.cache.is_skill_complete(skill) {
            debug!(skill = %skill.name, "skill already cached");
            return self.cache.skill_cache_path(&skill.name);
        }

        let downloader = SkillDownloader::new(self.fetcher, self.cache, self.urls);
        let report = downloader.download_skill(skill, progress)?;
        debug!(
            skill = %skill.name,
            downloaded = report.downloaded,
            total = report.total,
            "skill downloaded"
        );
        self.cache.skill_cache_path(&skill.name)
    }
}
