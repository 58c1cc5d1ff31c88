//! Batched concurrent download of a skill's files
//!
//! Files are processed in fixed-size batches: batches run strictly one after
//! another, all files within a batch are fetched on concurrent threads, so at
//! most [`DOWNLOAD_BATCH_SIZE`] requests are in flight at once. Each file
//! independently applies the fetcher's retry and mirror-fallback policy.
//!
//! After all batches complete the download is verified for completeness.
//! A partial result is left in the cache (it fails the completeness check on
//! next use, which forces a re-fetch) and reported as
//! [`SkillfetchError::IncompleteDownload`].

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::warn;

use crate::error::{Result, SkillfetchError};
use crate::path_safety::is_path_safe;
use crate::progress::DownloadProgress;
use crate::registry::SkillMetadata;
use crate::registry::cache::CacheStore;
use crate::registry::http::Fetcher;
use crate::registry::urls::UrlSet;

/// Files fetched concurrently within one batch
pub const DOWNLOAD_BATCH_SIZE: usize = 10;

/// Outcome of a completed (and verified) skill download
#[derive(Debug)]
pub struct DownloadReport {
    pub downloaded: usize,
    pub total: usize,
}

/// Drives the fetcher across all files of one skill
pub struct SkillDownloader<'a> {
    fetcher: &'a Fetcher,
    cache: &'a CacheStore,
    urls: &'a UrlSet,
}

impl<'a> SkillDownloader<'a> {
    pub fn new(fetcher: &'a Fetcher, cache: &'a CacheStore, urls: &'a UrlSet) -> Self {
        Self {
            fetcher,
            cache,
            urls,
        }
    }

    /// Download every file of `skill` into its cache directory
    pub fn download_skill(
        &self,
        skill: &SkillMetadata,
        progress: Option<&DownloadProgress>,
    ) -> Result<DownloadReport> {
        let dest_root = self.cache.skill_cache_path(&skill.name)?;
        let total = skill.files.len();
        let downloaded = AtomicUsize::new(0);

        for batch in skill.files.chunks(DOWNLOAD_BATCH_SIZE) {
            std::thread::scope(|scope| {
                for file in batch {
                    let dest_root = &dest_root;
                    let downloaded = &downloaded;
                    scope.spawn(move || {
                        match self.download_file(skill, dest_root, file) {
                            Ok(()) => {
                                downloaded.fetch_add(1, Ordering::SeqCst);
                            }
                            Err(e) => {
                                warn!(skill = %skill.name, file = %file, error = %e, "file download failed");
                            }
                        }
                        if let Some(progress) = progress {
                            progress.file_done(file);
                        }
                    });
                }
            });
        }

        let downloaded = downloaded.load(Ordering::SeqCst);
        if downloaded < total {
            return Err(SkillfetchError::IncompleteDownload { downloaded, total });
        }
        Ok(DownloadReport { downloaded, total })
    }

    fn download_file(&self, skill: &SkillMetadata, dest_root: &Path, file: &str) -> Result<()> {
        let dest = dest_root.join(file);
        if !is_path_safe(dest_root, &dest) {
            return Err(SkillfetchError::UnsafePath {
                base: dest_root.display().to_string(),
                path: dest.display().to_string(),
            });
        }

        let (primary, fallback) = self.urls.file_urls(&skill.path, file);
        let body = self.fetcher.fetch_with_fallback(&primary, &fallback)?;
        self.cache.write_skill_file(&dest, &body)
    }
}
