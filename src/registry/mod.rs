//! Remote skills registry: manifest model, caching, fetching and download
//!
//! The registry is a JSON manifest published alongside the skills content.
//! This module owns everything between "a skill name" and "a complete skill
//! directory in the local cache":
//!
//! - [`cache`]: on-disk cache store with a 24 h TTL on the manifest
//! - [`http`]: HTTP client abstraction, retry with backoff, mirror fallback
//! - [`urls`]: primary/fallback URL templates and the ref override
//! - [`download`]: batched concurrent download of a skill's files
//! - [`resolver`]: manifest resolution through cache + fetcher

pub mod cache;
pub mod download;
pub mod http;
pub mod resolver;
pub mod urls;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::path_safety::sanitize_name;

/// Metadata for one published skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
    /// Opaque grouping key; display grouping is not this tool's concern
    pub category: String,
    /// Location under the remote skills root, e.g. `(cloud)/cloudflare-deploy`
    pub path: String,
    /// Relative file paths belonging to the skill, in manifest order
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl SkillMetadata {
    /// A manifest entry is usable iff its name survives sanitization
    /// unchanged and it lists at least one file.
    pub fn is_valid(&self) -> bool {
        !self.files.is_empty() && !self.name.is_empty() && sanitize_name(&self.name) == self.name
    }
}

/// Display metadata for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

/// One fetched state of the remote registry. Immutable once fetched;
/// superseded wholesale by the next successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    pub version: String,
    pub generated_at: String,
    pub base_url: String,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryInfo>,
    pub skills: Vec<SkillMetadata>,
}

impl RegistrySnapshot {
    /// Look up a skill by name
    pub fn skill(&self, name: &str) -> Option<&SkillMetadata> {
        self.skills.iter().find(|s| s.name == name)
    }

    /// Drop invalid entries and duplicate names (first occurrence wins).
    /// Invalid entries are a publisher-side defect; skipping them keeps the
    /// rest of the registry usable.
    pub fn validated(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.skills.retain(|skill| {
            if !skill.is_valid() {
                warn!(name = %skill.name, "skipping invalid registry entry");
                return false;
            }
            if !seen.insert(skill.name.clone()) {
                warn!(name = %skill.name, "skipping duplicate registry entry");
                return false;
            }
            true
        });
        self
    }
}

#[cfg(test)]
pub(crate) fn test_skill(name: &str, files: &[&str]) -> SkillMetadata {
    SkillMetadata {
        name: name.to_string(),
        description: format!("{name} description"),
        category: "dev".to_string(),
        path: format!("(dev)/{name}"),
        files: files.iter().map(|f| f.to_string()).collect(),
        author: None,
        version: None,
    }
}
