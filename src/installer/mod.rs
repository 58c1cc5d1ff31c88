//! Materializing cached skills into agent directories
//!
//! For each (skill, agent) pair the installer resolves the agent's skills
//! directory for the requested scope and creates the skill entry there, via
//! symlink or deep copy from the cache. Re-installing an existing skill is a
//! successful no-op. When a globally shared copy of the skill exists, local
//! installs symlink to it instead of duplicating content, whatever method was
//! requested.
//!
//! The installer owns only the skill subentries of the target directories;
//! the directories themselves belong to the agent's conventions.

pub mod global;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::agents::{AgentConfig, Scope};
use crate::error::{Result, SkillfetchError};
use crate::fsutil;
use crate::registry::SkillMetadata;
use crate::registry::cache::CacheStore;

use global::GlobalLookup;

/// How a skill is materialized into a target directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InstallMethod {
    /// Symbolic link into the cache (or a global copy)
    Symlink,
    /// Deep copy of the cached directory
    Copy,
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallMethod::Symlink => write!(f, "symlink"),
            InstallMethod::Copy => write!(f, "copy"),
        }
    }
}

/// Install request options shared across all (skill, agent) pairs
#[derive(Debug, Clone, Copy)]
pub struct InstallOptions {
    pub scope: Scope,
    pub method: InstallMethod,
}

/// Outcome of installing one skill for one agent
#[derive(Debug)]
pub struct InstallResult {
    pub skill: String,
    pub agent: String,
    pub success: bool,
    pub path: PathBuf,
    pub method: InstallMethod,
    pub used_global_symlink: bool,
    pub error: Option<String>,
}

/// Outcome of removing one skill for one agent
#[derive(Debug)]
pub struct RemoveResult {
    pub skill: String,
    pub agent: String,
    pub removed: bool,
    pub message: Option<String>,
}

/// An entry counting as an installed skill in a target directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstalledEntry {
    Directory(String),
    Symlink(String),
}

impl InstalledEntry {
    pub fn name(&self) -> &str {
        match self {
            InstalledEntry::Directory(name) | InstalledEntry::Symlink(name) => name,
        }
    }
}

/// Installs cached skills into agent directories
pub struct Installer<'a> {
    cache: &'a CacheStore,
    global: GlobalLookup,
}

impl<'a> Installer<'a> {
    pub fn new(cache: &'a CacheStore, global: GlobalLookup) -> Self {
        Self { cache, global }
    }

    /// Install each skill for each agent; one result per (skill, agent) pair,
    /// in input order. Individual failures never abort the rest.
    pub fn install(
        &self,
        skills: &[SkillMetadata],
        agents: &[&AgentConfig],
        options: InstallOptions,
    ) -> Vec<InstallResult> {
        let mut results = Vec::with_capacity(skills.len() * agents.len());
        for skill in skills {
            for agent in agents {
                results.push(self.install_one(skill, agent, options));
            }
        }
        results
    }

    fn install_one(
        &self,
        skill: &SkillMetadata,
        agent: &AgentConfig,
        options: InstallOptions,
    ) -> InstallResult {
        let target_root = agent.skills_root(options.scope);
        let target = target_root.join(&skill.name);

        let mut result = InstallResult {
            skill: skill.name.clone(),
            agent: agent.display_name.clone(),
            success: false,
            path: target.clone(),
            method: options.method,
            used_global_symlink: false,
            error: None,
        };

        // Idempotent re-install: an existing entry is a successful no-op.
        // A plain file squatting on the name is a conflict, not a no-op.
        if let Ok(meta) = fs::symlink_metadata(&target) {
            if meta.is_dir() || meta.file_type().is_symlink() {
                result.success = true;
                result.error = Some("Already exists".to_string());
            } else {
                result.error = Some("Already exists but is not a skill directory".to_string());
            }
            return result;
        }

        let source = match self.cache.skill_cache_path(&skill.name) {
            Ok(path) => path,
            Err(e) => {
                result.error = Some(e.to_string());
                return result;
            }
        };

        // Prefer sharing one physical copy: a local install symlinks to a
        // discoverable global installation regardless of requested method.
        if options.scope == Scope::Local {
            if let Some(global_path) = self.global.skill_path(&skill.name) {
                debug!(skill = %skill.name, global = %global_path.display(), "linking to global copy");
                match link_dir(&global_path, &target) {
                    Ok(()) => {
                        result.success = true;
                        result.method = InstallMethod::Symlink;
                        result.used_global_symlink = true;
                    }
                    Err(e) => result.error = Some(e.to_string()),
                }
                return result;
            }
        }

        let outcome = match options.method {
            InstallMethod::Copy => fsutil::copy_dir_recursive(&source, &target),
            InstallMethod::Symlink => link_dir(&source, &target).map_err(SkillfetchError::from),
        };
        match outcome {
            Ok(()) => result.success = true,
            Err(e) => result.error = Some(e.to_string()),
        }
        result
    }

    /// Remove one skill for each agent; missing entries are a non-fatal
    /// "not installed" outcome.
    pub fn remove(
        &self,
        name: &str,
        agents: &[&AgentConfig],
        scope: Scope,
    ) -> Vec<RemoveResult> {
        agents
            .iter()
            .map(|agent| self.remove_one(name, agent, scope))
            .collect()
    }

    fn remove_one(&self, name: &str, agent: &AgentConfig, scope: Scope) -> RemoveResult {
        let target = agent.skills_root(scope).join(name);
        let mut result = RemoveResult {
            skill: name.to_string(),
            agent: agent.display_name.clone(),
            removed: false,
            message: None,
        };

        let Ok(meta) = fs::symlink_metadata(&target) else {
            result.message = Some("not installed".to_string());
            return result;
        };

        let outcome = if meta.file_type().is_symlink() {
            remove_symlink(&target)
        } else if meta.is_dir() {
            fs::remove_dir_all(&target)
        } else {
            result.message = Some("not a skill directory".to_string());
            return result;
        };

        match outcome {
            Ok(()) => result.removed = true,
            Err(e) => result.message = Some(e.to_string()),
        }
        result
    }

    /// Skill entries installed for an agent at the given scope: directories
    /// and symlinks only, sorted by name. A missing target directory is an
    /// empty list, not an error.
    pub fn list_installed(&self, agent: &AgentConfig, scope: Scope) -> Result<Vec<InstalledEntry>> {
        let root = agent.skills_root(scope);
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut installed = Vec::new();
        for entry in entries {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let meta = fs::symlink_metadata(entry.path())?;
            if meta.file_type().is_symlink() {
                installed.push(InstalledEntry::Symlink(name));
            } else if meta.is_dir() {
                installed.push(InstalledEntry::Directory(name));
            }
            // Plain files do not count as installed skills
        }
        installed.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(installed)
    }
}

/// Create a directory symlink, creating intermediate target directories first
fn link_dir(source: &Path, target: &Path) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, target)
    }
    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_dir(source, target)
    }
}

fn remove_symlink(target: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        fs::remove_file(target)
    }
    #[cfg(windows)]
    {
        // Directory symlinks on Windows are removed as directories
        fs::remove_dir(target).or_else(|_| fs::remove_file(target))
    }
}
