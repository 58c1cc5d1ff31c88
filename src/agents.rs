//! Agent registry: where each supported agent tool keeps its skills
//!
//! This module provides:
//! - Agent registration and lookup
//! - Agent detection (which tools are present in a project or home directory)
//! - The mapping from (agent, scope) to an absolute skills directory
//!
//! The registry is constructed from explicit project-root and home-dir values
//! so tests can substitute isolated roots; nothing here reads global state.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, SkillfetchError};

/// Installation scope: per-project or per-user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Local,
    Global,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Local => write!(f, "local"),
            Scope::Global => write!(f, "global"),
        }
    }
}

/// A supported agent tool and its skills directories
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub id: String,
    pub display_name: String,
    /// Absolute skills directory for local (per-project) installs
    pub local_skills_dir: PathBuf,
    /// Absolute skills directory for global (per-user) installs
    pub global_skills_dir: PathBuf,
    /// Directory whose presence in the project marks the agent as in use
    detection_dir: PathBuf,
}

impl AgentConfig {
    fn new(
        id: &str,
        display_name: &str,
        config_dir: &str,
        project_root: &Path,
        home_dir: &Path,
    ) -> Self {
        let skills_subdir = Path::new(config_dir).join("skills");
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            local_skills_dir: project_root.join(&skills_subdir),
            global_skills_dir: home_dir.join(&skills_subdir),
            detection_dir: project_root.join(config_dir),
        }
    }

    /// The skills directory this agent owns for the given scope
    pub fn skills_root(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Local => &self.local_skills_dir,
            Scope::Global => &self.global_skills_dir,
        }
    }

    /// Whether the agent's config directory exists in the project
    pub fn detect_installed(&self) -> bool {
        self.detection_dir.exists()
    }
}

/// Registry of all supported agents
pub struct AgentRegistry {
    agents: Vec<AgentConfig>,
}

impl AgentRegistry {
    /// Build the default agent set rooted at the given project and home dirs
    pub fn new(project_root: &Path, home_dir: &Path) -> Self {
        let agents = vec![
            AgentConfig::new("claude-code", "Claude Code", ".claude", project_root, home_dir),
            AgentConfig::new("cursor", "Cursor", ".cursor", project_root, home_dir),
            AgentConfig::new("windsurf", "Windsurf", ".windsurf", project_root, home_dir),
            AgentConfig::new("codex", "Codex CLI", ".codex", project_root, home_dir),
            AgentConfig::new("opencode", "OpenCode", ".opencode", project_root, home_dir),
            AgentConfig::new("gemini", "Gemini CLI", ".gemini", project_root, home_dir),
        ];
        Self { agents }
    }

    /// Get an agent by its ID
    pub fn get(&self, id: &str) -> Option<&AgentConfig> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Resolve a list of agent IDs, failing on the first unknown one
    pub fn resolve(&self, ids: &[String]) -> Result<Vec<&AgentConfig>> {
        ids.iter()
            .map(|id| {
                self.get(id).ok_or_else(|| SkillfetchError::UnknownAgent {
                    name: id.clone(),
                })
            })
            .collect()
    }

    /// Agents whose config directory exists in the project
    pub fn detect_installed(&self) -> Vec<&AgentConfig> {
        self.agents.iter().filter(|a| a.detect_installed()).collect()
    }
}
