//! Common test utilities for skillfetch integration tests

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tempfile::TempDir;

/// An isolated environment for integration tests: a project directory, a fake
/// home directory and a private cache root, all under one temp dir.
#[allow(dead_code)]
pub struct TestEnv {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub project: PathBuf,
    pub home: PathBuf,
    pub cache: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let project = temp.path().join("project");
        let home = temp.path().join("home");
        let cache = temp.path().join("cache");
        std::fs::create_dir_all(project.join(".git")).expect("Failed to create project");
        std::fs::create_dir_all(&home).expect("Failed to create home");
        Self {
            temp,
            project,
            home,
            cache,
        }
    }

    /// Command wired to this environment's project, home and cache
    // Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
    #[allow(deprecated)]
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("skillfetch").expect("binary builds");
        cmd.current_dir(&self.project)
            .env("HOME", &self.home)
            .env("SKILLFETCH_CACHE_DIR", &self.cache)
            .env("NO_COLOR", "1");
        cmd
    }

    /// Mark an agent as present in the project (e.g. ".cursor")
    pub fn create_agent_dir(&self, config_dir: &str) {
        std::fs::create_dir_all(self.project.join(config_dir)).expect("Failed to create agent dir");
    }

    /// Seed a fresh registry cache entry listing the given skills
    pub fn seed_registry(&self, skills: &[(&str, &[&str])]) {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_millis() as u64;

        let skills_json: Vec<serde_json::Value> = skills
            .iter()
            .map(|(name, files)| {
                serde_json::json!({
                    "name": name,
                    "description": format!("{name} description"),
                    "category": "dev",
                    "path": format!("(dev)/{name}"),
                    "files": files,
                })
            })
            .collect();

        let entry = serde_json::json!({
            "fetchedAt": now_ms,
            "registry": {
                "version": "0.9.1",
                "generatedAt": "2026-01-01T00:00:00Z",
                "baseUrl": "https://cdn.example.com",
                "categories": {},
                "skills": skills_json,
            }
        });

        std::fs::create_dir_all(&self.cache).expect("Failed to create cache dir");
        std::fs::write(
            self.cache.join("registry.json"),
            serde_json::to_vec_pretty(&entry).expect("serialize entry"),
        )
        .expect("Failed to write registry cache");
    }

    /// Seed a complete cached skill with the given files
    pub fn seed_cached_skill(&self, name: &str, files: &[&str]) {
        let root = self.cache.join("skills").join(name);
        for file in files {
            let path = root.join(file);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create skill dirs");
            }
            std::fs::write(&path, format!("# {name}: {file}")).expect("Failed to write skill file");
        }
    }

    /// Path where a local install for the agent would land
    pub fn installed_path(&self, config_dir: &str, skill: &str) -> PathBuf {
        self.project.join(config_dir).join("skills").join(skill)
    }
}
