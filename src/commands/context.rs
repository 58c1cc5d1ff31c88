//! Shared wiring for command handlers
//!
//! Builds the cache store, HTTP fetcher, URL set and agent registry once per
//! invocation. Everything is an explicit value so the core stays free of
//! hidden singletons.

use std::sync::Arc;

use crate::agents::{AgentConfig, AgentRegistry};
use crate::error::{Result, SkillfetchError};
use crate::project_root::find_project_root;
use crate::registry::cache::CacheStore;
use crate::registry::http::{Fetcher, HttpClient, ReqwestClient};
use crate::registry::resolver::Resolver;
use crate::registry::urls::UrlSet;

pub struct AppContext {
    pub cache: CacheStore,
    pub client: Arc<dyn HttpClient>,
    pub fetcher: Fetcher,
    pub urls: UrlSet,
    pub agents: AgentRegistry,
}

impl AppContext {
    pub fn init() -> Result<Self> {
        let cache = CacheStore::open_default()?;
        let client: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new()?);
        let fetcher = Fetcher::new(client.clone());
        let urls = UrlSet::from_env();

        let cwd = std::env::current_dir()?;
        let project_root = find_project_root(&cwd);
        let home = dirs::home_dir().ok_or_else(|| SkillfetchError::IoError {
            message: "could not determine home directory".to_string(),
        })?;
        let agents = AgentRegistry::new(&project_root, &home);

        Ok(Self {
            cache,
            client,
            fetcher,
            urls,
            agents,
        })
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.fetcher, &self.cache, &self.urls)
    }

    /// Explicitly requested agents, or the ones detected in the project
    pub fn select_agents(&self, requested: &[String]) -> Result<Vec<&AgentConfig>> {
        if !requested.is_empty() {
            return self.agents.resolve(requested);
        }
        let detected = self.agents.detect_installed();
        if detected.is_empty() {
            return Err(SkillfetchError::NoAgentsDetected);
        }
        Ok(detected)
    }
}
