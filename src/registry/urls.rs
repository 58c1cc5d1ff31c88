//! Remote URL templates for the manifest and skill files
//!
//! Content is published in a git repository and served through two hosts
//! sharing the same relative paths: a CDN (primary) and the raw-content host
//! (fallback). Both are pinned to a ref, normally the tag matching this
//! crate's version; `SKILLFETCH_REF` overrides the ref (e.g. to `main`).

/// Content repository slug on both hosts
const REPO_SLUG: &str = "tech-leads-club/agent-skills";

/// Manifest location within the content repository
const MANIFEST_PATH: &str = "/packages/skills-catalog/skills-registry.json";

/// Skills root within the content repository
const SKILLS_ROOT_PATH: &str = "/packages/skills-catalog/skills";

/// Environment variable overriding the content ref
pub const REF_ENV_VAR: &str = "SKILLFETCH_REF";

/// Primary and fallback URL bases for one content ref
#[derive(Debug, Clone)]
pub struct UrlSet {
    cdn_base: String,
    raw_base: String,
}

impl UrlSet {
    /// Build the URL set for the given content ref (e.g. `v0.9.1` or `main`)
    pub fn for_ref(content_ref: &str) -> Self {
        Self {
            cdn_base: format!("https://cdn.jsdelivr.net/gh/{REPO_SLUG}@{content_ref}"),
            raw_base: format!("https://raw.githubusercontent.com/{REPO_SLUG}/{content_ref}"),
        }
    }

    /// Build the URL set from the environment, defaulting to this crate's
    /// release tag
    pub fn from_env() -> Self {
        let content_ref = std::env::var(REF_ENV_VAR)
            .unwrap_or_else(|_| format!("v{}", env!("CARGO_PKG_VERSION")));
        Self::for_ref(&content_ref)
    }

    /// (primary, fallback) URLs for the registry manifest
    pub fn manifest_urls(&self) -> (String, String) {
        (
            format!("{}{MANIFEST_PATH}", self.cdn_base),
            format!("{}{MANIFEST_PATH}", self.raw_base),
        )
    }

    /// (primary, fallback) URLs for one file of a skill
    pub fn file_urls(&self, skill_path: &str, file: &str) -> (String, String) {
        (
            format!("{}{SKILLS_ROOT_PATH}/{skill_path}/{file}", self.cdn_base),
            format!("{}{SKILLS_ROOT_PATH}/{skill_path}/{file}", self.raw_base),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_urls() {
        let urls = UrlSet::for_ref("v0.9.1");
        let (primary, fallback) = urls.manifest_urls();
        assert_eq!(
            primary,
            "https://cdn.jsdelivr.net/gh/tech-leads-club/agent-skills@v0.9.1/packages/skills-catalog/skills-registry.json"
        );
        assert_eq!(
            fallback,
            "https://raw.githubusercontent.com/tech-leads-club/agent-skills/v0.9.1/packages/skills-catalog/skills-registry.json"
        );
    }

    #[test]
    fn test_file_urls_share_relative_path() {
        let urls = UrlSet::for_ref("v0.9.1");
        let (primary, fallback) = urls.file_urls("(cloud)/cloudflare-deploy", "SKILL.md");
        assert!(primary.starts_with("https://cdn.jsdelivr.net/"));
        assert!(fallback.starts_with("https://raw.githubusercontent.com/"));
        for url in [&primary, &fallback] {
            assert!(url.ends_with(
                "/packages/skills-catalog/skills/(cloud)/cloudflare-deploy/SKILL.md"
            ));
        }
    }

    #[test]
    fn test_branch_ref() {
        let urls = UrlSet::for_ref("main");
        let (primary, _) = urls.manifest_urls();
        assert!(primary.contains("agent-skills@main/"));
    }

    #[test]
    fn test_nested_file_path() {
        let urls = UrlSet::for_ref("v1.0.0");
        let (primary, _) = urls.file_urls("(cloud)/cloudflare-deploy", "references/workers/api.md");
        assert!(primary.ends_with("cloudflare-deploy/references/workers/api.md"));
    }
}
