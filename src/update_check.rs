//! Best-effort check for a newer published version of skillfetch
//!
//! Queries the crates.io API once (no retries, the fetcher's policy would be
//! overkill for an advisory check). Any failure means "no update available".

use semver::Version;
use serde::Deserialize;
use tracing::debug;

use crate::registry::http::HttpClient;

const CRATES_IO_API: &str = "https://crates.io/api/v1/crates";

#[derive(Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Deserialize)]
struct CrateInfo {
    #[serde(default)]
    max_stable_version: Option<String>,
    #[serde(default)]
    newest_version: Option<String>,
}

/// The version this binary was built as
pub fn current_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns the latest published version when it is newer than `current`,
/// `None` otherwise — including on any network or parse failure.
pub fn check_for_updates(client: &dyn HttpClient, current: &str) -> Option<String> {
    let url = format!("{CRATES_IO_API}/{}", env!("CARGO_PKG_NAME"));
    let body = match client.get(&url) {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "update check failed");
            return None;
        }
    };

    let response: CrateResponse = serde_json::from_slice(&body).ok()?;
    let latest = response
        .krate
        .max_stable_version
        .or(response.krate.newest_version)?;

    let latest_version = Version::parse(&latest).ok()?;
    let current_version = Version::parse(current).ok()?;
    (latest_version > current_version).then_some(latest)
}
