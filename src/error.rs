//! Error types and handling for skillfetch
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Two outcomes are deliberately NOT errors: an already-installed skill
//! (reported as a successful no-op in [`crate::installer::InstallResult`]) and
//! a corrupted registry cache file (treated as a cache miss).

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for skillfetch operations
#[derive(Error, Diagnostic, Debug)]
pub enum SkillfetchError {
    #[error("Invalid skill name: '{name}'")]
    #[diagnostic(
        code(skillfetch::name::invalid),
        help("Skill names may only contain filesystem-safe characters")
    )]
    InvalidName { name: String },

    #[error("Unsafe path '{path}' escapes '{base}'")]
    #[diagnostic(code(skillfetch::path::unsafe_path))]
    UnsafePath { base: String, path: String },

    #[error("Network request failed for {url}: {reason}")]
    #[diagnostic(
        code(skillfetch::net::request_failed),
        help("Check your network connection; a stale cached registry is used when available")
    )]
    Network { url: String, reason: String },

    #[error("HTTP {status} from {url}")]
    #[diagnostic(code(skillfetch::net::http_status))]
    HttpStatus { status: u16, url: String },

    #[error("Skill '{name}' not found in registry")]
    #[diagnostic(
        code(skillfetch::registry::skill_not_found),
        help("Run 'skillfetch list --available' to see published skills")
    )]
    SkillNotFound { name: String },

    #[error("Only {downloaded}/{total} files downloaded successfully")]
    #[diagnostic(
        code(skillfetch::download::incomplete),
        help("The partial download is kept in cache; re-running the install retries it")
    )]
    IncompleteDownload { downloaded: usize, total: usize },

    #[error("Invalid registry manifest: {reason}")]
    #[diagnostic(code(skillfetch::registry::manifest_invalid))]
    ManifestInvalid { reason: String },

    #[error("Unknown agent: {name}")]
    #[diagnostic(
        code(skillfetch::agents::unknown),
        help("Run 'skillfetch list' to see supported agents")
    )]
    UnknownAgent { name: String },

    #[error("No agents selected and none detected in this project")]
    #[diagnostic(
        code(skillfetch::agents::none_detected),
        help("Pass --agent explicitly, e.g. --agent claude-code")
    )]
    NoAgentsDetected,

    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(skillfetch::cache::operation_failed))]
    CacheOperationFailed { message: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(skillfetch::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(skillfetch::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(skillfetch::fs::io_error))]
    IoError { message: String },

    #[error("{failed} of {total} operations failed")]
    #[diagnostic(code(skillfetch::partial_failure))]
    PartialFailure { failed: usize, total: usize },
}

impl From<std::io::Error> for SkillfetchError {
    fn from(err: std::io::Error) -> Self {
        SkillfetchError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SkillfetchError {
    fn from(err: serde_json::Error) -> Self {
        SkillfetchError::ManifestInvalid {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SkillfetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SkillfetchError::SkillNotFound {
            name: "test-skill".to_string(),
        };
        assert_eq!(err.to_string(), "Skill 'test-skill' not found in registry");
    }

    #[test]
    fn test_incomplete_download_message_is_exact() {
        let err = SkillfetchError::IncompleteDownload {
            downloaded: 295,
            total: 310,
        };
        assert_eq!(
            err.to_string(),
            "Only 295/310 files downloaded successfully"
        );
    }

    #[test]
    fn test_error_code() {
        let err = SkillfetchError::SkillNotFound {
            name: "test".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("skillfetch::registry::skill_not_found".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SkillfetchError = io_err.into();
        assert!(matches!(err, SkillfetchError::IoError { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("not json");
        let err: SkillfetchError = parse_result.unwrap_err().into();
        assert!(matches!(err, SkillfetchError::ManifestInvalid { .. }));
    }

    #[test]
    fn test_network_error_display() {
        let err = SkillfetchError::Network {
            url: "https://example.com/registry.json".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));
        assert!(err.to_string().contains("https://example.com/registry.json"));
    }
}
