//! Name sanitization and path containment checks
//!
//! Skill names come from a remote manifest and end up as directory names under
//! the cache root and agent skill directories; file paths inside a skill come
//! from the same manifest and are joined under the skill's cache directory.
//! Both are untrusted input.

use std::path::{Component, Path, PathBuf};

/// Characters that are unsafe in filesystem paths or URLs.
/// Removed outright (not replaced): `<`, `>`, `:`, `"`, `|`, `?`, `*`
const UNSAFE_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Sanitize a skill name for filesystem use.
///
/// Removes path separators (`/`, `\`), parent-directory sequences (`..`) and
/// unsafe characters, then trims surrounding whitespace. A name is valid iff
/// it survives sanitization unchanged; callers treat an empty result as
/// invalid.
pub fn sanitize_name(name: &str) -> String {
    let no_separators: String = name.chars().filter(|c| !matches!(c, '/' | '\\')).collect();
    let no_parent = no_separators.replace("..", "");
    no_parent
        .chars()
        .filter(|c| !UNSAFE_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Lexically normalize a path: resolve `.` and `..` components without
/// touching the filesystem (the target usually does not exist yet).
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Check whether `target` is contained within `base`.
///
/// True iff the normalized target equals the normalized base or is a
/// descendant of it. Comparison is component-wise, so `/cache/skills-evil`
/// is NOT inside `/cache/skills`.
pub fn is_path_safe(base: &Path, target: &Path) -> bool {
    let base = normalize(base);
    let target = normalize(target);
    target.starts_with(&base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_valid_names() {
        assert_eq!(sanitize_name("my-skill"), "my-skill");
        assert_eq!(sanitize_name("cloudflare-deploy"), "cloudflare-deploy");
        assert_eq!(sanitize_name("aws-advisor"), "aws-advisor");
        assert_eq!(sanitize_name("skill_2"), "skill_2");
    }

    #[test]
    fn test_sanitize_removes_traversal() {
        assert_eq!(sanitize_name("../evil"), "evil");
        assert_eq!(sanitize_name("..\\..\\passwd"), "passwd");
    }

    #[test]
    fn test_sanitize_removes_separators() {
        assert_eq!(sanitize_name("path/to/skill"), "pathtoskill");
        assert_eq!(sanitize_name("path\\to\\skill"), "pathtoskill");
    }

    #[test]
    fn test_sanitize_removes_special_chars() {
        assert_eq!(sanitize_name("skill<script>"), "skillscript");
        assert_eq!(sanitize_name("skill:name"), "skillname");
        assert_eq!(sanitize_name("skill\"name\""), "skillname");
        assert_eq!(sanitize_name("a|b?c*d"), "abcd");
    }

    #[test]
    fn test_sanitize_trims_whitespace() {
        assert_eq!(sanitize_name("  my-skill  "), "my-skill");
    }

    #[test]
    fn test_sanitize_all_unsafe_is_empty() {
        assert_eq!(sanitize_name("../../../"), "");
        assert_eq!(sanitize_name("<>:\"|?*"), "");
        assert_eq!(sanitize_name("   "), "");
        assert_eq!(sanitize_name(""), "");
    }

    #[test]
    fn test_path_safe_allows_base_and_descendants() {
        let base = Path::new("/cache/skills/my-skill");
        assert!(is_path_safe(base, base));
        assert!(is_path_safe(base, Path::new("/cache/skills/my-skill/SKILL.md")));
        assert!(is_path_safe(
            base,
            Path::new("/cache/skills/my-skill/references/api.md")
        ));
    }

    #[test]
    fn test_path_safe_handles_nested_directories() {
        let base = Path::new("/cache/skills/cloudflare-deploy");
        assert!(is_path_safe(
            base,
            Path::new("/cache/skills/cloudflare-deploy/references/workers/api.md")
        ));
        assert!(is_path_safe(
            base,
            Path::new("/cache/skills/cloudflare-deploy/references/deep/nested/file.md")
        ));
    }

    #[test]
    fn test_path_safe_blocks_traversal() {
        let base = Path::new("/cache/skills/my-skill");
        assert!(!is_path_safe(base, Path::new("/cache/skills/other-skill/file.md")));
        assert!(!is_path_safe(base, Path::new("/etc/passwd")));
        assert!(!is_path_safe(
            base,
            Path::new("/cache/skills/my-skill/../other/file.md")
        ));
        assert!(!is_path_safe(
            base,
            Path::new("/cache/skills/my-skill/refs/../../../etc/passwd")
        ));
    }

    #[test]
    fn test_path_safe_is_component_wise() {
        // A sibling directory sharing a string prefix must not pass.
        let base = Path::new("/cache/skills/my-skill");
        assert!(!is_path_safe(base, Path::new("/cache/skills/my-skill-evil/x")));
    }

    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(
            normalize(Path::new("/a/../../b")),
            PathBuf::from("/b")
        );
        assert_eq!(normalize(Path::new("/a/./b")), PathBuf::from("/a/b"));
    }
}
