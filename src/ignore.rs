//! Static ignore policy for change-set filtering.
//!
//! Matching is plain case-sensitive substring containment, exactly as the
//! policy is written. This is intentionally loose: `mydist/foo.js` matches
//! the `dist/` fragment, and glob-looking fragments such as `*.log` only
//! match paths that literally contain `*.log`. Do not upgrade this to
//! path-segment or glob matching without changing the documented policy.

use crate::config::IGNORED_FILES;

/// Whether a repo-relative path is excluded by the ignore policy.
pub fn is_ignored(path: &str) -> bool {
   IGNORED_FILES.iter().any(|fragment| path.contains(fragment))
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_ignores_node_modules() {
      assert!(is_ignored("node_modules/x.js"));
      assert!(is_ignored("web/node_modules/lodash/index.js"));
   }

   #[test]
   fn test_ignores_env_file() {
      assert!(is_ignored(".env.openrouter"));
   }

   #[test]
   fn test_keeps_source_files() {
      assert!(!is_ignored("src/a.js"));
      assert!(!is_ignored("Cargo.toml"));
      assert!(!is_ignored("README.md"));
   }

   #[test]
   fn test_substring_match_is_not_anchored() {
      // Documented looseness: any path containing the fragment matches.
      assert!(is_ignored("mydist/foo.js"));
      assert!(is_ignored("project/logs/output.txt"));
   }

   #[test]
   fn test_glob_fragments_match_literally() {
      // "*.log" is a literal substring here, so a normal log file does not
      // match it (the directory fragment "logs/" is what catches those).
      assert!(!is_ignored("build.log"));
      assert!(is_ignored("weird/*.log/file"));
   }

   #[test]
   fn test_case_sensitive() {
      assert!(!is_ignored("Node_Modules/x.js"));
   }
}
