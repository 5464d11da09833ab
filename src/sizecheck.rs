//! Size ceiling check for files entering a commit.
//!
//! Purely advisory stat pass: a path that cannot be stat-ed (racing
//! deletion, permission issue) is skipped rather than flagged, since the
//! commit itself will surface any real problem.

use std::{fs, path::Path};

/// A candidate file whose on-disk size exceeds the configured ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct OversizedFile {
   /// Repo-root relative path.
   pub path:    String,
   /// Size in megabytes.
   pub size_mb: f64,
}

/// Stat `paths` (repo-root relative, resolved under `root`) and return the
/// entries larger than `max_size_mb`. An empty result means all clear.
pub fn check_sizes<P: AsRef<str>>(root: &Path, paths: &[P], max_size_mb: f64) -> Vec<OversizedFile> {
   let limit_bytes = max_size_mb * 1024.0 * 1024.0;
   let mut oversized = Vec::new();

   for path in paths {
      let path = path.as_ref();
      let Ok(metadata) = fs::metadata(root.join(path)) else {
         continue;
      };
      if !metadata.is_file() {
         continue;
      }

      let size = metadata.len() as f64;
      if size > limit_bytes {
         oversized.push(OversizedFile { path: path.to_string(), size_mb: size / (1024.0 * 1024.0) });
      }
   }

   oversized
}

#[cfg(test)]
mod tests {
   use std::io::Write;

   use tempfile::TempDir;

   use super::*;

   fn write_file(dir: &TempDir, name: &str, len: usize) {
      let mut f = fs::File::create(dir.path().join(name)).unwrap();
      f.write_all(&vec![0u8; len]).unwrap();
   }

   #[test]
   fn test_flags_file_over_limit() {
      let dir = TempDir::new().unwrap();
      // 2 MB file against a 1 MB ceiling
      write_file(&dir, "big.bin", 2 * 1024 * 1024);

      let oversized = check_sizes(dir.path(), &["big.bin"], 1.0);
      assert_eq!(oversized.len(), 1);
      assert_eq!(oversized[0].path, "big.bin");
      assert!((oversized[0].size_mb - 2.0).abs() < 0.01);
   }

   #[test]
   fn test_passes_file_at_limit() {
      let dir = TempDir::new().unwrap();
      // Exactly at the ceiling is allowed; only strictly-greater is flagged.
      write_file(&dir, "edge.bin", 1024 * 1024);

      assert!(check_sizes(dir.path(), &["edge.bin"], 1.0).is_empty());
   }

   #[test]
   fn test_passes_small_file() {
      let dir = TempDir::new().unwrap();
      write_file(&dir, "small.txt", 128);

      assert!(check_sizes(dir.path(), &["small.txt"], 1.0).is_empty());
   }

   #[test]
   fn test_skips_missing_paths() {
      let dir = TempDir::new().unwrap();
      assert!(check_sizes(dir.path(), &["deleted.txt"], 1.0).is_empty());
   }

   #[test]
   fn test_skips_directories() {
      let dir = TempDir::new().unwrap();
      fs::create_dir(dir.path().join("sub")).unwrap();

      assert!(check_sizes(dir.path(), &["sub"], 0.0).is_empty());
   }
}
