//! Version-control collaborator.
//!
//! The workflow never shells out directly; it talks to the [`GitClient`]
//! capability trait so tests can substitute a recording double. [`SystemGit`]
//! is the real implementation, invoking the `git` binary with an argv vector
//! (no shell, so commit messages need no quote escaping).

use std::{
   path::PathBuf,
   process::{Command, Output},
};

use crate::error::{CommitError, Result};

/// Capabilities the commit workflow needs from the version-control tool.
pub trait GitClient {
   /// `git status --porcelain` output, untrimmed.
   fn status_porcelain(&self) -> Result<String>;

   /// Working-tree diff used as generation context.
   fn diff(&self) -> Result<String>;

   /// Absolute path of the repository root.
   fn top_level(&self) -> Result<PathBuf>;

   /// Stage everything, including deletions (`git add -A`).
   fn stage_all(&self) -> Result<()>;

   /// Stage exactly the given repo-relative paths.
   fn stage_paths(&self, paths: &[String]) -> Result<()>;

   /// Commit staged changes with the given message.
   fn commit(&self, message: &str) -> Result<()>;

   /// Push to the configured remote.
   fn push(&self) -> Result<()>;
}

/// Real `git` subprocess client.
pub struct SystemGit {
   dir: String,
}

impl SystemGit {
   pub fn new(dir: impl Into<String>) -> Self {
      Self { dir: dir.into() }
   }

   fn run(&self, args: &[&str]) -> Result<Output> {
      let output = Command::new("git")
         .args(args)
         .current_dir(&self.dir)
         .output()
         .map_err(|e| CommitError::Git(format!("Failed to run git {}: {e}", args[0])))?;

      if !output.status.success() {
         let stderr = String::from_utf8_lossy(&output.stderr);
         let stdout = String::from_utf8_lossy(&output.stdout);
         return Err(CommitError::Git(format!(
            "git {} failed:\nstderr: {stderr}\nstdout: {stdout}",
            args.join(" ")
         )));
      }

      Ok(output)
   }

   /// Run a mutating command, mirroring the tool's own output to the
   /// terminal the way `git` would show it interactively.
   fn run_echoed(&self, args: &[&str]) -> Result<()> {
      let output = self.run(args)?;

      let stdout = String::from_utf8_lossy(&output.stdout);
      let stderr = String::from_utf8_lossy(&output.stderr);
      if !stdout.trim().is_empty() {
         println!("{}", stdout.trim_end());
      }
      if !stderr.trim().is_empty() {
         eprintln!("{}", stderr.trim_end());
      }

      Ok(())
   }
}

impl GitClient for SystemGit {
   fn status_porcelain(&self) -> Result<String> {
      let output = self.run(&["status", "--porcelain"])?;
      Ok(String::from_utf8_lossy(&output.stdout).to_string())
   }

   fn diff(&self) -> Result<String> {
      let output = self.run(&["diff"])?;
      Ok(String::from_utf8_lossy(&output.stdout).to_string())
   }

   fn top_level(&self) -> Result<PathBuf> {
      let output = self.run(&["rev-parse", "--show-toplevel"])?;
      let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
      if root.is_empty() {
         return Err(CommitError::Git("Not inside a git repository".to_string()));
      }
      Ok(PathBuf::from(root))
   }

   fn stage_all(&self) -> Result<()> {
      self.run(&["add", "-A"]).map(|_| ())
   }

   fn stage_paths(&self, paths: &[String]) -> Result<()> {
      if paths.is_empty() {
         return Ok(());
      }

      let mut args = vec!["add", "--"];
      args.extend(paths.iter().map(String::as_str));
      self.run(&args).map(|_| ())
   }

   fn commit(&self, message: &str) -> Result<()> {
      self.run_echoed(&["commit", "-m", message])
   }

   fn push(&self) -> Result<()> {
      self.run_echoed(&["push"])
   }
}
