//! Transactional commit-and-push: stage, commit, push, in that fixed order.
//!
//! Each git invocation is fatal on failure with no rollback; commit and
//! push are atomic at the tool level and this design relies on that. All
//! validation that can still cancel the run happens before the first
//! staging call.

use crate::{
   changeset::ChangeSet,
   error::{CommitError, Result},
   git::GitClient,
   style,
};

/// Stage the resolved change set, commit with `message`, and push.
///
/// When deletions were confirmed out of the change set, staging is
/// selective (`git add -- <paths>`) so the dropped deletions cannot sneak
/// back in through `git add -A`.
pub fn commit_and_push(
   git: &dyn GitClient,
   message: &str,
   changeset: &ChangeSet,
   push: bool,
) -> Result<()> {
   // MessageNegotiator already guarantees a non-empty message; checked
   // again because an empty commit message must never reach git.
   let message = message.trim();
   if message.is_empty() {
      return Err(CommitError::EmptyMessage);
   }

   println!("{}", style::info("Adding files to git..."));
   if changeset.deletions_dropped {
      git.stage_paths(&changeset.paths())?;
   } else {
      git.stage_all()?;
   }

   println!("{}", style::info("Committing changes..."));
   git.commit(message)?;

   if push {
      println!("{}", style::info("Pushing changes..."));
      git.push()?;
      println!("{}", style::success("Commit created and pushed successfully!"));
   } else {
      println!("{}", style::success("Commit created successfully!"));
   }

   Ok(())
}

#[cfg(test)]
mod tests {
   use std::{cell::RefCell, path::PathBuf};

   use super::*;
   use crate::changeset::{ChangedFile, FileStatus};

   /// Recording double: logs every mutating call.
   #[derive(Default)]
   pub struct MockGit {
      pub calls: RefCell<Vec<String>>,
      pub fail_on: Option<&'static str>,
   }

   impl MockGit {
      fn record(&self, call: &str) -> Result<()> {
         self.calls.borrow_mut().push(call.to_string());
         if self.fail_on == Some(call) {
            return Err(CommitError::Git(format!("{call} failed")));
         }
         Ok(())
      }
   }

   impl GitClient for MockGit {
      fn status_porcelain(&self) -> Result<String> {
         Ok(String::new())
      }

      fn diff(&self) -> Result<String> {
         Ok(String::new())
      }

      fn top_level(&self) -> Result<PathBuf> {
         Ok(PathBuf::from("."))
      }

      fn stage_all(&self) -> Result<()> {
         self.record("stage_all")
      }

      fn stage_paths(&self, paths: &[String]) -> Result<()> {
         self.record(&format!("stage_paths:{}", paths.join(",")))
      }

      fn commit(&self, _message: &str) -> Result<()> {
         self.record("commit")
      }

      fn push(&self) -> Result<()> {
         self.record("push")
      }
   }

   fn changeset(deletions_dropped: bool) -> ChangeSet {
      ChangeSet {
         files: vec![
            ChangedFile { status: FileStatus::Modified, path: "src/a.rs".to_string() },
            ChangedFile { status: FileStatus::Added, path: "src/b.rs".to_string() },
         ],
         deletions_dropped,
      }
   }

   #[test]
   fn test_stage_commit_push_order() {
      let git = MockGit::default();
      commit_and_push(&git, "a message", &changeset(false), true).unwrap();
      assert_eq!(*git.calls.borrow(), vec!["stage_all", "commit", "push"]);
   }

   #[test]
   fn test_selective_staging_when_deletions_dropped() {
      let git = MockGit::default();
      commit_and_push(&git, "a message", &changeset(true), true).unwrap();
      assert_eq!(*git.calls.borrow(), vec![
         "stage_paths:src/a.rs,src/b.rs",
         "commit",
         "push"
      ]);
   }

   #[test]
   fn test_empty_message_aborts_before_staging() {
      let git = MockGit::default();
      let result = commit_and_push(&git, "   ", &changeset(false), true);
      assert!(matches!(result, Err(CommitError::EmptyMessage)));
      assert!(git.calls.borrow().is_empty());
   }

   #[test]
   fn test_commit_failure_stops_before_push() {
      let git = MockGit { fail_on: Some("commit"), ..Default::default() };
      let result = commit_and_push(&git, "a message", &changeset(false), true);
      assert!(matches!(result, Err(CommitError::Git(_))));
      assert_eq!(*git.calls.borrow(), vec!["stage_all", "commit"]);
   }

   #[test]
   fn test_stage_failure_stops_before_commit() {
      let git = MockGit { fail_on: Some("stage_all"), ..Default::default() };
      let result = commit_and_push(&git, "a message", &changeset(false), true);
      assert!(result.is_err());
      assert_eq!(*git.calls.borrow(), vec!["stage_all"]);
   }

   #[test]
   fn test_no_push_stops_after_commit() {
      let git = MockGit::default();
      commit_and_push(&git, "a message", &changeset(false), false).unwrap();
      assert_eq!(*git.calls.borrow(), vec!["stage_all", "commit"]);
   }
}
