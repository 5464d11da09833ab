//! Top-level run orchestration.
//!
//! Strictly linear: resolve the change set, bail out cleanly when there is
//! nothing to do, negotiate a message, then stage/commit/push. Every
//! collaborator comes in through a seam so the whole flow is testable.

use crate::{
   api::SuggestionSource,
   cancel::CancelToken,
   changeset, executor,
   config::CommitConfig,
   error::Result,
   git::GitClient,
   negotiate,
   prompt::Prompter,
   style,
};

/// Per-invocation options derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
   /// Push after committing (on by default).
   pub push: bool,
}

impl Default for RunOptions {
   fn default() -> Self {
      Self { push: true }
   }
}

/// Execute one full commit run. Returns `Ok(())` both on a completed
/// commit and on the terminal "nothing to do" outcome.
pub fn run(
   git: &dyn GitClient,
   suggester: &dyn SuggestionSource,
   prompter: &mut dyn Prompter,
   cancel: &CancelToken,
   config: &CommitConfig,
   options: RunOptions,
) -> Result<()> {
   cancel.checkpoint()?;

   let changeset = changeset::resolve(git, prompter, cancel, config)?;
   if changeset.is_empty() {
      println!("{}", style::success("No changes detected."));
      return Ok(());
   }

   // Diff context for the AI path; harmless when the operator goes manual.
   let diff = git.diff()?;
   cancel.checkpoint()?;

   let message = negotiate::negotiate(&changeset, &diff, suggester, prompter, cancel)?;
   cancel.checkpoint()?;

   executor::commit_and_push(git, &message, &changeset, options.push)
}
