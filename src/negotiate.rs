//! Interactive commit-message negotiation.
//!
//! State machine: SelectAction → {GenerateAI, ManualEntry} → ConfirmOrRetry
//! → Final. AI failures of any kind fall through to manual entry; only a
//! voluntary exit or an interrupt ends the run. The returned message is
//! guaranteed non-empty and trimmed.

use crate::{
   api::SuggestionSource,
   cancel::CancelToken,
   changeset::ChangeSet,
   config::MANUAL_PLACEHOLDER,
   error::{CommitError, Result},
   prompt::{Action, Prompter},
   style,
};

/// Re-interpret a prompt failure as an interrupt when the cancel flag is
/// already set: Ctrl-C tears the pending read down with an IO error, and
/// that error must not masquerade as a real failure.
fn checked<T>(cancel: &CancelToken, result: Result<T>) -> Result<T> {
   match result {
      Err(e) if cancel.is_cancelled() && !matches!(e, CommitError::Aborted) => {
         Err(CommitError::Interrupted)
      },
      other => other,
   }
}

/// Drive the negotiation state machine to a final commit message.
pub fn negotiate(
   changeset: &ChangeSet,
   diff: &str,
   suggester: &dyn SuggestionSource,
   prompter: &mut dyn Prompter,
   cancel: &CancelToken,
) -> Result<String> {
   cancel.checkpoint()?;
   let action = checked(cancel, prompter.select_action())?;
   cancel.checkpoint()?;

   match action {
      Action::Exit => Err(CommitError::Aborted),
      Action::Custom => manual_entry(prompter, cancel),
      Action::UseAi => match generate_and_confirm(changeset, diff, suggester, prompter, cancel)? {
         Some(message) => Ok(message),
         None => manual_entry(prompter, cancel),
      },
   }
}

/// GenerateAI + ConfirmOrRetry. `Ok(None)` means "fall through to manual
/// entry" — either the collaborator failed or the operator declined the
/// suggestion.
fn generate_and_confirm(
   changeset: &ChangeSet,
   diff: &str,
   suggester: &dyn SuggestionSource,
   prompter: &mut dyn Prompter,
   cancel: &CancelToken,
) -> Result<Option<String>> {
   let paths = changeset.paths();

   let suggestion =
      style::with_spinner_result("Generating commit message with AI...", || {
         suggester.suggest(diff, &paths)
      });

   // An interrupt that arrived during the network wait wins over whatever
   // the call returned.
   cancel.checkpoint()?;

   let suggestion = match suggestion {
      Ok(text) => text,
      Err(e @ (CommitError::InsufficientCredits | CommitError::MissingApiKey)) => {
         eprintln!("{}", style::error(&e.to_string()));
         eprintln!("{}", style::warning("You can enter your commit message manually."));
         return Ok(None);
      },
      Err(e) => {
         eprintln!("{}", style::error(&format!("AI generation failed: {e}")));
         eprintln!("{}", style::warning("Switching to manual entry."));
         return Ok(None);
      },
   };

   println!("{}", style::boxed_message("Suggested Commit Message", &suggestion, style::term_width()));

   let accepted = checked(cancel, prompter.confirm("Use this message?", true))?;
   cancel.checkpoint()?;

   Ok(accepted.then_some(suggestion))
}

/// ManualEntry: free-text prompt; empty input becomes the fixed placeholder
/// so the run never proceeds with a literally empty message.
fn manual_entry(prompter: &mut dyn Prompter, cancel: &CancelToken) -> Result<String> {
   cancel.checkpoint()?;
   let text = checked(cancel, prompter.input_message())?;
   cancel.checkpoint()?;

   let trimmed = text.trim();
   if trimmed.is_empty() {
      Ok(MANUAL_PLACEHOLDER.to_string())
   } else {
      Ok(trimmed.to_string())
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::{
      changeset::{ChangedFile, FileStatus},
      prompt::testing::{Answer, ScriptedPrompter},
   };

   struct FixedSuggester(Result<String>);

   impl SuggestionSource for FixedSuggester {
      fn suggest(&self, _diff: &str, _files: &[String]) -> Result<String> {
         match &self.0 {
            Ok(text) => Ok(text.clone()),
            Err(CommitError::InsufficientCredits) => Err(CommitError::InsufficientCredits),
            Err(CommitError::MissingApiKey) => Err(CommitError::MissingApiKey),
            Err(CommitError::EmptySuggestion) => Err(CommitError::EmptySuggestion),
            Err(e) => Err(CommitError::Git(e.to_string())),
         }
      }
   }

   fn changeset() -> ChangeSet {
      ChangeSet {
         files: vec![ChangedFile { status: FileStatus::Modified, path: "src/a.js".to_string() }],
         deletions_dropped: false,
      }
   }

   #[test]
   fn test_exit_aborts_without_message() {
      let mut prompter = ScriptedPrompter::new([Answer::Action(Action::Exit)]);
      let suggester = FixedSuggester(Ok("unused".to_string()));

      let result =
         negotiate(&changeset(), "", &suggester, &mut prompter, &CancelToken::new());
      assert!(matches!(result, Err(CommitError::Aborted)));
   }

   #[test]
   fn test_ai_suggestion_accepted() {
      let mut prompter =
         ScriptedPrompter::new([Answer::Action(Action::UseAi), Answer::Confirm(true)]);
      let suggester = FixedSuggester(Ok("Add feature X".to_string()));

      let message =
         negotiate(&changeset(), "diff", &suggester, &mut prompter, &CancelToken::new()).unwrap();
      assert_eq!(message, "Add feature X");
   }

   #[test]
   fn test_ai_suggestion_declined_routes_to_manual() {
      let mut prompter = ScriptedPrompter::new([
         Answer::Action(Action::UseAi),
         Answer::Confirm(false),
         Answer::Input("my own words".to_string()),
      ]);
      let suggester = FixedSuggester(Ok("Add feature X".to_string()));

      let message =
         negotiate(&changeset(), "diff", &suggester, &mut prompter, &CancelToken::new()).unwrap();
      assert_eq!(message, "my own words");
   }

   #[test]
   fn test_quota_failure_falls_back_to_manual() {
      // Scenario D: a 402 response transitions to manual entry, not failure.
      let mut prompter = ScriptedPrompter::new([
         Answer::Action(Action::UseAi),
         Answer::Input("manual after quota".to_string()),
      ]);
      let suggester = FixedSuggester(Err(CommitError::InsufficientCredits));

      let message =
         negotiate(&changeset(), "diff", &suggester, &mut prompter, &CancelToken::new()).unwrap();
      assert_eq!(message, "manual after quota");
   }

   #[test]
   fn test_empty_suggestion_falls_back_to_manual() {
      let mut prompter = ScriptedPrompter::new([
         Answer::Action(Action::UseAi),
         Answer::Input("fallback".to_string()),
      ]);
      let suggester = FixedSuggester(Err(CommitError::EmptySuggestion));

      let message =
         negotiate(&changeset(), "diff", &suggester, &mut prompter, &CancelToken::new()).unwrap();
      assert_eq!(message, "fallback");
   }

   #[test]
   fn test_missing_key_falls_back_to_manual() {
      let mut prompter = ScriptedPrompter::new([
         Answer::Action(Action::UseAi),
         Answer::Input("no key needed".to_string()),
      ]);
      let suggester = FixedSuggester(Err(CommitError::MissingApiKey));

      let message =
         negotiate(&changeset(), "diff", &suggester, &mut prompter, &CancelToken::new()).unwrap();
      assert_eq!(message, "no key needed");
   }

   #[test]
   fn test_empty_manual_input_becomes_placeholder() {
      let mut prompter = ScriptedPrompter::new([
         Answer::Action(Action::Custom),
         Answer::Input("   ".to_string()),
      ]);
      let suggester = FixedSuggester(Ok("unused".to_string()));

      let message =
         negotiate(&changeset(), "", &suggester, &mut prompter, &CancelToken::new()).unwrap();
      assert_eq!(message, MANUAL_PLACEHOLDER);
   }

   #[test]
   fn test_manual_input_is_trimmed() {
      let mut prompter = ScriptedPrompter::new([
         Answer::Action(Action::Custom),
         Answer::Input("  tidy message  ".to_string()),
      ]);
      let suggester = FixedSuggester(Ok("unused".to_string()));

      let message =
         negotiate(&changeset(), "", &suggester, &mut prompter, &CancelToken::new()).unwrap();
      assert_eq!(message, "tidy message");
   }

   #[test]
   fn test_interrupt_during_generation_aborts() {
      // Scenario F: the interrupt observed after the API suspension wins.
      struct CancellingSuggester(CancelToken);
      impl SuggestionSource for CancellingSuggester {
         fn suggest(&self, _diff: &str, _files: &[String]) -> Result<String> {
            self.0.cancel();
            Ok("too late".to_string())
         }
      }

      let cancel = CancelToken::new();
      let mut prompter = ScriptedPrompter::new([Answer::Action(Action::UseAi)]);
      let suggester = CancellingSuggester(cancel.clone());

      let result = negotiate(&changeset(), "diff", &suggester, &mut prompter, &cancel);
      assert!(matches!(result, Err(CommitError::Interrupted)));
   }
}
