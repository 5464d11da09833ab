//! Terminal interaction boundary.
//!
//! All interactive prompts go through the [`Prompter`] trait so the
//! resolver and negotiator state machines can be driven by scripted doubles
//! in tests. Escape/`q` at any prompt is a voluntary abort.

use dialoguer::{Confirm, Input, Select};

use crate::error::{CommitError, Result};

/// Top-level action chosen at the start of message negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
   UseAi,
   Custom,
   Exit,
}

/// Interactive prompts the workflow needs.
pub trait Prompter {
   /// Pick between AI generation, manual entry, and exit.
   fn select_action(&mut self) -> Result<Action>;

   /// One yes/no question.
   fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

   /// Free-text commit message entry. May return an empty string; the
   /// caller decides what empty means.
   fn input_message(&mut self) -> Result<String>;
}

/// Dialoguer-backed prompter for real terminal sessions.
#[derive(Debug, Default)]
pub struct TermPrompter;

impl Prompter for TermPrompter {
   fn select_action(&mut self) -> Result<Action> {
      let items = ["Use AI commit", "Enter manually", "Exit"];

      let selection = Select::new()
         .with_prompt("What would you like to do?")
         .items(items)
         .default(0)
         .interact_opt()?;

      match selection {
         Some(0) => Ok(Action::UseAi),
         Some(1) => Ok(Action::Custom),
         Some(2) | None => Ok(Action::Exit),
         Some(_) => unreachable!("select has exactly three items"),
      }
   }

   fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
      let answer = Confirm::new()
         .with_prompt(prompt)
         .default(default)
         .interact_opt()?;

      // Escape counts as an abort, not as "no".
      answer.ok_or(CommitError::Aborted)
   }

   fn input_message(&mut self) -> Result<String> {
      let text: String = Input::new()
         .with_prompt("Enter your custom commit message")
         .allow_empty(true)
         .interact_text()?;
      Ok(text)
   }
}
