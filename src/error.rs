use thiserror::Error;

use crate::sizecheck::OversizedFile;

#[derive(Debug, Error)]
pub enum CommitError {
   #[error("Git command failed: {0}")]
   Git(String),

   #[error("Configuration error: {0}")]
   Config(String),

   #[error("API request failed (HTTP {status}): {body}")]
   Api { status: u16, body: String },

   #[error("Not enough credits on OpenRouter. Visit https://openrouter.ai/credits to top up.")]
   InsufficientCredits,

   #[error("API returned no usable commit message")]
   EmptySuggestion,

   #[error(
      "Missing OpenRouter API key. Set OPENROUTER_API_KEY in the env file or the environment."
   )]
   MissingApiKey,

   #[error("Oversized files block this commit:\n{}", format_oversized(.0))]
   OversizedFiles(Vec<OversizedFile>),

   #[error("Refusing to commit with an empty message")]
   EmptyMessage,

   #[error("Interrupted. No changes were made.")]
   Interrupted,

   #[error("Commit aborted.")]
   Aborted,

   #[error("IO error: {0}")]
   Io(#[from] std::io::Error),

   #[error("JSON error: {0}")]
   Json(#[from] serde_json::Error),

   #[error("HTTP error: {0}")]
   Http(#[from] reqwest::Error),

   #[error("Prompt failed: {0}")]
   Prompt(dialoguer::Error),
}

impl From<dialoguer::Error> for CommitError {
   fn from(err: dialoguer::Error) -> Self {
      // Dialoguer puts the terminal in raw mode, so Ctrl-C never reaches
      // the signal handler; it surfaces as an interrupted read instead.
      match err {
         dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            Self::Interrupted
         }
         other => Self::Prompt(other),
      }
   }
}

fn format_oversized(files: &[OversizedFile]) -> String {
   files
      .iter()
      .map(|f| format!("  {} ({:.1} MB)", f.path, f.size_mb))
      .collect::<Vec<_>>()
      .join("\n")
}

impl CommitError {
   /// Whether this outcome is a voluntary stop rather than a failure.
   pub const fn is_user_abort(&self) -> bool {
      matches!(self, Self::Aborted | Self::Interrupted)
   }
}

pub type Result<T> = std::result::Result<T, CommitError>;
