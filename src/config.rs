use std::path::Path;

use crate::error::Result;

/// Default env file looked up in the current directory.
pub const DEFAULT_ENV_FILE: &str = ".env.openrouter";

/// Model used when `OPENROUTER_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1";

/// OpenRouter API base URL.
pub const API_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Per-file size ceiling for anything entering a commit.
pub const MAX_FILE_SIZE_MB: f64 = 49.0;

/// Diff text beyond this many characters is truncated before upload.
pub const MAX_DIFF_CHARS: usize = 10_000;

/// Marker appended to a truncated diff.
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Commit message used when the operator submits empty manual input.
pub const MANUAL_PLACEHOLDER: &str = "Manual commit message.";

/// Runtime configuration sourced from the env file and process environment.
#[derive(Debug, Clone)]
pub struct CommitConfig {
   /// OpenRouter API key. Absent key disables only the AI path; manual
   /// entry still works.
   pub api_key: Option<String>,

   /// Model identifier passed to the chat completions endpoint.
   pub model: String,

   /// HTTP request timeout in seconds.
   pub request_timeout_secs: u64,

   /// HTTP connection timeout in seconds.
   pub connect_timeout_secs: u64,

   /// Sampling temperature for generation.
   pub temperature: f32,

   /// Per-file size ceiling in megabytes.
   pub max_file_size_mb: f64,
}

impl Default for CommitConfig {
   fn default() -> Self {
      Self {
         api_key:              None,
         model:                DEFAULT_MODEL.to_string(),
         request_timeout_secs: 120,
         connect_timeout_secs: 30,
         temperature:          0.7,
         max_file_size_mb:     MAX_FILE_SIZE_MB,
      }
   }
}

impl CommitConfig {
   /// Load configuration from an env file plus the process environment.
   ///
   /// The env file is optional; a missing file is not an error. Values
   /// already present in the process environment win over file values
   /// (dotenvy never overrides existing variables).
   pub fn load(env_path: &Path) -> Result<Self> {
      if env_path.exists() {
         dotenvy::from_path(env_path)
            .map_err(|e| crate::error::CommitError::Config(format!("Failed to load env file: {e}")))?;
      }

      let mut config = Self::default();
      Self::apply_env_overrides(&mut config);
      Ok(config)
   }

   fn apply_env_overrides(config: &mut Self) {
      if let Ok(key) = std::env::var("OPENROUTER_API_KEY")
         && !key.trim().is_empty()
      {
         config.api_key = Some(key);
      }

      if let Ok(model) = std::env::var("OPENROUTER_MODEL")
         && !model.trim().is_empty()
      {
         config.model = model;
      }
   }
}

/// Static ignore policy: any path containing one of these fragments as a
/// substring is excluded from the change set. Not configurable at runtime.
pub const IGNORED_FILES: &[&str] = &[
   ".env.openrouter",
   "node_modules/",
   ".npm/",
   "package-lock.json",
   "dist/",
   "venv/",
   "env/",
   "__pycache__/",
   "*.pyc",
   "*.pyo",
   "Pipfile.lock",
   "poetry.lock",
   "logs/",
   "*.log",
   "debug.log*",
   "*.swp",
   "*.swo",
   ".cache/",
   ".idea/",
   ".editorconfig",
   ".DS_Store",
   "Thumbs.db",
];
