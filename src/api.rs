//! OpenRouter chat-completions client.
//!
//! One request per run, no retry policy: any failure here falls through to
//! manual message entry in the negotiator. The insufficient-credits case
//! (error code 402, in the HTTP status or in the response body) is surfaced
//! as its own error so the operator gets an actionable message.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
   config::{API_BASE_URL, CommitConfig, MAX_DIFF_CHARS, TRUNCATION_MARKER},
   error::{CommitError, Result},
};

/// Source of AI-generated commit message suggestions.
///
/// Trait seam so the negotiator can be tested without network access.
pub trait SuggestionSource {
   /// Request a commit message for the given diff context and changed
   /// paths. Must return a non-empty trimmed suggestion or an error.
   fn suggest(&self, diff: &str, files: &[String]) -> Result<String>;
}

const SYSTEM_PROMPT: &str = "Generate a concise git commit message. Don't include the file names \
                             or line numbers. Don't include \"Commit message\" in the response. \
                             Be concise and clear. Add short title and description. Don't use \
                             markdown, just plain text.";

#[derive(Debug, Serialize)]
struct Message {
   role:    String,
   content: String,
}

#[derive(Debug, Serialize)]
struct ApiRequest {
   model:       String,
   temperature: f32,
   messages:    Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
   #[serde(default)]
   content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
   message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
   #[serde(default)]
   code:    Option<i64>,
   #[serde(default)]
   message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
   #[serde(default)]
   choices: Vec<Choice>,
   #[serde(default)]
   error:   Option<ApiErrorBody>,
}

/// Truncate diff context to `MAX_DIFF_CHARS` characters, appending a marker
/// so the model knows the tail is missing. Cuts on a char boundary.
pub fn truncate_diff(diff: &str) -> String {
   match diff.char_indices().nth(MAX_DIFF_CHARS) {
      Some((byte_idx, _)) => format!("{}{TRUNCATION_MARKER}", &diff[..byte_idx]),
      None => diff.to_string(),
   }
}

/// Build HTTP client with timeouts from config.
fn build_client(config: &CommitConfig) -> Result<reqwest::blocking::Client> {
   Ok(reqwest::blocking::Client::builder()
      .timeout(Duration::from_secs(config.request_timeout_secs))
      .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
      .build()?)
}

/// Real OpenRouter collaborator.
pub struct OpenRouterClient {
   config: CommitConfig,
}

impl OpenRouterClient {
   pub const fn new(config: CommitConfig) -> Self {
      Self { config }
   }
}

impl SuggestionSource for OpenRouterClient {
   fn suggest(&self, diff: &str, files: &[String]) -> Result<String> {
      let api_key = self
         .config
         .api_key
         .as_deref()
         .ok_or(CommitError::MissingApiKey)?;

      let system = format!("{SYSTEM_PROMPT} The following files have changed: {}.", files.join(", "));
      let user = truncate_diff(diff);

      let request = ApiRequest {
         model:       self.config.model.clone(),
         temperature: self.config.temperature,
         messages:    vec![
            Message { role: "system".to_string(), content: system },
            Message { role: "user".to_string(), content: user },
         ],
      };

      let client = build_client(&self.config)?;
      let response = client
         .post(format!("{API_BASE_URL}/chat/completions"))
         .header("Authorization", format!("Bearer {api_key}"))
         .json(&request)
         .send()?;

      let status = response.status();
      if status.as_u16() == 402 {
         return Err(CommitError::InsufficientCredits);
      }
      if !status.is_success() {
         let body = response.text().unwrap_or_else(|_| "Unknown error".to_string());
         return Err(CommitError::Api { status: status.as_u16(), body });
      }

      let api_response: ApiResponse = response.json()?;

      // Some upstream failures come back as HTTP 200 with an error body.
      if let Some(error) = api_response.error {
         if error.code == Some(402) {
            return Err(CommitError::InsufficientCredits);
         }
         return Err(CommitError::Api {
            status: 200,
            body:   error.message.unwrap_or_else(|| "Unknown API error".to_string()),
         });
      }

      let suggestion = api_response
         .choices
         .first()
         .and_then(|choice| choice.message.content.as_deref())
         .map(str::trim)
         .unwrap_or_default();

      if suggestion.is_empty() {
         return Err(CommitError::EmptySuggestion);
      }

      Ok(suggestion.to_string())
   }
}
