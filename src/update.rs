//! Best-effort update self-check against the crates.io registry.
//!
//! Fire-and-forget: runs on a detached thread, never blocks the commit
//! workflow, never changes the exit status. Every failure is swallowed.

use std::{thread, time::Duration};

use semver::Version;
use serde::Deserialize;

use crate::style;

const REGISTRY_URL: &str = "https://crates.io/api/v1/crates";
const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
struct CrateInfo {
   #[serde(default)]
   max_stable_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegistryResponse {
   #[serde(rename = "crate")]
   krate: CrateInfo,
}

/// Fetch the latest published version. Short timeouts: this is a courtesy
/// check, not something worth waiting on.
fn fetch_latest() -> Option<Version> {
   let client = reqwest::blocking::Client::builder()
      .timeout(Duration::from_secs(5))
      .connect_timeout(Duration::from_secs(3))
      // crates.io rejects requests without a user agent
      .user_agent(format!("{CRATE_NAME}/{CURRENT_VERSION}"))
      .build()
      .ok()?;

   let response: RegistryResponse = client
      .get(format!("{REGISTRY_URL}/{CRATE_NAME}"))
      .send()
      .ok()?
      .error_for_status()
      .ok()?
      .json()
      .ok()?;

   Version::parse(&response.krate.max_stable_version?).ok()
}

/// Render the boxed update notice when `latest` is newer than the running
/// version.
fn notice(current: &Version, latest: &Version) -> Option<String> {
   if latest <= current {
      return None;
   }

   let content = format!(
      "Update available!\nLatest version: v{latest}\nYour version: v{current}\n\nRun: cargo \
       install {CRATE_NAME}"
   );
   Some(style::boxed_message("Update", &content, style::term_width()))
}

/// Spawn the detached version check. The thread prints the notice if a
/// newer release exists and exits silently otherwise.
pub fn spawn_check() {
   thread::spawn(|| {
      let Ok(current) = Version::parse(CURRENT_VERSION) else {
         return;
      };
      let Some(latest) = fetch_latest() else {
         return;
      };
      if let Some(text) = notice(&current, &latest) {
         println!("{}", style::warning(&text));
      }
   });
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_notice_when_newer_available() {
      let current = Version::parse("0.1.0").unwrap();
      let latest = Version::parse("0.2.0").unwrap();
      let text = notice(&current, &latest).unwrap();
      assert!(text.contains("v0.2.0"));
      assert!(text.contains("v0.1.0"));
   }

   #[test]
   fn test_no_notice_when_up_to_date() {
      let current = Version::parse("0.2.0").unwrap();
      assert!(notice(&current, &current).is_none());
   }

   #[test]
   fn test_no_notice_when_registry_is_behind() {
      let current = Version::parse("0.3.0").unwrap();
      let latest = Version::parse("0.2.0").unwrap();
      assert!(notice(&current, &latest).is_none());
   }

   #[test]
   fn test_registry_response_shape() {
      let body = r#"{"crate": {"max_stable_version": "1.2.3"}}"#;
      let parsed: RegistryResponse = serde_json::from_str(body).unwrap();
      assert_eq!(parsed.krate.max_stable_version.as_deref(), Some("1.2.3"));
   }
}
