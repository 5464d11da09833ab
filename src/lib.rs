//! Interactive AI-assisted git commit tool
//!
//! This library resolves the working-tree change set, negotiates a commit
//! message (AI-generated via OpenRouter or manual), and stages, commits,
//! and pushes the result.
pub mod api;
pub mod cancel;
pub mod changeset;
pub mod config;
pub mod error;
pub mod executor;
pub mod git;
pub mod ignore;
pub mod negotiate;
pub mod prompt;
pub mod sizecheck;
pub mod style;
pub mod update;
pub mod workflow;

// Re-export commonly used types
pub use config::CommitConfig;
pub use error::{CommitError, Result};
