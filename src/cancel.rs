//! Cooperative cancellation for the interactive workflow.
//!
//! Ctrl-C does not tear the process down. The signal handler only sets a
//! flag; every suspension point (prompt, API call, git invocation) checks it
//! through [`CancelToken::checkpoint`] so no mutating action can run after an
//! interrupt is observed.

use std::sync::{
   Arc,
   atomic::{AtomicBool, Ordering},
};

use crate::error::{CommitError, Result};

/// Shared interrupt flag, observed at every suspension point.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
   interrupted: Arc<AtomicBool>,
}

impl CancelToken {
   pub fn new() -> Self {
      Self::default()
   }

   /// Install the Ctrl-C handler for this token.
   ///
   /// The handler is registered once per process; repeated signals only
   /// re-set the flag, which is harmless.
   pub fn install_handler(&self) -> Result<()> {
      let flag = Arc::clone(&self.interrupted);
      ctrlc::set_handler(move || {
         flag.store(true, Ordering::SeqCst);
      })
      .map_err(|e| CommitError::Config(format!("Failed to install interrupt handler: {e}")))?;
      Ok(())
   }

   /// Mark the token interrupted. Returns whether this call was the first
   /// to observe the transition, making double-handling idempotent.
   pub fn cancel(&self) -> bool {
      !self.interrupted.swap(true, Ordering::SeqCst)
   }

   pub fn is_cancelled(&self) -> bool {
      self.interrupted.load(Ordering::SeqCst)
   }

   /// Fail with [`CommitError::Interrupted`] if the flag has been set.
   pub fn checkpoint(&self) -> Result<()> {
      if self.is_cancelled() {
         return Err(CommitError::Interrupted);
      }
      Ok(())
   }
}
