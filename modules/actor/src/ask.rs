//! Request/response plumbing for `ask` messages.

use std::{fmt, time::Duration};

use spool_utils_rs::{CompletionToken, WaitTimeoutError};
use thiserror::Error;


/// Failure modes observable by an `ask` sender.
///
/// Errors travel to senders only through these values; the runtime never
/// raises them anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AskError {
  /// The target actor was already destroyed when the request was sent.
  #[error("actor is dead")]
  Dead,
  /// The request was accepted but the actor shut down before handling it.
  #[error("actor shut down before the request was handled")]
  Cancelled,
  /// The handler panicked; the payload text is attached.
  #[error("handler panicked: {0}")]
  Panicked(String),
}

/// One-shot future resolving to the return value of an `ask` handler.
///
/// Obtained from [`ActorRef::ask`](crate::ActorRef::ask) or
/// [`Actor::ask`](crate::Actor::ask). Waiting is blocking; there is no
/// per-request timeout in the runtime itself, but [`AskFuture::wait_timeout`]
/// lets callers bound their own wait.
pub struct AskFuture<R> {
  token: CompletionToken<Result<R, AskError>>,
}

impl<R> AskFuture<R> {
  pub(crate) fn new(token: CompletionToken<Result<R, AskError>>) -> Self {
    Self { token }
  }

  /// Blocks until the response arrives.
  ///
  /// # Errors
  ///
  /// Returns [`AskError::Dead`] when the actor was already gone,
  /// [`AskError::Cancelled`] when it shut down with the request still
  /// queued, or [`AskError::Panicked`] when the handler panicked.
  pub fn wait(self) -> Result<R, AskError> {
    match self.token.wait() {
      | Ok(response) => response,
      | Err(_) => Err(AskError::Cancelled),
    }
  }

  /// Blocks until the response arrives or the timeout elapses.
  ///
  /// Returns `None` when the request was still pending at the deadline.
  pub fn wait_timeout(self, timeout: Duration) -> Option<Result<R, AskError>> {
    match self.token.wait_timeout(timeout) {
      | Ok(response) => Some(response),
      | Err(WaitTimeoutError::Abandoned) => Some(Err(AskError::Cancelled)),
      | Err(WaitTimeoutError::TimedOut) => None,
    }
  }

  /// Returns `true` once the response (or failure) is available.
  #[must_use]
  pub fn is_settled(&self) -> bool {
    self.token.is_settled()
  }
}

impl<R> fmt::Debug for AskFuture<R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AskFuture").field("settled", &self.is_settled()).finish()
  }
}
