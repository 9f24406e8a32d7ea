//! One-shot, opaque invocations bound to a target object.

use std::{
  any::Any,
  fmt,
  panic::{self, AssertUnwindSafe},
};

use spool_utils_rs::Completer;

use crate::ask::AskError;

#[cfg(test)]
mod tests;

/// A single invocation of one method of one target object.
///
/// A message owns its captured arguments and consumes itself when executed;
/// the mailbox never inspects it. Arguments are captured by value — sending
/// shared mutable state through a message subverts the model and is the
/// caller's contract to uphold, not something the runtime can check.
pub struct Message<O> {
  run: Box<dyn FnOnce(&mut O) + Send>,
}

impl<O> Message<O> {
  /// Packages a fire-and-forget invocation.
  pub fn invoke<F>(operation: F) -> Self
  where
    F: FnOnce(&mut O) + Send + 'static, {
    Self { run: Box::new(operation) }
  }

  /// Packages a request/response invocation.
  ///
  /// Executing the message completes `completer` with the handler's return
  /// value. A panicking handler completes it with [`AskError::Panicked`]
  /// instead, so the requester observes the failure rather than deadlocking;
  /// the receiving thread survives.
  pub fn ask<F, R>(operation: F, completer: Completer<Result<R, AskError>>) -> Self
  where
    F: FnOnce(&mut O) -> R + Send + 'static,
    R: Send + 'static, {
    Self {
      run: Box::new(move |target| {
        match panic::catch_unwind(AssertUnwindSafe(|| operation(target))) {
          | Ok(value) => completer.complete(Ok(value)),
          | Err(payload) => completer.complete(Err(AskError::Panicked(describe_panic(payload.as_ref())))),
        }
      }),
    }
  }

  /// Invokes the bound operation on `target`, consuming the message.
  ///
  /// Called by the mailbox on its scheduler's execution context.
  pub fn execute(self, target: &mut O) {
    (self.run)(target);
  }
}

impl<O> fmt::Debug for Message<O> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Message").finish_non_exhaustive()
  }
}

/// Renders a panic payload for error reporting.
pub(crate) fn describe_panic(payload: &(dyn Any + Send)) -> String {
  if let Some(text) = payload.downcast_ref::<&str>() {
    (*text).to_owned()
  } else if let Some(text) = payload.downcast_ref::<String>() {
    text.clone()
  } else {
    "opaque panic payload".to_owned()
  }
}
