//! Weak, copyable sending handle for an actor.

use std::{fmt, sync::Weak};

use spool_utils_rs::completion;

use crate::{
  ask::{AskError, AskFuture},
  mailbox::Mailbox,
  message::Message,
};

#[cfg(test)]
mod tests;

/// Non-owning handle addressing a target object through its mailbox.
///
/// Cheap to clone and safe to pass between threads — including inside
/// messages, which is how actors hand each other reply targets. A ref may
/// outlive its actor indefinitely: sending to a dead actor is a no-op for
/// [`ActorRef::invoke`] and a [`AskError::Dead`] completion for
/// [`ActorRef::ask`]. A ref never keeps its actor alive.
pub struct ActorRef<O> {
  mailbox: Weak<Mailbox<O>>,
}

impl<O: Send + 'static> ActorRef<O> {
  pub(crate) fn new(mailbox: Weak<Mailbox<O>>) -> Self {
    Self { mailbox }
  }

  /// Sends a fire-and-forget message.
  ///
  /// The closure runs on the actor's execution context with exclusive access
  /// to the target object, after every message already queued.
  pub fn invoke<F>(&self, operation: F)
  where
    F: FnOnce(&mut O) + Send + 'static, {
    match self.mailbox.upgrade() {
      | Some(mailbox) => mailbox.push(Message::invoke(operation)),
      | None => tracing::trace!("invoke on a dead actor ref; message dropped"),
    }
  }

  /// Sends a request and returns a future for the handler's return value.
  pub fn ask<F, R>(&self, operation: F) -> AskFuture<R>
  where
    F: FnOnce(&mut O) -> R + Send + 'static,
    R: Send + 'static, {
    let (completer, token) = completion();
    match self.mailbox.upgrade() {
      | Some(mailbox) => mailbox.push(Message::ask(operation, completer)),
      | None => completer.complete(Err(AskError::Dead)),
    }
    AskFuture::new(token)
  }
}

impl<O> Clone for ActorRef<O> {
  fn clone(&self) -> Self {
    Self { mailbox: self.mailbox.clone() }
  }
}

impl<O> fmt::Debug for ActorRef<O> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ActorRef").field("dead", &(self.mailbox.strong_count() == 0)).finish()
  }
}
