//! The scheduling capability that decides where `receive` runs.

use std::{fmt, sync::Weak};

mod inline;
mod noop;

pub use inline::InlineScheduler;
pub use noop::NoopScheduler;


/// Arranges for a mailbox's next `receive` to run on some execution context.
///
/// Contract: for every `schedule` call whose weak handle still upgrades, the
/// implementation must eventually run [`WeakMailbox::receive`] exactly once,
/// and per mailbox those runs must happen in the order the calls arrived.
/// A handle that no longer upgrades is dropped silently — the actor is dead
/// and there is nobody left to tell.
pub trait Scheduler: Send + Sync {
  /// Requests one `receive` for the given mailbox.
  fn schedule(&self, mailbox: WeakMailbox);
}

/// Type-erased receive entry point a [`WeakMailbox`] points at.
pub(crate) trait ReceiveTarget: Send + Sync {
  fn receive(&self);
}

/// Weak, type-erased handle to a mailbox, handed to schedulers.
///
/// Holding one never extends the mailbox's lifetime; the only thing it can
/// do is upgrade-and-receive.
pub struct WeakMailbox {
  inner: Weak<dyn ReceiveTarget>,
}

impl WeakMailbox {
  pub(crate) fn new(inner: Weak<dyn ReceiveTarget>) -> Self {
    Self { inner }
  }

  /// Runs one `receive` if the mailbox is still alive; otherwise does
  /// nothing. This is the weak-upgrade idiom every scheduler goes through.
  pub fn receive(&self) {
    if let Some(mailbox) = self.inner.upgrade() {
      mailbox.receive();
    }
  }

  /// Returns `true` when the mailbox has been dropped.
  #[must_use]
  pub fn is_gone(&self) -> bool {
    self.inner.strong_count() == 0
  }

  /// Stable address of the mailbox allocation, usable as a map key while
  /// the mailbox (or this handle) is alive.
  pub(crate) fn addr(&self) -> usize {
    self.inner.as_ptr() as *const () as usize
  }
}

impl Clone for WeakMailbox {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl fmt::Debug for WeakMailbox {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WeakMailbox").field("gone", &self.is_gone()).finish()
  }
}
