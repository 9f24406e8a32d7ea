//! One-shot completion token connecting a producer and a waiting consumer.

use std::{
  fmt, mem,
  sync::Arc,
  time::{Duration, Instant},
};

use parking_lot::{Condvar, Mutex};
use thiserror::Error;


/// The producing side dropped without delivering a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("completion abandoned before a value was delivered")]
pub struct Abandoned;

/// Failure modes of [`CompletionToken::wait_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WaitTimeoutError {
  /// The producing side dropped without delivering a value.
  #[error("completion abandoned before a value was delivered")]
  Abandoned,
  /// The wait deadline elapsed while the completion was still pending.
  #[error("timed out waiting for completion")]
  TimedOut,
}

enum Slot<T> {
  Pending,
  Ready(T),
  Taken,
  Abandoned,
}

impl<T> Slot<T> {
  /// Resolves a settled slot; `None` while still pending.
  fn poll(&mut self) -> Option<Result<T, Abandoned>> {
    match self {
      | Slot::Pending => None,
      | Slot::Abandoned => Some(Err(Abandoned)),
      | Slot::Ready(_) | Slot::Taken => match mem::replace(self, Slot::Taken) {
        | Slot::Ready(value) => Some(Ok(value)),
        | _ => Some(Err(Abandoned)),
      },
    }
  }

  const fn is_settled(&self) -> bool {
    !matches!(self, Slot::Pending)
  }
}

struct Shared<T> {
  slot:    Mutex<Slot<T>>,
  settled: Condvar,
}

/// Creates a connected [`Completer`]/[`CompletionToken`] pair.
#[must_use]
pub fn completion<T>() -> (Completer<T>, CompletionToken<T>) {
  let shared = Arc::new(Shared { slot: Mutex::new(Slot::Pending), settled: Condvar::new() });
  (Completer { shared: shared.clone(), fulfilled: false }, CompletionToken { shared })
}

/// Producing half of a one-shot completion.
///
/// Dropping a completer without calling [`Completer::complete`] abandons the
/// token, waking any waiter with [`Abandoned`].
pub struct Completer<T> {
  shared:    Arc<Shared<T>>,
  fulfilled: bool,
}

impl<T> Completer<T> {
  /// Delivers the value and wakes the waiting side.
  pub fn complete(mut self, value: T) {
    {
      let mut slot = self.shared.slot.lock();
      *slot = Slot::Ready(value);
    }
    self.fulfilled = true;
    self.shared.settled.notify_all();
  }
}

impl<T> Drop for Completer<T> {
  fn drop(&mut self) {
    if self.fulfilled {
      return;
    }
    {
      let mut slot = self.shared.slot.lock();
      if !slot.is_settled() {
        *slot = Slot::Abandoned;
      }
    }
    self.shared.settled.notify_all();
  }
}

impl<T> fmt::Debug for Completer<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Completer").field("fulfilled", &self.fulfilled).finish()
  }
}

/// Waiting half of a one-shot completion.
pub struct CompletionToken<T> {
  shared: Arc<Shared<T>>,
}

impl<T> CompletionToken<T> {
  /// Blocks until the completion settles and consumes the value.
  ///
  /// # Errors
  ///
  /// Returns [`Abandoned`] when the completer was dropped without a value.
  pub fn wait(self) -> Result<T, Abandoned> {
    let mut slot = self.shared.slot.lock();
    loop {
      if let Some(outcome) = slot.poll() {
        return outcome;
      }
      self.shared.settled.wait(&mut slot);
    }
  }

  /// Blocks until the completion settles or the timeout elapses.
  ///
  /// # Errors
  ///
  /// Returns [`WaitTimeoutError::Abandoned`] when the completer was dropped
  /// without a value, or [`WaitTimeoutError::TimedOut`] when the deadline
  /// passed first.
  pub fn wait_timeout(self, timeout: Duration) -> Result<T, WaitTimeoutError> {
    let deadline = Instant::now() + timeout;
    let mut slot = self.shared.slot.lock();
    loop {
      if let Some(outcome) = slot.poll() {
        return outcome.map_err(|Abandoned| WaitTimeoutError::Abandoned);
      }
      let now = Instant::now();
      if now >= deadline {
        return Err(WaitTimeoutError::TimedOut);
      }
      if self.shared.settled.wait_for(&mut slot, deadline - now).timed_out() && !slot.is_settled() {
        return Err(WaitTimeoutError::TimedOut);
      }
    }
  }

  /// Blocks until the completion settles, without consuming the value.
  ///
  /// Usable any number of times; returns immediately once settled. This is
  /// the gate used for "the other thread reached this point" handshakes.
  pub fn wait_settled(&self) {
    let mut slot = self.shared.slot.lock();
    while !slot.is_settled() {
      self.shared.settled.wait(&mut slot);
    }
  }

  /// Returns `true` once a value was delivered or the completer was dropped.
  #[must_use]
  pub fn is_settled(&self) -> bool {
    self.shared.slot.lock().is_settled()
  }
}

impl<T> fmt::Debug for CompletionToken<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CompletionToken").field("settled", &self.is_settled()).finish()
  }
}
