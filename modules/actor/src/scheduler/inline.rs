//! Scheduler that services receives on the calling thread.

use std::{cell::RefCell, collections::VecDeque};

use super::{Scheduler, WeakMailbox};

std::thread_local! {
  static PENDING: RefCell<VecDeque<WeakMailbox>> = const { RefCell::new(VecDeque::new()) };
  static DRAINING: RefCell<bool> = const { RefCell::new(false) };
}

/// Runs `receive` directly on whichever thread calls `schedule`.
///
/// Intended for tests and single-threaded embeddings: message processing
/// becomes synchronous and deterministic. Re-entrant requests — a handler
/// pushing to its own mailbox while it runs — are queued thread-locally and
/// drained by the outermost `schedule` call, which is the "defer to the next
/// scheduling tick" restructuring that replaces a recursive receive lock.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
  fn schedule(&self, mailbox: WeakMailbox) {
    PENDING.with(|pending| pending.borrow_mut().push_back(mailbox));

    let is_outermost = DRAINING.with(|draining| {
      let mut draining = draining.borrow_mut();
      if *draining {
        return false;
      }
      *draining = true;
      true
    });
    if !is_outermost {
      return;
    }

    loop {
      let next = PENDING.with(|pending| pending.borrow_mut().pop_front());
      match next {
        | Some(mailbox) => mailbox.receive(),
        | None => break,
      }
    }
    DRAINING.with(|draining| *draining.borrow_mut() = false);
  }
}
