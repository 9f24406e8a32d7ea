//! Lifecycle-aware FIFO message queue bound to a scheduler.

use std::{
  collections::VecDeque,
  mem,
  panic::{self, AssertUnwindSafe},
  sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
  },
};

use parking_lot::Mutex;

use crate::{
  message::{Message, describe_panic},
  scheduler::{NoopScheduler, ReceiveTarget, Scheduler, WeakMailbox},
};


/// Thread-safe FIFO of [`Message`]s with an open/closed lifecycle.
///
/// A mailbox is born *holding*: pushes are accepted and buffered, but nothing
/// is dispatched because the bound scheduler is [`NoopScheduler`]. Attaching
/// a real scheduler with [`Mailbox::open`] makes it *open* — every push now
/// requests one `receive` from the scheduler. [`Mailbox::close`] is terminal:
/// the queue is drained, and later pushes are accepted silently but never
/// dispatched.
///
/// Lock discipline, outermost first: the push gate (fences pushes against
/// close), the receive lock (serializes dispatch with itself and with close,
/// and guards the target cell), and the queue lock (held only for queue
/// edits, never across message execution).
pub struct Mailbox<O> {
  pushing:   Mutex<()>,
  queue:     Mutex<VecDeque<Message<O>>>,
  /// Receive lock and target storage in one: `Some` iff the target object
  /// has been emplaced and not yet discarded.
  target:    Mutex<Option<O>>,
  scheduler: Mutex<Arc<dyn Scheduler>>,
  closed:    AtomicBool,
  opened:    AtomicBool,
  weak_self: Weak<Mailbox<O>>,
}

impl<O: Send + 'static> Mailbox<O> {
  /// Creates a mailbox in the holding state.
  pub(crate) fn new() -> Arc<Self> {
    Arc::new_cyclic(|weak| Self {
      pushing:   Mutex::new(()),
      queue:     Mutex::new(VecDeque::new()),
      target:    Mutex::new(None),
      scheduler: Mutex::new(Arc::new(NoopScheduler)),
      closed:    AtomicBool::new(false),
      opened:    AtomicBool::new(false),
      weak_self: weak.clone(),
    })
  }

  /// Weak, type-erased handle suitable for handing to a scheduler.
  #[must_use]
  pub fn weak_handle(&self) -> WeakMailbox {
    let weak: Weak<dyn ReceiveTarget> = self.weak_self.clone();
    WeakMailbox::new(weak)
  }

  /// Enqueues a message. Callable from any thread.
  ///
  /// While holding or open the message is appended in push order; when open,
  /// one `receive` is requested from the scheduler. After [`Mailbox::close`]
  /// the message is accepted silently and dropped, abandoning any completion
  /// token it carries.
  pub fn push(&self, message: Message<O>) {
    {
      let _push_gate = self.pushing.lock();
      if self.closed.load(Ordering::Acquire) {
        tracing::trace!("push to a closed mailbox; message dropped");
        return;
      }
      self.queue.lock().push_back(message);
    }
    // The scheduler is invoked outside every mailbox lock so that inline
    // servicing may re-enter push from a handler.
    let scheduler = self.scheduler.lock().clone();
    scheduler.schedule(self.weak_handle());
  }

  /// Attaches a scheduler, moving the mailbox from holding to open.
  ///
  /// One `receive` is requested for every message buffered while holding, so
  /// the backlog drains ahead of anything pushed afterwards. May be called
  /// once per mailbox.
  ///
  /// # Panics
  ///
  /// Panics when the mailbox was already opened.
  pub fn open(&self, scheduler: Arc<dyn Scheduler>) {
    let backlog = {
      let _push_gate = self.pushing.lock();
      assert!(!self.opened.swap(true, Ordering::AcqRel), "mailbox opened twice");
      if self.closed.load(Ordering::Acquire) {
        return;
      }
      let backlog = self.queue.lock().len();
      *self.scheduler.lock() = scheduler.clone();
      backlog
    };
    for _ in 0..backlog {
      scheduler.schedule(self.weak_handle());
    }
  }

  /// Pops and executes at most one message. Callable only on the bound
  /// scheduler's execution context.
  ///
  /// No-ops when the mailbox is closed, the target cell is empty, or the
  /// queue is empty. The message runs outside the queue lock, so handlers
  /// are free to push — including to their own mailbox, which is serviced on
  /// the next scheduling tick rather than recursively.
  pub fn receive(&self) {
    let mut target = self.target.lock();
    if self.closed.load(Ordering::Acquire) {
      return;
    }
    let Some(object) = target.as_mut() else {
      return;
    };
    let Some(message) = self.queue.lock().pop_front() else {
      return;
    };
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| message.execute(object))) {
      // Fire-and-forget handlers have nobody to report to; the panic is
      // logged and the scheduler context survives. Ask handlers already
      // delivered the failure through their completion token.
      tracing::error!(panic = %describe_panic(payload.as_ref()), "handler panicked during receive");
    }
  }

  /// Closes the mailbox, dropping every queued message. Terminal; a second
  /// close is a no-op.
  ///
  /// Acquires both the push gate and the receive lock, so it returns only
  /// after any in-flight `receive` finishes, and no push can interleave with
  /// the drain. Completion tokens of dropped `ask` messages are abandoned so
  /// their waiters observe a cancellation.
  pub fn close(&self) {
    let drained = {
      let _push_gate = self.pushing.lock();
      let _receive_gate = self.target.lock();
      self.closed.store(true, Ordering::Release);
      mem::take(&mut *self.queue.lock())
    };
    if !drained.is_empty() {
      tracing::debug!(dropped = drained.len(), "mailbox closed with messages still queued");
    }
    drop(drained);
  }

  /// Returns `true` once the mailbox has been closed.
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.closed.load(Ordering::Acquire)
  }

  /// Number of messages currently queued.
  #[must_use]
  pub fn len(&self) -> usize {
    self.queue.lock().len()
  }

  /// Returns `true` when no messages are queued.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.queue.lock().is_empty()
  }

  /// Populates the target cell. Returns `false` when the mailbox was closed
  /// before activation, in which case the object is dropped unused.
  ///
  /// # Panics
  ///
  /// Panics when the cell is already populated (an actor activated twice).
  pub(crate) fn emplace(&self, object: O) -> bool {
    let mut target = self.target.lock();
    if self.closed.load(Ordering::Acquire) {
      return false;
    }
    assert!(target.is_none(), "actor activated twice");
    *target = Some(object);
    true
  }

  /// Takes and drops the target object, if it was ever emplaced.
  ///
  /// Callers must close the mailbox first; the receive lock makes the drop
  /// mutually exclusive with any dispatch.
  pub(crate) fn discard_target(&self) {
    debug_assert!(self.is_closed(), "target discarded while the mailbox can still dispatch");
    let object = self.target.lock().take();
    drop(object);
  }
}

impl<O: Send + 'static> ReceiveTarget for Mailbox<O> {
  fn receive(&self) {
    Mailbox::receive(self);
  }
}
