//! Single-threaded task loop backing thread-hosted actors.

use std::{fmt, ops::ControlFlow};

use crossbeam_channel::{Receiver, Sender, select, unbounded};

use crate::scheduler::{Scheduler, WeakMailbox};

#[cfg(test)]
mod tests;

/// Priority of a posted task.
///
/// High-priority tasks jump ahead of every queued normal task; the pause
/// handshake of a thread-hosted actor relies on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPriority {
  /// Runs after previously queued normal tasks.
  Normal,
  /// Runs before any queued normal task.
  High,
}

enum Task {
  Run(Box<dyn FnOnce() + Send>),
  Stop,
}

/// A run loop processing posted tasks on the thread that calls
/// [`RunLoop::run`].
///
/// The loop itself is just a pair of task channels, so it can be constructed
/// on a parent thread and moved into the thread that will run it; the
/// [`RunLoopHandle`] stays behind for posting and stopping. Timers and I/O
/// integration are left to the embedding.
pub struct RunLoop {
  normal_rx: Receiver<Task>,
  high_rx:   Receiver<Task>,
  handle:    RunLoopHandle,
}

impl RunLoop {
  /// Creates a loop and its posting handle.
  #[must_use]
  pub fn new() -> Self {
    let (normal_tx, normal_rx) = unbounded();
    let (high_tx, high_rx) = unbounded();
    Self { normal_rx, high_rx, handle: RunLoopHandle { normal_tx, high_tx } }
  }

  /// Returns a clonable handle for posting tasks to this loop.
  #[must_use]
  pub fn handle(&self) -> RunLoopHandle {
    self.handle.clone()
  }

  /// Processes tasks until [`RunLoopHandle::stop`] is observed.
  ///
  /// Each iteration drains high-priority tasks before considering normal
  /// ones, and a normal task handed out by the blocking wait yields to any
  /// high-priority task that became ready in the same instant — the wait
  /// tie-breaks between ready channels arbitrarily, so priority has to be
  /// re-checked rather than trusted to it. Within a priority, tasks run in
  /// post order.
  pub fn run(&self) {
    loop {
      while let Ok(task) = self.high_rx.try_recv() {
        if Self::service(task).is_break() {
          return;
        }
      }
      let outcome = select! {
        recv(self.high_rx) -> task => task.map(|task| (TaskPriority::High, task)),
        recv(self.normal_rx) -> task => task.map(|task| (TaskPriority::Normal, task)),
      };
      let Ok((priority, task)) = outcome else {
        return;
      };
      if priority == TaskPriority::Normal {
        while let Ok(high) = self.high_rx.try_recv() {
          if Self::service(high).is_break() {
            return;
          }
        }
      }
      if Self::service(task).is_break() {
        return;
      }
    }
  }

  fn service(task: Task) -> ControlFlow<()> {
    match task {
      | Task::Run(task) => {
        task();
        ControlFlow::Continue(())
      },
      | Task::Stop => ControlFlow::Break(()),
    }
  }
}

impl Default for RunLoop {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for RunLoop {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RunLoop").field("queued", &(self.normal_rx.len() + self.high_rx.len())).finish()
  }
}

/// Posting handle of a [`RunLoop`]. Clonable and shareable across threads.
pub struct RunLoopHandle {
  normal_tx: Sender<Task>,
  high_tx:   Sender<Task>,
}

impl RunLoopHandle {
  /// Posts a task at normal priority.
  pub fn post<F>(&self, task: F)
  where
    F: FnOnce() + Send + 'static, {
    self.post_with_priority(TaskPriority::Normal, task);
  }

  /// Posts a task at the given priority.
  ///
  /// Posting to a loop that already exited drops the task silently.
  pub fn post_with_priority<F>(&self, priority: TaskPriority, task: F)
  where
    F: FnOnce() + Send + 'static, {
    let sender = match priority {
      | TaskPriority::Normal => &self.normal_tx,
      | TaskPriority::High => &self.high_tx,
    };
    if sender.send(Task::Run(Box::new(task))).is_err() {
      tracing::trace!("task posted to a finished run loop; dropped");
    }
  }

  /// Makes the loop exit ahead of any queued normal task.
  pub fn stop(&self) {
    let _ = self.high_tx.send(Task::Stop);
  }
}

impl Scheduler for RunLoopHandle {
  fn schedule(&self, mailbox: WeakMailbox) {
    self.post(move || mailbox.receive());
  }
}

impl Clone for RunLoopHandle {
  fn clone(&self) -> Self {
    Self { normal_tx: self.normal_tx.clone(), high_tx: self.high_tx.clone() }
  }
}

impl fmt::Debug for RunLoopHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RunLoopHandle").finish_non_exhaustive()
  }
}
