//! Dedicated-thread host binding one OS thread to one actor.

use std::{
  io,
  sync::Arc,
  thread::{self, JoinHandle, ThreadId},
};

use spool_utils_rs::{Completer, CompletionToken, completion, lower_current_thread_priority};

use crate::{
  actor::Actor,
  actor_ref::ActorRef,
  run_loop::{RunLoop, RunLoopHandle, TaskPriority},
  scheduler::Scheduler,
};


/// Hosts an actor on a dedicated, named, low-priority OS thread running a
/// [`RunLoop`].
///
/// The holding mailbox is created before the thread, so [`ActorThread::actor`]
/// refs are valid the moment `spawn` returns; the target object is then
/// constructed on its own thread and the buffered messages drain in push
/// order. Compared to a pool, this gives the object thread affinity: every
/// handler, from the first to the last, runs on the same thread that built
/// it, and the destructor runs there too.
///
/// Dropping the host is a synchronized shutdown: the actor is destroyed by a
/// final task on its own loop — so no message can run after the target
/// object's destructor — and only then is the loop stopped and the thread
/// joined.
pub struct ActorThread<O: Send + 'static> {
  name:        String,
  actor:       Option<Actor<O>>,
  actor_ref:   ActorRef<O>,
  loop_handle: RunLoopHandle,
  running:     CompletionToken<()>,
  resume:      Option<Completer<()>>,
  owner:       ThreadId,
  join:        Option<JoinHandle<()>>,
}

impl<O: Send + 'static> ActorThread<O> {
  /// Spawns a named thread and constructs the actor's object on it.
  ///
  /// # Errors
  ///
  /// Returns the OS error when the thread cannot be created.
  pub fn spawn<F>(name: &str, init: F) -> io::Result<Self>
  where
    F: FnOnce() -> O + Send + 'static, {
    Self::spawn_with_self(name, move |_| init())
  }

  /// Like [`ActorThread::spawn`], but the initializer receives the actor's
  /// own ref. Self-sends from inside it buffer until the object is in place.
  ///
  /// # Errors
  ///
  /// Returns the OS error when the thread cannot be created.
  pub fn spawn_with_self<F>(name: &str, init: F) -> io::Result<Self>
  where
    F: FnOnce(ActorRef<O>) -> O + Send + 'static, {
    let actor = Actor::deferred();
    let actor_ref = actor.self_ref();
    let activation = actor.activation();
    let run_loop = RunLoop::new();
    let loop_handle = run_loop.handle();
    let (running_completer, running) = completion();

    let thread_name = name.to_owned();
    let join = thread::Builder::new().name(thread_name.clone()).spawn(move || {
      lower_current_thread_priority();
      tracing::debug!(actor = %thread_name, "actor thread starting");
      let scheduler: Arc<dyn Scheduler> = Arc::new(run_loop.handle());
      activation.activate_with(scheduler, init);
      running_completer.complete(());
      run_loop.run();
      tracing::debug!(actor = %thread_name, "actor thread stopped");
    })?;

    Ok(Self {
      name: name.to_owned(),
      actor: Some(actor),
      actor_ref,
      loop_handle,
      running,
      resume: None,
      owner: thread::current().id(),
      join: Some(join),
    })
  }

  /// Returns a ref for sending messages to the hosted actor.
  ///
  /// The ref may safely outlive this host; afterwards sends become no-ops
  /// and asks fail as dead.
  #[must_use]
  pub fn actor(&self) -> ActorRef<O> {
    self.actor_ref.clone()
  }

  /// Name the hosted thread was spawned with.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Parks the actor's thread until [`ActorThread::resume`].
  ///
  /// The park task runs at high priority, so it takes effect ahead of every
  /// queued message. Messages keep accumulating while paused and are handled
  /// after resume, still in push order.
  ///
  /// # Panics
  ///
  /// Panics when already paused, or when called from a thread other than the
  /// one that spawned this host.
  pub fn pause(&mut self) {
    self.assert_owner("pause");
    assert!(self.resume.is_none(), "actor thread already paused");

    self.running.wait_settled();
    let (pause_completer, paused) = completion();
    let (resume_completer, resume_token) = completion();
    self.loop_handle.post_with_priority(TaskPriority::High, move || {
      pause_completer.complete(());
      let _ = resume_token.wait();
    });
    let _ = paused.wait();
    self.resume = Some(resume_completer);
  }

  /// Unparks a thread paused by [`ActorThread::pause`].
  ///
  /// # Panics
  ///
  /// Panics when not paused, or when called from a thread other than the one
  /// that spawned this host.
  pub fn resume(&mut self) {
    self.assert_owner("resume");
    let Some(resume) = self.resume.take() else {
      panic!("actor thread is not paused");
    };
    resume.complete(());
  }

  fn assert_owner(&self, operation: &str) {
    assert_eq!(
      thread::current().id(),
      self.owner,
      "{operation} must be called from the thread that spawned the actor thread",
    );
  }
}

impl<O: Send + 'static> Drop for ActorThread<O> {
  fn drop(&mut self) {
    if self.resume.is_some() {
      self.resume();
    }
    self.running.wait_settled();

    // Destroy the actor on its own loop so no message can be dispatched
    // after the target object is gone, then stop the loop and join.
    let actor = self.actor.take();
    let (join_completer, joinable) = completion();
    self.loop_handle.post(move || {
      drop(actor);
      join_completer.complete(());
    });
    let _ = joinable.wait();

    self.loop_handle.stop();
    if let Some(join) = self.join.take()
      && join.join().is_err()
    {
      tracing::error!(actor = %self.name, "actor thread terminated by a panic");
    }
  }
}

impl<O: Send + 'static> std::fmt::Debug for ActorThread<O> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ActorThread").field("name", &self.name).field("paused", &self.resume.is_some()).finish()
  }
}
