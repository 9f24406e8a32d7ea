//! Owning handle binding a target object to its mailbox.

use std::{fmt, sync::Arc};

use crate::{
  actor_ref::ActorRef,
  ask::AskFuture,
  mailbox::Mailbox,
  scheduler::Scheduler,
};


/// An owning reference to an asynchronous object: an actor.
///
/// The actor owns the target object's storage and the strong handle to its
/// mailbox. All communication goes through messages — [`Actor::invoke`] and
/// [`Actor::ask`], or any number of [`ActorRef`]s obtained from
/// [`Actor::self_ref`]. Messages sent from one sender are handled in send
/// order; messages from different senders carry no relative order.
///
/// Construction comes in two shapes. Single-phase ([`Actor::new`],
/// [`Actor::with_self`]) builds the target object immediately and starts
/// dispatching against the given scheduler. Two-phase ([`Actor::deferred`]
/// plus [`Activation`]) creates only the mailbox, so refs can be handed out
/// before the target thread exists; messages buffer until activation and are
/// then handled in push order.
///
/// Dropping the actor closes the mailbox first — waiting for any in-flight
/// handler — and only then destroys the target object. Queued messages are
/// dropped; their `ask` futures resolve as cancelled.
pub struct Actor<O: Send + 'static> {
  mailbox: Arc<Mailbox<O>>,
}

impl<O: Send + 'static> Actor<O> {
  /// Constructs the target object and starts dispatching immediately.
  pub fn new(scheduler: Arc<dyn Scheduler>, object: O) -> Self {
    Self::with_self(scheduler, move |_| object)
  }

  /// Like [`Actor::new`], but the initializer receives the actor's own ref.
  ///
  /// This is the only supported way for an object to obtain its self-ref
  /// during construction. The mailbox is still holding while the initializer
  /// runs, so self-sends from inside it buffer and are dispatched after the
  /// initializer returns.
  pub fn with_self<F>(scheduler: Arc<dyn Scheduler>, init: F) -> Self
  where
    F: FnOnce(ActorRef<O>) -> O, {
    let actor = Self::deferred();
    actor.activation().activate_with(scheduler, init);
    actor
  }

  /// Creates the parent half of a two-phase actor: a holding mailbox with no
  /// target object yet.
  ///
  /// Refs from [`Actor::self_ref`] are valid immediately; pushes buffer until
  /// an [`Activation`] emplaces the object and opens the mailbox.
  #[must_use]
  pub fn deferred() -> Self {
    Self { mailbox: Mailbox::new() }
  }

  /// Returns the one-shot activation handle for a deferred actor, intended
  /// to be moved to the target thread.
  #[must_use]
  pub fn activation(&self) -> Activation<O> {
    Activation { mailbox: self.mailbox.clone() }
  }

  /// Returns a weak ref addressing this actor.
  #[must_use]
  pub fn self_ref(&self) -> ActorRef<O> {
    ActorRef::new(Arc::downgrade(&self.mailbox))
  }

  /// Returns the actor's mailbox, for integrations that push prepackaged
  /// [`Message`](crate::Message)s or hand out weak handles themselves.
  #[must_use]
  pub fn mailbox(&self) -> Arc<Mailbox<O>> {
    self.mailbox.clone()
  }

  /// Sends a fire-and-forget message to this actor.
  pub fn invoke<F>(&self, operation: F)
  where
    F: FnOnce(&mut O) + Send + 'static, {
    self.self_ref().invoke(operation);
  }

  /// Sends a request to this actor and returns the response future.
  pub fn ask<F, R>(&self, operation: F) -> AskFuture<R>
  where
    F: FnOnce(&mut O) -> R + Send + 'static,
    R: Send + 'static, {
    self.self_ref().ask(operation)
  }
}

impl<O: Send + 'static> Drop for Actor<O> {
  fn drop(&mut self) {
    self.mailbox.close();
    self.mailbox.discard_target();
  }
}

impl<O: Send + 'static> fmt::Debug for Actor<O> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Actor").field("closed", &self.mailbox.is_closed()).finish()
  }
}

/// Second half of a two-phase actor: emplaces the target object and opens
/// the mailbox, normally on the target thread.
pub struct Activation<O: Send + 'static> {
  mailbox: Arc<Mailbox<O>>,
}

impl<O: Send + 'static> Activation<O> {
  /// Emplaces the given object and opens the mailbox against `scheduler`.
  ///
  /// Messages buffered while holding become dispatchable, ahead of anything
  /// pushed later. Activating an actor that was already dropped is a no-op
  /// that discards `object`.
  ///
  /// # Panics
  ///
  /// Panics when the actor was already activated.
  pub fn activate(self, scheduler: Arc<dyn Scheduler>, object: O) {
    self.activate_with(scheduler, move |_| object);
  }

  /// Like [`Activation::activate`], but the initializer receives the actor's
  /// own ref; self-sends from inside it buffer until the mailbox opens.
  ///
  /// # Panics
  ///
  /// Panics when the actor was already activated.
  pub fn activate_with<F>(self, scheduler: Arc<dyn Scheduler>, init: F)
  where
    F: FnOnce(ActorRef<O>) -> O, {
    let self_ref = ActorRef::new(Arc::downgrade(&self.mailbox));
    let object = init(self_ref);
    if self.mailbox.emplace(object) {
      self.mailbox.open(scheduler);
    }
  }
}

impl<O: Send + 'static> fmt::Debug for Activation<O> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Activation").finish_non_exhaustive()
  }
}
