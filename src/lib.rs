#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Entry-point crate for the spool actor runtime workspace.
//!
//! Re-exports the member crates under stable module names; most users only
//! need the [`prelude`].

pub use spool_actor_rs as actor;
pub use spool_utils_rs as utils;

/// The types most programs need to define and talk to actors.
pub mod prelude {
  pub use spool_actor_rs::{
    Activation, Actor, ActorRef, ActorThread, AskError, AskFuture, InlineScheduler, Mailbox, Message, NoopScheduler,
    PoolConfig, RunLoop, RunLoopHandle, Scheduler, TaskPriority, ThreadPool, WeakMailbox,
  };
  pub use spool_utils_rs::{Completer, CompletionToken, completion};
}

/// Returns the semantic version of the workspace.
#[must_use]
pub const fn crate_version() -> &'static str {
  env!("CARGO_PKG_VERSION")
}
