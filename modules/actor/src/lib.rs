#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::missing_safety_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::must_use_candidate)]

//! Thread-affine, typed, in-process actor runtime.
//!
//! An [`Actor<O>`] is an owning reference to an asynchronous object of type
//! `O`. Communication with it happens only by message passing: a sender
//! packages a closure over the target into a [`Message`], pushes it onto the
//! actor's [`Mailbox`], and the mailbox's [`Scheduler`] arranges for one
//! `receive` — and therefore one handler — to run on the right execution
//! context. Messages sent from one sender to one actor are handled in send
//! order; messages from different senders carry no relative order, and can't:
//! the senders run asynchronously with respect to each other.
//!
//! An [`ActorRef<O>`] is the weak, copyable counterpart used for sending.
//! Passing refs between actors inside messages is safe and encouraged — that
//! is how two-way collaboration is built — and a ref outliving its actor
//! stays well-defined: `invoke` becomes a no-op and `ask` resolves as dead.
//! Please don't send shared pointers or references through messages; that
//! subverts the point of prohibiting direct concurrent access to state.
//!
//! Execution contexts come in three provided shapes: [`ActorThread`] hosts
//! one actor on its own named OS thread running a [`RunLoop`];
//! [`ThreadPool`] multiplexes many actors over a fixed set of workers while
//! keeping each mailbox serialized; and [`InlineScheduler`] services
//! messages on the calling thread for tests and single-threaded embeddings.

mod actor;
mod actor_ref;
mod ask;
mod mailbox;
mod message;
mod pool;
mod run_loop;
mod scheduler;
mod thread;

pub use actor::{Activation, Actor};
pub use actor_ref::ActorRef;
pub use ask::{AskError, AskFuture};
pub use mailbox::Mailbox;
pub use message::Message;
pub use pool::{PoolConfig, ThreadPool};
pub use run_loop::{RunLoop, RunLoopHandle, TaskPriority};
pub use scheduler::{InlineScheduler, NoopScheduler, Scheduler, WeakMailbox};
pub use thread::ActorThread;
