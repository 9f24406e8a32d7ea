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

//! Synchronization and platform helpers shared by the spool runtime.
//!
//! The actor crate keeps no thread-blocking primitives of its own: the one-shot
//! [`completion`] token defined here backs every place the runtime waits for
//! another thread (ask responses, startup gates, pause handshakes, teardown),
//! and [`lower_current_thread_priority`] covers the one piece of OS-specific
//! thread tuning the runtime performs.

mod platform;
mod sync;

pub use platform::lower_current_thread_priority;
pub use sync::{Abandoned, Completer, CompletionToken, WaitTimeoutError, completion};
