//! Blocking synchronization primitives.

mod completion;

pub use completion::{Abandoned, Completer, CompletionToken, WaitTimeoutError, completion};
