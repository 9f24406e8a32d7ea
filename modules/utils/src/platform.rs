//! Platform-specific thread tuning.
//!
//! Thread naming is handled by `std::thread::Builder`; the only primitive
//! that needs OS help is dropping the scheduling priority of actor threads
//! so message processing yields to latency-sensitive work.


/// Nice level applied to actor threads. Raising niceness never needs
/// privileges, so this always succeeds for the calling thread.
#[cfg(unix)]
const ACTOR_THREAD_NICENESS: libc::c_int = 19;

/// Lowers the scheduling priority of the calling thread, best effort.
///
/// On Linux `setpriority` with a `who` of 0 applies to the calling thread
/// rather than the whole process. Failures are ignored: priority is a
/// throughput hint, never a correctness requirement.
#[cfg(unix)]
pub fn lower_current_thread_priority() {
  // SAFETY: setpriority has no memory-safety preconditions.
  let _ = unsafe { libc::setpriority(libc::PRIO_PROCESS as _, 0, ACTOR_THREAD_NICENESS) };
}

/// Lowers the scheduling priority of the calling thread, best effort.
///
/// No-op on platforms without a niceness API.
#[cfg(not(unix))]
pub fn lower_current_thread_priority() {}
