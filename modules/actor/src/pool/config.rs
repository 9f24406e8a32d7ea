//! Worker-pool configuration.

use std::{num::NonZeroUsize, thread};

/// Configuration for [`ThreadPool`](super::ThreadPool).
#[derive(Debug, Clone)]
pub struct PoolConfig {
  workers:     Option<NonZeroUsize>,
  name_prefix: String,
}

impl PoolConfig {
  /// Fixes the number of worker threads instead of deriving it from the
  /// machine's available parallelism.
  #[must_use]
  pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
    self.workers = Some(workers);
    self
  }

  /// Sets the prefix used to name worker threads (`<prefix>-<index>`).
  #[must_use]
  pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.name_prefix = prefix.into();
    self
  }

  /// Effective worker count: the configured value, else the machine's
  /// available parallelism, else one.
  #[must_use]
  pub fn workers(&self) -> NonZeroUsize {
    self.workers.or_else(|| thread::available_parallelism().ok()).unwrap_or(NonZeroUsize::MIN)
  }

  /// Prefix used to name worker threads.
  #[must_use]
  pub fn name_prefix(&self) -> &str {
    &self.name_prefix
  }
}

impl Default for PoolConfig {
  fn default() -> Self {
    Self { workers: None, name_prefix: "spool-worker".to_owned() }
  }
}
