//! Scheduler that drops every request.

use super::{Scheduler, WeakMailbox};

/// Silently discards schedule requests.
///
/// A freshly created mailbox is bound to this scheduler, which is what makes
/// the holding state work without a branch: pushes enqueue normally, the
/// schedule request goes nowhere, and nothing is dispatched until a real
/// scheduler is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScheduler;

impl Scheduler for NoopScheduler {
  fn schedule(&self, _mailbox: WeakMailbox) {}
}
