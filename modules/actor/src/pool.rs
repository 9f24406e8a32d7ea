//! Shared worker-pool scheduler.

use std::{io, mem, sync::Arc, thread::JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};
use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::scheduler::{Scheduler, WeakMailbox};

mod config;

pub use config::PoolConfig;


type LaneKey = usize;

/// Per-mailbox bookkeeping. A lane is owned by at most one worker at a time;
/// ownership lasts from the first pending receive until the pending count
/// drains to zero, at which point the lane is removed.
struct Lane {
  mailbox: WeakMailbox,
  pending: usize,
  owned:   bool,
}

/// [`Scheduler`] dispatching receives onto a fixed set of worker threads.
///
/// Mailboxes are multiplexed over the workers, but each mailbox's receives
/// stay serialized: `schedule` only hands a mailbox to the work queue when no
/// worker currently owns it, and the owning worker keeps draining that
/// mailbox's pending receives — in request order — before releasing it. Two
/// mailboxes make progress in parallel; one mailbox never does.
///
/// Dropping the pool disconnects the work queue; workers finish the lanes
/// already queued and exit, and the drop blocks until they have joined.
pub struct ThreadPool {
  lanes:   Arc<Mutex<HashMap<LaneKey, Lane>>>,
  work_tx: Option<Sender<LaneKey>>,
  workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
  /// Creates a pool with the default configuration.
  ///
  /// # Errors
  ///
  /// Returns the OS error when a worker thread cannot be created.
  pub fn new() -> io::Result<Self> {
    Self::with_config(PoolConfig::default())
  }

  /// Creates a pool from the given configuration.
  ///
  /// # Errors
  ///
  /// Returns the OS error when a worker thread cannot be created.
  pub fn with_config(config: PoolConfig) -> io::Result<Self> {
    let worker_count = config.workers().get();
    let (work_tx, work_rx) = unbounded();
    let lanes = Arc::new(Mutex::new(HashMap::new()));

    let mut workers = Vec::with_capacity(worker_count);
    for index in 0..worker_count {
      let work_rx: Receiver<LaneKey> = work_rx.clone();
      let lanes = lanes.clone();
      let name = format!("{}-{index}", config.name_prefix());
      workers.push(std::thread::Builder::new().name(name).spawn(move || worker_loop(&work_rx, &lanes))?);
    }

    Ok(Self { lanes, work_tx: Some(work_tx), workers })
  }

  /// Number of worker threads.
  #[must_use]
  pub fn worker_count(&self) -> usize {
    self.workers.len()
  }
}

impl Scheduler for ThreadPool {
  fn schedule(&self, mailbox: WeakMailbox) {
    let key = mailbox.addr();
    let submit = {
      let mut lanes = self.lanes.lock();
      let lane = lanes.entry(key).or_insert_with(|| Lane { mailbox: mailbox.clone(), pending: 0, owned: false });
      if lane.mailbox.is_gone() {
        // The address was reused by a new mailbox after the old one died;
        // repoint the lane.
        lane.mailbox = mailbox;
      }
      lane.pending += 1;
      if lane.owned {
        false
      } else {
        lane.owned = true;
        true
      }
    };
    if submit && let Some(work_tx) = &self.work_tx {
      let _ = work_tx.send(key);
    }
  }
}

impl Drop for ThreadPool {
  fn drop(&mut self) {
    self.work_tx.take();
    for worker in self.workers.drain(..) {
      if worker.join().is_err() {
        tracing::error!("pool worker terminated by a panic");
      }
    }
  }
}

impl std::fmt::Debug for ThreadPool {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ThreadPool").field("workers", &self.workers.len()).finish()
  }
}

fn worker_loop(work_rx: &Receiver<LaneKey>, lanes: &Mutex<HashMap<LaneKey, Lane>>) {
  while let Ok(key) = work_rx.recv() {
    loop {
      let (mailbox, batch) = {
        let mut lanes = lanes.lock();
        let Some(lane) = lanes.get_mut(&key) else {
          break;
        };
        let batch = mem::replace(&mut lane.pending, 0);
        (lane.mailbox.clone(), batch)
      };
      for _ in 0..batch {
        mailbox.receive();
      }
      let mut lanes = lanes.lock();
      let Some(lane) = lanes.get_mut(&key) else {
        break;
      };
      if lane.pending == 0 {
        // Nothing arrived while draining; release ownership.
        lanes.remove(&key);
        break;
      }
    }
  }
}
