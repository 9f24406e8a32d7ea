use std::{
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use parking_lot::Mutex;
use spool_actor_rs::{ActorRef, ActorThread};
use spool_utils_rs::{Completer, completion};

struct Player {
  dispatches:  Arc<AtomicUsize>,
  completions: Arc<AtomicUsize>,
  finish_line: Arc<Mutex<Option<Completer<()>>>>,
}

impl Player {
  fn bounce(&mut self, me: ActorRef<Player>, peer: ActorRef<Player>, remaining: u32) {
    self.dispatches.fetch_add(1, Ordering::Relaxed);
    if remaining > 0 {
      let own = peer.clone();
      let back = me;
      peer.invoke(move |player| player.bounce(own, back, remaining - 1));
    } else if let Some(finish) = self.finish_line.lock().take() {
      self.completions.fetch_add(1, Ordering::Relaxed);
      finish.complete(());
    }
  }
}

#[test]
fn two_hosts_bounce_until_the_count_runs_out() {
  let dispatches = Arc::new(AtomicUsize::new(0));
  let completions = Arc::new(AtomicUsize::new(0));
  let (finish, finished) = completion();
  let finish_line = Arc::new(Mutex::new(Some(finish)));

  let player = |dispatches: &Arc<AtomicUsize>, completions: &Arc<AtomicUsize>, line: &Arc<Mutex<Option<Completer<()>>>>| {
    let dispatches = dispatches.clone();
    let completions = completions.clone();
    let finish_line = line.clone();
    move || Player { dispatches, completions, finish_line }
  };

  let host_a = ActorThread::spawn("player-a", player(&dispatches, &completions, &finish_line)).unwrap();
  let host_b = ActorThread::spawn("player-b", player(&dispatches, &completions, &finish_line)).unwrap();

  let ref_a = host_a.actor();
  let ref_b = host_b.actor();
  let own = ref_a.clone();
  ref_a.invoke(move |player| player.bounce(own, ref_b, 2_000));

  finished.wait_timeout(Duration::from_secs(60)).unwrap();
  // 2000 forwarding dispatches plus the final one that crossed the line.
  assert_eq!(dispatches.load(Ordering::Relaxed), 2_001);
  assert_eq!(completions.load(Ordering::Relaxed), 1);
}
