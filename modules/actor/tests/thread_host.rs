use std::{
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
  thread,
  time::Duration,
};

use spool_actor_rs::ActorThread;

#[test]
fn paused_hosts_buffer_messages_and_drain_them_in_order_on_resume() {
  let processed = Arc::new(AtomicUsize::new(0));
  let mut host = ActorThread::spawn("pausable", Vec::new).unwrap();
  let actor = host.actor();

  host.pause();
  for value in 0..5_u32 {
    let processed = processed.clone();
    actor.invoke(move |log: &mut Vec<u32>| {
      log.push(value);
      processed.fetch_add(1, Ordering::Relaxed);
    });
  }

  thread::sleep(Duration::from_millis(50));
  assert_eq!(processed.load(Ordering::Relaxed), 0, "messages ran while the host was paused");

  host.resume();
  let log = actor.ask(|log| log.clone()).wait_timeout(Duration::from_secs(30)).unwrap().unwrap();
  assert_eq!(log, vec![0, 1, 2, 3, 4]);
  assert_eq!(processed.load(Ordering::Relaxed), 5);
}

#[test]
fn hosts_survive_repeated_pause_resume_cycles() {
  let mut host = ActorThread::spawn("cycled", || 0_u64).unwrap();
  let actor = host.actor();

  for _ in 0..3 {
    host.pause();
    for _ in 0..10 {
      actor.invoke(|count| *count += 1);
    }
    host.resume();
  }

  assert_eq!(actor.ask(|count| *count).wait_timeout(Duration::from_secs(30)), Some(Ok(30)));
}

#[test]
fn dropping_a_paused_host_resumes_and_shuts_down_cleanly() {
  let processed = Arc::new(AtomicUsize::new(0));
  let mut host = ActorThread::spawn("dropped-paused", || ()).unwrap();
  let actor = host.actor();

  host.pause();
  for _ in 0..3 {
    let processed = processed.clone();
    actor.invoke(move |_| {
      processed.fetch_add(1, Ordering::Relaxed);
    });
  }

  drop(host);
  // Teardown resumed the loop; the buffered messages ran before the actor
  // was destroyed.
  assert_eq!(processed.load(Ordering::Relaxed), 3);
}

#[test]
fn refs_are_valid_before_the_host_thread_has_done_any_work() {
  let host = ActorThread::spawn("eager-refs", || 1_u32).unwrap();
  let actor = host.actor();
  assert_eq!(actor.ask(|count| *count).wait_timeout(Duration::from_secs(30)), Some(Ok(1)));
  drop(host);
}
