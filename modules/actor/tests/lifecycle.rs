use std::{
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
  thread,
  time::Duration,
};

use spool_actor_rs::{Actor, ActorThread, AskError};
use spool_utils_rs::completion;

#[test]
fn asks_to_a_dead_actor_fail_within_a_bounded_wait() {
  let host = ActorThread::spawn("short-lived", || 7_u32).unwrap();
  let actor = host.actor();
  drop(host);

  let outcome = actor.ask(|count| *count).wait_timeout(Duration::from_secs(5));
  assert_eq!(outcome, Some(Err(AskError::Dead)));
}

#[test]
fn invokes_to_a_dead_actor_are_no_ops() {
  let counter = Actor::<u32>::deferred();
  let probe = counter.self_ref();
  drop(counter);
  probe.invoke(|count| *count += 1);
}

#[test]
fn queued_asks_resolve_as_cancelled_when_the_actor_dies_first() {
  let counter = Actor::<u32>::deferred();
  let response = counter.ask(|count| *count);
  assert!(!response.is_settled());

  drop(counter);
  assert_eq!(response.wait_timeout(Duration::from_secs(5)), Some(Err(AskError::Cancelled)));
}

#[test]
fn destruction_returns_only_after_the_in_flight_handler_finishes() {
  let finished = Arc::new(AtomicBool::new(false));
  let host = ActorThread::spawn("sleeper", || ()).unwrap();

  let (started, running) = completion();
  let flag = finished.clone();
  host.actor().invoke(move |_| {
    started.complete(());
    thread::sleep(Duration::from_millis(100));
    flag.store(true, Ordering::Release);
  });

  running.wait().unwrap();
  drop(host);
  assert!(finished.load(Ordering::Acquire));
}

#[test]
fn ask_returns_the_value_it_was_given() {
  let host = ActorThread::spawn("identity", || ()).unwrap();
  let payload = vec![3_u8, 1, 4, 1, 5];
  let echoed = payload.clone();
  assert_eq!(host.actor().ask(move |_| echoed).wait(), Ok(payload));
}

#[test]
fn each_handle_keeps_working_after_its_sibling_is_cloned_and_dropped() {
  let host = ActorThread::spawn("clones", || 0_u32).unwrap();
  let first = host.actor();
  let second = first.clone();
  drop(first);
  second.invoke(|count| *count += 1);
  assert_eq!(second.ask(|count| *count).wait(), Ok(1));
}
