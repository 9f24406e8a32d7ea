use std::sync::Arc;

use super::ActorRef;
use crate::{actor::Actor, ask::AskError, scheduler::InlineScheduler};

fn inline_counter() -> Actor<u32> {
  Actor::new(Arc::new(InlineScheduler), 0)
}

#[test]
fn invoke_reaches_the_live_target() {
  let actor = inline_counter();
  let actor_ref = actor.self_ref();
  actor_ref.invoke(|count| *count += 3);
  assert_eq!(actor.ask(|count| *count).wait(), Ok(3));
}

#[test]
fn clones_address_the_same_actor() {
  let actor = inline_counter();
  let first: ActorRef<u32> = actor.self_ref();
  let second = first.clone();
  first.invoke(|count| *count += 1);
  second.invoke(|count| *count += 1);
  assert_eq!(actor.ask(|count| *count).wait(), Ok(2));
}

#[test]
fn invoke_on_a_dead_ref_is_a_no_op() {
  let actor = inline_counter();
  let actor_ref = actor.self_ref();
  drop(actor);
  actor_ref.invoke(|count| *count += 1);
}

#[test]
fn ask_on_a_dead_ref_fails_fast() {
  let actor = inline_counter();
  let actor_ref = actor.self_ref();
  drop(actor);
  let future = actor_ref.ask(|count| *count);
  assert!(future.is_settled());
  assert_eq!(future.wait(), Err(AskError::Dead));
}

#[test]
fn refs_remain_usable_from_other_threads() {
  let actor = inline_counter();
  let actor_ref = actor.self_ref();
  let sender = std::thread::spawn(move || {
    actor_ref.invoke(|count| *count += 10);
  });
  sender.join().unwrap();
  assert_eq!(actor.ask(|count| *count).wait(), Ok(10));
}
