use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};

use parking_lot::Mutex;

use super::{RunLoop, TaskPriority};
use crate::actor::Actor;

#[test]
fn tasks_run_in_post_order() {
  let run_loop = RunLoop::new();
  let handle = run_loop.handle();
  let log = Arc::new(Mutex::new(Vec::new()));

  for value in ["a", "b", "c"] {
    let log = log.clone();
    handle.post(move || log.lock().push(value));
  }
  let stopper = handle.clone();
  handle.post(move || stopper.stop());

  run_loop.run();
  assert_eq!(*log.lock(), vec!["a", "b", "c"]);
}

#[test]
fn high_priority_tasks_jump_the_queue() {
  let run_loop = RunLoop::new();
  let handle = run_loop.handle();
  let log = Arc::new(Mutex::new(Vec::new()));

  let normal_log = log.clone();
  let stopper = handle.clone();
  handle.post(move || {
    normal_log.lock().push("normal");
    stopper.stop();
  });
  let high_log = log.clone();
  handle.post_with_priority(TaskPriority::High, move || high_log.lock().push("high"));

  run_loop.run();
  assert_eq!(*log.lock(), vec!["high", "normal"]);
}

#[test]
fn a_high_task_posted_while_busy_still_precedes_queued_normals() {
  let run_loop = RunLoop::new();
  let handle = run_loop.handle();
  let log = Arc::new(Mutex::new(Vec::new()));

  let poster = handle.clone();
  let first_log = log.clone();
  let normal_log = log.clone();
  let high_log = log.clone();
  let stopper = handle.clone();
  handle.post(move || {
    first_log.lock().push("first");
    // Posted while the loop is mid-task, so both are ready the moment it
    // looks for more work; the high one must still win.
    poster.post(move || {
      normal_log.lock().push("normal");
      stopper.stop();
    });
    poster.post_with_priority(TaskPriority::High, move || high_log.lock().push("high"));
  });

  run_loop.run();
  assert_eq!(*log.lock(), vec!["first", "high", "normal"]);
}

#[test]
fn stop_preempts_queued_normal_tasks() {
  let run_loop = RunLoop::new();
  let handle = run_loop.handle();
  let ran = Arc::new(AtomicBool::new(false));

  let flag = ran.clone();
  handle.post(move || flag.store(true, Ordering::Release));
  handle.stop();

  run_loop.run();
  assert!(!ran.load(Ordering::Acquire));
}

#[test]
fn posting_after_the_loop_is_gone_is_silent() {
  let run_loop = RunLoop::new();
  let handle = run_loop.handle();
  drop(run_loop);
  handle.post(|| {});
  handle.stop();
}

#[test]
fn the_handle_schedules_receives_as_normal_tasks() {
  let run_loop = RunLoop::new();
  let handle = run_loop.handle();

  let actor = Actor::new(Arc::new(handle.clone()), 0_u32);
  actor.invoke(|count| *count += 1);
  actor.invoke(|count| *count += 1);
  let response = actor.ask(|count| *count);

  let stopper = handle.clone();
  handle.post(move || stopper.stop());
  run_loop.run();

  assert_eq!(response.wait(), Ok(2));
}
