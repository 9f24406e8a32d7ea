use spool_utils_rs::completion;

use super::Message;
use crate::ask::AskError;

#[test]
fn invoke_message_runs_against_the_target() {
  let message = Message::invoke(|count: &mut u32| *count += 5);
  let mut count = 1_u32;
  message.execute(&mut count);
  assert_eq!(count, 6);
}

#[test]
fn ask_message_completes_with_the_return_value() {
  let (completer, token) = completion();
  let message = Message::ask(|count: &mut u32| *count * 2, completer);
  let mut count = 21_u32;
  message.execute(&mut count);
  assert_eq!(token.wait(), Ok(Ok(42)));
}

#[test]
fn ask_message_reports_a_panicking_handler() {
  let (completer, token) = completion();
  let message = Message::ask(|_: &mut u32| -> u32 { panic!("handler exploded") }, completer);
  let mut count = 0_u32;
  message.execute(&mut count);
  assert_eq!(token.wait(), Ok(Err(AskError::Panicked("handler exploded".to_owned()))));
}

#[test]
fn dropping_an_ask_message_abandons_its_token() {
  let (completer, token) = completion();
  let message = Message::ask(|count: &mut u32| *count, completer);
  drop(message);
  assert!(token.wait().is_err());
}
