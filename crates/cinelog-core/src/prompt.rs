//! The operator boundary.
//!
//! Resolvers never touch a terminal directly. They talk to a [`Prompter`],
//! which the binary backs with stdin/stdout and tests back with a script.

use std::io;

pub trait Prompter {
  /// Show an informational line to the operator.
  fn say(&mut self, message: &str);

  /// Ask a question and block until the operator answers.
  ///
  /// The answer is returned as typed, minus the line terminator. Callers
  /// trim as needed; an empty answer is valid input.
  fn ask(&mut self, label: &str) -> io::Result<String>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
  fn say(&mut self, message: &str) { (**self).say(message) }

  fn ask(&mut self, label: &str) -> io::Result<String> { (**self).ask(label) }
}
