//! [`Prompter`] over a line-oriented terminal.

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use cinelog_core::prompt::Prompter;

/// Writes prompts to `output` and reads one line of `input` per answer.
pub struct TerminalPrompter<R, W> {
  input:  R,
  output: W,
}

impl TerminalPrompter<StdinLock<'static>, Stdout> {
  pub fn stdio() -> Self { Self::new(io::stdin().lock(), io::stdout()) }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
  pub fn new(input: R, output: W) -> Self { Self { input, output } }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
  fn say(&mut self, message: &str) {
    writeln!(self.output, "{message}").ok();
  }

  fn ask(&mut self, label: &str) -> io::Result<String> {
    write!(self.output, "{label}")?;
    self.output.flush()?;

    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Err(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("input closed while waiting for {:?}", label.trim()),
      ));
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_owned())
  }
}
