//! Test doubles for the operator and the metadata service.

use std::{
  collections::{HashMap, VecDeque},
  io,
  sync::atomic::{AtomicUsize, Ordering},
};

use cinelog_core::{
  metadata::{MetadataMatch, MetadataSource},
  prompt::Prompter,
};

/// Answers prompts from a script and records every exchange.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
  answers:  VecDeque<String>,
  pub asked: Vec<String>,
  pub said:  Vec<String>,
}

impl ScriptedPrompter {
  pub fn new<I, A>(answers: I) -> Self
  where
    I: IntoIterator<Item = A>,
    A: Into<String>,
  {
    Self {
      answers: answers.into_iter().map(Into::into).collect(),
      ..Self::default()
    }
  }

  pub fn remaining(&self) -> usize { self.answers.len() }
}

impl Prompter for ScriptedPrompter {
  fn say(&mut self, message: &str) { self.said.push(message.to_owned()); }

  fn ask(&mut self, label: &str) -> io::Result<String> {
    self.asked.push(label.to_owned());
    self.answers.pop_front().ok_or_else(|| {
      io::Error::new(io::ErrorKind::UnexpectedEof, format!("script ran out at {label:?}"))
    })
  }
}

/// Canned metadata answers keyed by title; unknown titles are a miss.
#[derive(Debug, Default)]
pub struct StubSource {
  matches:   HashMap<String, MetadataMatch>,
  fail_with: Option<String>,
  calls:     AtomicUsize,
}

impl StubSource {
  pub fn always_missing() -> Self { Self::default() }

  pub fn with_match(mut self, title: &str, imdb_id: &str, year: &str, plot: Option<&str>) -> Self {
    self.matches.insert(title.to_owned(), MetadataMatch {
      imdb_id: imdb_id.to_owned(),
      year:    year.to_owned(),
      plot:    plot.map(str::to_owned),
    });
    self
  }

  /// Every lookup fails as if the service were unreachable.
  pub fn unreachable(message: &str) -> Self {
    Self {
      fail_with: Some(message.to_owned()),
      ..Self::default()
    }
  }

  pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

impl MetadataSource for StubSource {
  type Error = io::Error;

  async fn lookup(&self, title: &str, _year: Option<&str>) -> io::Result<Option<MetadataMatch>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if let Some(message) = &self.fail_with {
      return Err(io::Error::new(io::ErrorKind::ConnectionRefused, message.clone()));
    }
    Ok(self.matches.get(title).cloned())
  }
}
