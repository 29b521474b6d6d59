//! Error type for `cinelog-import`.

use std::io;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[source] BoxError),

  #[error("metadata lookup failed: {0}")]
  Metadata(#[source] BoxError),

  #[error("reading operator input failed: {0}")]
  Prompt(#[from] io::Error),

  /// The combined title field has no trailing `(year)`.
  #[error("cannot split {0:?} into a title and a (year)")]
  TitleFormat(String),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  /// A row failed; `row` counts data rows from 1.
  #[error("row {row} ({title:?}): {source}")]
  Row {
    row:    usize,
    title:  String,
    #[source]
    source: Box<Error>,
  },
}

impl Error {
  pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Store(Box::new(e))
  }

  pub(crate) fn metadata(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Metadata(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
