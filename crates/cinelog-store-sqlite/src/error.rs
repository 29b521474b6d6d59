//! Error type for `cinelog-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// `initialize_schema` found catalog tables already present. Not
  /// retryable: the store exists.
  #[error("catalog schema already exists")]
  SchemaExists,

  #[error("catalog schema has not been created; run with --initialize first")]
  NotInitialized,

  /// Only raised when the store was initialised with unique viewings.
  #[error("viewing of movie {movie_id} at theater {theater_id} on {date:?} already recorded")]
  DuplicateViewing {
    movie_id:   i64,
    theater_id: i64,
    date:       String,
  },

  #[error("movie not found: {0}")]
  MovieNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
