//! Error type for `cinelog-omdb`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("OMDb API key is not configured (set OMDBAPIKEY)")]
  MissingApiKey,

  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("request to OMDb failed: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("OMDb answered {0}")]
  Status(StatusCode),

  #[error("malformed OMDb response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("OMDb match is missing the {0:?} field")]
  MissingField(&'static str),

  #[error("OMDb lookup failed after {attempts} attempts: {last}")]
  RetriesExhausted {
    attempts: u32,
    #[source]
    last:     Box<Error>,
  },
}

impl Error {
  /// Whether another attempt could plausibly succeed.
  pub fn is_transient(&self) -> bool {
    match self {
      Error::Transport(e) => !e.is_builder() && !e.is_decode(),
      Error::Status(status) => {
        *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
      }
      _ => false,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
