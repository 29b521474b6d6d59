//! The `MetadataSource` trait: a remote lookup of movie details by title.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// A positive answer from the metadata service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataMatch {
  /// Service-side title identifier, e.g. `tt1234567`.
  pub imdb_id: String,
  /// Returned verbatim; may be a range such as `2019–2021`.
  pub year:    String,
  pub plot:    Option<String>,
}

/// Abstraction over the movie metadata service.
///
/// `Ok(None)` is the normal "no match" outcome. Only transport and protocol
/// failures are errors.
pub trait MetadataSource {
  type Error: std::error::Error + Send + Sync + 'static;

  fn lookup(
    &self,
    title: &str,
    year: Option<&str>,
  ) -> impl Future<Output = Result<Option<MetadataMatch>, Self::Error>> + Send;
}
