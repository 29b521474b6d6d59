//! Wire shape of an OMDb `?t=` answer.

use cinelog_core::metadata::MetadataMatch;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// The subset of the OMDb payload cinelog reads.
///
/// OMDb reports success in-band: `"Response": "True"` or `"False"` with an
/// `"Error"` message, both with HTTP 200.
#[derive(Debug, Deserialize)]
pub struct OmdbResponse {
  #[serde(rename = "Response")]
  pub response: String,
  #[serde(rename = "imdbID")]
  pub imdb_id:  Option<String>,
  #[serde(rename = "Year")]
  pub year:     Option<String>,
  #[serde(rename = "Plot")]
  pub plot:     Option<String>,
  #[serde(rename = "Error")]
  pub error:    Option<String>,
}

impl OmdbResponse {
  pub fn is_match(&self) -> bool { self.response.eq_ignore_ascii_case("true") }

  /// `Ok(None)` for a negative answer.
  pub fn into_match(self) -> Result<Option<MetadataMatch>> {
    if !self.is_match() {
      debug!(reason = self.error.as_deref().unwrap_or(""), "OMDb reported no match");
      return Ok(None);
    }

    let imdb_id = self
      .imdb_id
      .filter(|id| !id.is_empty())
      .ok_or(Error::MissingField("imdbID"))?;
    let year = self.year.ok_or(Error::MissingField("Year"))?;
    let plot = self.plot.filter(|p| !p.trim().is_empty());

    Ok(Some(MetadataMatch { imdb_id, year, plot }))
  }
}
