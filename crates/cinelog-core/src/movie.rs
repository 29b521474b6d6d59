//! Movie: one catalog entry per distinct title.

use serde::{Deserialize, Serialize};

/// Stored in place of a summary when none is known.
pub const MISSING_SUMMARY: &str = "N/A";

/// A persisted movie row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
  pub id:         i64,
  pub title:      String,
  /// Kept as text: the metadata service sometimes answers with ranges.
  pub year:       String,
  pub source_url: String,
  pub summary:    String,
}

/// The fields needed to create a [`Movie`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
  pub title:      String,
  pub year:       String,
  pub source_url: String,
  pub summary:    String,
}

impl NewMovie {
  /// Attach a store-assigned id.
  pub fn with_id(self, id: i64) -> Movie {
    Movie {
      id,
      title: self.title,
      year: self.year,
      source_url: self.source_url,
      summary: self.summary,
    }
  }
}

/// Canonical IMDb page for a title identifier such as `tt1234567`.
pub fn imdb_title_url(imdb_id: &str) -> String {
  format!("https://www.imdb.com/title/{imdb_id}/")
}

/// Normalise an operator-supplied IMDb URL.
///
/// Trims surrounding whitespace and strips the `reference` path segment that
/// IMDb appends to its print-friendly pages, so `.../reference/` becomes
/// `.../`.
pub fn normalize_source_url(input: &str) -> String {
  input.trim().replace("/reference", "").replace("reference", "")
}

/// Substitute [`MISSING_SUMMARY`] for an empty summary.
pub fn summary_or_missing(summary: &str) -> String {
  let summary = summary.trim();
  if summary.is_empty() {
    MISSING_SUMMARY.to_owned()
  } else {
    summary.to_owned()
  }
}
