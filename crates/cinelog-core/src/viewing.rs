//! Viewing: a single recorded instance of watching a movie.
//!
//! Viewings have no natural key: importing the same row twice records two
//! viewings unless the store was initialised with unique viewings.

use serde::{Deserialize, Serialize};

/// A persisted viewing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewing {
  pub id:            i64,
  pub movie_id:      i64,
  pub theater_id:    i64,
  /// As supplied by the import source; not validated.
  pub date:          String,
  /// Nominally 1–5; not validated.
  pub score:         String,
  pub first_viewing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewViewing {
  pub movie_id:      i64,
  pub theater_id:    i64,
  pub date:          String,
  pub score:         String,
  pub first_viewing: bool,
}

impl NewViewing {
  pub fn with_id(self, id: i64) -> Viewing {
    Viewing {
      id,
      movie_id: self.movie_id,
      theater_id: self.theater_id,
      date: self.date,
      score: self.score,
      first_viewing: self.first_viewing,
    }
  }
}

/// A viewing joined with its movie and theater, in recording order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewingLogEntry {
  pub viewing_id:    i64,
  pub title:         String,
  pub year:          String,
  pub source_url:    String,
  pub summary:       String,
  pub date:          String,
  pub score:         String,
  pub first_viewing: bool,
  pub theater:       String,
  pub longitude:     String,
  pub latitude:      String,
}

/// Row totals for the three catalog tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCounts {
  pub movies:   u64,
  pub theaters: u64,
  pub viewings: u64,
}
