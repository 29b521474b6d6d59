//! Journal entries rendered from the viewing log.
//!
//! cinelog stops at the formatting boundary: entries are handed to an
//! external journaling tool, which owns storage and geotagging.

use cinelog_core::{movie::MISSING_SUMMARY, store::CatalogStore, viewing::ViewingLogEntry};
use serde::Serialize;

use crate::{Error, Result};

/// Tags carried by every movie entry.
const BASE_TAGS: [&str; 2] = ["OMDB", "Movies"];

/// Extra tag for a first viewing.
const FIRST_VIEWING_TAG: &str = "new";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coordinates {
  pub latitude:  String,
  pub longitude: String,
}

/// One journal entry, ready for a journaling CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
  pub text:        String,
  /// Verbatim from the viewing.
  pub date:        String,
  pub tags:        Vec<String>,
  pub coordinates: Option<Coordinates>,
}

impl From<&ViewingLogEntry> for JournalEntry {
  fn from(v: &ViewingLogEntry) -> Self {
    let rating = format!("{}/5", v.score);
    let summary = if v.summary == MISSING_SUMMARY {
      "\n".to_owned()
    } else {
      format!("\n{}", v.summary)
    };
    let text = format!(
      "# {} ({})\n{rating}\n{summary}\n-- {}",
      v.title, v.year, v.source_url
    );

    let mut tags: Vec<String> = BASE_TAGS.iter().map(|t| (*t).to_owned()).collect();
    tags.push(rating);
    if v.first_viewing {
      tags.push(FIRST_VIEWING_TAG.to_owned());
    }

    let coordinates = (!v.latitude.is_empty()).then(|| Coordinates {
      latitude:  v.latitude.clone(),
      longitude: v.longitude.clone(),
    });

    JournalEntry {
      text,
      date: v.date.clone(),
      tags,
      coordinates,
    }
  }
}

/// Journal entries for every viewing, oldest first.
pub async fn journal_entries<S: CatalogStore>(store: &S) -> Result<Vec<JournalEntry>> {
  let log = store.viewing_log().await.map_err(Error::store)?;
  Ok(log.iter().map(JournalEntry::from).collect())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry() -> ViewingLogEntry {
    ViewingLogEntry {
      viewing_id:    1,
      title:         "Heat".into(),
      year:          "1995".into(),
      source_url:    "https://www.imdb.com/title/tt0113277/".into(),
      summary:       "A group of high-end professional thieves.".into(),
      date:          "2023-11-01".into(),
      score:         "5".into(),
      first_viewing: true,
      theater:       "Film Forum".into(),
      longitude:     "-74.0041".into(),
      latitude:      "40.7284".into(),
    }
  }

  #[test]
  fn renders_summary_rating_and_link() {
    let journal = JournalEntry::from(&entry());
    assert_eq!(
      journal.text,
      "# Heat (1995)\n5/5\n\nA group of high-end professional thieves.\n-- https://www.imdb.com/title/tt0113277/"
    );
    assert_eq!(journal.date, "2023-11-01");
    assert_eq!(journal.tags, ["OMDB", "Movies", "5/5", "new"]);
    assert_eq!(
      journal.coordinates,
      Some(Coordinates {
        latitude:  "40.7284".into(),
        longitude: "-74.0041".into(),
      })
    );
  }

  #[test]
  fn missing_summary_leaves_a_blank_block() {
    let mut v = entry();
    v.summary = MISSING_SUMMARY.into();
    v.first_viewing = false;
    v.latitude = String::new();

    let journal = JournalEntry::from(&v);
    assert_eq!(
      journal.text,
      "# Heat (1995)\n5/5\n\n\n-- https://www.imdb.com/title/tt0113277/"
    );
    assert_eq!(journal.tags, ["OMDB", "Movies", "5/5"]);
    assert!(journal.coordinates.is_none());
  }
}
