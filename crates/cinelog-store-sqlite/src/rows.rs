//! Column lists and row decoders shared by the store's queries.
//!
//! The viewing score is read back through `CAST(.. AS TEXT)` so it keeps the
//! textual form the domain types carry, whatever affinity SQLite applied.

use cinelog_core::{
  movie::{MISSING_SUMMARY, Movie},
  theater::Theater,
  viewing::ViewingLogEntry,
};
use rusqlite::Row;

pub const MOVIE_COLUMNS: &str = "id, COALESCE(title, ''), COALESCE(year, ''), \
   COALESCE(imdb_url, ''), COALESCE(summary, 'N/A')";

pub const THEATER_COLUMNS: &str = "id, COALESCE(name, ''), \
   COALESCE(longitude, ''), COALESCE(latitude, '')";

pub fn movie(row: &Row<'_>) -> rusqlite::Result<Movie> {
  Ok(Movie {
    id:         row.get(0)?,
    title:      row.get(1)?,
    year:       row.get(2)?,
    source_url: row.get(3)?,
    summary:    row.get(4)?,
  })
}

pub fn theater(row: &Row<'_>) -> rusqlite::Result<Theater> {
  Ok(Theater {
    id:        row.get(0)?,
    name:      row.get(1)?,
    longitude: row.get(2)?,
    latitude:  row.get(3)?,
  })
}

pub const VIEWING_LOG_QUERY: &str = "
SELECT v.id,
       COALESCE(m.title, ''), COALESCE(m.year, ''), COALESCE(m.imdb_url, ''),
       COALESCE(m.summary, 'N/A'),
       COALESCE(v.date, ''), COALESCE(CAST(v.score AS TEXT), ''),
       COALESCE(v.first_viewing, 0),
       COALESCE(t.name, ''),
       COALESCE(t.longitude, ''), COALESCE(t.latitude, '')
FROM viewing v
JOIN movie   m ON v.movie   = m.id
JOIN theater t ON v.theater = t.id
ORDER BY v.id";

pub fn viewing_log_entry(row: &Row<'_>) -> rusqlite::Result<ViewingLogEntry> {
  Ok(ViewingLogEntry {
    viewing_id:    row.get(0)?,
    title:         row.get(1)?,
    year:          row.get(2)?,
    source_url:    row.get(3)?,
    summary:       row.get(4)?,
    date:          row.get(5)?,
    score:         row.get(6)?,
    first_viewing: row.get(7)?,
    theater:       row.get(8)?,
    longitude:     row.get(9)?,
    latitude:      row.get(10)?,
  })
}

/// The `WHERE` clause selecting movies without a real summary.
pub fn missing_summary_filter() -> String {
  format!("summary IS NULL OR summary = '{MISSING_SUMMARY}'")
}
