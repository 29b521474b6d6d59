//! Rows of the viewing export.

use std::{io, path::Path};

use serde::Deserialize;

use crate::{Result, title::parse_title_year};

/// Marker in the `New` column for a repeat viewing.
const REPEAT_MARKER: &str = "N";

/// One data row of the export. Columns beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewingRow {
  /// Either `"Name (Year)"` or, when `Year` is present, the bare name.
  #[serde(rename = "Title")]
  pub title:   String,
  /// Optional structured year column.
  #[serde(rename = "Year", default)]
  pub year:    Option<String>,
  #[serde(rename = "Theater")]
  pub theater: String,
  #[serde(rename = "Date")]
  pub date:    String,
  #[serde(rename = "Score")]
  pub score:   String,
  #[serde(rename = "New")]
  pub new:     String,
}

impl ViewingRow {
  /// The movie title and year this row refers to.
  ///
  /// A non-empty `Year` column wins; otherwise the year is split off the
  /// combined `Title` field.
  pub fn title_and_year(&self) -> Result<(String, String)> {
    match self.year.as_deref().map(str::trim) {
      Some(year) if !year.is_empty() => Ok((self.title.trim().to_owned(), year.to_owned())),
      _ => parse_title_year(&self.title),
    }
  }

  /// `N` marks a repeat viewing; anything else is a first viewing.
  pub fn first_viewing(&self) -> bool { self.new != REPEAT_MARKER }
}

/// Read every row of a comma-separated export with a header line.
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<ViewingRow>> {
  let rows = csv::Reader::from_reader(reader)
    .deserialize()
    .collect::<Result<Vec<ViewingRow>, csv::Error>>()?;
  Ok(rows)
}

pub fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<ViewingRow>> {
  let rows = csv::Reader::from_path(path)?
    .deserialize()
    .collect::<Result<Vec<ViewingRow>, csv::Error>>()?;
  Ok(rows)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  const EXPORT: &str = "\
Title,Theater,Date,Score,New,Notes
Oppenheimer (2023),Alamo Drafthouse,2023-07-21,5,Y,imax
\"Crouching Tiger, Hidden Dragon (2000)\",Film Forum,2023-08-02,4,N,
";

  #[test]
  fn reads_rows_in_order_and_ignores_extra_columns() {
    let rows = read_rows(EXPORT.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "Oppenheimer (2023)");
    assert_eq!(rows[0].theater, "Alamo Drafthouse");
    assert_eq!(rows[0].date, "2023-07-21");
    assert_eq!(rows[0].score, "5");
    assert_eq!(rows[1].title, "Crouching Tiger, Hidden Dragon (2000)");
    assert_eq!(rows[1].year, None);
  }

  #[test]
  fn new_marker_polarity() {
    let rows = read_rows(EXPORT.as_bytes()).unwrap();
    assert!(rows[0].first_viewing());
    assert!(!rows[1].first_viewing());

    let mut row = rows[0].clone();
    row.new = String::new();
    assert!(row.first_viewing());
    row.new = "n".into();
    assert!(row.first_viewing());
  }

  #[test]
  fn combined_title_is_split() {
    let rows = read_rows(EXPORT.as_bytes()).unwrap();
    assert_eq!(
      rows[1].title_and_year().unwrap(),
      ("Crouching Tiger, Hidden Dragon".into(), "2000".into())
    );
  }

  #[test]
  fn year_column_takes_precedence() {
    let export = "\
Title,Year,Theater,Date,Score,New
Nosferatu (Director's Cut),1979,Film Forum,2023-10-31,4,Y
Heat (1995),,Film Forum,2023-11-01,5,N
";
    let rows = read_rows(export.as_bytes()).unwrap();
    assert_eq!(
      rows[0].title_and_year().unwrap(),
      ("Nosferatu (Director's Cut)".into(), "1979".into())
    );
    assert_eq!(
      rows[1].title_and_year().unwrap(),
      ("Heat".into(), "1995".into())
    );
  }

  #[test]
  fn missing_required_column_is_a_csv_error() {
    let export = "Title,Theater,Date\nHeat (1995),Film Forum,2023-11-01\n";
    assert!(matches!(read_rows(export.as_bytes()), Err(Error::Csv(_))));
  }

  #[test]
  fn reads_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    std::fs::write(&path, EXPORT).unwrap();
    assert_eq!(read_rows_from_path(&path).unwrap().len(), 2);

    let missing = dir.path().join("absent.csv");
    assert!(matches!(read_rows_from_path(missing), Err(Error::Csv(_))));
  }
}
