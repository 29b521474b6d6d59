//! Splitting the export's combined `"Name (Year)"` title field.

use crate::{Error, Result};

/// Split `"Oppenheimer (2023)"` into `("Oppenheimer", "2023")`.
///
/// The year is taken from the last parenthesised group, which must end the
/// field and contain only digits. Earlier parentheses stay in the title, so
/// `"Mission: Impossible (Part One) (2023)"` keeps its subtitle. A title
/// whose own parentheses come last cannot be told apart from a year and is
/// rejected unless those contents are digits.
pub fn parse_title_year(combined: &str) -> Result<(String, String)> {
  let malformed = || Error::TitleFormat(combined.to_owned());

  let trimmed = combined.trim_end();
  let inner = trimmed.strip_suffix(')').ok_or_else(malformed)?;
  let open = inner.rfind('(').ok_or_else(malformed)?;

  let year = &inner[open + 1..];
  if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
    return Err(malformed());
  }

  let title = inner[..open].trim();
  if title.is_empty() {
    return Err(malformed());
  }

  Ok((title.to_owned(), year.to_owned()))
}
