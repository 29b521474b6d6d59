//! Metadata resolver: remote lookup with an operator fallback.

use cinelog_core::{
  metadata::MetadataSource,
  movie::{MISSING_SUMMARY, NewMovie, imdb_title_url, normalize_source_url, summary_or_missing},
  prompt::Prompter,
};
use tracing::{debug, info};

use crate::{Error, Result};

/// Gather the details of `title` for a new catalog entry.
///
/// A match from `source` supplies the year and plot verbatim and the IMDb URL
/// is derived from its identifier. A negative answer hands over to the
/// operator. Lookup errors are returned as [`Error::Metadata`]; they never
/// trigger the fallback.
pub async fn resolve_movie<M, P>(
  source: &M,
  prompter: &mut P,
  title: &str,
  year: Option<&str>,
) -> Result<NewMovie>
where
  M: MetadataSource,
  P: Prompter,
{
  debug!(title, year, "resolve_movie");
  let year = year.filter(|y| !y.trim().is_empty());

  let movie = match source.lookup(title, year).await.map_err(Error::metadata)? {
    Some(found) => NewMovie {
      title:      title.to_owned(),
      year:       found.year,
      source_url: imdb_title_url(&found.imdb_id),
      summary:    found.plot.unwrap_or_else(|| MISSING_SUMMARY.to_owned()),
    },
    None => collect_movie_details(prompter, title, year)?,
  };

  info!(
    title = %movie.title,
    year = %movie.year,
    source_url = %movie.source_url,
    "resolved movie details"
  );
  Ok(movie)
}

/// Ask the operator for what the metadata service could not provide.
///
/// The year is only asked for when not already known. The URL is
/// normalised and an empty summary becomes the missing-summary sentinel.
pub fn collect_movie_details<P: Prompter>(
  prompter: &mut P,
  title: &str,
  year: Option<&str>,
) -> Result<NewMovie> {
  prompter.say(&format!(
    "Could not find {title} ({}) in OMDb.",
    year.unwrap_or("unknown year")
  ));

  let year = match year {
    Some(year) => year.to_owned(),
    None => prompter.ask("Year: ")?.trim().to_owned(),
  };
  let source_url = normalize_source_url(&prompter.ask("IMDb URL: ")?);
  let summary = summary_or_missing(&prompter.ask("IMDb Summary: ")?);

  Ok(NewMovie {
    title: title.to_owned(),
    year,
    source_url,
    summary,
  })
}
