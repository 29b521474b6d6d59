//! Back-fill summaries for movies stored with the missing-summary sentinel.

use cinelog_core::{
  movie::{normalize_source_url, summary_or_missing},
  prompt::Prompter,
  store::CatalogStore,
};
use tracing::debug;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryReport {
  pub updated:   usize,
  pub unchanged: usize,
}

/// Walk every movie without a summary and offer the operator a chance to
/// supply a URL and a summary.
///
/// Leaving both answers empty skips the movie. An empty URL keeps the stored
/// one; an empty summary keeps the sentinel.
pub async fn fill_missing_summaries<S, P>(store: &S, prompter: &mut P) -> Result<SummaryReport>
where
  S: CatalogStore,
  P: Prompter,
{
  let mut report = SummaryReport::default();

  for movie in store.movies_missing_summary().await.map_err(Error::store)? {
    prompter.say(&format!("{}\n{}", movie.title, movie.source_url));
    let url = prompter.ask("IMDb URL: ")?.trim().to_owned();
    let summary = prompter.ask("Summary: ")?.trim().to_owned();

    if url.is_empty() && summary.is_empty() {
      debug!("No update for {}", movie.title);
      report.unchanged += 1;
      continue;
    }

    let source_url = if url.is_empty() {
      movie.source_url.clone()
    } else {
      normalize_source_url(&url)
    };

    store
      .update_movie_details(movie.id, &source_url, &summary_or_missing(&summary))
      .await
      .map_err(Error::store)?;
    debug!("Updated {}", movie.title);
    report.updated += 1;
  }

  Ok(report)
}
