//! The import pipeline: one viewing per export row, strictly in order.

use cinelog_core::{
  metadata::MetadataSource,
  movie::Movie,
  prompt::Prompter,
  store::CatalogStore,
  theater::Theater,
  viewing::{NewViewing, Viewing},
};
use tracing::{debug, info, warn};

use crate::{Error, Result, metadata::resolve_movie, row::ViewingRow, theater::resolve_theater};

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// A resolve-or-create result: the same record shape either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
  Found(T),
  Created(T),
}

impl<T> Resolution<T> {
  pub fn is_created(&self) -> bool { matches!(self, Resolution::Created(_)) }

  pub fn get(&self) -> &T {
    match self {
      Resolution::Found(t) | Resolution::Created(t) => t,
    }
  }

  pub fn into_inner(self) -> T {
    match self {
      Resolution::Found(t) | Resolution::Created(t) => t,
    }
  }
}

/// Everything one imported row produced.
#[derive(Debug, Clone)]
pub struct RowOutcome {
  pub movie:   Resolution<Movie>,
  pub theater: Resolution<Theater>,
  pub viewing: Viewing,
}

/// A row left out of a `keep_going` import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
  /// Data row number, counting from 1.
  pub row:    usize,
  pub title:  String,
  pub reason: String,
}

/// Totals for one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
  pub rows:             usize,
  pub movies_created:   usize,
  pub theaters_created: usize,
  pub viewings_created: usize,
  pub skipped:          Vec<SkippedRow>,
}

impl ImportReport {
  /// `true` when no row was skipped.
  pub fn is_clean(&self) -> bool { self.skipped.is_empty() }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
  /// Record failing rows in the report and carry on instead of aborting.
  pub keep_going: bool,
}

// ─── Importer ────────────────────────────────────────────────────────────────

/// Drives the resolvers and the store for a sequence of export rows.
///
/// Every write commits on its own. An aborted run leaves earlier rows in
/// place; rerunning the same export finds the movies and theaters again but
/// records the viewings a second time.
pub struct Importer<'a, S, M, P> {
  store:    &'a S,
  source:   &'a M,
  prompter: P,
  options:  ImportOptions,
}

impl<'a, S, M, P> Importer<'a, S, M, P>
where
  S: CatalogStore,
  M: MetadataSource,
  P: Prompter,
{
  pub fn new(store: &'a S, source: &'a M, prompter: P) -> Self {
    Self {
      store,
      source,
      prompter,
      options: ImportOptions::default(),
    }
  }

  pub fn with_options(mut self, options: ImportOptions) -> Self {
    self.options = options;
    self
  }

  /// Import `rows` in order.
  ///
  /// Without `keep_going` the first failing row aborts the run with
  /// [`Error::Row`]. With it, failures are logged and listed in the report.
  pub async fn import<I>(&mut self, rows: I) -> Result<ImportReport>
  where
    I: IntoIterator<Item = ViewingRow>,
  {
    let mut report = ImportReport::default();

    for (index, row) in rows.into_iter().enumerate() {
      let number = index + 1;
      report.rows += 1;

      let result = self.import_row(&row, &mut report).await;
      match result {
        Ok(_) => {}
        Err(e) if self.options.keep_going => {
          warn!("skipping row {number} ({:?}): {e}", row.title);
          report.skipped.push(SkippedRow {
            row:    number,
            title:  row.title.clone(),
            reason: e.to_string(),
          });
        }
        Err(e) => {
          return Err(Error::Row {
            row:    number,
            title:  row.title,
            source: Box::new(e),
          });
        }
      }
    }

    info!(
      rows = report.rows,
      movies_created = report.movies_created,
      theaters_created = report.theaters_created,
      viewings_created = report.viewings_created,
      skipped = report.skipped.len(),
      "import finished"
    );
    Ok(report)
  }

  /// Resolve the row's movie and theater, then record the viewing.
  ///
  /// The title is parsed before anything is written, so a malformed title
  /// leaves the catalog untouched. Each record is counted in `report` as soon
  /// as it is created, including when a later step of the row fails.
  pub async fn import_row(
    &mut self,
    row: &ViewingRow,
    report: &mut ImportReport,
  ) -> Result<RowOutcome> {
    debug!(?row, "import_row");

    let (title, year) = row.title_and_year()?;
    warn_on_unusual_score(&row.score);

    let movie = self.movie(&title, Some(year.as_str())).await?;
    report.movies_created += usize::from(movie.is_created());
    let theater = self.theater(&row.theater).await?;
    report.theaters_created += usize::from(theater.is_created());

    let viewing = self
      .store
      .create_viewing(NewViewing {
        movie_id:      movie.get().id,
        theater_id:    theater.get().id,
        date:          row.date.clone(),
        score:         row.score.clone(),
        first_viewing: row.first_viewing(),
      })
      .await
      .map_err(Error::store)?;
    report.viewings_created += 1;

    Ok(RowOutcome { movie, theater, viewing })
  }

  /// Find the movie titled `title`, creating it on a miss.
  ///
  /// A created movie is returned with the id the store assigned; no second
  /// lookup is made.
  pub async fn movie(&mut self, title: &str, year: Option<&str>) -> Result<Resolution<Movie>> {
    let label = year.unwrap_or("");

    if let Some(movie) = self
      .store
      .find_movie_by_title(title)
      .await
      .map_err(Error::store)?
    {
      info!("Found {title} ({label}) in database");
      return Ok(Resolution::Found(movie));
    }

    info!("Did not find {title} ({label}) in database");
    let details = resolve_movie(self.source, &mut self.prompter, title, year).await?;
    let movie = self
      .store
      .create_movie(details)
      .await
      .map_err(Error::store)?;
    Ok(Resolution::Created(movie))
  }

  pub async fn theater(&mut self, name: &str) -> Result<Resolution<Theater>> {
    resolve_theater(self.store, &mut self.prompter, name).await
  }
}

/// Scores are stored as given; flag anything off the 1–5 scale.
fn warn_on_unusual_score(score: &str) {
  let in_range = score
    .trim()
    .parse::<f64>()
    .is_ok_and(|s| (1.0..=5.0).contains(&s));
  if !in_range {
    warn!("score {score:?} is outside the 1-5 scale; storing it unchanged");
  }
}
