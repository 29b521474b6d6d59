//! [`SqliteStore`]: the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use cinelog_core::{
  movie::{Movie, NewMovie},
  store::CatalogStore,
  theater::{NewTheater, Theater},
  viewing::{CatalogCounts, NewViewing, Viewing, ViewingLogEntry},
};
use rusqlite::{OptionalExtension as _, ffi};
use tracing::debug;

use crate::{
  Error, Result, rows,
  schema::{SCHEMA, TABLES, UNIQUE_VIEWINGS},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Options applied once, when the catalog tables are created.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOptions {
  /// Reject a second viewing of the same movie at the same theater on the
  /// same date.
  pub unique_viewings: bool,
}

/// A cinelog catalog backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) the database file at `path`.
  ///
  /// Tables are not created here; see [`SqliteStore::initialize_schema`].
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.configure().await?;
    Ok(store)
  }

  /// Open an empty in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.configure().await?;
    Ok(store)
  }

  async fn configure(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Close the connection, surfacing any error SQLite reports on shutdown.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  /// How many of the catalog tables already exist.
  pub(crate) async fn existing_tables(&self) -> Result<usize> {
    let count: i64 = self
      .conn
      .call(|conn| {
        let placeholders = vec!["?"; TABLES.len()].join(", ");
        let sql = format!(
          "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ({placeholders})"
        );
        Ok(conn.query_row(&sql, rusqlite::params_from_iter(TABLES), |r| r.get(0))?)
      })
      .await?;
    Ok(count as usize)
  }

  /// `true` once all three catalog tables exist.
  pub async fn is_initialized(&self) -> Result<bool> {
    Ok(self.existing_tables().await? == TABLES.len())
  }

  /// Fail with [`Error::NotInitialized`] unless the catalog tables exist.
  pub async fn ensure_initialized(&self) -> Result<()> {
    if self.is_initialized().await? {
      Ok(())
    } else {
      Err(Error::NotInitialized)
    }
  }

  /// Create the catalog tables.
  ///
  /// Fails with [`Error::SchemaExists`] and creates nothing if any catalog
  /// table is already present.
  pub async fn initialize_schema(&self, options: SchemaOptions) -> Result<()> {
    if self.existing_tables().await? > 0 {
      return Err(Error::SchemaExists);
    }

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;
        if options.unique_viewings {
          tx.execute_batch(UNIQUE_VIEWINGS)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    debug!(unique_viewings = options.unique_viewings, "created catalog schema");
    Ok(())
  }

  async fn get_movie(&self, id: i64) -> Result<Option<Movie>> {
    let movie = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {} FROM movie WHERE id = ?1", rows::MOVIE_COLUMNS);
        Ok(conn.query_row(&sql, rusqlite::params![id], rows::movie).optional()?)
      })
      .await?;
    Ok(movie)
  }
}

/// `true` for a violated `UNIQUE` index, as opposed to e.g. a foreign key.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Movies ────────────────────────────────────────────────────────────────

  async fn find_movie_by_title(&self, title: &str) -> Result<Option<Movie>> {
    let title_owned = title.to_owned();

    let movie = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM movie WHERE title = ?1 ORDER BY id LIMIT 1",
          rows::MOVIE_COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![title_owned], rows::movie)
            .optional()?,
        )
      })
      .await?;

    debug!(title, found = movie.is_some(), "find_movie_by_title");
    Ok(movie)
  }

  async fn create_movie(&self, movie: NewMovie) -> Result<Movie> {
    let row = movie.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO movie (title, year, imdb_url, summary) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![row.title, row.year, row.source_url, row.summary],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    let movie = movie.with_id(id);
    debug!(
      id,
      title = %movie.title,
      year = %movie.year,
      source_url = %movie.source_url,
      "saved movie"
    );
    Ok(movie)
  }

  async fn movies_missing_summary(&self) -> Result<Vec<Movie>> {
    let movies = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {} FROM movie WHERE {} ORDER BY id",
          rows::MOVIE_COLUMNS,
          rows::missing_summary_filter()
        );
        let mut stmt = conn.prepare(&sql)?;
        let movies = stmt
          .query_map([], rows::movie)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(movies)
      })
      .await?;
    Ok(movies)
  }

  async fn update_movie_details(
    &self,
    id: i64,
    source_url: &str,
    summary: &str,
  ) -> Result<Movie> {
    let url_owned     = source_url.to_owned();
    let summary_owned = summary.to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE movie SET imdb_url = ?1, summary = ?2 WHERE id = ?3",
          rusqlite::params![url_owned, summary_owned, id],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::MovieNotFound(id));
    }

    debug!(id, "updated movie details");
    self.get_movie(id).await?.ok_or(Error::MovieNotFound(id))
  }

  // ── Theaters ──────────────────────────────────────────────────────────────

  async fn find_theater_by_name(&self, name: &str) -> Result<Option<Theater>> {
    let name_owned = name.to_owned();

    let theater = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM theater WHERE name = ?1 ORDER BY id LIMIT 1",
          rows::THEATER_COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![name_owned], rows::theater)
            .optional()?,
        )
      })
      .await?;

    debug!(name, found = theater.is_some(), "find_theater_by_name");
    Ok(theater)
  }

  async fn create_theater(&self, theater: NewTheater) -> Result<Theater> {
    let row = theater.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO theater (name, longitude, latitude) VALUES (?1, ?2, ?3)",
          rusqlite::params![row.name, row.longitude, row.latitude],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    let theater = theater.with_id(id);
    debug!(
      id,
      name = %theater.name,
      longitude = %theater.longitude,
      latitude = %theater.latitude,
      "saved theater"
    );
    Ok(theater)
  }

  // ── Viewings ──────────────────────────────────────────────────────────────

  async fn create_viewing(&self, viewing: NewViewing) -> Result<Viewing> {
    let row = viewing.clone();

    // `None` signals a unique-index conflict.
    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO viewing (movie, theater, date, score, first_viewing)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            row.movie_id,
            row.theater_id,
            row.date,
            row.score,
            row.first_viewing,
          ],
        );
        match inserted {
          Ok(_) => Ok(Some(conn.last_insert_rowid())),
          Err(e) if is_unique_violation(&e) => Ok(None),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    let Some(id) = id else {
      return Err(Error::DuplicateViewing {
        movie_id:   viewing.movie_id,
        theater_id: viewing.theater_id,
        date:       viewing.date,
      });
    };

    let viewing = viewing.with_id(id);
    debug!(
      id,
      movie = viewing.movie_id,
      theater = viewing.theater_id,
      date = %viewing.date,
      score = %viewing.score,
      first_viewing = viewing.first_viewing,
      "saved viewing"
    );
    Ok(viewing)
  }

  async fn viewing_log(&self) -> Result<Vec<ViewingLogEntry>> {
    let entries = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(rows::VIEWING_LOG_QUERY)?;
        let entries = stmt
          .query_map([], rows::viewing_log_entry)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
      })
      .await?;
    Ok(entries)
  }

  // ── Housekeeping ──────────────────────────────────────────────────────────

  async fn catalog_counts(&self) -> Result<CatalogCounts> {
    let (movies, theaters, viewings): (i64, i64, i64) = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT (SELECT COUNT(*) FROM movie),
                  (SELECT COUNT(*) FROM theater),
                  (SELECT COUNT(*) FROM viewing)",
          [],
          |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )?)
      })
      .await?;

    Ok(CatalogCounts {
      movies:   movies as u64,
      theaters: theaters as u64,
      viewings: viewings as u64,
    })
  }
}
