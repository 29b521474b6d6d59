//! The `CatalogStore` trait.
//!
//! Implemented by storage backends (e.g. `cinelog-store-sqlite`). The
//! importer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  movie::{Movie, NewMovie},
  theater::{NewTheater, Theater},
  viewing::{CatalogCounts, NewViewing, Viewing, ViewingLogEntry},
};

/// Abstraction over the catalog of movies, theaters and viewings.
///
/// Every create operation commits before it returns, so a lookup issued
/// afterwards on the same store observes the new row. There is no batch
/// transaction spanning several calls.
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Movies ────────────────────────────────────────────────────────────

  /// Exact-match lookup by title. Returns the first row when several share
  /// a title.
  fn find_movie_by_title(
    &self,
    title: &str,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send;

  /// Insert a movie and return it with its assigned id.
  fn create_movie(
    &self,
    movie: NewMovie,
  ) -> impl Future<Output = Result<Movie, Self::Error>> + Send;

  /// Movies still carrying the missing-summary sentinel.
  fn movies_missing_summary(
    &self,
  ) -> impl Future<Output = Result<Vec<Movie>, Self::Error>> + Send;

  /// Replace the source URL and summary of an existing movie.
  fn update_movie_details(
    &self,
    id: i64,
    source_url: &str,
    summary: &str,
  ) -> impl Future<Output = Result<Movie, Self::Error>> + Send;

  // ── Theaters ──────────────────────────────────────────────────────────

  /// Exact-match lookup by name.
  fn find_theater_by_name(
    &self,
    name: &str,
  ) -> impl Future<Output = Result<Option<Theater>, Self::Error>> + Send;

  fn create_theater(
    &self,
    theater: NewTheater,
  ) -> impl Future<Output = Result<Theater, Self::Error>> + Send;

  // ── Viewings ──────────────────────────────────────────────────────────

  /// Insert a viewing. Neither the date format nor the score range is
  /// checked.
  fn create_viewing(
    &self,
    viewing: NewViewing,
  ) -> impl Future<Output = Result<Viewing, Self::Error>> + Send;

  /// All viewings joined with their movie and theater, in insertion order.
  fn viewing_log(
    &self,
  ) -> impl Future<Output = Result<Vec<ViewingLogEntry>, Self::Error>> + Send;

  // ── Housekeeping ──────────────────────────────────────────────────────

  fn catalog_counts(
    &self,
  ) -> impl Future<Output = Result<CatalogCounts, Self::Error>> + Send;
}
