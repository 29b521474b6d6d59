//! Catalog reconciliation for cinelog.
//!
//! Turns rows of a viewing export into linked catalog records: every row's
//! movie and theater is looked up by natural key and created on a miss, then
//! one viewing is recorded. Movies are filled in from a
//! [`MetadataSource`](cinelog_core::metadata::MetadataSource), falling back
//! to the operator; theaters always come from the operator.
//!
//! The same crate holds the two smaller catalog chores: back-filling missing
//! summaries and rendering the viewing log as journal entries.

mod metadata;
mod pipeline;
mod row;
mod theater;
mod title;

pub mod error;
pub mod journal;
pub mod summaries;

pub use error::{Error, Result};
pub use metadata::{collect_movie_details, resolve_movie};
pub use pipeline::{ImportOptions, ImportReport, Importer, Resolution, RowOutcome, SkippedRow};
pub use row::{ViewingRow, read_rows, read_rows_from_path};
pub use theater::{collect_coordinates, resolve_theater};
pub use title::parse_title_year;

#[cfg(test)]
mod testing;
