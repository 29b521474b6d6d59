//! SQLite backend for the cinelog catalog.
//!
//! Wraps [`tokio_rusqlite`] so every statement runs on the connection's own
//! thread. Each write is its own implicit transaction and is committed before
//! the call returns.

mod rows;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{SchemaOptions, SqliteStore};
