//! OMDb client for cinelog.
//!
//! Implements [`cinelog_core::metadata::MetadataSource`] over the OMDb JSON
//! API. Every request carries a timeout; transport failures, HTTP 429 and
//! 5xx answers are retried a bounded number of times with exponential
//! backoff. A well-formed "movie not found" answer is never retried.

mod client;
mod response;
mod retry;

pub mod error;

pub use client::{DEFAULT_BASE_URL, OmdbClient, OmdbConfig};
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
