//! Core types and trait definitions for the cinelog movie catalog.
//!
//! This crate is deliberately free of HTTP, terminal and database
//! dependencies. The store, the metadata client and the importer all depend
//! on it.

pub mod metadata;
pub mod movie;
pub mod prompt;
pub mod store;
pub mod theater;
pub mod viewing;
