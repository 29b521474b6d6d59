//! SQL schema for the cinelog catalog.
//!
//! Unlike a `CREATE TABLE IF NOT EXISTS` schema this one is applied exactly
//! once, by an explicit initialise step; a second attempt is an error.

/// Tables that make up an initialised catalog.
pub const TABLES: [&str; 3] = ["theater", "movie", "viewing"];

pub const SCHEMA: &str = "
CREATE TABLE theater (
    id        INTEGER PRIMARY KEY,
    name      TEXT,
    longitude TEXT,         -- text: kept exactly as entered
    latitude  TEXT
);

CREATE TABLE movie (
    id       INTEGER PRIMARY KEY,
    title    TEXT,
    year     TEXT,          -- text: may be a range or 'N/A'
    imdb_url TEXT,
    summary  TEXT           -- 'N/A' when unknown
);

-- No natural key; the same import run twice records viewings twice.
CREATE TABLE viewing (
    id            INTEGER PRIMARY KEY,
    movie         INTEGER REFERENCES movie,
    theater       INTEGER REFERENCES theater,
    date          TEXT,
    score         INTEGER,
    first_viewing INTEGER   -- 0 | 1
);

CREATE INDEX movie_title_idx  ON movie(title);
CREATE INDEX theater_name_idx ON theater(name);

PRAGMA user_version = 1;
";

/// Opt-in natural key for viewings.
pub const UNIQUE_VIEWINGS: &str = "
CREATE UNIQUE INDEX viewing_natural_key ON viewing(movie, theater, date);
";
