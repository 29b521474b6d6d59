//! Layered configuration: defaults, then an optional TOML file, then
//! `CINELOG_*` environment variables. Command-line flags are applied last by
//! the caller.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use cinelog_omdb::{DEFAULT_BASE_URL, OmdbConfig};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Catalog file; a leading `~/` is expanded.
  pub database_path:        PathBuf,
  pub omdb_url:             String,
  pub omdb_api_key:         Option<String>,
  pub request_timeout_secs: u64,
  pub max_retries:          u32,
  /// Only consulted by `--initialize`.
  pub unique_viewings:      bool,
  pub keep_going:           bool,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      database_path:        PathBuf::from("movies.db"),
      omdb_url:             DEFAULT_BASE_URL.to_owned(),
      omdb_api_key:         None,
      request_timeout_secs: 10,
      max_retries:          3,
      unique_viewings:      false,
      keep_going:           false,
    }
  }
}

impl Settings {
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("CINELOG"))
      .build()?
      .try_deserialize()
  }

  pub fn database_path(&self) -> PathBuf { expand_tilde(&self.database_path) }

  pub fn omdb_config(&self) -> OmdbConfig {
    let mut omdb = OmdbConfig::new(self.omdb_api_key.clone().unwrap_or_default());
    omdb.base_url = self.omdb_url.clone();
    omdb.timeout = Duration::from_secs(self.request_timeout_secs);
    omdb.max_retries = self.max_retries;
    omdb
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
