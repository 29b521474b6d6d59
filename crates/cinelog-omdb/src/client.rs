//! [`OmdbClient`]: the OMDb implementation of [`MetadataSource`].

use std::time::Duration;

use cinelog_core::metadata::{MetadataMatch, MetadataSource};
use reqwest::Client;
use tracing::{debug, warn};

use crate::{Error, Result, response::OmdbResponse, retry::backoff_delay};

pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// Connection and retry settings for the OMDb API.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
  pub base_url:     String,
  pub api_key:      String,
  /// Applies to each attempt separately.
  pub timeout:      Duration,
  /// Extra attempts after the first one fails transiently.
  pub max_retries:  u32,
  pub backoff_base: Duration,
}

impl OmdbConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      base_url:     DEFAULT_BASE_URL.to_owned(),
      api_key:      api_key.into(),
      timeout:      Duration::from_secs(10),
      max_retries:  3,
      backoff_base: Duration::from_millis(500),
    }
  }
}

/// Async HTTP client for OMDb title lookups.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct OmdbClient {
  client: Client,
  config: OmdbConfig,
}

impl OmdbClient {
  /// Build a client. Fails fast on an empty API key rather than sending
  /// unauthenticated requests.
  pub fn new(config: OmdbConfig) -> Result<Self> {
    if config.api_key.trim().is_empty() {
      return Err(Error::MissingApiKey);
    }
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client, config })
  }

  /// One request, no retries.
  async fn fetch(&self, title: &str, year: Option<&str>) -> Result<OmdbResponse> {
    let mut query = vec![("apikey", self.config.api_key.as_str()), ("t", title)];
    if let Some(year) = year {
      query.push(("y", year));
    }

    // `without_url` keeps the API key out of error messages and logs.
    let resp = self
      .client
      .get(&self.config.base_url)
      .query(&query)
      .send()
      .await
      .map_err(|e| Error::Transport(e.without_url()))?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status(status));
    }

    let body = resp
      .bytes()
      .await
      .map_err(|e| Error::Transport(e.without_url()))?;
    Ok(serde_json::from_slice(&body)?)
  }
}

impl MetadataSource for OmdbClient {
  type Error = Error;

  async fn lookup(&self, title: &str, year: Option<&str>) -> Result<Option<MetadataMatch>> {
    debug!(title, year, "querying OMDb");

    let mut attempt = 0;
    loop {
      match self.fetch(title, year).await {
        Ok(resp) => return resp.into_match(),
        Err(e) if e.is_transient() && attempt < self.config.max_retries => {
          let wait = backoff_delay(attempt, self.config.backoff_base);
          warn!(
            "OMDb lookup for {title:?} failed (attempt {}): {e}; retrying in {wait:?}",
            attempt + 1
          );
          tokio::time::sleep(wait).await;
          attempt += 1;
        }
        Err(e) if e.is_transient() => {
          return Err(Error::RetriesExhausted {
            attempts: attempt + 1,
            last:     Box::new(e),
          });
        }
        Err(e) => return Err(e),
      }
    }
  }
}
