//! `cinelog`: import a movie viewing log into a local catalog.
//!
//! # Usage
//!
//! ```
//! cinelog --initialize
//! OMDBAPIKEY=... cinelog --movies viewings.csv
//! cinelog --clean-summaries
//! cinelog --export-journal > entries.jsonl
//! ```

mod settings;
mod terminal;

use std::{
  io::{self, Write},
  path::{Path, PathBuf},
};

use anyhow::{Context as _, bail};
use cinelog_core::store::CatalogStore;
use cinelog_import::{
  ImportOptions, Importer, journal::journal_entries, read_rows_from_path,
  summaries::fill_missing_summaries,
};
use cinelog_omdb::OmdbClient;
use cinelog_store_sqlite::{SchemaOptions, SqliteStore};
use clap::{ArgGroup, Parser};
use settings::Settings;
use terminal::TerminalPrompter;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Import a movie viewing log into a local catalog")]
#[command(group(
  ArgGroup::new("action").args(["initialize", "movies", "clean_summaries", "export_journal"])
))]
struct Cli {
  /// Path to a TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "cinelog.toml")]
  config: PathBuf,

  /// Catalog database file (default: movies.db).
  #[arg(long, value_name = "PATH")]
  database: Option<PathBuf>,

  /// OMDb API key.
  #[arg(long, env = "OMDBAPIKEY", hide_env_values = true)]
  omdb_api_key: Option<String>,

  /// Create the catalog tables and exit.
  #[arg(long)]
  initialize: bool,

  /// With --initialize: refuse a second viewing of a movie at the same
  /// theater on the same date.
  #[arg(long, requires = "initialize")]
  unique_viewings: bool,

  /// CSV export with Title, Theater, Date, Score and New columns.
  #[arg(long, value_name = "PATH")]
  movies: Option<PathBuf>,

  /// With --movies: skip failing rows and report them at the end.
  #[arg(long, requires = "movies")]
  keep_going: bool,

  /// Prompt for summaries of movies stored without one.
  #[arg(long)]
  clean_summaries: bool,

  /// Write every viewing as a JSON journal entry per line to stdout.
  #[arg(long)]
  export_journal: bool,
}

enum Action {
  Initialize,
  Import(PathBuf),
  CleanSummaries,
  ExportJournal,
}

impl Cli {
  fn action(&self) -> Option<Action> {
    if self.initialize {
      Some(Action::Initialize)
    } else if let Some(path) = &self.movies {
      Some(Action::Import(path.clone()))
    } else if self.clean_summaries {
      Some(Action::CleanSummaries)
    } else if self.export_journal {
      Some(Action::ExportJournal)
    } else {
      None
    }
  }

  /// Flags override the file and environment layers.
  fn apply_to(&self, settings: &mut Settings) {
    if let Some(database) = &self.database {
      settings.database_path = database.clone();
    }
    if let Some(key) = &self.omdb_api_key {
      settings.omdb_api_key = Some(key.clone());
    }
    settings.unique_viewings |= self.unique_viewings;
    settings.keep_going |= self.keep_going;
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr; stdout belongs to prompts and exports.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let Some(action) = cli.action() else {
    tracing::debug!("no action requested");
    return Ok(());
  };

  let mut settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
  cli.apply_to(&mut settings);

  execute(action, &settings).await
}

async fn execute(action: Action, settings: &Settings) -> anyhow::Result<()> {
  match action {
    Action::Initialize => {
      with_catalog(settings, async |store, path| initialize(store, settings, path).await).await
    }
    Action::Import(rows) => {
      // Opening the catalog creates its file, so the client is checked first.
      let client =
        OmdbClient::new(settings.omdb_config()).context("failed to configure OMDb client")?;
      with_catalog(settings, async |store, _| import(store, &client, settings, &rows).await).await
    }
    Action::CleanSummaries => {
      with_catalog(settings, async |store, _| clean_summaries(store).await).await
    }
    Action::ExportJournal => {
      with_catalog(settings, async |store, _| export_journal(store).await).await
    }
  }
}

/// Open the catalog, run `f` against it, and close the connection whether or
/// not `f` succeeded.
async fn with_catalog(
  settings: &Settings,
  f: impl AsyncFnOnce(&SqliteStore, &Path) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
  let path = settings.database_path();
  let store = SqliteStore::open(&path)
    .await
    .with_context(|| format!("failed to open catalog at {}", path.display()))?;

  let result = f(&store, &path).await;

  let closed = store.close().await.context("failed to close catalog");
  result.and(closed)
}

// ─── Actions ──────────────────────────────────────────────────────────────────

async fn initialize(store: &SqliteStore, settings: &Settings, path: &Path) -> anyhow::Result<()> {
  store
    .initialize_schema(SchemaOptions {
      unique_viewings: settings.unique_viewings,
    })
    .await
    .with_context(|| format!("failed to initialize {}", path.display()))?;
  info!("initialized the database at {}", path.display());
  Ok(())
}

async fn import(
  store: &SqliteStore,
  client: &OmdbClient,
  settings: &Settings,
  path: &Path,
) -> anyhow::Result<()> {
  // Everything that can be checked up front is, before the first write.
  store.ensure_initialized().await?;
  let rows = read_rows_from_path(path)
    .with_context(|| format!("failed to read {}", path.display()))?;
  info!("importing {} rows from {}", rows.len(), path.display());

  let mut prompter = TerminalPrompter::stdio();
  let report = Importer::new(store, client, &mut prompter)
    .with_options(ImportOptions {
      keep_going: settings.keep_going,
    })
    .import(rows)
    .await?;

  let counts = store.catalog_counts().await?;
  info!(
    movies = counts.movies,
    theaters = counts.theaters,
    viewings = counts.viewings,
    "catalog totals"
  );

  if !report.is_clean() {
    for skipped in &report.skipped {
      warn!("row {} ({:?}) skipped: {}", skipped.row, skipped.title, skipped.reason);
    }
    bail!(
      "{} of {} rows were skipped",
      report.skipped.len(),
      report.rows
    );
  }
  Ok(())
}

async fn clean_summaries(store: &SqliteStore) -> anyhow::Result<()> {
  store.ensure_initialized().await?;
  let mut prompter = TerminalPrompter::stdio();
  let report = fill_missing_summaries(store, &mut prompter).await?;
  info!(updated = report.updated, unchanged = report.unchanged, "summaries reviewed");
  Ok(())
}

async fn export_journal(store: &SqliteStore) -> anyhow::Result<()> {
  store.ensure_initialized().await?;
  let entries = journal_entries(store).await?;

  let mut out = io::stdout().lock();
  for entry in &entries {
    serde_json::to_writer(&mut out, entry).context("failed to encode journal entry")?;
    writeln!(out)?;
  }
  out.flush()?;
  info!("exported {} journal entries", entries.len());
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_flags_is_a_no_op() {
    let cli = Cli::try_parse_from(["cinelog"]).unwrap();
    assert!(cli.action().is_none());
  }

  #[test]
  fn actions_are_mutually_exclusive() {
    assert!(Cli::try_parse_from(["cinelog", "--initialize", "--movies", "a.csv"]).is_err());
    assert!(Cli::try_parse_from(["cinelog", "--clean-summaries", "--export-journal"]).is_err());
  }

  #[test]
  fn modifiers_require_their_action() {
    assert!(Cli::try_parse_from(["cinelog", "--keep-going"]).is_err());
    assert!(Cli::try_parse_from(["cinelog", "--unique-viewings"]).is_err());
    assert!(Cli::try_parse_from(["cinelog", "--initialize", "--unique-viewings"]).is_ok());
  }

  #[test]
  fn flags_override_settings() {
    let cli = Cli::try_parse_from([
      "cinelog",
      "--movies",
      "viewings.csv",
      "--keep-going",
      "--database",
      "/tmp/catalog.db",
      "--omdb-api-key",
      "k3y",
    ])
    .unwrap();
    assert!(matches!(cli.action(), Some(Action::Import(ref p)) if p == Path::new("viewings.csv")));

    let mut settings = Settings::default();
    cli.apply_to(&mut settings);
    assert!(settings.keep_going);
    assert_eq!(settings.database_path, PathBuf::from("/tmp/catalog.db"));
    assert_eq!(settings.omdb_api_key.as_deref(), Some("k3y"));
  }

  #[tokio::test]
  async fn import_without_api_key_leaves_no_catalog_behind() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("movies.db");
    let settings = Settings {
      database_path: catalog.clone(),
      omdb_api_key: None,
      ..Settings::default()
    };

    let err = execute(Action::Import(dir.path().join("viewings.csv")), &settings)
      .await
      .unwrap_err();

    assert!(format!("{err:#}").contains("OMDb"));
    assert!(!catalog.exists());
  }
}
