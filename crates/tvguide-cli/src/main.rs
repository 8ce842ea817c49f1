//! tvguide binary.
//!
//! Reads `tvguide.toml` (or the path given with `--config`), ingests an XMLTV
//! document into a SQLite store, then prints a channel listing or a
//! programme description.
//!
//! ```text
//! tvguide guide.xml --channel bbc1.example --lang en
//! tvguide guide.xml --programme 42 --json
//! ```

mod output;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::Parser;
use settings::GuideConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tvguide_core::store::{GuideStore, IngestOptions};
use tvguide_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Load an XMLTV guide and query it")]
struct Cli {
  /// XMLTV document to ingest.
  guide: PathBuf,

  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "tvguide.toml")]
  config: PathBuf,

  /// Print the listing of this channel id.
  #[arg(long, conflicts_with = "programme")]
  channel: Option<String>,

  /// Print the description of this programme id.
  #[arg(long)]
  programme: Option<i64>,

  /// Language for titles and descriptions.
  #[arg(short, long)]
  lang: Option<String>,

  /// Anchor time for the listing (RFC 3339). Defaults to now.
  #[arg(long)]
  at: Option<DateTime<Utc>>,

  /// Delete previously stored channels before ingesting.
  #[arg(long)]
  clear: bool,

  /// Print results as JSON.
  #[arg(long)]
  json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = GuideConfig::load(&cli.config)
    .with_context(|| format!("failed to read config file {:?}", cli.config))?;

  let store = match cfg.store_path() {
    Some(path) => SqliteStore::open(&path)
      .await
      .with_context(|| format!("failed to open store at {path:?}"))?,
    None => SqliteStore::open_in_memory()
      .await
      .context("failed to open in-memory store")?,
  };

  run(&store, &cli, &cfg).await
}

async fn run<S: GuideStore>(store: &S, cli: &Cli, cfg: &GuideConfig) -> anyhow::Result<()> {
  if cli.clear {
    store
      .clear_channels()
      .await
      .context("failed to clear channels")?;
  }

  let document = tokio::fs::read(&cli.guide)
    .await
    .with_context(|| format!("failed to read guide {:?}", cli.guide))?;

  let options = IngestOptions { stop_year_cutoff: cfg.cutoff_year() };
  let report = store
    .ingest(document, options)
    .await
    .with_context(|| format!("failed to ingest {:?}", cli.guide))?;

  let lang = match cli.lang.as_ref().or(cfg.language.as_ref()) {
    Some(lang) => lang.clone(),
    None => store.default_language().await,
  };
  let now = cli.at.unwrap_or_else(Utc::now);
  tracing::debug!(%lang, %now, "querying guide");

  if let Some(channel) = &cli.channel {
    let entries = store
      .channel_guide(channel, &lang, now)
      .await
      .with_context(|| format!("failed to list channel {channel:?}"))?;
    if cli.json {
      println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
      output::guide_lines(&entries, now)
        .iter()
        .for_each(|line| println!("{line}"));
    }
  } else if let Some(pid) = cli.programme {
    let description = store
      .programme_description(pid, &lang)
      .await
      .with_context(|| format!("failed to describe programme {pid}"))?
      .with_context(|| format!("programme {pid} not found"))?;
    if cli.json {
      println!("{}", serde_json::to_string_pretty(&description)?);
    } else {
      output::description_lines(&description, now)
        .iter()
        .for_each(|line| println!("{line}"));
    }
  } else if cli.json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    println!(
      "{} channels, {} programmes, default language {lang:?}",
      report.channels, report.programmes
    );
  }

  Ok(())
}
