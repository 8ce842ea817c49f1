//! Runtime settings for the `tvguide` binary.
//!
//! Read from an optional TOML file, then overridden by `TVGUIDE_*`
//! environment variables (`TVGUIDE_STORE_PATH`, `TVGUIDE_LANGUAGE`,
//! `TVGUIDE_STOP_YEAR_CUTOFF`).

use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use config::{ConfigError, Source};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
  /// SQLite file to ingest into. In-memory when unset.
  pub store_path:       Option<PathBuf>,
  /// Language for titles and descriptions. The guide's most common title
  /// language when unset.
  pub language:         Option<String>,
  /// Stop times dated before this year are discarded. Current year when
  /// unset, so early in January a guide's late-December stops are dropped
  /// and those programmes end at the following midnight instead. Set it to
  /// last year to keep them.
  pub stop_year_cutoff: Option<i32>,
}

impl GuideConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::build(config::File::from(path).required(false))
  }

  fn build<S>(file: S) -> Result<Self, ConfigError>
  where
    S: Source + Send + Sync + 'static,
  {
    config::Config::builder()
      .add_source(file)
      .add_source(config::Environment::with_prefix("TVGUIDE"))
      .build()?
      .try_deserialize()
  }

  /// The configured cutoff, else the current UTC year.
  pub fn cutoff_year(&self) -> i32 {
    self.stop_year_cutoff.unwrap_or_else(|| Utc::now().year())
  }

  /// The store path with a leading `~` expanded to the home directory.
  pub fn store_path(&self) -> Option<PathBuf> {
    self.store_path.as_deref().map(expand_tilde)
  }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
