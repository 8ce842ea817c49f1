//! The `GuideStore` trait and supporting ingestion types.
//!
//! The trait is implemented by storage backends (e.g. `tvguide-store-sqlite`).
//! Callers construct a store explicitly and pass it where it is needed; there
//! is no process-wide instance.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  listing::{ProgrammeDescription, ProgrammeEntry},
  record::GuideHead,
};

// ─── Ingestion parameters ────────────────────────────────────────────────────

/// Parameters for [`GuideStore::ingest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
  /// Stored stop times dated before this year are discarded after ingestion,
  /// so the read-time default applies to them instead. A cutoff equal to
  /// the current year also drops stops from the previous December.
  pub stop_year_cutoff: i32,
}

/// Summary of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
  /// Root element attributes, if the document had a `<tv>` root.
  pub head:       Option<GuideHead>,
  pub channels:   usize,
  pub programmes: usize,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an EPG store backend.
///
/// One ingestion run is expected to finish before queries are issued against
/// its output. Each query is its own read; nothing spans statements.
pub trait GuideStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Parse an XMLTV document and append its channels and programmes.
  ///
  /// All-or-nothing: on any error nothing from this run is kept. Running it
  /// twice without [`clear_channels`](Self::clear_channels) appends
  /// duplicate programmes.
  fn ingest(
    &self,
    document: Vec<u8>,
    options: IngestOptions,
  ) -> impl Future<Output = Result<IngestReport, Self::Error>> + Send + '_;

  /// Delete channel identities, display names and urls. Programme rows are
  /// left untouched.
  fn clear_channels(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// The language most guide titles are written in, or an empty string if
  /// that cannot be determined.
  fn default_language(&self) -> impl Future<Output = String> + Send + '_;

  /// Programmes on `channel_id` starting no earlier than the lookback window
  /// before `as_of`, ordered by start.
  ///
  /// Empty when the channel has no display name in `lang`.
  fn channel_guide<'a>(
    &'a self,
    channel_id: &'a str,
    lang: &'a str,
    as_of: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<ProgrammeEntry>, Self::Error>> + Send + 'a;

  /// Assemble the full description of programme `pid` in `lang`. Returns
  /// `None` if the programme does not exist.
  fn programme_description<'a>(
    &'a self,
    pid: i64,
    lang: &'a str,
  ) -> impl Future<Output = Result<Option<ProgrammeDescription>, Self::Error>>
  + Send
  + 'a;
}
