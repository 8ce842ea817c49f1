//! [`SqliteStore`], the SQLite implementation of [`GuideStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use tvguide_core::{
  listing::{Actor, ProgrammeDescription, ProgrammeEntry, Rating},
  store::{GuideStore, IngestOptions, IngestReport},
  time::lookback,
};

use crate::{
  Result,
  encode::{RawDescription, RawProgrammeEntry, encode_dt},
  ingest::ingest_document,
  schema::schema,
};

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Title of `p.pid` in language `?2`, else its first title, else empty.
const TITLE_IN_LANG: &str = "
  COALESCE(
    (SELECT t.title FROM programme_titles AS t
      WHERE t.pid = p.pid AND t.lang = ?2 ORDER BY t.rowid LIMIT 1),
    (SELECT t.title FROM programme_titles AS t
      WHERE t.pid = p.pid ORDER BY t.rowid LIMIT 1),
    '')";

fn channel_guide_sql() -> String {
  format!(
    "SELECT p.pid, p.start, p.stop, {TITLE_IN_LANG}
     FROM programme AS p
     WHERE p.channel_id = ?1
       AND EXISTS (
         SELECT 1 FROM channels AS c
           INNER JOIN channel_display_names AS cdn ON cdn.cid = c.cid
         WHERE c.channel_id = p.channel_id AND cdn.lang = ?2)
       AND p.start >= ?3
     ORDER BY p.start, p.pid"
  )
}

fn programme_description_sql() -> String {
  format!(
    "SELECT p.pid, p.start, p.stop, {TITLE_IN_LANG},
       COALESCE(
         (SELECT s.sub_title FROM programme_sub_titles AS s
           WHERE s.pid = p.pid AND s.lang = ?2 ORDER BY s.rowid LIMIT 1),
         ''),
       COALESCE(
         (SELECT d.description FROM programme_desc AS d
           WHERE d.pid = p.pid AND d.lang = ?2 ORDER BY d.rowid LIMIT 1),
         '')
     FROM programme AS p
     WHERE p.pid = ?1"
  )
}

const SELECT_DEFAULT_LANGUAGE: &str =
  "SELECT lang FROM programme_lang_stat ORDER BY lang_count DESC, lang LIMIT 1";

const SELECT_CATEGORIES: &str =
  "SELECT category FROM programme_categories WHERE pid = ?1 AND lang = ?2 ORDER BY rowid";
const SELECT_COUNTRIES: &str =
  "SELECT country FROM programme_countries WHERE pid = ?1 AND lang = ?2 ORDER BY rowid";
const SELECT_DIRECTORS: &str =
  "SELECT director FROM programme_directors WHERE pid = ?1 ORDER BY rowid";
const SELECT_ACTORS: &str =
  "SELECT actor, role FROM programme_actors WHERE pid = ?1 ORDER BY rowid";
const SELECT_RATINGS: &str =
  "SELECT system, value FROM programme_rating WHERE pid = ?1 ORDER BY rowid";

// ─── Store ───────────────────────────────────────────────────────────────────

/// An EPG store backed by a single SQLite database.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store; useful for testing and one-shot lookups.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let ddl = schema();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&ddl)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a single-column text query for programme `pid`.
  async fn names(&self, sql: &'static str, pid: i64, lang: Option<&str>) -> Result<Vec<String>> {
    let lang = lang.map(str::to_owned);
    let names = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = match lang {
          Some(lang) => stmt
            .query_map(rusqlite::params![pid, lang], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?,
          None => stmt
            .query_map(rusqlite::params![pid], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?,
        };
        Ok(rows)
      })
      .await?;
    Ok(names)
  }

  // ── Description parts ─────────────────────────────────────────────────────

  /// Categories of programme `pid` written in `lang`.
  pub async fn programme_categories(&self, pid: i64, lang: &str) -> Result<Vec<String>> {
    self.names(SELECT_CATEGORIES, pid, Some(lang)).await
  }

  /// Countries of programme `pid` written in `lang`.
  pub async fn programme_countries(&self, pid: i64, lang: &str) -> Result<Vec<String>> {
    self.names(SELECT_COUNTRIES, pid, Some(lang)).await
  }

  pub async fn programme_directors(&self, pid: i64) -> Result<Vec<String>> {
    self.names(SELECT_DIRECTORS, pid, None).await
  }

  pub async fn programme_actors(&self, pid: i64) -> Result<Vec<Actor>> {
    let actors = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(SELECT_ACTORS)?;
        let rows = stmt
          .query_map(rusqlite::params![pid], |row| {
            Ok(Actor {
              actor: row.get(0)?,
              role:  row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(actors)
  }

  pub async fn programme_ratings(&self, pid: i64) -> Result<Vec<Rating>> {
    let ratings = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(SELECT_RATINGS)?;
        let rows = stmt
          .query_map(rusqlite::params![pid], |row| {
            Ok(Rating {
              system: row.get(0)?,
              value:  row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(ratings)
  }

  async fn description_core(&self, pid: i64, lang: &str) -> Result<Option<RawDescription>> {
    let lang = lang.to_owned();
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &programme_description_sql(),
              rusqlite::params![pid, lang],
              |row| {
                Ok(RawDescription {
                  entry:       RawProgrammeEntry::from_row(row)?,
                  sub_title:   row.get(4)?,
                  description: row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }
}

// ─── GuideStore impl ─────────────────────────────────────────────────────────

impl GuideStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn ingest(&self, document: Vec<u8>, options: IngestOptions) -> Result<IngestReport> {
    let bytes = document.len();
    let report = self
      .conn
      .call(move |conn| Ok(ingest_document(conn, &document, &options)))
      .await??;

    tracing::info!(
      bytes,
      channels = report.channels,
      programmes = report.programmes,
      generator = report.head.as_ref().map(|h| h.generator_info_name.as_str()),
      "guide ingested"
    );
    Ok(report)
  }

  async fn clear_channels(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(
          "DELETE FROM channel_display_names;
           DELETE FROM channel_urls;
           DELETE FROM channels;",
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    tracing::debug!("channel tables cleared");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn default_language(&self) -> String {
    let result = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(SELECT_DEFAULT_LANGUAGE, [], |row| row.get::<_, String>(0))
            .optional()?,
        )
      })
      .await;

    match result {
      Ok(lang) => lang.unwrap_or_default(),
      Err(e) => {
        tracing::warn!(error = %e, "default language unavailable");
        String::new()
      }
    }
  }

  async fn channel_guide<'a>(
    &'a self,
    channel_id: &'a str,
    lang: &'a str,
    as_of: DateTime<Utc>,
  ) -> Result<Vec<ProgrammeEntry>> {
    let channel_id = channel_id.to_owned();
    let lang = lang.to_owned();
    // Anchors near the start of time clamp instead of overflowing.
    let from = as_of
      .checked_sub_signed(lookback())
      .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let from = encode_dt(from);

    let raws: Vec<RawProgrammeEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&channel_guide_sql())?;
        let rows = stmt
          .query_map(
            rusqlite::params![channel_id, lang, from],
            RawProgrammeEntry::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProgrammeEntry::into_entry).collect()
  }

  async fn programme_description<'a>(
    &'a self,
    pid: i64,
    lang: &'a str,
  ) -> Result<Option<ProgrammeDescription>> {
    let Some(core) = self.description_core(pid, lang).await? else {
      return Ok(None);
    };

    let (categories, countries, directors, actors, ratings) = tokio::try_join!(
      self.programme_categories(pid, lang),
      self.programme_countries(pid, lang),
      self.programme_directors(pid),
      self.programme_actors(pid),
      self.programme_ratings(pid),
    )?;

    core
      .into_description(categories, countries, directors, actors, ratings)
      .map(Some)
  }
}
