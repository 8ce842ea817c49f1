//! The ingestion pipeline: one XMLTV document, one transaction.
//!
//! [`Ingestor`] is a [`GuideVisitor`] holding prepared statements borrowed
//! from the open transaction. Channels and programmes get their public id in
//! two steps: the row is inserted, then its `cid`/`pid` column is patched to
//! the rowid SQLite assigned. Sub-attribute rows follow, one generic insert
//! per [`PROGRAMME_CHILDREN`] entry.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Statement, ToSql, params};
use tvguide_core::{
  record::{Channel, GuideHead, Programme},
  store::{IngestOptions, IngestReport},
  time::parse_guide_time,
};
use tvguide_xmltv::GuideVisitor;

use crate::{
  Error, Result,
  encode::encode_dt,
  schema::PROGRAMME_CHILDREN,
};

// ─── Statements ──────────────────────────────────────────────────────────────

const INSERT_CHANNEL: &str = "INSERT INTO channels (channel_id) VALUES (?1)";
const SET_CID: &str = "UPDATE channels SET cid = ?1 WHERE rowid = ?1";
const INSERT_DISPLAY_NAME: &str =
  "INSERT INTO channel_display_names (cid, lang, display_name) VALUES (?1, ?2, ?3)";
const INSERT_URL: &str = "INSERT INTO channel_urls (cid, url) VALUES (?1, ?2)";

const INSERT_PROGRAMME: &str = "
  INSERT INTO programme (
    channel_id, start, stop, pdc_start, vps_start, show_view, video_plus, clump_idx
  ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SET_PID: &str = "UPDATE programme SET pid = ?1 WHERE rowid = ?1";

const REFRESH_LANG_STAT: &str = "
  DELETE FROM programme_lang_stat;
  INSERT INTO programme_lang_stat (lang, lang_count)
    SELECT lang, COUNT(*) FROM programme_titles GROUP BY lang;";

const DISCARD_STALE_STOPS: &str = "
  UPDATE programme SET stop = NULL
  WHERE stop IS NOT NULL AND CAST(strftime('%Y', stop) AS INTEGER) < ?1";

// ─── Visitor ─────────────────────────────────────────────────────────────────

pub(crate) struct Ingestor<'t> {
  insert_channel:      Statement<'t>,
  set_cid:             Statement<'t>,
  insert_display_name: Statement<'t>,
  insert_url:          Statement<'t>,
  insert_programme:    Statement<'t>,
  set_pid:             Statement<'t>,
  /// One statement per [`PROGRAMME_CHILDREN`] entry, same order.
  insert_children:     Vec<Statement<'t>>,
  report:              IngestReport,
}

impl<'t> Ingestor<'t> {
  pub(crate) fn prepare(conn: &'t Connection) -> Result<Self> {
    let insert_children = PROGRAMME_CHILDREN
      .iter()
      .map(|child| conn.prepare(&child.insert_sql()))
      .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Self {
      insert_channel: conn.prepare(INSERT_CHANNEL)?,
      set_cid: conn.prepare(SET_CID)?,
      insert_display_name: conn.prepare(INSERT_DISPLAY_NAME)?,
      insert_url: conn.prepare(INSERT_URL)?,
      insert_programme: conn.prepare(INSERT_PROGRAMME)?,
      set_pid: conn.prepare(SET_PID)?,
      insert_children,
      report: IngestReport::default(),
    })
  }

  pub(crate) fn finish(self) -> IngestReport { self.report }

  fn insert_sub_attributes(&mut self, pid: i64, programme: &Programme) -> Result<()> {
    for (child, stmt) in PROGRAMME_CHILDREN.iter().zip(&mut self.insert_children) {
      for row in (child.rows)(programme) {
        let mut values: Vec<&dyn ToSql> = Vec::with_capacity(row.len() + 1);
        values.push(&pid);
        values.extend(row.iter().map(|v| v as &dyn ToSql));
        stmt.execute(values.as_slice())?;
      }
    }
    Ok(())
  }
}

impl GuideVisitor for Ingestor<'_> {
  type Error = Error;

  fn on_head(&mut self, head: GuideHead) -> Result<()> {
    self.report.head = Some(head);
    Ok(())
  }

  fn on_channel(&mut self, channel: Channel) -> Result<()> {
    let cid = self.insert_channel.insert(params![channel.id])?;
    self.set_cid.execute(params![cid])?;

    for name in &channel.display_names {
      self
        .insert_display_name
        .execute(params![cid, name.lang, name.value])?;
    }
    for url in &channel.urls {
      self.insert_url.execute(params![cid, url])?;
    }

    self.report.channels += 1;
    Ok(())
  }

  fn on_programme(&mut self, programme: Programme) -> Result<()> {
    let start = parse_guide_time(&programme.start)?
      .map_or(DateTime::<Utc>::UNIX_EPOCH, |t| t.with_timezone(&Utc));
    let stop = parse_guide_time(&programme.stop)?.map(|t| encode_dt(t.with_timezone(&Utc)));

    let pid = self.insert_programme.insert(params![
      programme.channel,
      encode_dt(start),
      stop,
      programme.pdc_start,
      programme.vps_start,
      programme.show_view,
      programme.video_plus,
      programme.clump_idx,
    ])?;
    self.set_pid.execute(params![pid])?;

    self.insert_sub_attributes(pid, &programme)?;

    self.report.programmes += 1;
    Ok(())
  }
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Ingest `document` into `conn` inside a single transaction.
///
/// Any error drops the transaction, which rolls back every row of the run.
pub(crate) fn ingest_document(
  conn: &mut Connection,
  document: &[u8],
  options: &IngestOptions,
) -> Result<IngestReport> {
  let tx = conn.transaction()?;

  let report = {
    let mut ingestor = Ingestor::prepare(&tx)?;
    tvguide_xmltv::parse(document, &mut ingestor)?;
    ingestor.finish()
  };
  tracing::debug!(
    channels = report.channels,
    programmes = report.programmes,
    "guide document parsed"
  );

  tx.execute_batch(REFRESH_LANG_STAT)?;
  tx.execute_batch("ANALYZE")?;

  let discarded = tx.execute(DISCARD_STALE_STOPS, params![options.stop_year_cutoff])?;
  tracing::debug!(
    discarded,
    cutoff = options.stop_year_cutoff,
    "stale stop times discarded"
  );

  tx.commit()?;
  Ok(report)
}
