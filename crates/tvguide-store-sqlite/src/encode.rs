//! Conversions between guide read models and the plain-text representations
//! stored in SQLite columns.
//!
//! Instants are stored as UTC `YYYY-MM-DD HH:MM:SS` text, which sorts in time
//! order and is understood by SQLite's own date functions.

use chrono::{DateTime, NaiveDateTime, Utc};
use tvguide_core::{
  listing::{Actor, ProgrammeDescription, ProgrammeEntry, Rating},
  time::default_stop,
};

use crate::{Error, Result};

pub const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.format(DT_FORMAT).to_string() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  NaiveDateTime::parse_from_str(s, DT_FORMAT)
    .map(|dt| dt.and_utc())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `programme` row as read from SQLite, before decoding.
pub struct RawProgrammeEntry {
  pub pid:   i64,
  pub start: String,
  pub stop:  Option<String>,
  pub title: String,
}

impl RawProgrammeEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      pid:   row.get(0)?,
      start: row.get(1)?,
      stop:  row.get(2)?,
      title: row.get(3)?,
    })
  }

  /// A missing stop becomes the next midnight after start.
  pub fn into_entry(self) -> Result<ProgrammeEntry> {
    let start = decode_dt(&self.start)?;
    let stop = match self.stop {
      Some(s) => decode_dt(&s)?,
      None => default_stop(start),
    };
    Ok(ProgrammeEntry {
      pid: self.pid,
      start,
      stop,
      title: self.title,
    })
  }
}

/// The core fields of a programme description.
pub struct RawDescription {
  pub entry:       RawProgrammeEntry,
  pub sub_title:   String,
  pub description: String,
}

impl RawDescription {
  pub fn into_description(
    self,
    categories: Vec<String>,
    countries: Vec<String>,
    directors: Vec<String>,
    actors: Vec<Actor>,
    ratings: Vec<Rating>,
  ) -> Result<ProgrammeDescription> {
    Ok(ProgrammeDescription {
      programme: self.entry.into_entry()?,
      sub_title: self.sub_title,
      description: self.description,
      categories,
      countries,
      directors,
      actors,
      ratings,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stored_instants_sort_as_text() {
    let early = decode_dt("2018-10-27 03:00:00").unwrap();
    let late = decode_dt("2018-10-27 23:59:59").unwrap();
    assert!(encode_dt(early) < encode_dt(late));
    assert_eq!(encode_dt(early), "2018-10-27 03:00:00");
  }

  #[test]
  fn decode_rejects_other_layouts() {
    assert!(matches!(
      decode_dt("2018-10-27T03:00:00Z"),
      Err(Error::DateParse(_))
    ));
  }

  #[test]
  fn missing_stop_is_defaulted() {
    let raw = RawProgrammeEntry {
      pid:   1,
      start: "2018-10-27 22:00:00".into(),
      stop:  None,
      title: String::new(),
    };
    let entry = raw.into_entry().unwrap();
    assert_eq!(encode_dt(entry.stop), "2018-10-28 00:00:00");
  }
}
