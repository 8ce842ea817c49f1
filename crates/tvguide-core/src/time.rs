//! Guide time normalisation.
//!
//! XMLTV feeds carry timestamps in several encodings. [`parse_guide_time`]
//! tries them in a fixed order; the first layout that matches wins, so the
//! order of [`LAYOUTS`] is significant.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::{Error, Result};

/// How far before "now" a channel listing starts, so that a programme which
/// is already airing is still returned.
pub const LOOKBACK_HOURS: i64 = 4;

/// [`LOOKBACK_HOURS`] as a [`TimeDelta`].
pub fn lookback() -> TimeDelta { TimeDelta::hours(LOOKBACK_HOURS) }

/// Layouts with a full date and time, in the order they are tried.
///
/// Only the first carries its own offset; the others are read as UTC.
pub const LAYOUTS: [&str; 3] = [
  "%Y%m%d%H%M%S %z",
  "%Y-%m-%d %H:%M:%S",
  "%Y%m%d%H%M%S",
];

/// Parse an XMLTV time string.
///
/// Returns `Ok(None)` for an empty (or blank) string: a missing time is not
/// an error. A bare four digit year is accepted last and maps to January 1st,
/// midnight UTC.
pub fn parse_guide_time(s: &str) -> Result<Option<DateTime<FixedOffset>>> {
  if s.trim().is_empty() {
    return Ok(None);
  }

  let [with_offset, utc_layouts @ ..] = LAYOUTS;

  if let Ok(t) = DateTime::parse_from_str(s, with_offset) {
    return Ok(Some(t));
  }

  for layout in utc_layouts {
    if let Ok(t) = NaiveDateTime::parse_from_str(s, layout) {
      return Ok(Some(t.and_utc().fixed_offset()));
    }
  }

  bare_year(s)
    .map(Some)
    .ok_or_else(|| Error::InvalidTime(s.to_owned()))
}

fn bare_year(s: &str) -> Option<DateTime<FixedOffset>> {
  if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  let year: i32 = s.parse().ok()?;
  let date = NaiveDate::from_ymd_opt(year, 1, 1)?;
  Some(date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

/// The stop time assumed for a programme whose feed gave none: midnight at
/// the end of the start day (UTC).
pub fn default_stop(start: DateTime<Utc>) -> DateTime<Utc> {
  start
    .date_naive()
    .succ_opt()
    .map_or(start, |day| day.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
  use chrono::{Datelike, Timelike};

  use super::*;

  fn utc(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
  }

  #[test]
  fn compact_timestamp_is_utc() {
    let t = parse_guide_time("20181027030000").unwrap().unwrap();
    assert_eq!(t, utc("2018-10-27T03:00:00Z"));
    assert_eq!(t.offset().local_minus_utc(), 0);
  }

  #[test]
  fn explicit_offset_keeps_wall_time() {
    let t = parse_guide_time("20181027030000 +0300").unwrap().unwrap();
    assert_eq!(t.offset().local_minus_utc(), 10_800);
    assert_eq!(t.hour(), 3);
    assert_eq!(t.day(), 27);
    assert_eq!(t, utc("2018-10-27T00:00:00Z"));
  }

  #[test]
  fn spaced_timestamp_is_utc() {
    let t = parse_guide_time("2018-10-27 02:05:00").unwrap().unwrap();
    assert_eq!(t, utc("2018-10-27T02:05:00Z"));
  }

  #[test]
  fn bare_year_is_new_year_midnight() {
    let t = parse_guide_time("2018").unwrap().unwrap();
    assert_eq!(t, utc("2018-01-01T00:00:00Z"));
  }

  #[test]
  fn empty_is_not_an_error() {
    assert!(parse_guide_time("").unwrap().is_none());
    assert!(parse_guide_time("   ").unwrap().is_none());
  }

  #[test]
  fn garbage_names_the_input() {
    for bad in ["tomorrow", "201810", "20181027 0300", "18", "2018-10-27"] {
      let err = parse_guide_time(bad).unwrap_err();
      assert!(err.to_string().contains(bad), "{err}");
    }
  }

  #[test]
  fn default_stop_is_next_midnight() {
    let start = utc("2018-10-27T22:30:00Z").with_timezone(&Utc);
    let stop = default_stop(start);
    assert_eq!(stop, utc("2018-10-28T00:00:00Z").with_timezone(&Utc));

    let midnight = utc("2018-10-27T00:00:00Z").with_timezone(&Utc);
    assert_eq!(default_stop(midnight).day(), 28);
  }

  #[test]
  fn lookback_is_four_hours() {
    assert_eq!(lookback().num_minutes(), 240);
  }
}
