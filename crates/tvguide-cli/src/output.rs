//! Plain-text rendering of query results.

use chrono::{DateTime, Timelike, Utc};
use tvguide_core::listing::{ProgrammeDescription, ProgrammeEntry};

fn hhmm(t: DateTime<Utc>) -> String { format!("{:02}:{:02}", t.hour(), t.minute()) }

/// One line per entry; the programme airing at `now` is marked with `*`.
pub fn guide_lines(entries: &[ProgrammeEntry], now: DateTime<Utc>) -> Vec<String> {
  entries
    .iter()
    .map(|e| {
      let marker = if e.is_airing(now) { '*' } else { ' ' };
      format!(
        "{marker} {:>6}  {} - {}  {}",
        e.pid,
        hhmm(e.start),
        hhmm(e.stop),
        e.title
      )
    })
    .collect()
}

/// Title, times, then every non-empty part of the description.
pub fn description_lines(d: &ProgrammeDescription, now: DateTime<Utc>) -> Vec<String> {
  let mut lines = vec![d.programme.title.clone(), d.time_description(now)];

  let labelled = [
    ("", d.sub_title.clone()),
    ("", d.description.clone()),
    ("Category: ", d.categories_line()),
    ("Country: ", d.countries_line()),
    ("Director: ", d.directors_line()),
    ("Cast: ", d.actors_line()),
    ("Rating: ", d.ratings_line()),
  ];
  lines.extend(
    labelled
      .into_iter()
      .filter(|(_, value)| !value.trim().is_empty())
      .map(|(label, value)| format!("{label}{value}")),
  );
  lines
}

#[cfg(test)]
mod tests {
  use tvguide_core::listing::Actor;

  use super::*;

  fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
  }

  fn entry(pid: i64, start: &str, stop: &str, title: &str) -> ProgrammeEntry {
    ProgrammeEntry {
      pid,
      start: at(start),
      stop: at(stop),
      title: title.into(),
    }
  }

  #[test]
  fn airing_entry_is_marked() {
    let entries = [
      entry(1, "2018-10-27T03:00:00Z", "2018-10-27T04:00:00Z", "Morning"),
      entry(2, "2018-10-27T04:00:00Z", "2018-10-27T05:00:00Z", "Noon"),
    ];
    let lines = guide_lines(&entries, at("2018-10-27T04:10:00Z"));
    assert_eq!(lines, [
      "       1  03:00 - 04:00  Morning",
      "*      2  04:00 - 05:00  Noon",
    ]);
  }

  #[test]
  fn description_skips_empty_parts() {
    let d = ProgrammeDescription {
      programme:   entry(7, "2018-10-27T20:00:00Z", "2018-10-27T21:00:00Z", "News"),
      sub_title:   String::new(),
      description: "Headlines.".into(),
      categories:  vec![],
      countries:   vec![],
      directors:   vec![],
      actors:      vec![Actor { actor: "Bob".into(), role: "Host".into() }],
      ratings:     vec![],
    };
    assert_eq!(description_lines(&d, at("2018-10-27T10:00:00Z")), [
      "News",
      "20:00 - 21:00 / 60min",
      "Headlines.",
      "Cast: Bob (Host)",
    ]);
  }
}
