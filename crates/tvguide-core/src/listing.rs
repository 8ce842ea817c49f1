//! Read models returned by guide queries.
//!
//! These are never stored as such; they are assembled on read from the
//! normalised tables.

use std::fmt;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

// ─── Channel listing ─────────────────────────────────────────────────────────

/// One line of a channel listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammeEntry {
  /// Public id of the programme; pass it to a description query.
  pub pid:   i64,
  pub start: DateTime<Utc>,
  /// The feed's stop time, or the next midnight after `start` if it had none.
  pub stop:  DateTime<Utc>,
  pub title: String,
}

impl ProgrammeEntry {
  /// Whether `now` falls within `[start, stop)`.
  pub fn is_airing(&self, now: DateTime<Utc>) -> bool {
    now >= self.start && now < self.stop
  }
}

// ─── Credits and ratings ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
  pub actor: String,
  pub role:  String,
}

impl fmt::Display for Actor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let actor = self.actor.trim();
    let role = self.role.trim();
    match (actor.is_empty(), role.is_empty()) {
      (true, _) => Ok(()),
      (false, true) => f.write_str(actor),
      (false, false) => write!(f, "{actor} ({role})"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
  pub system: String,
  pub value:  String,
}

impl fmt::Display for Rating {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let value = self.value.trim();
    let system = self.system.trim();
    match (value.is_empty(), system.is_empty()) {
      (true, _) => Ok(()),
      (false, true) => f.write_str(value),
      (false, false) => write!(f, "{value} ({system})"),
    }
  }
}

// ─── Full description ────────────────────────────────────────────────────────

/// Everything known about one programme, in one language.
///
/// Missing sub-attributes are empty strings or empty lists; they never make
/// the description itself unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammeDescription {
  #[serde(flatten)]
  pub programme:   ProgrammeEntry,
  pub sub_title:   String,
  pub description: String,
  pub categories:  Vec<String>,
  pub countries:   Vec<String>,
  pub directors:   Vec<String>,
  pub actors:      Vec<Actor>,
  pub ratings:     Vec<Rating>,
}

impl ProgrammeDescription {
  /// `HH:MM - HH:MM / 90min`, with `/ +25min` appended while the programme
  /// is airing at `now`.
  pub fn time_description(&self, now: DateTime<Utc>) -> String {
    let p = &self.programme;
    let span = format!(
      "{:02}:{:02} - {:02}:{:02} / {}min",
      p.start.hour(),
      p.start.minute(),
      p.stop.hour(),
      p.stop.minute(),
      (p.stop - p.start).num_minutes(),
    );

    if p.is_airing(now) {
      format!("{span} / +{}min", (p.stop - now).num_minutes())
    } else {
      span
    }
  }

  pub fn categories_line(&self) -> String { self.categories.join(", ") }

  pub fn countries_line(&self) -> String { self.countries.join(", ") }

  pub fn directors_line(&self) -> String { self.directors.join(", ") }

  pub fn actors_line(&self) -> String { join_displayed(&self.actors) }

  pub fn ratings_line(&self) -> String { join_displayed(&self.ratings) }
}

fn join_displayed<T: fmt::Display>(items: &[T]) -> String {
  items
    .iter()
    .map(ToString::to_string)
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}
