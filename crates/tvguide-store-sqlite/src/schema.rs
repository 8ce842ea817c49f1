//! SQL schema for the tvguide SQLite store.
//!
//! The fixed tables (channels, programme core, language statistics) are
//! plain DDL. The per-programme sub-attribute tables are described once in
//! [`PROGRAMME_CHILDREN`]; both their DDL and their insert statements are
//! generated from that table, so adding an attribute is a one-line change.

use tvguide_core::record::{Icon, LangText, Programme, Rating};

/// Fixed schema DDL; idempotent thanks to `CREATE … IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- cid is patched to the rowid right after insert.
CREATE TABLE IF NOT EXISTS channels (
    cid         INTEGER,
    channel_id  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS channel_display_names (
    cid           INTEGER NOT NULL REFERENCES channels(cid),
    lang          TEXT NOT NULL,
    display_name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS channel_urls (
    cid  INTEGER NOT NULL REFERENCES channels(cid),
    url  TEXT NOT NULL
);

-- pid is patched to the rowid right after insert.
-- start/stop are UTC, 'YYYY-MM-DD HH:MM:SS'; a NULL stop is defaulted on read.
CREATE TABLE IF NOT EXISTS programme (
    pid         INTEGER,
    channel_id  TEXT NOT NULL,
    start       TEXT NOT NULL,
    stop        TEXT,
    pdc_start   TEXT NOT NULL DEFAULT '',
    vps_start   TEXT NOT NULL DEFAULT '',
    show_view   TEXT NOT NULL DEFAULT '',
    video_plus  TEXT NOT NULL DEFAULT '',
    clump_idx   TEXT NOT NULL DEFAULT ''
);

-- Title count per language, recomputed after every ingestion run.
CREATE TABLE IF NOT EXISTS programme_lang_stat (
    lang        TEXT NOT NULL,
    lang_count  INTEGER NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS channels_cid_idx      ON channels(cid);
CREATE INDEX IF NOT EXISTS channels_channel_id_idx      ON channels(channel_id);
CREATE INDEX IF NOT EXISTS channel_display_names_idx    ON channel_display_names(cid, lang);
CREATE INDEX IF NOT EXISTS channel_urls_cid_idx         ON channel_urls(cid);
CREATE UNIQUE INDEX IF NOT EXISTS programme_pid_idx     ON programme(pid);
CREATE INDEX IF NOT EXISTS programme_channel_start_idx  ON programme(channel_id, start);
";

/// Secondary indexes on child tables, run after their DDL.
pub const CHILD_INDEXES: &str = "
CREATE INDEX IF NOT EXISTS programme_titles_lang_idx       ON programme_titles(lang);
CREATE INDEX IF NOT EXISTS programme_subtitles_type_idx    ON programme_subtitles(type);
CREATE INDEX IF NOT EXISTS programme_rating_system_idx     ON programme_rating(system);
CREATE INDEX IF NOT EXISTS programme_star_rating_system_idx ON programme_star_rating(system);
";

// ─── Sub-attribute tables ────────────────────────────────────────────────────

/// Column values for the rows of one child table, `pid` excluded.
pub type Rows<'a> = Vec<Vec<&'a str>>;

/// One per-programme sub-attribute table.
///
/// Every table starts with `pid INTEGER NOT NULL REFERENCES programme(pid)`
/// followed by `columns`, all `TEXT NOT NULL`. `rows` extracts the values to
/// insert from a decoded programme; an absent sub-attribute yields no rows.
#[derive(Clone, Copy)]
pub struct ChildTable {
  pub table:   &'static str,
  pub columns: &'static [&'static str],
  pub rows:    for<'p> fn(&'p Programme) -> Rows<'p>,
}

impl ChildTable {
  pub fn ddl(&self) -> String {
    let columns: String = self
      .columns
      .iter()
      .map(|c| format!(",\n    {c} TEXT NOT NULL"))
      .collect();
    format!(
      "CREATE TABLE IF NOT EXISTS {table} (\n    pid INTEGER NOT NULL REFERENCES programme(pid){columns}\n);\n\
       CREATE INDEX IF NOT EXISTS {table}_pid_idx ON {table}(pid);\n",
      table = self.table,
    )
  }

  pub fn insert_sql(&self) -> String {
    let placeholders: Vec<String> =
      (1..=self.columns.len() + 1).map(|i| format!("?{i}")).collect();
    format!(
      "INSERT INTO {} (pid, {}) VALUES ({})",
      self.table,
      self.columns.join(", "),
      placeholders.join(", "),
    )
  }
}

/// The full DDL: fixed tables, then one table per [`PROGRAMME_CHILDREN`]
/// entry, then [`CHILD_INDEXES`].
pub fn schema() -> String {
  let mut ddl = String::from(SCHEMA);
  for child in PROGRAMME_CHILDREN {
    ddl.push_str(&child.ddl());
  }
  ddl.push_str(CHILD_INDEXES);
  ddl
}

fn lang_text(items: &[LangText]) -> Rows<'_> {
  items
    .iter()
    .map(|t| vec![t.lang.as_str(), t.value.as_str()])
    .collect()
}

fn names(items: &[String]) -> Rows<'_> {
  items.iter().map(|n| vec![n.as_str()]).collect()
}

fn opt(value: &Option<String>) -> &str { value.as_deref().unwrap_or("") }

/// Ratings keep their first icon only.
fn ratings(items: &[Rating]) -> Rows<'_> {
  items
    .iter()
    .map(|r| {
      let icon = r.icons.first().map(|i: &Icon| (i.src.as_str(), i.width.as_str(), i.height.as_str()));
      let (src, width, height) = icon.unwrap_or(("", "", ""));
      vec![r.system.as_str(), opt(&r.value), src, width, height]
    })
    .collect()
}

pub static PROGRAMME_CHILDREN: &[ChildTable] = &[
  ChildTable {
    table:   "programme_titles",
    columns: &["lang", "title"],
    rows:    |p| lang_text(&p.titles),
  },
  ChildTable {
    table:   "programme_sub_titles",
    columns: &["lang", "sub_title"],
    rows:    |p| lang_text(&p.sub_titles),
  },
  ChildTable {
    table:   "programme_desc",
    columns: &["lang", "description"],
    rows:    |p| lang_text(&p.descriptions),
  },
  ChildTable {
    table:   "programme_dates",
    columns: &["date"],
    rows:    |p| names(&p.dates),
  },
  ChildTable {
    table:   "programme_categories",
    columns: &["lang", "category"],
    rows:    |p| lang_text(&p.categories),
  },
  ChildTable {
    table:   "programme_keywords",
    columns: &["lang", "keyword"],
    rows:    |p| lang_text(&p.keywords),
  },
  ChildTable {
    table:   "programme_languages",
    columns: &["lang", "language"],
    rows:    |p| lang_text(&p.languages),
  },
  ChildTable {
    table:   "programme_original_languages",
    columns: &["lang", "language"],
    rows:    |p| lang_text(&p.original_languages),
  },
  ChildTable {
    table:   "programme_length",
    columns: &["value", "units"],
    rows:    |p| {
      p.length
        .iter()
        .map(|l| vec![l.value.as_str(), l.units.as_str()])
        .collect()
    },
  },
  ChildTable {
    table:   "programme_icon",
    columns: &["src", "width", "height"],
    rows:    |p| {
      p.icons
        .iter()
        .map(|i| vec![i.src.as_str(), i.width.as_str(), i.height.as_str()])
        .collect()
    },
  },
  ChildTable {
    table:   "programme_countries",
    columns: &["lang", "country"],
    rows:    |p| lang_text(&p.countries),
  },
  ChildTable {
    table:   "programme_episode_num",
    columns: &["system", "episode_num"],
    rows:    |p| {
      p.episode_nums
        .iter()
        .map(|e| vec![e.system.as_str(), e.value.as_str()])
        .collect()
    },
  },
  ChildTable {
    table:   "programme_video",
    columns: &["present", "colour", "aspect", "quality"],
    rows:    |p| {
      p.video
        .iter()
        .map(|v| vec![opt(&v.present), opt(&v.colour), opt(&v.aspect), opt(&v.quality)])
        .collect()
    },
  },
  ChildTable {
    table:   "programme_audio",
    columns: &["present", "stereo"],
    rows:    |p| {
      p.audio
        .iter()
        .map(|a| vec![opt(&a.present), opt(&a.stereo)])
        .collect()
    },
  },
  ChildTable {
    table:   "programme_previously_shown",
    columns: &["start", "channel"],
    rows:    |p| {
      p.previously_shown
        .iter()
        .map(|s| vec![s.start.as_str(), s.channel.as_str()])
        .collect()
    },
  },
  ChildTable {
    table:   "programme_premiere",
    columns: &["lang", "premiere"],
    rows:    |p| lang_text(&p.premiere),
  },
  ChildTable {
    table:   "programme_last_chance",
    columns: &["lang", "last_chance"],
    rows:    |p| lang_text(&p.last_chance),
  },
  // One row per subtitle language; a `<subtitles>` without languages still
  // records its type.
  ChildTable {
    table:   "programme_subtitles",
    columns: &["type", "lang", "language"],
    rows:    |p| {
      p.subtitles
        .iter()
        .flat_map(|s| {
          if s.languages.is_empty() {
            vec![vec![s.kind.as_str(), "", ""]]
          } else {
            s.languages
              .iter()
              .map(|l| vec![s.kind.as_str(), l.lang.as_str(), l.value.as_str()])
              .collect()
          }
        })
        .collect()
    },
  },
  ChildTable {
    table:   "programme_rating",
    columns: &["system", "value", "src", "width", "height"],
    rows:    |p| ratings(&p.ratings),
  },
  ChildTable {
    table:   "programme_star_rating",
    columns: &["system", "value", "src", "width", "height"],
    rows:    |p| ratings(&p.star_ratings),
  },
  ChildTable {
    table:   "programme_review",
    columns: &["type", "source", "reviewer", "lang", "value"],
    rows:    |p| {
      p.reviews
        .iter()
        .map(|r| {
          vec![
            r.kind.as_str(),
            r.source.as_str(),
            r.reviewer.as_str(),
            r.lang.as_str(),
            r.value.as_str(),
          ]
        })
        .collect()
    },
  },
  // ── Credits ───────────────────────────────────────────────────────────
  ChildTable {
    table:   "programme_directors",
    columns: &["director"],
    rows:    |p| names(&p.credits.directors),
  },
  ChildTable {
    table:   "programme_actors",
    columns: &["actor", "role"],
    rows:    |p| {
      p.credits
        .actors
        .iter()
        .map(|a| vec![a.name.as_str(), a.role.as_str()])
        .collect()
    },
  },
  ChildTable {
    table:   "programme_writers",
    columns: &["writer"],
    rows:    |p| names(&p.credits.writers),
  },
  ChildTable {
    table:   "programme_adapters",
    columns: &["adapter"],
    rows:    |p| names(&p.credits.adapters),
  },
  ChildTable {
    table:   "programme_producers",
    columns: &["producer"],
    rows:    |p| names(&p.credits.producers),
  },
  ChildTable {
    table:   "programme_composers",
    columns: &["composer"],
    rows:    |p| names(&p.credits.composers),
  },
  ChildTable {
    table:   "programme_editors",
    columns: &["editor"],
    rows:    |p| names(&p.credits.editors),
  },
  ChildTable {
    table:   "programme_presenters",
    columns: &["presenter"],
    rows:    |p| names(&p.credits.presenters),
  },
  ChildTable {
    table:   "programme_commentators",
    columns: &["commentator"],
    rows:    |p| names(&p.credits.commentators),
  },
  ChildTable {
    table:   "programme_guests",
    columns: &["guest"],
    rows:    |p| names(&p.credits.guests),
  },
];
