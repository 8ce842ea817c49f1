//! XMLTV records: the decoded form of one `<tv>`, `<channel>` or
//! `<programme>` element.
//!
//! Field names follow the XMLTV DTD. Attributes are renamed with an `@`
//! prefix and character data with `$text`, which is the convention the
//! quick-xml deserializer in `tvguide-xmltv` expects. Every field defaults,
//! so an element that omits an optional part still decodes.

use serde::{Deserialize, Serialize};

// ─── Header ──────────────────────────────────────────────────────────────────

/// Attributes of the root `<tv>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideHead {
  pub generator_info_name: String,
  pub generator_info_url:  String,
  pub source_info_url:     String,
  pub source_info_name:    String,
  pub source_data_url:     String,
}

// ─── Shared shapes ───────────────────────────────────────────────────────────

/// Character data tagged with an optional `lang` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LangText {
  #[serde(rename = "@lang")]
  pub lang:  String,
  #[serde(rename = "$text")]
  pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icon {
  #[serde(rename = "@src")]
  pub src:    String,
  #[serde(rename = "@width")]
  pub width:  String,
  #[serde(rename = "@height")]
  pub height: String,
}

// ─── Channel ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
  #[serde(rename = "@id")]
  pub id:            String,
  #[serde(rename = "display-name")]
  pub display_names: Vec<LangText>,
  #[serde(rename = "url")]
  pub urls:          Vec<String>,
}

// ─── Programme ───────────────────────────────────────────────────────────────

/// One scheduled programme. Times are kept as the raw feed strings; the
/// ingestion pipeline normalises them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Programme {
  #[serde(rename = "@channel")]
  pub channel:    String,
  #[serde(rename = "@start")]
  pub start:      String,
  #[serde(rename = "@stop")]
  pub stop:       String,
  #[serde(rename = "@pdc-start")]
  pub pdc_start:  String,
  #[serde(rename = "@vps-start")]
  pub vps_start:  String,
  #[serde(rename = "@showview")]
  pub show_view:  String,
  #[serde(rename = "@videoplus")]
  pub video_plus: String,
  #[serde(rename = "@clumpidx")]
  pub clump_idx:  String,

  #[serde(rename = "title")]
  pub titles:             Vec<LangText>,
  #[serde(rename = "sub-title")]
  pub sub_titles:         Vec<LangText>,
  #[serde(rename = "desc")]
  pub descriptions:       Vec<LangText>,
  pub credits:            Credits,
  #[serde(rename = "date")]
  pub dates:              Vec<String>,
  #[serde(rename = "category")]
  pub categories:         Vec<LangText>,
  #[serde(rename = "keyword")]
  pub keywords:           Vec<LangText>,
  #[serde(rename = "language")]
  pub languages:          Vec<LangText>,
  #[serde(rename = "orig-language")]
  pub original_languages: Vec<LangText>,
  #[serde(rename = "length")]
  pub length:             Vec<Length>,
  #[serde(rename = "icon")]
  pub icons:              Vec<Icon>,
  #[serde(rename = "country")]
  pub countries:          Vec<LangText>,
  #[serde(rename = "episode-num")]
  pub episode_nums:       Vec<EpisodeNum>,
  pub video:              Vec<Video>,
  pub audio:              Vec<Audio>,
  #[serde(rename = "previously-shown")]
  pub previously_shown:   Vec<PreviouslyShown>,
  pub premiere:           Vec<LangText>,
  #[serde(rename = "last-chance")]
  pub last_chance:        Vec<LangText>,
  pub subtitles:          Vec<Subtitles>,
  #[serde(rename = "rating")]
  pub ratings:            Vec<Rating>,
  #[serde(rename = "star-rating")]
  pub star_ratings:       Vec<Rating>,
  #[serde(rename = "review")]
  pub reviews:            Vec<Review>,
}

/// The `<credits>` block. Absent credits decode as all-empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credits {
  #[serde(rename = "director")]
  pub directors:    Vec<String>,
  #[serde(rename = "actor")]
  pub actors:       Vec<Actor>,
  #[serde(rename = "writer")]
  pub writers:      Vec<String>,
  #[serde(rename = "adapter")]
  pub adapters:     Vec<String>,
  #[serde(rename = "producer")]
  pub producers:    Vec<String>,
  #[serde(rename = "composer")]
  pub composers:    Vec<String>,
  #[serde(rename = "editor")]
  pub editors:      Vec<String>,
  #[serde(rename = "presenter")]
  pub presenters:   Vec<String>,
  #[serde(rename = "commentator")]
  pub commentators: Vec<String>,
  #[serde(rename = "guest")]
  pub guests:       Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Actor {
  #[serde(rename = "@role")]
  pub role: String,
  #[serde(rename = "$text")]
  pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Length {
  #[serde(rename = "@units")]
  pub units: String,
  #[serde(rename = "$text")]
  pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeNum {
  #[serde(rename = "@system")]
  pub system: String,
  #[serde(rename = "$text")]
  pub value:  String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
  pub present: Option<String>,
  pub colour:  Option<String>,
  pub aspect:  Option<String>,
  pub quality: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Audio {
  pub present: Option<String>,
  pub stereo:  Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviouslyShown {
  #[serde(rename = "@start")]
  pub start:   String,
  #[serde(rename = "@channel")]
  pub channel: String,
}

/// `<subtitles type="…">` with the languages it is available in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subtitles {
  #[serde(rename = "@type")]
  pub kind:      String,
  #[serde(rename = "language")]
  pub languages: Vec<LangText>,
}

/// Shared by `<rating>` and `<star-rating>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
  #[serde(rename = "@system")]
  pub system: String,
  pub value:  Option<String>,
  #[serde(rename = "icon")]
  pub icons:  Vec<Icon>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
  #[serde(rename = "@type")]
  pub kind:     String,
  #[serde(rename = "@source")]
  pub source:   String,
  #[serde(rename = "@reviewer")]
  pub reviewer: String,
  #[serde(rename = "@lang")]
  pub lang:     String,
  #[serde(rename = "$text")]
  pub value:    String,
}
