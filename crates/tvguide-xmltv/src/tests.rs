//! Tests for the event reader and the visitor driver.

use tvguide_core::record::{Channel, GuideHead, LangText, Programme};

use crate::{Error, GuideEvent, GuideVisitor, events, parse};

const GUIDE: &[u8] = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE tv SYSTEM "xmltv.dtd">
<tv generator-info-name="epg-grabber" generator-info-url="http://example.com/grabber"
    source-info-name="Example TV" source-data-url="http://example.com/data">
  <channel id="one.example">
    <display-name lang="en">One</display-name>
    <display-name lang="ru">Первый</display-name>
    <url>http://one.example</url>
  </channel>
  <channel id="two.example"/>
  <programme start="20181027030000 +0300" stop="20181027040000 +0300" channel="one.example" clumpidx="0/1">
    <title lang="en">Morning &amp; News</title>
    <title lang="ru">Новости</title>
    <desc lang="en">Headlines.</desc>
    <credits>
      <director>Ann Director</director>
      <actor role="Host">Bob Host</actor>
      <actor>Carol Extra</actor>
      <guest>Dan Guest</guest>
    </credits>
    <date>2018</date>
    <category lang="en">News</category>
    <length units="minutes">60</length>
    <icon src="http://example.com/news.png" width="100" height="50"/>
    <country lang="en">UK</country>
    <episode-num system="onscreen">S1E2</episode-num>
    <video><present>yes</present><aspect>16:9</aspect></video>
    <audio><stereo>stereo</stereo></audio>
    <previously-shown start="20181020030000" channel="two.example"/>
    <premiere lang="en">First showing</premiere>
    <subtitles type="teletext"><language lang="en">English</language></subtitles>
    <rating system="MPAA"><value>PG</value><icon src="pg.png"/></rating>
    <star-rating><value>3/5</value></star-rating>
    <review type="text" source="Paper" reviewer="Critic" lang="en">Fine.</review>
  </programme>
  <programme start="20181027040000 +0300" channel="two.example"/>
</tv>
"#
.as_bytes();

fn collect(document: &[u8]) -> Vec<GuideEvent> {
  events(document).collect::<Result<_, _>>().unwrap()
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[test]
fn head_comes_first_with_root_attributes() {
  let evs = collect(GUIDE);
  let GuideEvent::Head(head) = &evs[0] else {
    panic!("expected head first, got {:?}", evs[0]);
  };
  assert_eq!(head, &GuideHead {
    generator_info_name: "epg-grabber".into(),
    generator_info_url:  "http://example.com/grabber".into(),
    source_info_url:     String::new(),
    source_info_name:    "Example TV".into(),
    source_data_url:     "http://example.com/data".into(),
  });
}

#[test]
fn records_follow_in_document_order() {
  let kinds: Vec<&str> = collect(GUIDE)
    .iter()
    .map(|e| match e {
      GuideEvent::Head(_) => "head",
      GuideEvent::Channel(_) => "channel",
      GuideEvent::Programme(_) => "programme",
    })
    .collect();
  assert_eq!(kinds, ["head", "channel", "channel", "programme", "programme"]);
}

#[test]
fn channel_decodes_names_and_urls() {
  let evs = collect(GUIDE);
  let GuideEvent::Channel(one) = &evs[1] else { panic!() };
  assert_eq!(one.id, "one.example");
  assert_eq!(one.display_names, vec![
    LangText { lang: "en".into(), value: "One".into() },
    LangText { lang: "ru".into(), value: "Первый".into() },
  ]);
  assert_eq!(one.urls, ["http://one.example"]);

  let GuideEvent::Channel(two) = &evs[2] else { panic!() };
  assert_eq!(two, &Channel { id: "two.example".into(), ..Channel::default() });
}

#[test]
fn programme_decodes_every_sub_element() {
  let evs = collect(GUIDE);
  let GuideEvent::Programme(p) = &evs[3] else { panic!() };

  assert_eq!(p.channel, "one.example");
  assert_eq!(p.start, "20181027030000 +0300");
  assert_eq!(p.stop, "20181027040000 +0300");
  assert_eq!(p.clump_idx, "0/1");
  assert_eq!(p.titles[0].value, "Morning & News");
  assert_eq!(p.titles[1].lang, "ru");
  assert_eq!(p.descriptions[0].value, "Headlines.");

  assert_eq!(p.credits.directors, ["Ann Director"]);
  assert_eq!(p.credits.actors.len(), 2);
  assert_eq!(p.credits.actors[0].role, "Host");
  assert_eq!(p.credits.actors[0].name, "Bob Host");
  assert_eq!(p.credits.actors[1].role, "");
  assert_eq!(p.credits.guests, ["Dan Guest"]);
  assert!(p.credits.writers.is_empty());

  assert_eq!(p.dates, ["2018"]);
  assert_eq!(p.categories[0].value, "News");
  assert_eq!(p.length[0].units, "minutes");
  assert_eq!(p.length[0].value, "60");
  assert_eq!(p.icons[0].width, "100");
  assert_eq!(p.countries[0].value, "UK");
  assert_eq!(p.episode_nums[0].system, "onscreen");
  assert_eq!(p.video[0].present.as_deref(), Some("yes"));
  assert_eq!(p.video[0].colour, None);
  assert_eq!(p.audio[0].stereo.as_deref(), Some("stereo"));
  assert_eq!(p.previously_shown[0].channel, "two.example");
  assert_eq!(p.premiere[0].value, "First showing");
  assert_eq!(p.subtitles[0].kind, "teletext");
  assert_eq!(p.subtitles[0].languages[0].value, "English");
  assert_eq!(p.ratings[0].system, "MPAA");
  assert_eq!(p.ratings[0].value.as_deref(), Some("PG"));
  assert_eq!(p.ratings[0].icons[0].src, "pg.png");
  assert_eq!(p.star_ratings[0].value.as_deref(), Some("3/5"));
  assert_eq!(p.reviews[0].reviewer, "Critic");
  assert_eq!(p.reviews[0].value, "Fine.");
}

#[test]
fn empty_programme_has_no_sub_attributes() {
  let evs = collect(GUIDE);
  let GuideEvent::Programme(p) = &evs[4] else { panic!() };
  assert_eq!(p, &Programme {
    channel: "two.example".into(),
    start: "20181027040000 +0300".into(),
    ..Programme::default()
  });
}

#[test]
fn document_without_tv_root_has_no_head() {
  let evs = collect(br#"<guide><channel id="x"/></guide>"#);
  assert_eq!(evs.len(), 1);
  assert!(matches!(&evs[0], GuideEvent::Channel(c) if c.id == "x"));
}

#[test]
fn malformed_document_ends_the_stream() {
  let broken = br#"<tv><programme channel="a" start="2018"><title>Open</title></tv>"#;
  let results: Vec<_> = events(broken).collect();
  let last = results.last().expect("at least one item");
  assert!(last.is_err(), "{results:?}");
  assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
}

#[test]
fn truncated_document_ends_with_an_error() {
  let cut = br#"<tv><channel id="a"/><programme channel="a" start="2018"><title>x</title></programme>"#;
  let results: Vec<_> = events(cut).collect();

  assert_eq!(results.len(), 4, "{results:?}");
  assert!(results[..3].iter().all(Result::is_ok));
  assert!(
    matches!(&results[3], Err(Error::Xml(quick_xml::Error::IllFormed(_)))),
    "{results:?}"
  );
}

#[test]
fn complete_document_without_records_is_fine() {
  let evs = collect(br#"<tv generator-info-name="g"><!-- empty --></tv>"#);
  assert_eq!(evs.len(), 1);
}

#[test]
fn undecodable_record_stops_the_stream() {
  let doc = br#"<tv>
    <programme channel="a" start="2018">
      <credits><director>A</director></credits>
      <credits><director>B</director></credits>
    </programme>
    <channel id="z"/>
  </tv>"#;
  let results: Vec<_> = events(doc).collect();

  assert_eq!(results.len(), 2, "{results:?}");
  assert!(matches!(&results[0], Ok(GuideEvent::Head(_))));
  assert!(
    matches!(&results[1], Err(Error::Decode { element: "programme", .. })),
    "{results:?}"
  );
}

// ─── Visitor ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
enum Stop {
  Parse(Error),
  Requested,
}

impl From<Error> for Stop {
  fn from(e: Error) -> Self { Stop::Parse(e) }
}

/// Counts callbacks and asks to stop after `limit` programmes.
#[derive(Default)]
struct Counter {
  heads:      usize,
  channels:   usize,
  programmes: usize,
  limit:      Option<usize>,
}

impl GuideVisitor for Counter {
  type Error = Stop;

  fn on_head(&mut self, _head: GuideHead) -> Result<(), Stop> {
    self.heads += 1;
    Ok(())
  }

  fn on_channel(&mut self, _channel: Channel) -> Result<(), Stop> {
    self.channels += 1;
    Ok(())
  }

  fn on_programme(&mut self, _programme: Programme) -> Result<(), Stop> {
    self.programmes += 1;
    match self.limit {
      Some(limit) if self.programmes >= limit => Err(Stop::Requested),
      _ => Ok(()),
    }
  }
}

#[test]
fn visitor_sees_every_event() {
  let mut counter = Counter::default();
  parse(GUIDE, &mut counter).unwrap();
  assert_eq!(
    (counter.heads, counter.channels, counter.programmes),
    (1, 2, 2)
  );
}

#[test]
fn visitor_error_stops_parsing() {
  let mut counter = Counter { limit: Some(1), ..Counter::default() };
  let err = parse(GUIDE, &mut counter).unwrap_err();
  assert!(matches!(err, Stop::Requested));
  assert_eq!(counter.programmes, 1);
}

#[test]
fn unhandled_kinds_are_skipped() {
  #[derive(Default)]
  struct ChannelsOnly(Vec<String>);

  impl GuideVisitor for ChannelsOnly {
    type Error = Error;

    fn on_channel(&mut self, channel: Channel) -> Result<(), Error> {
      self.0.push(channel.id);
      Ok(())
    }
  }

  let mut v = ChannelsOnly::default();
  parse(GUIDE, &mut v).unwrap();
  assert_eq!(v.0, ["one.example", "two.example"]);
}

#[test]
fn parse_error_reaches_visitor_error_type() {
  let mut counter = Counter::default();
  let err = parse(b"<tv><channel id='a'></tv>", &mut counter).unwrap_err();
  assert!(matches!(err, Stop::Parse(_)));
  assert_eq!(counter.channels, 0);
}
