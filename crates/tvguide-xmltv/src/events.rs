//! Two-pass event reader over an XMLTV buffer.
//!
//! Pass 1 stops at the `<tv>` root and reports its attributes. Pass 2 starts
//! again from the top and reports every `<channel>` and `<programme>`,
//! each decoded from its own byte span with the quick-xml deserializer. No
//! tree of the whole document is ever built.

use std::iter::FusedIterator;

use quick_xml::{
  Reader,
  errors::IllFormedError,
  events::{BytesStart, Event},
};
use tvguide_core::record::{Channel, GuideHead, Programme};

use crate::error::{Error, Result};

/// One item of the guide event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum GuideEvent {
  Head(GuideHead),
  Channel(Channel),
  Programme(Programme),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
  Head,
  Listing,
  Done,
}

/// Iterator over the events of one document.
///
/// Yields at most one [`GuideEvent::Head`], always first, followed by the
/// channels and programmes in document order. After an error the iterator
/// is exhausted.
pub struct GuideEvents<'a> {
  document: &'a [u8],
  reader:   Reader<&'a [u8]>,
  pass:     Pass,
  /// Elements opened but not yet closed in the listing pass, records
  /// excluded.
  open:     Vec<String>,
}

impl<'a> GuideEvents<'a> {
  pub fn new(document: &'a [u8]) -> Self {
    Self {
      document,
      reader: reader(document),
      pass: Pass::Head,
      open: Vec::new(),
    }
  }

  fn start_listing(&mut self) {
    self.reader = reader(self.document);
    self.pass = Pass::Listing;
    self.open.clear();
  }

  fn next_head(&mut self) -> Result<Option<GuideEvent>> {
    loop {
      match self.reader.read_event()? {
        Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"tv" => {
          return head_from(&e).map(|head| Some(GuideEvent::Head(head)));
        }
        Event::Eof => return Ok(None),
        _ => {}
      }
    }
  }

  fn next_record(&mut self) -> Result<Option<GuideEvent>> {
    loop {
      let from = position(&self.reader);

      let element = match self.reader.read_event()? {
        Event::Start(e) => match record_kind(&e) {
          Some(element) => {
            // Skip to the matching end tag; the span is decoded below.
            self.reader.read_to_end(e.name())?;
            element
          }
          None => {
            self.open.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            continue;
          }
        },
        Event::Empty(e) => match record_kind(&e) {
          Some(element) => element,
          None => continue,
        },
        Event::End(_) => {
          self.open.pop();
          continue;
        }
        // A document cut off mid-way still has its root open.
        Event::Eof => {
          return match self.open.pop() {
            Some(name) => {
              Err(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(name)).into())
            }
            None => Ok(None),
          };
        }
        _ => continue,
      };

      let to = position(&self.reader);
      let span = self.document[from..to].trim_ascii_start();

      return decode(element, span).map(Some);
    }
  }
}

impl Iterator for GuideEvents<'_> {
  type Item = Result<GuideEvent>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let step = match self.pass {
        Pass::Head => self.next_head(),
        Pass::Listing => self.next_record(),
        Pass::Done => return None,
      };

      match step {
        Ok(Some(event)) => {
          if self.pass == Pass::Head {
            self.start_listing();
          }
          return Some(Ok(event));
        }
        Ok(None) if self.pass == Pass::Head => self.start_listing(),
        Ok(None) => self.pass = Pass::Done,
        Err(e) => {
          self.pass = Pass::Done;
          return Some(Err(e));
        }
      }
    }
  }
}

impl FusedIterator for GuideEvents<'_> {}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn reader(document: &[u8]) -> Reader<&[u8]> {
  let mut reader = Reader::from_reader(document);
  reader.config_mut().trim_text(true);
  reader
}

fn position(reader: &Reader<&[u8]>) -> usize { reader.buffer_position() as usize }

fn record_kind(e: &BytesStart<'_>) -> Option<&'static str> {
  match e.local_name().as_ref() {
    b"channel" => Some("channel"),
    b"programme" => Some("programme"),
    _ => None,
  }
}

fn decode(element: &'static str, span: &[u8]) -> Result<GuideEvent> {
  let wrap = |source| Error::Decode { element, source };
  match element {
    "channel" => quick_xml::de::from_reader::<_, Channel>(span)
      .map(GuideEvent::Channel)
      .map_err(wrap),
    _ => quick_xml::de::from_reader::<_, Programme>(span)
      .map(GuideEvent::Programme)
      .map_err(wrap),
  }
}

fn head_from(e: &BytesStart<'_>) -> Result<GuideHead> {
  let mut head = GuideHead::default();
  for attr in e.attributes() {
    let attr = attr?;
    let value = attr.unescape_value()?.into_owned();
    match attr.key.local_name().as_ref() {
      b"generator-info-name" => head.generator_info_name = value,
      b"generator-info-url" => head.generator_info_url = value,
      b"source-info-url" => head.source_info_url = value,
      b"source-info-name" => head.source_info_name = value,
      b"source-data-url" => head.source_data_url = value,
      _ => {}
    }
  }
  Ok(head)
}
