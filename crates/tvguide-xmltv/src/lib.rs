//! Streaming XMLTV reader for tvguide.
//!
//! Walks an XMLTV buffer without building a document tree and hands out
//! [`tvguide_core::record`] values. Pure synchronous; no database
//! dependencies.
//!
//! Two entry points cover the same stream:
//!
//! * [`events`] returns an iterator of [`GuideEvent`]s;
//! * [`parse`] drives a [`GuideVisitor`], one method per event kind.
//!
//! # Quick start
//!
//! ```no_run
//! use tvguide_core::record::Programme;
//! use tvguide_xmltv::{GuideVisitor, parse};
//!
//! #[derive(Default)]
//! struct Titles(Vec<String>);
//!
//! impl GuideVisitor for Titles {
//!   type Error = tvguide_xmltv::Error;
//!
//!   fn on_programme(&mut self, p: Programme) -> Result<(), Self::Error> {
//!     self.0.extend(p.titles.into_iter().map(|t| t.value));
//!     Ok(())
//!   }
//! }
//!
//! let xml = br#"<tv><programme channel="c" start="2018"><title>News</title></programme></tv>"#;
//! let mut titles = Titles::default();
//! parse(xml, &mut titles).unwrap();
//! assert_eq!(titles.0, ["News"]);
//! ```

pub mod error;
mod events;

pub use error::{Error, Result};
pub use events::{GuideEvent, GuideEvents};
use tvguide_core::record::{Channel, GuideHead, Programme};

// ─── Visitor ─────────────────────────────────────────────────────────────────

/// Receiver for [`parse`].
///
/// Every method defaults to doing nothing, so a visitor only overrides the
/// kinds it cares about; the rest are skipped. Returning an error from any
/// method stops parsing at once and [`parse`] returns that error.
pub trait GuideVisitor {
  type Error: From<Error>;

  fn on_head(&mut self, head: GuideHead) -> Result<(), Self::Error> {
    let _ = head;
    Ok(())
  }

  fn on_channel(&mut self, channel: Channel) -> Result<(), Self::Error> {
    let _ = channel;
    Ok(())
  }

  fn on_programme(&mut self, programme: Programme) -> Result<(), Self::Error> {
    let _ = programme;
    Ok(())
  }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Iterate over the events of `document`.
pub fn events(document: &[u8]) -> GuideEvents<'_> { GuideEvents::new(document) }

/// Feed every event of `document` to `visitor`.
///
/// Stops at the first malformed element or visitor error; no callback runs
/// after a failure.
pub fn parse<V: GuideVisitor>(document: &[u8], visitor: &mut V) -> Result<(), V::Error> {
  for event in events(document) {
    match event? {
      GuideEvent::Head(head) => visitor.on_head(head)?,
      GuideEvent::Channel(channel) => visitor.on_channel(channel)?,
      GuideEvent::Programme(programme) => visitor.on_programme(programme)?,
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests;
