//! Error types for the tvguide-xmltv reader.

use quick_xml::{de::DeError, events::attributes::AttrError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("xml error: {0}")]
  Xml(#[from] quick_xml::Error),

  #[error("malformed attribute: {0}")]
  Attr(#[from] AttrError),

  /// A `<channel>` or `<programme>` element was found but its content does
  /// not fit the record type.
  #[error("cannot decode <{element}> element: {source}")]
  Decode {
    element: &'static str,
    #[source]
    source:  DeError,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
