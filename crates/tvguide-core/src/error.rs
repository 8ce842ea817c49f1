//! Error types for `tvguide-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// None of the XMLTV time layouts matched.
  #[error("string {0:?} parsing error: not a recognised guide time")]
  InvalidTime(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
