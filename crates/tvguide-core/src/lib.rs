//! Core types and trait definitions for the tvguide EPG store.
//!
//! This crate is deliberately free of XML and database dependencies. It holds
//! the decoded XMLTV records, the guide time normaliser, the read models
//! returned by queries, and the [`store::GuideStore`] abstraction.

pub mod error;
pub mod listing;
pub mod record;
pub mod store;
pub mod time;

pub use error::{Error, Result};
