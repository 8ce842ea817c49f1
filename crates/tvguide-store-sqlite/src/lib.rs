//! SQLite backend for the tvguide EPG store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. An XMLTV document is ingested in one
//! transaction; channel listings and programme descriptions are read back
//! from the normalised tables.

mod encode;
mod ingest;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
