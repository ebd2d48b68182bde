//! Error type for `leavedesk-store-sqlite`.

use thiserror::Error;

/// Backend-internal failures. Converted to
/// [`Storage`](leavedesk_core::Error::Storage) at the trait boundary, so
/// callers only ever see the core taxonomy.
#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("malformed row: {0}")]
  Decode(String),
}

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self { Self::Database(e.into()) }
}

impl From<Error> for leavedesk_core::Error {
  fn from(e: Error) -> Self { leavedesk_core::Error::storage(e) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
