//! Error types for `leavedesk-core`.

use thiserror::Error;

use crate::record::RecordId;
pub use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("record not found: {0}")]
  RecordNotFound(RecordId),

  #[error("invalid record: {0}")]
  Validation(#[from] ValidationError),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend failure. Used by store implementations at their trait
  /// boundary.
  pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(source))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
