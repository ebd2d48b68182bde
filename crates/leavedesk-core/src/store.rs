//! The `LeaveStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `leavedesk-store-sqlite`). Higher layers (`leavedesk-api`) depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  Result,
  profile::Profile,
  query::SearchQuery,
  record::{LeaveRecord, LeaveRecordPatch, NewLeaveRecord, RecordId},
  report::MonthlyReport,
};

/// Abstraction over a leave-record store backend.
///
/// Every mutation validates its input before touching storage; a rejected
/// input leaves the store unchanged. One call is one storage round-trip —
/// no transaction spans multiple operations.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LeaveStore: Send + Sync {
  /// The deployment profile this store was opened with.
  fn profile(&self) -> &Profile;

  /// Persist a new record. The store assigns `id` and `created_at`; the
  /// load status starts [`Pending`](crate::record::LoadStatus::Pending)
  /// with no load date.
  fn create(
    &self,
    input: NewLeaveRecord,
  ) -> impl Future<Output = Result<LeaveRecord>> + Send + '_;

  /// Retrieve a record by id, or
  /// [`RecordNotFound`](crate::Error::RecordNotFound).
  fn get(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<LeaveRecord>> + Send + '_;

  /// Overwrite the fields named by `patch`, leaving the rest untouched.
  /// Validation runs against the merged result; on success the updated
  /// record is returned.
  fn update(
    &self,
    id: RecordId,
    patch: LeaveRecordPatch,
  ) -> impl Future<Output = Result<LeaveRecord>> + Send + '_;

  /// Remove a record. Deleting an unknown id is an error, not a no-op.
  fn delete(&self, id: RecordId) -> impl Future<Output = Result<()>> + Send + '_;

  /// Return records matching all filters in `query`, ordered per
  /// `query.order`.
  fn search<'a>(
    &'a self,
    query: &'a SearchQuery,
  ) -> impl Future<Output = Result<Vec<LeaveRecord>>> + Send + 'a;

  /// Transition a record to
  /// [`Loaded`](crate::record::LoadStatus::Loaded), stamping `load_date`
  /// with `date` or, when absent, today's local calendar date. The
  /// resulting date must not precede the record's start date.
  fn mark_loaded(
    &self,
    id: RecordId,
    date: Option<NaiveDate>,
  ) -> impl Future<Output = Result<LeaveRecord>> + Send + '_;

  /// All records whose start date falls within the given month, plus
  /// summary counts.
  fn monthly_report(
    &self,
    year: i32,
    month: u32,
  ) -> impl Future<Output = Result<MonthlyReport>> + Send + '_;
}
