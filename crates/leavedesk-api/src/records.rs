//! Handlers for `/records` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/records` | Search; filters and `order` as query params |
//! | `POST`   | `/records` | Body: [`CreateBody`]; returns 201 + record |
//! | `GET`    | `/records/csv` | Same filters, CSV download |
//! | `GET`    | `/records/:id` | 404 if not found |
//! | `PATCH`  | `/records/:id` | Body: [`PatchBody`]; absent = untouched, `null` = clear |
//! | `DELETE` | `/records/:id` | 204 on success |
//! | `POST`   | `/records/:id/load` | Body: `{"date":"2024-03-10"}`, date optional |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use chrono::NaiveDate;
use leavedesk_core::{
  profile::{Profile, is_complete},
  query::{SearchOrder, SearchQuery},
  record::{
    DocumentationStatus, LeaveRecord, LeaveRecordPatch, LoadStatus, NewLeaveRecord,
    RecordId, Role,
  },
  store::LeaveStore,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

// ─── Record view ─────────────────────────────────────────────────────────────

/// A record as the API returns it: the stored fields plus the derived
/// `complete` flag, recomputed on every read from the store's profile.
#[derive(Debug, Serialize)]
pub struct RecordView {
  #[serde(flatten)]
  pub record:   LeaveRecord,
  pub complete: bool,
}

impl RecordView {
  pub(crate) fn of(record: LeaveRecord, profile: &Profile) -> Self {
    let complete = is_complete(&record, &profile.completeness);
    Self { record, complete }
  }
}

// ─── List / search ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub last_name_contains:     Option<String>,
  pub first_name_contains:    Option<String>,
  pub legal_article_contains: Option<String>,
  pub role:                   Option<Role>,
  pub load_status:            Option<LoadStatus>,
  pub documentation:          Option<DocumentationStatus>,
  pub start_date_from:        Option<NaiveDate>,
  pub end_date_to:            Option<NaiveDate>,
  #[serde(default)]
  pub order:                  SearchOrder,
}

impl From<ListParams> for SearchQuery {
  fn from(p: ListParams) -> Self {
    SearchQuery {
      last_name_contains:     p.last_name_contains,
      first_name_contains:    p.first_name_contains,
      legal_article_contains: p.legal_article_contains,
      role:                   p.role,
      load_status:            p.load_status,
      documentation:          p.documentation,
      start_date_from:        p.start_date_from,
      end_date_to:            p.end_date_to,
      order:                  p.order,
    }
  }
}

/// `GET /records[?last_name_contains=...][&role=...][&order=alphabetical]...`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<RecordView>>, ApiError>
where
  S: LeaveStore,
{
  let query = SearchQuery::from(params);
  let records = store.search(&query).await?;
  let views = records
    .into_iter()
    .map(|r| RecordView::of(r, store.profile()))
    .collect();
  Ok(Json(views))
}

/// `GET /records/csv` — the same search, rendered as a CSV download.
pub async fn list_csv<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeaveStore,
{
  let query = SearchQuery::from(params);
  let records = store.search(&query).await?;
  let body = leavedesk_export::csv::records_csv(&records, store.profile());
  Ok((
    [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
    body,
  ))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /records`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub last_name:          String,
  pub first_name:         String,
  pub national_id:        Option<String>,
  pub family_national_id: Option<String>,
  pub role:               Role,
  pub start_date:         NaiveDate,
  pub end_date:           Option<NaiveDate>,
  pub legal_article:      Option<String>,
  pub external_code:      Option<String>,
  pub documentation:      Option<DocumentationStatus>,
  pub notes:              Option<String>,
}

impl From<CreateBody> for NewLeaveRecord {
  fn from(b: CreateBody) -> Self {
    NewLeaveRecord {
      last_name:          b.last_name,
      first_name:         b.first_name,
      national_id:        b.national_id,
      family_national_id: b.family_national_id,
      role:               b.role,
      start_date:         b.start_date,
      end_date:           b.end_date,
      legal_article:      b.legal_article,
      external_code:      b.external_code,
      documentation:      b.documentation,
      notes:              b.notes,
    }
  }
}

/// `POST /records` — returns 201 + the stored record.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeaveStore,
{
  let record = store.create(NewLeaveRecord::from(body)).await?;
  let view = RecordView::of(record, store.profile());
  Ok((StatusCode::CREATED, Json(view)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /records/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<RecordView>, ApiError>
where
  S: LeaveStore,
{
  let record = store.get(id).await?;
  Ok(Json(RecordView::of(record, store.profile())))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Deserialize a field where an explicit `null` must survive as
/// `Some(None)` ("clear") while an absent key stays `None` ("leave
/// untouched"); pair with `#[serde(default)]` on the field.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// JSON body accepted by `PATCH /records/:id`.
#[derive(Debug, Deserialize, Default)]
pub struct PatchBody {
  pub last_name:          Option<String>,
  pub first_name:         Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub national_id:        Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub family_national_id: Option<Option<String>>,
  pub role:               Option<Role>,
  pub start_date:         Option<NaiveDate>,
  #[serde(default, deserialize_with = "nullable")]
  pub end_date:           Option<Option<NaiveDate>>,
  #[serde(default, deserialize_with = "nullable")]
  pub legal_article:      Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub external_code:      Option<Option<String>>,
  pub load_status:        Option<LoadStatus>,
  #[serde(default, deserialize_with = "nullable")]
  pub load_date:          Option<Option<NaiveDate>>,
  pub documentation:      Option<DocumentationStatus>,
  #[serde(default, deserialize_with = "nullable")]
  pub notes:              Option<Option<String>>,
}

impl From<PatchBody> for LeaveRecordPatch {
  fn from(b: PatchBody) -> Self {
    LeaveRecordPatch {
      last_name:          b.last_name,
      first_name:         b.first_name,
      national_id:        b.national_id,
      family_national_id: b.family_national_id,
      role:               b.role,
      start_date:         b.start_date,
      end_date:           b.end_date,
      legal_article:      b.legal_article,
      external_code:      b.external_code,
      load_status:        b.load_status,
      load_date:          b.load_date,
      documentation:      b.documentation,
      notes:              b.notes,
    }
  }
}

/// `PATCH /records/:id` — partial update; returns the merged record.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
  Json(body): Json<PatchBody>,
) -> Result<Json<RecordView>, ApiError>
where
  S: LeaveStore,
{
  let record = store.update(id, LeaveRecordPatch::from(body)).await?;
  Ok(Json(RecordView::of(record, store.profile())))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /records/:id` — 204 on success, 404 when absent.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError>
where
  S: LeaveStore,
{
  store.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Mark loaded ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoadBody {
  /// The day the record was entered in GEI; today when omitted.
  pub date: Option<NaiveDate>,
}

/// `POST /records/:id/load` — body: `{"date":"2024-03-10"}` (date optional).
pub async fn mark_loaded_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
  Json(body): Json<LoadBody>,
) -> Result<Json<RecordView>, ApiError>
where
  S: LeaveStore,
{
  let record = store.mark_loaded(id, body.date).await?;
  Ok(Json(RecordView::of(record, store.profile())))
}
