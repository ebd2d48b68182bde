//! Handlers for `/reports` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/reports/:year/:month` | Monthly report as JSON |
//! | `GET` | `/reports/:year/:month/csv` | Rows + summary block as CSV |
//! | `GET` | `/reports/:year/:month/html` | Standalone printable page |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::header,
  response::IntoResponse,
};
use leavedesk_core::{report::MonthlyReport, store::LeaveStore};

use crate::error::ApiError;

/// `GET /reports/:year/:month`
pub async fn monthly<S>(
  State(store): State<Arc<S>>,
  Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthlyReport>, ApiError>
where
  S: LeaveStore,
{
  let report = store.monthly_report(year, month).await?;
  Ok(Json(report))
}

/// `GET /reports/:year/:month/csv`
pub async fn monthly_csv<S>(
  State(store): State<Arc<S>>,
  Path((year, month)): Path<(i32, u32)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeaveStore,
{
  let report = store.monthly_report(year, month).await?;
  let body = leavedesk_export::csv::report_csv(&report, store.profile());
  Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body))
}

/// `GET /reports/:year/:month/html`
pub async fn monthly_html<S>(
  State(store): State<Arc<S>>,
  Path((year, month)): Path<(i32, u32)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeaveStore,
{
  let report = store.monthly_report(year, month).await?;
  let body = leavedesk_export::html::report_document(&report, store.profile());
  Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], body))
}
