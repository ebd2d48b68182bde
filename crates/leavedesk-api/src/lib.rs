//! JSON REST API for leavedesk.
//!
//! Exposes an axum [`Router`] backed by any
//! [`leavedesk_core::store::LeaveStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", leavedesk_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod records;
pub mod reports;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use leavedesk_core::store::LeaveStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: LeaveStore + 'static,
{
  Router::new()
    // Records
    .route("/records", get(records::list::<S>).post(records::create::<S>))
    .route("/records/csv", get(records::list_csv::<S>))
    .route(
      "/records/{id}",
      get(records::get_one::<S>)
        .patch(records::update_one::<S>)
        .delete(records::delete_one::<S>),
    )
    .route("/records/{id}/load", post(records::mark_loaded_one::<S>))
    // Reports
    .route("/reports/{year}/{month}", get(reports::monthly::<S>))
    .route("/reports/{year}/{month}/csv", get(reports::monthly_csv::<S>))
    .route("/reports/{year}/{month}/html", get(reports::monthly_html::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use leavedesk_core::profile::Profile;
  use leavedesk_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  async fn router() -> Router {
    let store = SqliteStore::open_in_memory(Profile::standard())
      .await
      .unwrap();
    api_router(Arc::new(store))
  }

  async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    router
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn text_body(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn minimal_record() -> Value {
    json!({
      "last_name": "GOMEZ",
      "first_name": "Ana",
      "role": "teacher",
      "start_date": "2024-03-05"
    })
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_the_stored_record() {
    let app = router().await;
    let resp = request(&app, "POST", "/records", Some(minimal_record())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = json_body(resp).await;
    assert_eq!(body["last_name"], "GOMEZ");
    assert_eq!(body["load_status"], "pending");
    assert_eq!(body["complete"], false);
    assert!(body["id"].as_i64().unwrap() > 0);
  }

  #[tokio::test]
  async fn create_with_blank_name_returns_400() {
    let app = router().await;
    let mut body = minimal_record();
    body["last_name"] = json!("   ");
    let resp = request(&app, "POST", "/records", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = json_body(resp).await;
    assert!(body["error"].as_str().unwrap().contains("last name"));
  }

  // ── Get / patch / delete ────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_missing_returns_404() {
    let app = router().await;
    let resp = request(&app, "GET", "/records/99", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn patch_updates_named_fields_and_null_clears() {
    let app = router().await;
    let mut body = minimal_record();
    body["legal_article"] = json!("Art. 44");
    let created = json_body(request(&app, "POST", "/records", Some(body)).await).await;
    let id = created["id"].as_i64().unwrap();

    // Absent keys stay untouched.
    let resp = request(
      &app,
      "PATCH",
      &format!("/records/{id}"),
      Some(json!({"notes": "resubmitted"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let patched = json_body(resp).await;
    assert_eq!(patched["notes"], "resubmitted");
    assert_eq!(patched["legal_article"], "Art. 44");

    // An explicit null clears.
    let resp = request(
      &app,
      "PATCH",
      &format!("/records/{id}"),
      Some(json!({"legal_article": null})),
    )
    .await;
    let patched = json_body(resp).await;
    assert_eq!(patched["legal_article"], Value::Null);
  }

  #[tokio::test]
  async fn patch_rejects_end_before_start() {
    let app = router().await;
    let created = json_body(request(&app, "POST", "/records", Some(minimal_record())).await).await;
    let id = created["id"].as_i64().unwrap();

    let resp = request(
      &app,
      "PATCH",
      &format!("/records/{id}"),
      Some(json!({"end_date": "2024-03-01"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn delete_returns_204_then_get_returns_404() {
    let app = router().await;
    let created = json_body(request(&app, "POST", "/records", Some(minimal_record())).await).await;
    let id = created["id"].as_i64().unwrap();

    let resp = request(&app, "DELETE", &format!("/records/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = request(&app, "GET", &format!("/records/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Mark loaded ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn mark_loaded_sets_status_and_date() {
    let app = router().await;
    let created = json_body(request(&app, "POST", "/records", Some(minimal_record())).await).await;
    let id = created["id"].as_i64().unwrap();

    let resp = request(
      &app,
      "POST",
      &format!("/records/{id}/load"),
      Some(json!({"date": "2024-03-10"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["load_status"], "loaded");
    assert_eq!(body["load_date"], "2024-03-10");
    // Still missing end date, article, and code under the full policy.
    assert_eq!(body["complete"], false);
  }

  #[tokio::test]
  async fn mark_loaded_rejects_date_before_start() {
    let app = router().await;
    let created = json_body(request(&app, "POST", "/records", Some(minimal_record())).await).await;
    let id = created["id"].as_i64().unwrap();

    let resp = request(
      &app,
      "POST",
      &format!("/records/{id}/load"),
      Some(json!({"date": "2024-03-01"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Search ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_via_query_params() {
    let app = router().await;
    request(&app, "POST", "/records", Some(minimal_record())).await;
    let mut other = minimal_record();
    other["last_name"] = json!("PEREZ");
    other["role"] = json!("aide");
    request(&app, "POST", "/records", Some(other)).await;

    let resp = request(&app, "GET", "/records?last_name_contains=gom", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["last_name"], "GOMEZ");

    let resp = request(&app, "GET", "/records?role=aide&order=alphabetical", None).await;
    let body = json_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["last_name"], "PEREZ");
  }

  #[tokio::test]
  async fn records_csv_download() {
    let app = router().await;
    request(&app, "POST", "/records", Some(minimal_record())).await;

    let resp = request(&app, "GET", "/records/csv", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
      .headers()
      .get(header::CONTENT_TYPE)
      .unwrap()
      .to_str()
      .unwrap()
      .to_string();
    assert!(content_type.contains("text/csv"), "Content-Type: {content_type}");

    let body = text_body(resp).await;
    assert!(body.starts_with('\u{feff}'));
    assert!(body.contains("GOMEZ"));
  }

  // ── Reports ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn monthly_report_returns_only_the_month() {
    let app = router().await;
    request(&app, "POST", "/records", Some(minimal_record())).await;
    let mut april = minimal_record();
    april["last_name"] = json!("PEREZ");
    april["start_date"] = json!("2024-04-01");
    request(&app, "POST", "/records", Some(april)).await;

    let resp = request(&app, "GET", "/reports/2024/3", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["summary"]["total"], 1);
    assert_eq!(body["records"][0]["last_name"], "GOMEZ");
    assert_eq!(body["period"]["first_day"], "2024-03-01");
    assert_eq!(body["period"]["last_day"], "2024-03-31");
  }

  #[tokio::test]
  async fn monthly_report_rejects_bad_month() {
    let app = router().await;
    let resp = request(&app, "GET", "/reports/2024/13", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn monthly_report_html_is_a_page() {
    let app = router().await;
    request(&app, "POST", "/records", Some(minimal_record())).await;

    let resp = request(&app, "GET", "/reports/2024/3/html", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
      .headers()
      .get(header::CONTENT_TYPE)
      .unwrap()
      .to_str()
      .unwrap()
      .to_string();
    assert!(content_type.contains("text/html"));

    let body = text_body(resp).await;
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("GOMEZ"));
  }
}
