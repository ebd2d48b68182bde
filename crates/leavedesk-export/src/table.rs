//! Shared tabular layout: which columns a profile shows and how cells are
//! formatted.

use chrono::NaiveDate;
use leavedesk_core::{
  profile::Profile,
  record::{DocumentationStatus, LeaveRecord, LoadStatus, Role},
};

/// Shown in place of a missing end date, so a reader can tell "still open"
/// apart from an empty cell.
pub(crate) const END_DATE_PLACEHOLDER: &str = "(not set)";
/// Shown in place of a missing legal article.
pub(crate) const ARTICLE_PLACEHOLDER: &str = "(pending)";

pub(crate) fn format_date(d: NaiveDate) -> String {
  d.format("%d/%m/%Y").to_string()
}

pub(crate) fn role_label(role: Role) -> &'static str {
  match role {
    Role::Teacher => "Teacher",
    Role::Aide => "Aide",
  }
}

pub(crate) fn status_label(status: LoadStatus) -> &'static str {
  match status {
    LoadStatus::Pending => "Pending",
    LoadStatus::Loaded => "Loaded",
  }
}

pub(crate) fn documentation_label(status: DocumentationStatus) -> &'static str {
  match status {
    DocumentationStatus::Pending => "Pending",
    DocumentationStatus::Uploaded => "Uploaded",
  }
}

pub(crate) fn header_row(profile: &Profile) -> Vec<&'static str> {
  let mut headers = vec!["ID", "Last name", "First name"];
  if !profile.national_id.is_absent() {
    headers.push("National ID");
  }
  if !profile.family_national_id.is_absent() {
    headers.push("Family ID");
  }
  headers.extend(["Role", "Start", "End", "Article", "OSEP code", "Status", "GEI load"]);
  if profile.track_documentation {
    headers.push("Documentation");
  }
  headers.push("Notes");
  headers
}

pub(crate) fn value_row(record: &LeaveRecord, profile: &Profile) -> Vec<String> {
  let mut cells = vec![
    record.id.to_string(),
    record.last_name.clone(),
    record.first_name.clone(),
  ];
  if !profile.national_id.is_absent() {
    cells.push(record.national_id.clone().unwrap_or_default());
  }
  if !profile.family_national_id.is_absent() {
    cells.push(record.family_national_id.clone().unwrap_or_default());
  }
  cells.push(role_label(record.role).to_string());
  cells.push(format_date(record.start_date));
  cells.push(
    record
      .end_date
      .map(format_date)
      .unwrap_or_else(|| END_DATE_PLACEHOLDER.to_string()),
  );
  cells.push(
    record
      .legal_article
      .clone()
      .unwrap_or_else(|| ARTICLE_PLACEHOLDER.to_string()),
  );
  cells.push(record.external_code.clone().unwrap_or_default());
  cells.push(status_label(record.load_status).to_string());
  cells.push(record.load_date.map(format_date).unwrap_or_default());
  if profile.track_documentation {
    cells.push(
      record
        .documentation
        .map(|d| documentation_label(d).to_string())
        .unwrap_or_default(),
    );
  }
  cells.push(record.notes.clone().unwrap_or_default());
  cells
}
