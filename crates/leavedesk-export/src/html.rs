//! Printable HTML rendering.
//!
//! Inline styles only, so the output survives being saved to a file and
//! opened without a stylesheet. Rows whose record is complete get a light
//! green background, matching what operators expect from the entry screen.

use leavedesk_core::{
  profile::{Profile, is_complete},
  record::LeaveRecord,
  report::MonthlyReport,
};

use crate::table::{format_date, header_row, value_row};

const COMPLETE_ROW_STYLE: &str = "background-color:#d4edda; color:#000000;";

/// Render `records` as a `<table>` fragment.
pub fn records_table(records: &[LeaveRecord], profile: &Profile) -> String {
  if records.is_empty() {
    return "<p>No records</p>".to_string();
  }

  let mut html = String::from(
    "<table style=\"width:100%; border-collapse:collapse; font-size:9pt;\">",
  );

  html.push_str("<thead><tr style=\"background-color:#f0f0f0;\">");
  for header in header_row(profile) {
    html.push_str(
      "<th style=\"border:1px solid #ddd; padding:4px 6px; text-align:left; \
       font-weight:bold;\">",
    );
    html.push_str(&escape(header));
    html.push_str("</th>");
  }
  html.push_str("</tr></thead><tbody>");

  for record in records {
    let row_style = if is_complete(record, &profile.completeness) {
      COMPLETE_ROW_STYLE
    } else {
      "background-color:white;"
    };
    html.push_str(&format!("<tr style=\"{row_style}\">"));
    for cell in value_row(record, profile) {
      html.push_str("<td style=\"border:1px solid #ddd; padding:4px 6px;\">");
      html.push_str(&escape(&cell));
      html.push_str("</td>");
    }
    html.push_str("</tr>");
  }

  html.push_str("</tbody></table>");
  html
}

/// A standalone printable page for a monthly report: title, period line,
/// metric strip, table.
pub fn report_document(report: &MonthlyReport, profile: &Profile) -> String {
  let period = format!(
    "{} — {}",
    format_date(report.period.first_day),
    format_date(report.period.last_day)
  );
  let summary = &report.summary;
  let table = records_table(&report.records, profile);

  format!(
    "<!DOCTYPE html>\n\
     <html>\n<head>\n<meta charset=\"UTF-8\">\n\
     <title>Leave report</title>\n\
     <style>@page {{ size: landscape; margin: 1cm; }} \
     body {{ font-family: Arial, sans-serif; margin: 20px; }}</style>\n\
     </head>\n<body>\n\
     <div style=\"font-size:20pt; font-weight:bold; text-align:center;\">Leave report</div>\n\
     <div style=\"font-size:14pt; text-align:center; margin-bottom:15px;\">Period: {period}</div>\n\
     <div style=\"display:flex; justify-content:space-around; margin:20px 0; \
     padding:10px; background-color:#f5f5f5; border:1px solid #ddd;\">\n\
     <div><strong>Total:</strong> {total}</div>\n\
     <div><strong>Loaded:</strong> {loaded}</div>\n\
     <div><strong>Pending:</strong> {pending}</div>\n\
     <div><strong>Teachers:</strong> {teachers} | <strong>Aides:</strong> {aides}</div>\n\
     </div>\n\
     {table}\n\
     </body>\n</html>\n",
    total = summary.total,
    loaded = summary.loaded,
    pending = summary.pending,
    teachers = summary.teachers,
    aides = summary.aides,
  )
}

/// Escape `&`, `<`, `>`, and quotes for use in element content.
fn escape(s: &str) -> String {
  s.replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
    .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, Utc};
  use leavedesk_core::{
    record::{LeaveRecord, LoadStatus, Role},
    report::{ReportPeriod, ReportSummary},
  };

  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn record(complete: bool) -> LeaveRecord {
    let mut record = LeaveRecord {
      id:                 1,
      last_name:          "GOMEZ".into(),
      first_name:         "Ana".into(),
      national_id:        None,
      family_national_id: None,
      role:               Role::Teacher,
      start_date:         date(2024, 3, 5),
      end_date:           None,
      legal_article:      None,
      external_code:      None,
      load_status:        LoadStatus::Pending,
      load_date:          None,
      documentation:      None,
      notes:              None,
      created_at:         Utc::now(),
    };
    if complete {
      record.end_date = Some(date(2024, 3, 12));
      record.legal_article = Some("Art. 44".into());
      record.external_code = Some("AUS-1".into());
      record.load_status = LoadStatus::Loaded;
      record.load_date = Some(date(2024, 3, 10));
    }
    record
  }

  #[test]
  fn empty_list_renders_a_notice() {
    assert_eq!(records_table(&[], &Profile::standard()), "<p>No records</p>");
  }

  #[test]
  fn complete_rows_are_highlighted() {
    let out = records_table(&[record(true), record(false)], &Profile::standard());
    assert_eq!(out.matches(COMPLETE_ROW_STYLE).count(), 1);
  }

  #[test]
  fn values_are_escaped() {
    let mut r = record(false);
    r.notes = Some("<b>&\"quotes\"</b>".into());
    let out = records_table(&[r], &Profile::standard());
    assert!(out.contains("&lt;b&gt;&amp;&quot;quotes&quot;&lt;/b&gt;"));
    assert!(!out.contains("<b>&"));
  }

  #[test]
  fn report_document_carries_period_and_counts() {
    let records = vec![record(true)];
    let summary = ReportSummary::from_records(&records);
    let report = MonthlyReport {
      period: ReportPeriod::for_month(2024, 3).unwrap(),
      records,
      summary,
    };
    let out = report_document(&report, &Profile::standard());
    assert!(out.contains("Period: 01/03/2024 — 31/03/2024"));
    assert!(out.contains("<strong>Total:</strong> 1"));
    assert!(out.contains("<strong>Loaded:</strong> 1"));
  }
}
