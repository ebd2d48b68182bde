//! CSV rendering.
//!
//! Output is UTF-8 prefixed with a byte-order mark so spreadsheet
//! applications detect the encoding when the file is double-clicked.
//! Rows end in CRLF and values are quoted per RFC 4180.

use leavedesk_core::{
  profile::Profile,
  record::LeaveRecord,
  report::{MonthlyReport, ReportSummary},
};

use crate::table::{header_row, value_row};

const BOM: &str = "\u{feff}";

/// Render `records` as a CSV document with one header row.
pub fn records_csv(records: &[LeaveRecord], profile: &Profile) -> String {
  let mut out = String::from(BOM);
  push_row(&mut out, header_row(profile).into_iter().map(str::to_owned));
  for record in records {
    push_row(&mut out, value_row(record, profile));
  }
  out
}

/// The aggregate-count block as its own CSV document, one concept per row.
pub fn summary_csv(summary: &ReportSummary) -> String {
  let mut out = String::from(BOM);
  push_summary(&mut out, summary);
  out
}

/// A monthly report as a single CSV download: the record rows, a blank
/// line, then the aggregate-count block.
pub fn report_csv(report: &MonthlyReport, profile: &Profile) -> String {
  let mut out = records_csv(&report.records, profile);
  out.push_str("\r\n");
  push_summary(&mut out, &report.summary);
  out
}

fn push_summary(out: &mut String, summary: &ReportSummary) {
  push_row(out, ["Concept", "Count"].map(str::to_owned));
  for (concept, count) in [
    ("Total", summary.total),
    ("Loaded", summary.loaded),
    ("Pending", summary.pending),
    ("Teachers", summary.teachers),
    ("Aides", summary.aides),
  ] {
    push_row(out, [concept.to_owned(), count.to_string()]);
  }
}

fn push_row(out: &mut String, cells: impl IntoIterator<Item = String>) {
  let mut first = true;
  for cell in cells {
    if !first {
      out.push(',');
    }
    push_escaped(out, &cell);
    first = false;
  }
  out.push_str("\r\n");
}

/// RFC 4180 quoting: wrap a value containing a delimiter, quote, or line
/// break; double any embedded quotes.
fn push_escaped(out: &mut String, cell: &str) {
  if cell.contains([',', '"', '\n', '\r']) {
    out.push('"');
    out.push_str(&cell.replace('"', "\"\""));
    out.push('"');
  } else {
    out.push_str(cell);
  }
}
