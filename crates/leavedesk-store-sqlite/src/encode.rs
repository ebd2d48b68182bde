//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Dates are stored as ISO 8601 (`YYYY-MM-DD`), which sorts
//! lexicographically in date order, so SQL range comparisons work on the
//! raw text. `created_at` is an RFC 3339 string; enums are stored in their
//! lowercase string forms.

use chrono::{DateTime, NaiveDate, Utc};
use leavedesk_core::record::LeaveRecord;

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Decode(format!("bad date {s:?}: {e}")))
}

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("bad timestamp {s:?}: {e}")))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Parse a lowercase enum column via its `FromStr` (strum) form.
pub fn decode_enum<T: std::str::FromStr>(kind: &'static str, s: &str) -> Result<T> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown {kind}: {s:?}")))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column list shared by every SELECT, in [`RawRecord::from_row`] order.
pub const COLUMNS: &str = "id, last_name, first_name, national_id, \
   family_national_id, role, start_date, end_date, legal_article, \
   external_code, load_status, load_date, documentation, notes, created_at";

/// Raw strings read directly from a `leave_records` row.
pub struct RawRecord {
  pub id:                 i64,
  pub last_name:          String,
  pub first_name:         String,
  pub national_id:        Option<String>,
  pub family_national_id: Option<String>,
  pub role:               String,
  pub start_date:         String,
  pub end_date:           Option<String>,
  pub legal_article:      Option<String>,
  pub external_code:      Option<String>,
  pub load_status:        String,
  pub load_date:          Option<String>,
  pub documentation:      Option<String>,
  pub notes:              Option<String>,
  pub created_at:         String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                 row.get(0)?,
      last_name:          row.get(1)?,
      first_name:         row.get(2)?,
      national_id:        row.get(3)?,
      family_national_id: row.get(4)?,
      role:               row.get(5)?,
      start_date:         row.get(6)?,
      end_date:           row.get(7)?,
      legal_article:      row.get(8)?,
      external_code:      row.get(9)?,
      load_status:        row.get(10)?,
      load_date:          row.get(11)?,
      documentation:      row.get(12)?,
      notes:              row.get(13)?,
      created_at:         row.get(14)?,
    })
  }

  pub fn into_record(self) -> Result<LeaveRecord> {
    Ok(LeaveRecord {
      id:                 self.id,
      last_name:          self.last_name,
      first_name:         self.first_name,
      national_id:        self.national_id,
      family_national_id: self.family_national_id,
      role:               decode_enum("role", &self.role)?,
      start_date:         decode_date(&self.start_date)?,
      end_date:           self.end_date.as_deref().map(decode_date).transpose()?,
      legal_article:      self.legal_article,
      external_code:      self.external_code,
      load_status:        decode_enum("load status", &self.load_status)?,
      load_date:          self.load_date.as_deref().map(decode_date).transpose()?,
      documentation:      self
        .documentation
        .as_deref()
        .map(|s| decode_enum("documentation status", s))
        .transpose()?,
      notes:              self.notes,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}
