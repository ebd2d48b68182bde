//! Monthly report types — computed read models, never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  record::{LeaveRecord, LoadStatus, Role},
  validate::ValidationError,
};

// ─── Period ──────────────────────────────────────────────────────────────────

/// First and last calendar day of a reporting month, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
  pub first_day: NaiveDate,
  pub last_day:  NaiveDate,
}

impl ReportPeriod {
  /// The period covering `year`/`month`.
  pub fn for_month(year: i32, month: u32) -> Result<Self, ValidationError> {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
      .ok_or(ValidationError::MonthOutOfRange(month))?;
    let next_first = if month == 12 {
      NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
      NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(ValidationError::MonthOutOfRange(month))?;
    let last_day = next_first
      .pred_opt()
      .ok_or(ValidationError::MonthOutOfRange(month))?;
    Ok(Self { first_day, last_day })
  }

  pub fn contains(&self, date: NaiveDate) -> bool {
    self.first_day <= date && date <= self.last_day
  }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

/// Aggregate counts over a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
  pub total:    usize,
  pub pending:  usize,
  pub loaded:   usize,
  pub teachers: usize,
  pub aides:    usize,
}

impl ReportSummary {
  pub fn from_records(records: &[LeaveRecord]) -> Self {
    let mut summary = Self { total: records.len(), ..Self::default() };
    for record in records {
      match record.load_status {
        LoadStatus::Pending => summary.pending += 1,
        LoadStatus::Loaded => summary.loaded += 1,
      }
      match record.role {
        Role::Teacher => summary.teachers += 1,
        Role::Aide => summary.aides += 1,
      }
    }
    summary
  }
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// One month of records with their aggregate counts, as returned by
/// [`LeaveStore::monthly_report`](crate::store::LeaveStore::monthly_report).
/// Records are ordered by start date, then last name, then first name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
  pub period:  ReportPeriod,
  pub records: Vec<LeaveRecord>,
  pub summary: ReportSummary,
}
