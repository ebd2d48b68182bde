//! Input validation shared by every mutating operation.
//!
//! All rules run before anything is written, against the full record a
//! mutation would produce — for partial updates that means the merge of
//! the stored record and the patch. A rejected input leaves the store
//! untouched.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
  profile::{FieldRule, Profile},
  record::{LeaveRecord, LoadStatus, NewLeaveRecord},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{0} must not be blank")]
  BlankField(&'static str),

  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("{0} is not used by this deployment")]
  UnsupportedField(&'static str),

  #[error("{0} must contain digits only")]
  NotDigits(&'static str),

  #[error("end date {end} precedes start date {start}")]
  EndBeforeStart { start: NaiveDate, end: NaiveDate },

  #[error("load date {load} precedes start date {start}")]
  LoadBeforeStart { start: NaiveDate, load: NaiveDate },

  #[error("a loaded record must carry a load date")]
  LoadDateMissing,

  #[error("a pending record must not carry a load date")]
  LoadDateNotAllowed,

  #[error("month must be between 1 and 12, got {0}")]
  MonthOutOfRange(u32),
}

// ─── Rule helpers ────────────────────────────────────────────────────────────

fn is_blank(s: &str) -> bool { s.trim().is_empty() }

fn required_text(name: &'static str, value: &str) -> Result<(), ValidationError> {
  if is_blank(value) {
    return Err(ValidationError::BlankField(name));
  }
  Ok(())
}

/// Presence check for a profile-controlled field. Blank text counts as not
/// supplied.
fn ruled(
  name: &'static str,
  present: bool,
  rule: FieldRule,
) -> Result<(), ValidationError> {
  match rule {
    FieldRule::Absent if present => Err(ValidationError::UnsupportedField(name)),
    FieldRule::Required if !present => Err(ValidationError::MissingField(name)),
    _ => Ok(()),
  }
}

fn digits_only(name: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
  match value {
    Some(v) if !is_blank(v) && !v.chars().all(|c| c.is_ascii_digit()) => {
      Err(ValidationError::NotDigits(name))
    }
    _ => Ok(()),
  }
}

fn end_after_start(
  start: NaiveDate,
  end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
  match end {
    Some(end) if end < start => Err(ValidationError::EndBeforeStart { start, end }),
    _ => Ok(()),
  }
}

fn text_present(value: Option<&str>) -> bool {
  value.is_some_and(|s| !is_blank(s))
}

// ─── Shared field rules ──────────────────────────────────────────────────────

struct Fields<'a> {
  last_name:          &'a str,
  first_name:         &'a str,
  national_id:        Option<&'a str>,
  family_national_id: Option<&'a str>,
  start_date:         NaiveDate,
  end_date:           Option<NaiveDate>,
  legal_article:      Option<&'a str>,
  has_documentation:  bool,
}

fn validate_fields(f: &Fields<'_>, profile: &Profile) -> Result<(), ValidationError> {
  required_text("last name", f.last_name)?;
  required_text("first name", f.first_name)?;

  ruled("national id", text_present(f.national_id), profile.national_id)?;
  digits_only("national id", f.national_id)?;
  ruled(
    "family national id",
    text_present(f.family_national_id),
    profile.family_national_id,
  )?;
  digits_only("family national id", f.family_national_id)?;

  ruled("end date", f.end_date.is_some(), profile.end_date)?;
  end_after_start(f.start_date, f.end_date)?;

  ruled("legal article", text_present(f.legal_article), profile.legal_article)?;

  if !profile.track_documentation && f.has_documentation {
    return Err(ValidationError::UnsupportedField("documentation"));
  }
  Ok(())
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Validate the input to a create operation.
pub fn validate_new(
  input: &NewLeaveRecord,
  profile: &Profile,
) -> Result<(), ValidationError> {
  validate_fields(
    &Fields {
      last_name:          &input.last_name,
      first_name:         &input.first_name,
      national_id:        input.national_id.as_deref(),
      family_national_id: input.family_national_id.as_deref(),
      start_date:         input.start_date,
      end_date:           input.end_date,
      legal_article:      input.legal_article.as_deref(),
      has_documentation:  input.documentation.is_some(),
    },
    profile,
  )
}

/// Validate a full record, typically the merge result of an update.
///
/// On top of the field rules this checks the load coupling: a record is
/// `Loaded` exactly when it carries a load date, and that date never
/// precedes the start date.
pub fn validate_record(
  record: &LeaveRecord,
  profile: &Profile,
) -> Result<(), ValidationError> {
  validate_fields(
    &Fields {
      last_name:          &record.last_name,
      first_name:         &record.first_name,
      national_id:        record.national_id.as_deref(),
      family_national_id: record.family_national_id.as_deref(),
      start_date:         record.start_date,
      end_date:           record.end_date,
      legal_article:      record.legal_article.as_deref(),
      has_documentation:  record.documentation.is_some(),
    },
    profile,
  )?;

  match (record.load_status, record.load_date) {
    (LoadStatus::Loaded, None) => Err(ValidationError::LoadDateMissing),
    (LoadStatus::Pending, Some(_)) => Err(ValidationError::LoadDateNotAllowed),
    (LoadStatus::Loaded, Some(load)) if load < record.start_date => {
      Err(ValidationError::LoadBeforeStart { start: record.start_date, load })
    }
    _ => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::record::Role;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn input() -> NewLeaveRecord {
    NewLeaveRecord::new("GOMEZ", "Ana", Role::Teacher, date(2024, 3, 5))
  }

  fn record() -> LeaveRecord {
    LeaveRecord {
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
    }
  }

  #[test]
  fn valid_minimal_input_passes() {
    assert_eq!(validate_new(&input(), &Profile::standard()), Ok(()));
  }

  #[test]
  fn blank_names_are_rejected() {
    let mut i = input();
    i.last_name = "   ".into();
    assert_eq!(
      validate_new(&i, &Profile::standard()),
      Err(ValidationError::BlankField("last name"))
    );

    let mut i = input();
    i.first_name = String::new();
    assert_eq!(
      validate_new(&i, &Profile::standard()),
      Err(ValidationError::BlankField("first name"))
    );
  }

  #[test]
  fn end_before_start_is_rejected() {
    let mut i = input();
    i.end_date = Some(date(2024, 3, 1));
    assert!(matches!(
      validate_new(&i, &Profile::standard()),
      Err(ValidationError::EndBeforeStart { .. })
    ));
  }

  #[test]
  fn end_equal_to_start_is_accepted() {
    let mut i = input();
    i.end_date = Some(i.start_date);
    assert_eq!(validate_new(&i, &Profile::standard()), Ok(()));
  }

  #[test]
  fn national_id_rules_follow_the_profile() {
    // The standard profile does not use the field at all.
    let mut i = input();
    i.national_id = Some("12345678".into());
    assert_eq!(
      validate_new(&i, &Profile::standard()),
      Err(ValidationError::UnsupportedField("national id"))
    );

    // The extended profile requires it, digits only.
    let i = input();
    assert_eq!(
      validate_new(&i, &Profile::extended()),
      Err(ValidationError::MissingField("national id"))
    );

    let mut i = input();
    i.national_id = Some("12.345.678".into());
    assert_eq!(
      validate_new(&i, &Profile::extended()),
      Err(ValidationError::NotDigits("national id"))
    );

    let mut i = input();
    i.national_id = Some("12345678".into());
    assert_eq!(validate_new(&i, &Profile::extended()), Ok(()));
  }

  #[test]
  fn family_national_id_is_optional_but_digits_only() {
    let mut i = input();
    i.national_id = Some("12345678".into());
    i.family_national_id = Some("9x9".into());
    assert_eq!(
      validate_new(&i, &Profile::extended()),
      Err(ValidationError::NotDigits("family national id"))
    );
  }

  #[test]
  fn loaded_without_date_is_rejected() {
    let mut r = record();
    r.load_status = LoadStatus::Loaded;
    assert_eq!(
      validate_record(&r, &Profile::standard()),
      Err(ValidationError::LoadDateMissing)
    );
  }

  #[test]
  fn pending_with_date_is_rejected() {
    let mut r = record();
    r.load_date = Some(date(2024, 3, 10));
    assert_eq!(
      validate_record(&r, &Profile::standard()),
      Err(ValidationError::LoadDateNotAllowed)
    );
  }

  #[test]
  fn load_date_before_start_is_rejected() {
    let mut r = record();
    r.load_status = LoadStatus::Loaded;
    r.load_date = Some(date(2024, 3, 1));
    assert!(matches!(
      validate_record(&r, &Profile::standard()),
      Err(ValidationError::LoadBeforeStart { .. })
    ));
  }

  #[test]
  fn documentation_requires_a_tracking_profile() {
    let mut i = input();
    i.documentation = Some(Default::default());
    assert_eq!(
      validate_new(&i, &Profile::standard()),
      Err(ValidationError::UnsupportedField("documentation"))
    );
  }
}
