//! The leave record — the sole entity of the store.
//!
//! One record tracks one staff absence, from the moment the office hears
//! about it until it has been entered into the external GEI reporting
//! system. Updates overwrite in place; there is no soft delete and no
//! history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Store-assigned integer identifier, unique and immutable once created.
pub type RecordId = i64;

// ─── Enums ───────────────────────────────────────────────────────────────────

/// The staff role the leave applies to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  Teacher,
  Aide,
}

/// Whether the record has been entered into the external GEI system.
///
/// The intended transition is one-way, `Pending → Loaded`, via
/// [`LeaveStore::mark_loaded`](crate::store::LeaveStore::mark_loaded).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LoadStatus {
  #[default]
  Pending,
  Loaded,
}

/// Whether the supporting paperwork has been uploaded.
///
/// Only tracked by deployments whose [`Profile`](crate::profile::Profile)
/// has `track_documentation` enabled; elsewhere the field stays `None`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentationStatus {
  #[default]
  Pending,
  Uploaded,
}

// ─── LeaveRecord ─────────────────────────────────────────────────────────────

/// A staff leave record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
  pub id:                 RecordId,
  pub last_name:          String,
  pub first_name:         String,
  pub national_id:        Option<String>,
  pub family_national_id: Option<String>,
  pub role:               Role,
  pub start_date:         NaiveDate,
  pub end_date:           Option<NaiveDate>,
  /// Citation of the regulation authorising the leave.
  pub legal_article:      Option<String>,
  /// Identifier issued by the external OSEP leave system.
  pub external_code:      Option<String>,
  pub load_status:        LoadStatus,
  /// Set iff `load_status` is `Loaded`; never precedes `start_date`.
  pub load_date:          Option<NaiveDate>,
  pub documentation:      Option<DocumentationStatus>,
  pub notes:              Option<String>,
  /// Store-assigned timestamp; never changes after creation.
  pub created_at:         DateTime<Utc>,
}

// ─── NewLeaveRecord ──────────────────────────────────────────────────────────

/// Input to [`LeaveStore::create`](crate::store::LeaveStore::create).
///
/// `id`, `created_at`, and the load fields are always set by the store;
/// they are not accepted from callers. A freshly created record starts
/// [`LoadStatus::Pending`] with no load date.
#[derive(Debug, Clone)]
pub struct NewLeaveRecord {
  pub last_name:          String,
  pub first_name:         String,
  pub national_id:        Option<String>,
  pub family_national_id: Option<String>,
  pub role:               Role,
  pub start_date:         NaiveDate,
  pub end_date:           Option<NaiveDate>,
  pub legal_article:      Option<String>,
  pub external_code:      Option<String>,
  /// Defaulted to `Pending` by the store when the profile tracks
  /// documentation; must stay `None` otherwise.
  pub documentation:      Option<DocumentationStatus>,
  pub notes:              Option<String>,
}

impl NewLeaveRecord {
  /// Convenience constructor with every optional field unset.
  pub fn new(
    last_name: impl Into<String>,
    first_name: impl Into<String>,
    role: Role,
    start_date: NaiveDate,
  ) -> Self {
    Self {
      last_name: last_name.into(),
      first_name: first_name.into(),
      national_id: None,
      family_national_id: None,
      role,
      start_date,
      end_date: None,
      legal_article: None,
      external_code: None,
      documentation: None,
      notes: None,
    }
  }
}

// ─── LeaveRecordPatch ────────────────────────────────────────────────────────

/// Partial update for [`LeaveStore::update`](crate::store::LeaveStore::update).
///
/// Two levels of `Option` distinguish "leave the field untouched" (outer
/// `None`) from "clear the field" (`Some(None)`). Fields that are required
/// by every profile only have the outer level.
#[derive(Debug, Clone, Default)]
pub struct LeaveRecordPatch {
  pub last_name:          Option<String>,
  pub first_name:         Option<String>,
  pub national_id:        Option<Option<String>>,
  pub family_national_id: Option<Option<String>>,
  pub role:               Option<Role>,
  pub start_date:         Option<NaiveDate>,
  pub end_date:           Option<Option<NaiveDate>>,
  pub legal_article:      Option<Option<String>>,
  pub external_code:      Option<Option<String>>,
  pub load_status:        Option<LoadStatus>,
  pub load_date:          Option<Option<NaiveDate>>,
  pub documentation:      Option<DocumentationStatus>,
  pub notes:              Option<Option<String>>,
}

impl LeaveRecord {
  /// The record this patch would produce. `self` is left untouched; `id`
  /// and `created_at` are immutable and never patched.
  pub fn merged(&self, patch: &LeaveRecordPatch) -> LeaveRecord {
    LeaveRecord {
      id:                 self.id,
      last_name:          patch.last_name.clone().unwrap_or_else(|| self.last_name.clone()),
      first_name:         patch.first_name.clone().unwrap_or_else(|| self.first_name.clone()),
      national_id:        patch.national_id.clone().unwrap_or_else(|| self.national_id.clone()),
      family_national_id: patch
        .family_national_id
        .clone()
        .unwrap_or_else(|| self.family_national_id.clone()),
      role:               patch.role.unwrap_or(self.role),
      start_date:         patch.start_date.unwrap_or(self.start_date),
      end_date:           patch.end_date.unwrap_or(self.end_date),
      legal_article:      patch
        .legal_article
        .clone()
        .unwrap_or_else(|| self.legal_article.clone()),
      external_code:      patch
        .external_code
        .clone()
        .unwrap_or_else(|| self.external_code.clone()),
      load_status:        patch.load_status.unwrap_or(self.load_status),
      load_date:          patch.load_date.unwrap_or(self.load_date),
      documentation:      patch.documentation.or(self.documentation),
      notes:              patch.notes.clone().unwrap_or_else(|| self.notes.clone()),
      created_at:         self.created_at,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record() -> LeaveRecord {
    LeaveRecord {
      id:                 7,
      last_name:          "GOMEZ".into(),
      first_name:         "Ana".into(),
      national_id:        None,
      family_national_id: None,
      role:               Role::Teacher,
      start_date:         NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
      end_date:           None,
      legal_article:      Some("Art. 44".into()),
      external_code:      None,
      load_status:        LoadStatus::Pending,
      load_date:          None,
      documentation:      None,
      notes:              None,
      created_at:         Utc::now(),
    }
  }

  #[test]
  fn empty_patch_is_identity() {
    let r = record();
    assert_eq!(r.merged(&LeaveRecordPatch::default()), r);
  }

  #[test]
  fn patch_touches_only_named_fields() {
    let r = record();
    let merged = r.merged(&LeaveRecordPatch {
      notes: Some(Some("called in".into())),
      ..Default::default()
    });
    assert_eq!(merged.notes.as_deref(), Some("called in"));
    assert_eq!(merged.last_name, r.last_name);
    assert_eq!(merged.legal_article, r.legal_article);
    assert_eq!(merged.created_at, r.created_at);
  }

  #[test]
  fn inner_none_clears_an_optional_field() {
    let r = record();
    let merged = r.merged(&LeaveRecordPatch {
      legal_article: Some(None),
      ..Default::default()
    });
    assert_eq!(merged.legal_article, None);
  }

  #[test]
  fn enum_string_forms_round_trip() {
    assert_eq!(Role::Teacher.to_string(), "teacher");
    assert_eq!("aide".parse::<Role>().unwrap(), Role::Aide);
    assert_eq!(LoadStatus::Loaded.to_string(), "loaded");
    assert_eq!("pending".parse::<LoadStatus>().unwrap(), LoadStatus::Pending);
    assert_eq!("uploaded".parse::<DocumentationStatus>().unwrap(), DocumentationStatus::Uploaded);
  }
}
