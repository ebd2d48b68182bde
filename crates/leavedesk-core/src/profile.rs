//! Deployment profiles.
//!
//! Different offices run this system with slightly different record
//! schemas: some require a national ID, some track a documentation status,
//! and they disagree on what makes a record "complete". A [`Profile`]
//! captures those differences as data so there is one record type and one
//! completeness rule instead of per-deployment forks.

use serde::{Deserialize, Serialize};

use crate::record::{LeaveRecord, LoadStatus};

// ─── Field rules ─────────────────────────────────────────────────────────────

/// Whether a profile-controlled field may or must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRule {
  /// The deployment does not use the field; supplying a value is rejected.
  Absent,
  Optional,
  Required,
}

impl FieldRule {
  pub fn is_absent(self) -> bool { matches!(self, Self::Absent) }
}

// ─── Completeness ────────────────────────────────────────────────────────────

/// Which fields count toward [`is_complete`], beyond the load status and
/// load date (which always count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessPolicy {
  pub end_date:      bool,
  pub legal_article: bool,
  pub external_code: bool,
}

/// The derived completeness flag — never stored, recomputed on read.
///
/// Blank text counts as missing, matching how operators leave form fields
/// empty.
pub fn is_complete(record: &LeaveRecord, policy: &CompletenessPolicy) -> bool {
  let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

  record.load_status == LoadStatus::Loaded
    && record.load_date.is_some()
    && (!policy.end_date || record.end_date.is_some())
    && (!policy.legal_article || filled(&record.legal_article))
    && (!policy.external_code || filled(&record.external_code))
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// Field rules and completeness policy for one deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  pub end_date:            FieldRule,
  pub legal_article:       FieldRule,
  pub national_id:         FieldRule,
  pub family_national_id:  FieldRule,
  pub track_documentation: bool,
  pub completeness:        CompletenessPolicy,
}

impl Profile {
  /// The baseline deployment: no national-ID columns, no documentation
  /// tracking. A record only counts as complete once the end date, legal
  /// article, and external code are all filled in on top of a confirmed
  /// load.
  pub fn standard() -> Self {
    Self {
      end_date:            FieldRule::Optional,
      legal_article:       FieldRule::Optional,
      national_id:         FieldRule::Absent,
      family_national_id:  FieldRule::Absent,
      track_documentation: false,
      completeness:        CompletenessPolicy {
        end_date:      true,
        legal_article: true,
        external_code: true,
      },
    }
  }

  /// The extended deployment: national ID required, family national ID
  /// accepted, documentation status tracked, and completeness relaxed to
  /// "loaded with a load date".
  pub fn extended() -> Self {
    Self {
      end_date:            FieldRule::Optional,
      legal_article:       FieldRule::Optional,
      national_id:         FieldRule::Required,
      family_national_id:  FieldRule::Optional,
      track_documentation: true,
      completeness:        CompletenessPolicy {
        end_date:      false,
        legal_article: false,
        external_code: false,
      },
    }
  }
}
