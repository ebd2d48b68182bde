//! Search parameters for [`LeaveStore::search`](crate::store::LeaveStore::search).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{DocumentationStatus, LoadStatus, Role};

/// Filters for a record search. All provided filters must match (AND).
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
  /// Case-insensitive substring match on the last name.
  pub last_name_contains:     Option<String>,
  /// Case-insensitive substring match on the first name.
  pub first_name_contains:    Option<String>,
  /// Case-insensitive substring match on the legal article.
  pub legal_article_contains: Option<String>,
  pub role:                   Option<Role>,
  pub load_status:            Option<LoadStatus>,
  pub documentation:          Option<DocumentationStatus>,
  /// `start_date >= x`.
  pub start_date_from:        Option<NaiveDate>,
  /// `end_date <= x`. Records without an end date never match this filter.
  pub end_date_to:            Option<NaiveDate>,
  pub order:                  SearchOrder,
}

/// Result ordering for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrder {
  /// Highest id first — the most recently created records on top.
  #[default]
  NewestFirst,
  /// Last name, then first name, then start date.
  Alphabetical,
}
