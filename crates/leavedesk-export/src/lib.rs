//! Pure serializers for leave-record lists.
//!
//! CSV for spreadsheet import and HTML for printing. Everything here is a
//! function of already-fetched data — no I/O, no store access. Which
//! columns appear depends on the deployment
//! [`Profile`](leavedesk_core::profile::Profile).

mod table;

pub mod csv;
pub mod html;
