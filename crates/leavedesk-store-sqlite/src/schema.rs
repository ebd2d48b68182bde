//! SQL schema for the leavedesk SQLite store.
//!
//! The schema is managed as an ordered list of migrations gated on
//! `PRAGMA user_version`: `MIGRATIONS[i]` brings a database at version `i`
//! to version `i + 1`. [`run_migrations`] applies the missing tail at
//! connection startup, so a file created by an older build gains the newer
//! columns on first open and an up-to-date file is left alone.

use rusqlite::Connection;

pub const MIGRATIONS: &[&str] = &[
  // v1 — base table.
  "
  CREATE TABLE IF NOT EXISTS leave_records (
      id            INTEGER PRIMARY KEY AUTOINCREMENT,
      last_name     TEXT NOT NULL,
      first_name    TEXT NOT NULL,
      role          TEXT NOT NULL,               -- 'teacher' | 'aide'
      start_date    TEXT NOT NULL,               -- ISO 8601 date
      end_date      TEXT,                        -- ISO 8601 date or NULL
      legal_article TEXT,
      external_code TEXT,
      load_status   TEXT NOT NULL DEFAULT 'pending',
      load_date     TEXT,                        -- ISO 8601 date or NULL
      notes         TEXT,
      created_at    TEXT NOT NULL                -- RFC 3339 UTC; store-assigned
  );

  CREATE INDEX IF NOT EXISTS leave_records_start_idx  ON leave_records(start_date);
  CREATE INDEX IF NOT EXISTS leave_records_status_idx ON leave_records(load_status);
  ",
  // v2 — national identity columns for deployments that require them.
  "
  ALTER TABLE leave_records ADD COLUMN national_id TEXT;
  ALTER TABLE leave_records ADD COLUMN family_national_id TEXT;
  ",
  // v3 — documentation tracking.
  "
  ALTER TABLE leave_records ADD COLUMN documentation TEXT;
  ",
];

/// Apply every migration newer than the file's `user_version`.
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
  let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
  for (i, step) in MIGRATIONS.iter().enumerate() {
    if (i as i64) < version {
      continue;
    }
    conn.execute_batch(step)?;
    conn.pragma_update(None, "user_version", i as i64 + 1)?;
  }
  Ok(())
}
