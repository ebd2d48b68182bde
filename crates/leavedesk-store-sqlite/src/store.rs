//! [`SqliteStore`] — the SQLite implementation of [`LeaveStore`].

use std::path::Path;

use chrono::{Local, NaiveDate, Utc};
use rusqlite::OptionalExtension as _;

use leavedesk_core::{
  Error as CoreError, Result as CoreResult,
  profile::Profile,
  query::{SearchOrder, SearchQuery},
  record::{LeaveRecord, LeaveRecordPatch, LoadStatus, NewLeaveRecord, RecordId},
  report::{MonthlyReport, ReportPeriod, ReportSummary},
  store::LeaveStore,
  validate::{ValidationError, validate_new, validate_record},
};

use crate::{
  Error, Result,
  encode::{COLUMNS, RawRecord, encode_date, encode_dt},
  schema::run_migrations,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A leave-record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// operation is one `call` onto the connection's background thread; no
/// transaction spans operations, and single-statement writes rely on
/// SQLite's per-statement atomicity.
#[derive(Clone)]
pub struct SqliteStore {
  conn:    tokio_rusqlite::Connection,
  profile: Profile,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and bring its schema up to date.
  pub async fn open(path: impl AsRef<Path>, profile: Profile) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, profile };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(profile: Profile) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, profile };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        run_migrations(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The schema version of the underlying file.
  pub async fn schema_version(&self) -> Result<i64> {
    let version = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))?)
      })
      .await?;
    Ok(version)
  }

  /// Fetch one row; `None` when absent.
  async fn fetch(&self, id: RecordId) -> Result<Option<LeaveRecord>> {
    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM leave_records WHERE id = ?1"),
              rusqlite::params![id],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  /// Insert a validated record and return the rowid the store assigned.
  async fn insert(&self, record: &LeaveRecord) -> Result<RecordId> {
    let last_name          = record.last_name.clone();
    let first_name         = record.first_name.clone();
    let national_id        = record.national_id.clone();
    let family_national_id = record.family_national_id.clone();
    let role_str           = record.role.to_string();
    let start_str          = encode_date(record.start_date);
    let end_str            = record.end_date.map(encode_date);
    let legal_article      = record.legal_article.clone();
    let external_code      = record.external_code.clone();
    let status_str         = record.load_status.to_string();
    let load_str           = record.load_date.map(encode_date);
    let documentation_str  = record.documentation.map(|d| d.to_string());
    let notes              = record.notes.clone();
    let created_str        = encode_dt(record.created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO leave_records (
             last_name, first_name, national_id, family_national_id, role,
             start_date, end_date, legal_article, external_code,
             load_status, load_date, documentation, notes, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
          rusqlite::params![
            last_name,
            first_name,
            national_id,
            family_national_id,
            role_str,
            start_str,
            end_str,
            legal_article,
            external_code,
            status_str,
            load_str,
            documentation_str,
            notes,
            created_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  /// Overwrite every mutable column of `record`'s row in one statement.
  async fn write_back(&self, record: &LeaveRecord) -> Result<()> {
    let id                 = record.id;
    let last_name          = record.last_name.clone();
    let first_name         = record.first_name.clone();
    let national_id        = record.national_id.clone();
    let family_national_id = record.family_national_id.clone();
    let role_str           = record.role.to_string();
    let start_str          = encode_date(record.start_date);
    let end_str            = record.end_date.map(encode_date);
    let legal_article      = record.legal_article.clone();
    let external_code      = record.external_code.clone();
    let status_str         = record.load_status.to_string();
    let load_str           = record.load_date.map(encode_date);
    let documentation_str  = record.documentation.map(|d| d.to_string());
    let notes              = record.notes.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE leave_records SET
             last_name = ?1, first_name = ?2, national_id = ?3,
             family_national_id = ?4, role = ?5, start_date = ?6,
             end_date = ?7, legal_article = ?8, external_code = ?9,
             load_status = ?10, load_date = ?11, documentation = ?12,
             notes = ?13
           WHERE id = ?14",
          rusqlite::params![
            last_name,
            first_name,
            national_id,
            family_national_id,
            role_str,
            start_str,
            end_str,
            legal_article,
            external_code,
            status_str,
            load_str,
            documentation_str,
            notes,
            id,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn select_many(&self, sql: String, params: SearchParams) -> Result<Vec<LeaveRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![
              params.last_name,
              params.first_name,
              params.legal_article,
              params.role,
              params.load_status,
              params.documentation,
              params.start_from,
              params.end_to,
            ],
            RawRecord::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}

/// Owned, pre-encoded filter values handed to the connection thread.
struct SearchParams {
  last_name:     Option<String>,
  first_name:    Option<String>,
  legal_article: Option<String>,
  role:          Option<String>,
  load_status:   Option<String>,
  documentation: Option<String>,
  start_from:    Option<String>,
  end_to:        Option<String>,
}

// ─── LeaveStore impl ─────────────────────────────────────────────────────────

impl LeaveStore for SqliteStore {
  fn profile(&self) -> &Profile { &self.profile }

  async fn create(&self, input: NewLeaveRecord) -> CoreResult<LeaveRecord> {
    validate_new(&input, &self.profile)?;

    let documentation = if self.profile.track_documentation {
      Some(input.documentation.unwrap_or_default())
    } else {
      None
    };

    let mut record = LeaveRecord {
      id:                 0,
      last_name:          input.last_name,
      first_name:         input.first_name,
      national_id:        input.national_id,
      family_national_id: input.family_national_id,
      role:               input.role,
      start_date:         input.start_date,
      end_date:           input.end_date,
      legal_article:      input.legal_article,
      external_code:      input.external_code,
      load_status:        LoadStatus::Pending,
      load_date:          None,
      documentation,
      notes:              input.notes,
      created_at:         Utc::now(),
    };

    record.id = self.insert(&record).await?;
    Ok(record)
  }

  async fn get(&self, id: RecordId) -> CoreResult<LeaveRecord> {
    self
      .fetch(id)
      .await?
      .ok_or(CoreError::RecordNotFound(id))
  }

  async fn update(&self, id: RecordId, patch: LeaveRecordPatch) -> CoreResult<LeaveRecord> {
    let current = self
      .fetch(id)
      .await?
      .ok_or(CoreError::RecordNotFound(id))?;

    let merged = current.merged(&patch);
    validate_record(&merged, &self.profile)?;

    self.write_back(&merged).await?;
    Ok(merged)
  }

  async fn delete(&self, id: RecordId) -> CoreResult<()> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM leave_records WHERE id = ?1", rusqlite::params![id])?)
      })
      .await
      .map_err(Error::Database)?;

    if affected == 0 {
      return Err(CoreError::RecordNotFound(id));
    }
    Ok(())
  }

  async fn search(&self, query: &SearchQuery) -> CoreResult<Vec<LeaveRecord>> {
    // Every filter is optional: a NULL parameter disables its guard, so
    // one statement covers all filter combinations. Text filters use LIKE
    // (case-insensitive for ASCII); a record with a NULL column never
    // matches its guard, which is exactly the end_date_to contract.
    let order_sql = match query.order {
      SearchOrder::NewestFirst => "id DESC",
      SearchOrder::Alphabetical => {
        "last_name COLLATE NOCASE, first_name COLLATE NOCASE, start_date"
      }
    };

    let sql = format!(
      "SELECT {COLUMNS} FROM leave_records
       WHERE (?1 IS NULL OR last_name LIKE '%' || ?1 || '%')
         AND (?2 IS NULL OR first_name LIKE '%' || ?2 || '%')
         AND (?3 IS NULL OR legal_article LIKE '%' || ?3 || '%')
         AND (?4 IS NULL OR role = ?4)
         AND (?5 IS NULL OR load_status = ?5)
         AND (?6 IS NULL OR documentation = ?6)
         AND (?7 IS NULL OR start_date >= ?7)
         AND (?8 IS NULL OR end_date <= ?8)
       ORDER BY {order_sql}"
    );

    let params = SearchParams {
      last_name:     query.last_name_contains.clone(),
      first_name:    query.first_name_contains.clone(),
      legal_article: query.legal_article_contains.clone(),
      role:          query.role.map(|r| r.to_string()),
      load_status:   query.load_status.map(|s| s.to_string()),
      documentation: query.documentation.map(|d| d.to_string()),
      start_from:    query.start_date_from.map(encode_date),
      end_to:        query.end_date_to.map(encode_date),
    };

    Ok(self.select_many(sql, params).await?)
  }

  async fn mark_loaded(
    &self,
    id: RecordId,
    date: Option<NaiveDate>,
  ) -> CoreResult<LeaveRecord> {
    let mut record = self
      .fetch(id)
      .await?
      .ok_or(CoreError::RecordNotFound(id))?;

    let load_date = date.unwrap_or_else(|| Local::now().date_naive());
    if load_date < record.start_date {
      return Err(
        ValidationError::LoadBeforeStart { start: record.start_date, load: load_date }.into(),
      );
    }

    record.load_status = LoadStatus::Loaded;
    record.load_date = Some(load_date);

    let status_str = record.load_status.to_string();
    let date_str   = encode_date(load_date);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE leave_records SET load_status = ?1, load_date = ?2 WHERE id = ?3",
          rusqlite::params![status_str, date_str, id],
        )?;
        Ok(())
      })
      .await
      .map_err(Error::Database)?;

    Ok(record)
  }

  async fn monthly_report(&self, year: i32, month: u32) -> CoreResult<MonthlyReport> {
    let period = ReportPeriod::for_month(year, month)?;

    let first_str = encode_date(period.first_day);
    let last_str  = encode_date(period.last_day);

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM leave_records
           WHERE start_date >= ?1 AND start_date <= ?2
           ORDER BY start_date, last_name COLLATE NOCASE, first_name COLLATE NOCASE"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![first_str, last_str], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Database)?;

    let records = raws
      .into_iter()
      .map(RawRecord::into_record)
      .collect::<Result<Vec<_>>>()?;
    let summary = ReportSummary::from_records(&records);

    Ok(MonthlyReport { period, records, summary })
  }
}
