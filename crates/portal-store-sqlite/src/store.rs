//! The SQLite implementation of [`PortalStore`].

use std::path::Path;

use rusqlite::{ErrorCode, OptionalExtension as _, Row, types::Value};

use portal_core::{
  Collection, FETCH_LIMIT,
  material::{Material, MaterialFilter, MaterialPatch},
  paper::{Paper, PaperFilter, PaperPatch},
  request::RequestRecord,
  store::PortalStore,
  subject::Subject,
};

use crate::{
  Error, Result,
  encode::{
    MATERIAL_COLUMNS, PAPER_COLUMNS, REQUEST_COLUMNS, RawRequest, SUBJECT_COLUMNS, encode_dt,
    material_from_row, paper_from_row, subject_from_row,
  },
  schema::{PRAGMAS, table_ddl},
};

// `COALESCE(?n, col)` keeps the stored value for every NULL parameter, so a
// single statement merges a partial update atomically.

const UPDATE_PAPER: &str = "
UPDATE papers SET
    title      = COALESCE(?2, title),
    subject    = COALESCE(?3, subject),
    department = COALESCE(?4, department),
    year       = COALESCE(?5, year),
    pdf_url    = COALESCE(?6, pdf_url),
    kind       = COALESCE(?7, kind)
WHERE id = ?1
RETURNING id, title, subject, department, year, pdf_url, kind";

const UPDATE_MATERIAL: &str = "
UPDATE materials SET
    title       = COALESCE(?2, title),
    subject     = COALESCE(?3, subject),
    kind        = COALESCE(?4, kind),
    url         = COALESCE(?5, url),
    description = COALESCE(?6, description)
WHERE id = ?1
RETURNING id, title, subject, kind, url, description";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A portal document store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        for collection in Collection::ALL {
          conn.execute_batch(table_ddl(collection))?;
        }
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT` and map every row.
  async fn select<T, F>(&self, sql: String, values: Vec<Value>, map: F) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: Fn(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(values), map)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Fetch the single document with domain key `id`.
  async fn select_by_id<T, F>(
    &self,
    collection: Collection,
    columns: &'static str,
    id: String,
    map: F,
  ) -> Result<Option<T>>
  where
    T: Send + 'static,
    F: Fn(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let sql = format!("SELECT {columns} FROM {} WHERE id = ?1", collection.as_str());
    let row = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, rusqlite::params![id], map).optional()?))
      .await?;
    Ok(row)
  }

  /// Insert one row. A taken `id` surfaces as
  /// [`portal_core::Error::DuplicateId`] rather than a raw constraint error.
  async fn insert_row(
    &self,
    collection: Collection,
    columns: &'static str,
    values: Vec<Value>,
    id: String,
  ) -> Result<()> {
    let placeholders = (1..=values.len())
      .map(|i| format!("?{i}"))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!("INSERT INTO {} ({columns}) VALUES ({placeholders})", collection.as_str());

    let inserted = self
      .conn
      .call(move |conn| match conn.execute(&sql, rusqlite::params_from_iter(values)) {
        Ok(_) => Ok(true),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
          Ok(false)
        }
        Err(e) => Err(e.into()),
      })
      .await?;

    if inserted {
      Ok(())
    } else {
      Err(Error::Core(portal_core::Error::DuplicateId { collection, id }))
    }
  }

  async fn delete_by_id(&self, collection: Collection, id: String) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", collection.as_str());
    let deleted = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![id])?))
      .await?;
    Ok(deleted > 0)
  }
}

/// Append `WHERE` clauses for the supplied `(column, value)` pairs, then the
/// insertion-order sort and the fetch ceiling.
fn filtered_select(
  collection: Collection,
  columns: &str,
  conditions: Vec<(&str, Value)>,
) -> (String, Vec<Value>) {
  let mut sql = format!("SELECT {columns} FROM {}", collection.as_str());
  let mut values = Vec::with_capacity(conditions.len());
  let mut clauses = Vec::with_capacity(conditions.len());
  for (column, value) in conditions {
    values.push(value);
    clauses.push(format!("{column} = ?{}", values.len()));
  }
  if !clauses.is_empty() {
    sql.push_str(" WHERE ");
    sql.push_str(&clauses.join(" AND "));
  }
  sql.push_str(&format!(" ORDER BY row_id LIMIT {FETCH_LIMIT}"));
  (sql, values)
}

// ─── PortalStore impl ────────────────────────────────────────────────────────

impl PortalStore for SqliteStore {
  type Error = Error;

  // ── Papers ────────────────────────────────────────────────────────────────

  async fn list_papers(&self, filter: PaperFilter) -> Result<Vec<Paper>> {
    let mut conditions = Vec::new();
    if let Some(year) = filter.year {
      conditions.push(("year", Value::from(year)));
    }
    if let Some(department) = filter.department {
      conditions.push(("department", Value::from(department)));
    }
    if let Some(subject) = filter.subject {
      conditions.push(("subject", Value::from(subject)));
    }
    let (sql, values) = filtered_select(Collection::Papers, PAPER_COLUMNS, conditions);
    self.select(sql, values, paper_from_row).await
  }

  async fn get_paper(&self, id: String) -> Result<Option<Paper>> {
    self
      .select_by_id(Collection::Papers, PAPER_COLUMNS, id, paper_from_row)
      .await
  }

  async fn insert_paper(&self, paper: Paper) -> Result<Paper> {
    let values = vec![
      Value::from(paper.id.clone()),
      Value::from(paper.title.clone()),
      Value::from(paper.subject.clone()),
      Value::from(paper.department.clone()),
      Value::from(paper.year),
      Value::from(paper.pdf_url.clone()),
      Value::from(paper.kind.clone()),
    ];
    self
      .insert_row(Collection::Papers, PAPER_COLUMNS, values, paper.id.clone())
      .await?;
    Ok(paper)
  }

  async fn update_paper(&self, id: String, patch: PaperPatch) -> Result<Option<Paper>> {
    let updated = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              UPDATE_PAPER,
              rusqlite::params![
                id,
                patch.title,
                patch.subject,
                patch.department,
                patch.year,
                patch.pdf_url,
                patch.kind,
              ],
              paper_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(updated)
  }

  async fn delete_paper(&self, id: String) -> Result<bool> {
    self.delete_by_id(Collection::Papers, id).await
  }

  // ── Materials ─────────────────────────────────────────────────────────────

  async fn list_materials(&self, filter: MaterialFilter) -> Result<Vec<Material>> {
    let conditions = filter
      .subject
      .map(|s| vec![("subject", Value::from(s))])
      .unwrap_or_default();
    let (sql, values) = filtered_select(Collection::Materials, MATERIAL_COLUMNS, conditions);
    self.select(sql, values, material_from_row).await
  }

  async fn get_material(&self, id: String) -> Result<Option<Material>> {
    self
      .select_by_id(Collection::Materials, MATERIAL_COLUMNS, id, material_from_row)
      .await
  }

  async fn insert_material(&self, material: Material) -> Result<Material> {
    let values = vec![
      Value::from(material.id.clone()),
      Value::from(material.title.clone()),
      Value::from(material.subject.clone()),
      Value::from(material.kind.clone()),
      Value::from(material.url.clone()),
      Value::from(material.description.clone()),
    ];
    self
      .insert_row(Collection::Materials, MATERIAL_COLUMNS, values, material.id.clone())
      .await?;
    Ok(material)
  }

  async fn update_material(&self, id: String, patch: MaterialPatch) -> Result<Option<Material>> {
    let updated = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              UPDATE_MATERIAL,
              rusqlite::params![
                id,
                patch.title,
                patch.subject,
                patch.kind,
                patch.url,
                patch.description,
              ],
              material_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(updated)
  }

  async fn delete_material(&self, id: String) -> Result<bool> {
    self.delete_by_id(Collection::Materials, id).await
  }

  // ── Requests ──────────────────────────────────────────────────────────────

  async fn list_requests(&self) -> Result<Vec<RequestRecord>> {
    let (sql, values) = filtered_select(Collection::Requests, REQUEST_COLUMNS, Vec::new());
    let raws = self.select(sql, values, RawRequest::from_row).await?;
    raws.into_iter().map(RawRequest::into_request).collect()
  }

  async fn insert_request(&self, request: RequestRecord) -> Result<RequestRecord> {
    let values = vec![
      Value::from(request.id.clone()),
      Value::from(request.name.clone()),
      Value::from(request.email.clone()),
      Value::from(request.department.clone()),
      Value::from(request.details.clone()),
      Value::from(encode_dt(request.timestamp)),
    ];
    self
      .insert_row(Collection::Requests, REQUEST_COLUMNS, values, request.id.clone())
      .await?;
    Ok(request)
  }

  async fn delete_request(&self, id: String) -> Result<bool> {
    self.delete_by_id(Collection::Requests, id).await
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let (sql, values) = filtered_select(Collection::Subjects, SUBJECT_COLUMNS, Vec::new());
    self.select(sql, values, subject_from_row).await
  }

  async fn insert_subject(&self, subject: Subject) -> Result<Subject> {
    let values = vec![
      Value::from(subject.id.clone()),
      Value::from(subject.name.clone()),
      Value::from(subject.department.clone()),
    ];
    self
      .insert_row(Collection::Subjects, SUBJECT_COLUMNS, values, subject.id.clone())
      .await?;
    Ok(subject)
  }

  // ── Collections ───────────────────────────────────────────────────────────

  async fn count(&self, collection: Collection) -> Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {}", collection.as_str());
    let n: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, [], |r| r.get(0))?))
      .await?;
    Ok(n.max(0) as u64)
  }

  async fn clear(&self, collection: Collection) -> Result<u64> {
    let sql = format!("DELETE FROM {}", collection.as_str());
    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, [])?))
      .await?;
    tracing::debug!(%collection, removed, "cleared collection");
    Ok(removed as u64)
  }

  async fn drop_collection(&self, collection: Collection) -> Result<()> {
    let drop_sql = format!("DROP TABLE IF EXISTS {};", collection.as_str());
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(&drop_sql)?;
        tx.execute_batch(table_ddl(collection))?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    tracing::debug!(%collection, "dropped collection");
    Ok(())
  }
}
