//! docsift Storage Layer
//!
//! Implements the `DocumentSource` port over a SQLite snapshot of a
//! schema-less document store.
//!
//! # Layout
//!
//! The store keeps every record in one `documents` table:
//!
//! | column       | meaning                                   |
//! |--------------|-------------------------------------------|
//! | `id`         | opaque key (usually a BLOB)               |
//! | `json_value` | serialized JSON payload                   |
//! | `ts`         | timestamp, milliseconds since the epoch   |
//! | `deleted`    | soft-delete flag (0 or 1)                 |
//!
//! The database is opened read-only; nothing in this crate writes.
//!
//! # Examples
//!
//! ```no_run
//! use docsift_domain::{DocumentSource, EntityKind, ScanRequest};
//! use docsift_store::SqliteSource;
//!
//! let source = SqliteSource::open("convex_local_backend.sqlite3").unwrap();
//! let docs = source.scan(&ScanRequest::for_kind(EntityKind::Memory)).unwrap();
//! println!("{} memory candidates", docs.len());
//! ```

#![warn(missing_docs)]

mod schema;

pub use schema::TableColumn;

use docsift_domain::{DocumentId, DocumentSource, RawDocument, ScanOrder, ScanRequest};
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, OpenFlags, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Name of the table holding all documents
pub const DOCUMENTS_TABLE: &str = "documents";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database file does not exist
    #[error("Database not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Read-only SQLite implementation of [`DocumentSource`]
///
/// The connection is opened once and closed when the source is dropped.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteSource instance.
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    /// Open the database at `path` read-only
    ///
    /// Fails with [`StoreError::NotFound`] when the file does not exist, so a
    /// mistyped path never silently creates an empty database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::NotFound(path.display().to_string()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(path = %path.display(), "opened document store");
        Ok(Self { conn })
    }

    /// Wrap an existing connection
    ///
    /// Useful for in-memory databases in tests.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Names of all tables in the database
    pub fn table_names(&self) -> Result<Vec<String>, StoreError> {
        schema::table_names(&self.conn)
    }

    /// Column layout of `table`
    pub fn table_schema(&self, table: &str) -> Result<Vec<TableColumn>, StoreError> {
        schema::table_columns(&self.conn, table)
    }

    fn build_scan_sql(request: &ScanRequest) -> String {
        let mut sql = format!(
            "SELECT id, json_value, ts, deleted FROM {} WHERE deleted = 0",
            DOCUMENTS_TABLE
        );

        // instr() is a case-sensitive substring test, unlike LIKE
        for idx in 0..request.contains.len() {
            sql.push_str(&format!(" AND instr(json_value, ?{}) > 0", idx + 1));
        }

        if request.order == ScanOrder::RecentFirst {
            sql.push_str(" ORDER BY ts DESC");
        }

        if let Some(limit) = request.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql
    }

    fn document_from_row(row: &Row<'_>) -> rusqlite::Result<RawDocument> {
        let id = match row.get_ref(0)? {
            ValueRef::Blob(bytes) => DocumentId::Binary(bytes.to_vec()),
            ValueRef::Text(text) => DocumentId::Text(String::from_utf8_lossy(text).into_owned()),
            ValueRef::Integer(value) => DocumentId::Integer(value),
            ValueRef::Real(value) => DocumentId::Text(value.to_string()),
            ValueRef::Null => {
                return Err(rusqlite::Error::FromSqlConversionFailure(
                    0,
                    Type::Null,
                    Box::new(StoreError::InvalidData("document id is NULL".to_string())),
                ))
            }
        };

        let payload = match row.get_ref(1)? {
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                String::from_utf8_lossy(bytes).into_owned()
            }
            ValueRef::Null => String::new(),
            ValueRef::Integer(value) => value.to_string(),
            ValueRef::Real(value) => value.to_string(),
        };

        Ok(RawDocument {
            id,
            payload,
            timestamp: row.get(2)?,
            deleted: row.get(3)?,
        })
    }
}

impl DocumentSource for SqliteSource {
    type Error = StoreError;

    fn scan(&self, request: &ScanRequest) -> Result<Vec<RawDocument>, Self::Error> {
        let sql = Self::build_scan_sql(request);
        let mut stmt = self.conn.prepare(&sql)?;
        let params: Vec<&dyn rusqlite::ToSql> = request
            .contains
            .iter()
            .map(|term| term as &dyn rusqlite::ToSql)
            .collect();

        let docs = stmt
            .query_map(&params[..], Self::document_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(terms = ?request.contains, rows = docs.len(), "scanned documents");
        Ok(docs)
    }
}
