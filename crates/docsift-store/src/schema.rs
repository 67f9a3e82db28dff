//! Table and column introspection

use crate::StoreError;
use rusqlite::{params, Connection};

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Column name
    pub name: String,

    /// Declared type (may be empty)
    pub data_type: String,

    /// Whether the column is declared NOT NULL
    pub not_null: bool,

    /// Position in the primary key, 0 when not part of it
    pub primary_key: i64,
}

pub(crate) fn table_names(conn: &Connection) -> Result<Vec<String>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(names)
}

pub(crate) fn table_columns(
    conn: &Connection,
    table: &str,
) -> Result<Vec<TableColumn>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid",
    )?;
    let columns = stmt
        .query_map(params![table], |row| {
            Ok(TableColumn {
                name: row.get(0)?,
                data_type: row.get(1)?,
                not_null: row.get(2)?,
                primary_key: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(StoreError::NotFound(format!("table '{}'", table)));
    }
    Ok(columns)
}
