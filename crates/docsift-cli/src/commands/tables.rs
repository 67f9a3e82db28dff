//! Table and schema inspection commands.

use crate::error::Result;
use crate::output::Formatter;
use docsift_store::SqliteSource;

/// Execute the tables command.
pub fn execute_tables(source: &SqliteSource, formatter: &Formatter) -> Result<()> {
    let tables = source.table_names()?;
    println!("{}", formatter.format_tables(&tables)?);
    Ok(())
}

/// Execute the schema command.
pub fn execute_schema(table: &str, source: &SqliteSource, formatter: &Formatter) -> Result<()> {
    let columns = source.table_schema(table)?;
    println!("{}", formatter.format_schema(&columns)?);
    Ok(())
}
