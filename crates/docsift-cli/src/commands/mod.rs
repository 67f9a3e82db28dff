//! Command implementations.

pub mod embeddings;
pub mod memories;
pub mod messages;
pub mod players;
pub mod report;
pub mod tables;

pub use self::embeddings::execute_embeddings;
pub use self::memories::execute_memories;
pub use self::messages::execute_messages;
pub use self::players::execute_players;
pub use self::report::execute_report;
pub use self::tables::{execute_schema, execute_tables};

use crate::cli::{ExportArgs, ExportChoice};
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::export::{export_collection, ExportFormat, Exportable};
use crate::output::Formatter;
use docsift_extractor::ExtractionReport;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Print a section heading in table mode.
pub(crate) fn print_heading(formatter: &Formatter, title: &str) {
    if formatter.format() == OutputFormat::Table {
        println!("\n{}", formatter.heading(title));
    }
}

/// Mention skipped records of a pass in table mode.
pub(crate) fn print_skipped(formatter: &Formatter, report: &ExtractionReport) {
    if formatter.format() == OutputFormat::Table && report.malformed > 0 {
        let message = format!("{} malformed {} record(s) skipped", report.malformed, report.kind);
        println!("{}", formatter.warning(&message));
    }
}

/// Decide whether and how to export.
///
/// An explicit `--export` wins. Otherwise the user is asked in table mode;
/// JSON and quiet output never prompt so their stdout stays machine-readable.
pub(crate) fn resolve_export(
    args: &ExportArgs,
    formatter: &Formatter,
    what: &str,
) -> Result<Option<ExportFormat>> {
    match args.export {
        Some(choice) => Ok(from_choice(choice)),
        None if formatter.format() == OutputFormat::Table => {
            print!("Export {}? (json/csv/no): ", what);
            io::stdout().flush()?;
            let stdin = io::stdin();
            read_answer(&mut stdin.lock())
        }
        None => Ok(None),
    }
}

fn from_choice(choice: ExportChoice) -> Option<ExportFormat> {
    match choice {
        ExportChoice::Json => Some(ExportFormat::Json),
        ExportChoice::Csv => Some(ExportFormat::Csv),
        ExportChoice::No => None,
    }
}

/// Read one answer line; end of input means no.
fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<ExportFormat>> {
    let mut response = String::new();
    if input.read_line(&mut response)? == 0 {
        return Ok(None);
    }
    Ok(ExportFormat::from_answer(&response))
}

/// Directory exports go to: `--export-dir`, else the configured one.
pub(crate) fn export_dir(args: &ExportArgs, config: &Config) -> PathBuf {
    args.export_dir
        .clone()
        .unwrap_or_else(|| config.settings.export_dir.clone())
}

/// Write one collection and report where it went.
pub(crate) fn export_and_report<T: Exportable>(
    items: &[T],
    format: ExportFormat,
    args: &ExportArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let path = export_collection(items, format, &export_dir(args, config))?;
    eprintln!(
        "{}",
        formatter.success(&format!("Exported {} record(s) to {}", items.len(), path.display()))
    );
    Ok(())
}
