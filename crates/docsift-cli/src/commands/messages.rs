//! Messages command implementation.

use super::{export_and_report, print_heading, print_skipped, resolve_export};
use crate::cli::MessagesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use docsift_domain::DocumentSource;
use docsift_extractor::Extractor;
use std::fmt::Display;

/// Execute the messages command.
///
/// Without `--limit` every message is read; the full report caps the scan at
/// the configured `message_limit` instead.
pub fn execute_messages<S>(
    args: MessagesArgs,
    source: &S,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    S: DocumentSource,
    S::Error: Display,
{
    let extraction = Extractor::new(source).messages(args.limit)?;
    let messages = extraction.entities;

    print_heading(formatter, &format!("Messages ({})", messages.len()));
    print_skipped(formatter, &extraction.report);

    let shown = match args.sample {
        Some(n) => &messages[..n.min(messages.len())],
        None => &messages[..],
    };
    println!("{}", formatter.format_messages(shown)?);

    if let Some(format) = resolve_export(&args.export, formatter, "messages")? {
        export_and_report(&messages, format, &args.export, config, formatter)?;
    }

    Ok(())
}
