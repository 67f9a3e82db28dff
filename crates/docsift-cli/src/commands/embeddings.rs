//! Embeddings command implementation.

use super::{export_and_report, print_heading, print_skipped, resolve_export};
use crate::cli::EmbeddingsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use docsift_domain::DocumentSource;
use docsift_extractor::Extractor;
use std::fmt::Display;

/// Execute the embeddings command.
pub fn execute_embeddings<S>(
    args: EmbeddingsArgs,
    source: &S,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    S: DocumentSource,
    S::Error: Display,
{
    let extraction = Extractor::new(source).embeddings()?;
    let embeddings = extraction.entities;

    print_heading(formatter, "Embeddings");
    print_skipped(formatter, &extraction.report);
    println!("{}", formatter.format_embeddings(&embeddings)?);

    if let Some(format) = resolve_export(&args.export, formatter, "embeddings")? {
        export_and_report(&embeddings, format, &args.export, config, formatter)?;
    }

    Ok(())
}
