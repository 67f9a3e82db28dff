//! Report command implementation.
//!
//! Runs every extraction pass over one source and prints the combined
//! analysis. This is what `docsift` does when no command is given.

use super::{export_and_report, print_heading, print_skipped, resolve_export};
use crate::cli::ReportArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use docsift_domain::DocumentSource;
use docsift_extractor::Extractor;
use docsift_stats::{representative_dimensionality, MemorySummary};
use std::fmt::Display;
use tracing::info;

/// Execute the report command.
pub fn execute_report<S>(
    args: ReportArgs,
    source: &S,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    S: DocumentSource,
    S::Error: Display,
{
    let settings = &config.settings;
    let sample_size = args.sample.unwrap_or(settings.sample_size);
    let top_players = args.top.unwrap_or(settings.top_players);

    let extractor = Extractor::new(source);
    let players = extractor.player_descriptions(Some(settings.player_limit))?;
    let memories = extractor.memories()?;
    let messages = extractor.messages(Some(settings.message_limit))?;
    let embeddings = extractor.embeddings()?;

    info!(
        players = players.len(),
        memories = memories.len(),
        messages = messages.len(),
        embeddings = embeddings.len(),
        "report passes complete"
    );

    let summary = MemorySummary::compute(&memories.entities);

    match formatter.format() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                "players": players.entities,
                "memories": {
                    "summary": summary,
                    "sample": memories.entities.iter().take(sample_size).collect::<Vec<_>>(),
                },
                "messages": messages.entities.iter().take(sample_size).collect::<Vec<_>>(),
                "embeddings": {
                    "count": embeddings.len(),
                    "dimensionality": representative_dimensionality(&embeddings.entities),
                },
            }))?);
        }
        OutputFormat::Quiet => {
            println!("players: {}", players.len());
            println!("memories: {}", memories.len());
            println!("messages: {}", messages.len());
            println!("embeddings: {}", embeddings.len());
        }
        OutputFormat::Table => {
            print_heading(formatter, &format!("Players ({})", players.len()));
            print_skipped(formatter, &players.report);
            println!("{}", formatter.format_players(&players.entities)?);

            print_heading(formatter, "Memories");
            print_skipped(formatter, &memories.report);
            println!("{}", formatter.format_summary(&summary, top_players)?);
            println!();
            println!("{}", formatter.info("Sample memories"));
            let sample: Vec<_> = memories.entities.iter().take(sample_size).collect();
            println!("{}", formatter.format_memories(&sample)?);

            print_heading(formatter, &format!("Recent messages ({})", messages.len()));
            print_skipped(formatter, &messages.report);
            let shown = &messages.entities[..sample_size.min(messages.len())];
            println!("{}", formatter.format_messages(shown)?);

            print_heading(formatter, "Embeddings");
            print_skipped(formatter, &embeddings.report);
            println!("{}", formatter.format_embeddings(&embeddings.entities)?);
            println!();
        }
    }

    // One answer covers every collection
    if let Some(format) = resolve_export(&args.export, formatter, "data")? {
        export_and_report(&memories.entities, format, &args.export, config, formatter)?;
        export_and_report(&messages.entities, format, &args.export, config, formatter)?;
        export_and_report(&players.entities, format, &args.export, config, formatter)?;
        export_and_report(&embeddings.entities, format, &args.export, config, formatter)?;
    }

    Ok(())
}
