//! Memories command implementation.

use super::{export_and_report, print_heading, print_skipped, resolve_export};
use crate::cli::MemoriesArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use docsift_domain::{DocumentSource, Memory};
use docsift_extractor::Extractor;
use docsift_stats::{top_by_importance, MemorySummary};
use std::fmt::Display;

/// Execute the memories command.
pub fn execute_memories<S>(
    args: MemoriesArgs,
    source: &S,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    S: DocumentSource,
    S::Error: Display,
{
    let extractor = Extractor::new(source);
    let extraction = match &args.player {
        Some(player) => extractor.memories_for_player(player)?,
        None => extractor.memories()?,
    };
    let memories = extraction.entities;

    let sample_size = args.sample.unwrap_or(config.settings.sample_size);
    let top_players = args.top.unwrap_or(config.settings.top_players);

    if formatter.format() == OutputFormat::Json {
        // One document holding the whole listing
        let summary = MemorySummary::compute(&memories);
        let listing = serde_json::json!({
            "summary": summary,
            "memories": memories,
        });
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print_heading(formatter, "Memories");
        print_skipped(formatter, &extraction.report);

        if formatter.format() == OutputFormat::Table {
            let summary = MemorySummary::compute(&memories);
            println!("{}", formatter.format_summary(&summary, top_players)?);
            println!();
            let title = if args.by_importance {
                "Most important memories"
            } else {
                "Sample memories"
            };
            println!("{}", formatter.info(title));
        }

        let sample = sample_memories(&memories, sample_size, args.by_importance);
        println!("{}", formatter.format_memories(&sample)?);
    }

    if let Some(format) = resolve_export(&args.export, formatter, "memories")? {
        export_and_report(&memories, format, &args.export, config, formatter)?;
    }

    Ok(())
}

/// First `n` memories in scan order, or the `n` most important.
pub(crate) fn sample_memories(memories: &[Memory], n: usize, by_importance: bool) -> Vec<&Memory> {
    if by_importance {
        top_by_importance(memories, n)
    } else {
        memories.iter().take(n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(id: &str, importance: Option<f64>) -> Memory {
        Memory {
            id: id.to_string(),
            player_id: "p:1".to_string(),
            description: String::new(),
            importance,
            last_access_millis: None,
            last_access_readable: None,
            embedding_id: None,
            data_type: None,
            record_timestamp: 0,
        }
    }

    #[test]
    fn test_sample_in_scan_order() {
        let memories = vec![memory("a", Some(1.0)), memory("b", Some(9.0)), memory("c", None)];
        let ids: Vec<&str> = sample_memories(&memories, 2, false)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_sample_by_importance() {
        let memories = vec![memory("a", Some(1.0)), memory("b", Some(9.0)), memory("c", None)];
        let ids: Vec<&str> = sample_memories(&memories, 2, true)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
