//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use docsift_domain::{Embedding, Memory, Message, PlayerDescription};
use docsift_extractor::timestamp::NOT_AVAILABLE;
use docsift_stats::{representative_dimensionality, MemorySummary};
use docsift_store::TableColumn;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest description or message text shown in a table cell.
const MAX_CELL_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format memories output.
    pub fn format_memories(&self, memories: &[&Memory]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(memories)?),
            OutputFormat::Quiet => Ok(ids(memories.iter().map(|m| m.id.as_str()))),
            OutputFormat::Table => {
                if memories.is_empty() {
                    return Ok(self.colorize("No memories found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "ID",
                    "Player",
                    "Type",
                    "Importance",
                    "Last Access",
                    "Description",
                ]);

                for memory in memories {
                    let importance = memory
                        .importance
                        .map(|v| format!("{:.2}", v))
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
                    builder.push_record([
                        truncate(&memory.id, 12),
                        memory.player_id.clone(),
                        memory.data_type.clone().unwrap_or_else(|| "unknown".to_string()),
                        importance,
                        memory
                            .last_access_readable
                            .clone()
                            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                        truncate(&memory.description, MAX_CELL_CHARS),
                    ]);
                }

                Ok(render(builder))
            }
        }
    }

    /// Format messages output.
    pub fn format_messages(&self, messages: &[Message]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(messages)?),
            OutputFormat::Quiet => Ok(ids(messages.iter().map(|m| m.id.as_str()))),
            OutputFormat::Table => {
                if messages.is_empty() {
                    return Ok(self.colorize("No messages found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Conversation", "Author", "Text"]);
                for message in messages {
                    builder.push_record([
                        message.conversation_id.clone(),
                        message.author.clone(),
                        truncate(&message.text, MAX_CELL_CHARS),
                    ]);
                }

                Ok(render(builder))
            }
        }
    }

    /// Format player descriptions output.
    pub fn format_players(&self, players: &[PlayerDescription]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(players)?),
            OutputFormat::Quiet => Ok(ids(players.iter().map(|p| p.player_id.as_str()))),
            OutputFormat::Table => {
                if players.is_empty() {
                    return Ok(self.colorize("No players found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Player", "Name", "Character", "Description"]);
                for player in players {
                    builder.push_record([
                        player.player_id.clone(),
                        player.name.clone(),
                        player.character.clone(),
                        truncate(&player.description, MAX_CELL_CHARS),
                    ]);
                }

                Ok(render(builder))
            }
        }
    }

    /// Format the embedding summary: count and representative dimensionality.
    pub fn format_embeddings(&self, embeddings: &[Embedding]) -> Result<String> {
        let dimensionality = representative_dimensionality(embeddings);
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "count": embeddings.len(),
                "dimensionality": dimensionality,
            }))?),
            OutputFormat::Quiet => Ok(ids(embeddings.iter().map(|e| e.id.as_str()))),
            OutputFormat::Table => {
                let mut lines = vec![format!("Total embeddings: {}", embeddings.len())];
                if let Some(dim) = dimensionality {
                    lines.push(format!("Embedding dimension: {}", dim));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the memory analysis.
    pub fn format_summary(&self, summary: &MemorySummary, top_players: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Quiet => Ok(summary.total.to_string()),
            OutputFormat::Table => Ok(summary.summary(top_players)),
        }
    }

    /// Format the table listing of a snapshot.
    pub fn format_tables(&self, tables: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(tables)?),
            OutputFormat::Quiet => Ok(tables.join("\n")),
            OutputFormat::Table => {
                if tables.is_empty() {
                    return Ok(self.colorize("No tables found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Table"]);
                for table in tables {
                    builder.push_record([table.as_str()]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format the columns of a table.
    pub fn format_schema(&self, columns: &[TableColumn]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json_columns: Vec<serde_json::Value> = columns
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "name": c.name,
                            "type": c.data_type,
                            "not_null": c.not_null,
                            "primary_key": c.primary_key,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json_columns)?)
            }
            OutputFormat::Quiet => Ok(ids(columns.iter().map(|c| c.name.as_str()))),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Column", "Type", "Not Null", "PK"]);
                for column in columns {
                    builder.push_record([
                        column.name.clone(),
                        column.data_type.clone(),
                        if column.not_null { "yes" } else { "no" }.to_string(),
                        column.primary_key.to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a section heading.
    pub fn heading(&self, title: &str) -> String {
        self.colorize(&format!("== {} ==", title), "cyan")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join("\n")
}

/// Shorten `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_memory() -> Memory {
        Memory {
            id: "0a0b0c".to_string(),
            player_id: "p:1".to_string(),
            description: "Met Alice at the well".to_string(),
            importance: Some(7.0),
            last_access_millis: None,
            last_access_readable: None,
            embedding_id: None,
            data_type: Some("conversation".to_string()),
            record_timestamp: 10,
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let memory = create_test_memory();
        let output = formatter.format_memories(&[&memory]).unwrap();
        assert!(output.contains("\"playerId\": \"p:1\""));
        assert!(output.contains("\"lastAccessMillis\": null"));
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let memory = create_test_memory();
        let output = formatter.format_memories(&[&memory]).unwrap();
        assert!(output.contains("Met Alice at the well"));
        assert!(output.contains("7.00"));
        assert!(output.contains(NOT_AVAILABLE));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let memory = create_test_memory();
        let output = formatter.format_memories(&[&memory, &memory]).unwrap();
        assert_eq!(output, "0a0b0c\n0a0b0c");
    }

    #[test]
    fn test_empty_tables() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.format_memories(&[]).unwrap(), "No memories found.");
        assert_eq!(formatter.format_messages(&[]).unwrap(), "No messages found.");
        assert_eq!(formatter.format_players(&[]).unwrap(), "No players found.");
    }

    #[test]
    fn test_embedding_summary() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let embeddings = vec![
            Embedding::new("e1".into(), "p:1".into(), vec![0.1, 0.2, 0.3]),
            Embedding::new("e2".into(), "p:2".into(), vec![0.4, 0.5, 0.6]),
        ];
        let output = formatter.format_embeddings(&embeddings).unwrap();
        assert!(output.contains("Total embeddings: 2"));
        assert!(output.contains("Embedding dimension: 3"));

        let none = formatter.format_embeddings(&[]).unwrap();
        assert_eq!(none, "Total embeddings: 0");
    }

    #[test]
    fn test_summary_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let summary = MemorySummary::compute(&[create_test_memory()]);
        let output = formatter.format_summary(&summary, 10).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["importance"]["mean"], 7.0);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn test_messages_without_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("Done"), "✓ Done");
        assert_eq!(formatter.warning("Careful"), "⚠ Careful");
        assert_eq!(formatter.heading("Memories"), "== Memories ==");
    }
}
