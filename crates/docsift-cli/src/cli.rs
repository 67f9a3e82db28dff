//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// docsift - Reconstruct memories, embeddings, messages and players from a document store snapshot.
#[derive(Debug, Parser)]
#[command(name = "docsift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite snapshot
    #[arg(short, long, global = true, env = "DOCSIFT_DB")]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log extraction details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full report: players, memories, messages and embeddings
    Report(ReportArgs),

    /// List and analyze memories
    Memories(MemoriesArgs),

    /// List conversation messages
    Messages(MessagesArgs),

    /// List player descriptions
    Players(PlayersArgs),

    /// Summarize embeddings
    Embeddings(EmbeddingsArgs),

    /// List the tables of the snapshot
    Tables,

    /// Show the columns of a table
    Schema {
        /// Table name
        #[arg(default_value = "documents")]
        table: String,
    },
}

/// Export options shared by every listing command.
#[derive(Debug, Clone, Default, Args)]
pub struct ExportArgs {
    /// Export without prompting (json, csv or no)
    #[arg(short, long, value_enum)]
    pub export: Option<ExportChoice>,

    /// Directory export files are written to
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

/// Export answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportChoice {
    /// Structured records (JSON array)
    Json,
    /// Tabular records (CSV)
    Csv,
    /// Do not export
    No,
}

/// Arguments for the report command.
#[derive(Debug, Clone, Default, Args)]
pub struct ReportArgs {
    /// Number of sample memories and messages to show
    #[arg(short, long)]
    pub sample: Option<usize>,

    /// Number of players in the per-player breakdown
    #[arg(short, long)]
    pub top: Option<usize>,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Arguments for the memories command.
#[derive(Debug, Clone, Default, Args)]
pub struct MemoriesArgs {
    /// Only memories of this player
    #[arg(short, long)]
    pub player: Option<String>,

    /// Number of sample memories to show
    #[arg(short, long)]
    pub sample: Option<usize>,

    /// Show the most important memories instead of the newest
    #[arg(long)]
    pub by_importance: bool,

    /// Number of players in the per-player breakdown
    #[arg(short, long)]
    pub top: Option<usize>,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Arguments for the messages command.
#[derive(Debug, Clone, Default, Args)]
pub struct MessagesArgs {
    /// Maximum number of candidate rows to read
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Number of messages to show
    #[arg(short, long)]
    pub sample: Option<usize>,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Arguments for the players command.
#[derive(Debug, Clone, Default, Args)]
pub struct PlayersArgs {
    /// Maximum number of candidate rows to read
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Arguments for the embeddings command.
#[derive(Debug, Clone, Default, Args)]
pub struct EmbeddingsArgs {
    #[command(flatten)]
    pub export: ExportArgs,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
