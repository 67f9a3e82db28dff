//! docsift - Reconstruct game entities from a document store snapshot.

use clap::Parser;
use docsift_cli::commands;
use docsift_cli::{Cli, Command, Config, Formatter};
use docsift_store::SqliteSource;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> docsift_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (log to stderr)
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    // Load config, falling back to defaults when absent
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Open the snapshot; the connection closes when `source` drops
    let database = cli.db.clone().unwrap_or_else(|| config.database.clone());
    let source = SqliteSource::open(&database)?;
    tracing::debug!(database = %database.display(), "opened snapshot");

    // Handle commands
    match cli.command {
        None => {
            commands::execute_report(Default::default(), &source, &config, &formatter)?;
        }
        Some(Command::Report(args)) => {
            commands::execute_report(args, &source, &config, &formatter)?;
        }
        Some(Command::Memories(args)) => {
            commands::execute_memories(args, &source, &config, &formatter)?;
        }
        Some(Command::Messages(args)) => {
            commands::execute_messages(args, &source, &config, &formatter)?;
        }
        Some(Command::Players(args)) => {
            commands::execute_players(args, &source, &config, &formatter)?;
        }
        Some(Command::Embeddings(args)) => {
            commands::execute_embeddings(args, &source, &config, &formatter)?;
        }
        Some(Command::Tables) => {
            commands::execute_tables(&source, &formatter)?;
        }
        Some(Command::Schema { table }) => {
            commands::execute_schema(&table, &source, &formatter)?;
        }
    }

    Ok(())
}
