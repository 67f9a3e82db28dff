//! Players command implementation.

use super::{export_and_report, print_heading, print_skipped, resolve_export};
use crate::cli::PlayersArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use docsift_domain::DocumentSource;
use docsift_extractor::Extractor;
use std::fmt::Display;

/// Execute the players command.
pub fn execute_players<S>(
    args: PlayersArgs,
    source: &S,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    S: DocumentSource,
    S::Error: Display,
{
    let limit = args.limit.unwrap_or(config.settings.player_limit);
    let extraction = Extractor::new(source).player_descriptions(Some(limit))?;
    let players = extraction.entities;

    print_heading(formatter, &format!("Players ({})", players.len()));
    print_skipped(formatter, &extraction.report);
    println!("{}", formatter.format_players(&players)?);

    if let Some(format) = resolve_export(&args.export, formatter, "players")? {
        export_and_report(&players, format, &args.export, config, formatter)?;
    }

    Ok(())
}
