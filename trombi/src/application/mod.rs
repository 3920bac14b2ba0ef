pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use trombi_core::error::Result;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Persons { sheet, json } => handlers::handle_persons(sheet, json),
        Commands::Columns { sheet } => handlers::handle_columns(sheet),
        Commands::Match { session } => handlers::handle_match(session),
        Commands::Pack {
            session,
            out,
            logo,
            project,
            deterministic,
            stored,
            summary,
        } => handlers::handle_pack(
            session,
            out,
            logo,
            project,
            deterministic,
            stored,
            summary,
        ),
        Commands::Rename {
            photo,
            sheet,
            person,
            out,
        } => handlers::handle_rename(photo, sheet, person, out),
        Commands::Inspect { archive, json } => handlers::handle_inspect(archive, json),
    }
}
