//! markundo CLI
//!
//! Replays scripted editing sessions through the undo engine.

use clap::{Parser, Subcommand};
use markundo_core::logging_facility::{self, Profile};

mod commands;
mod script;

#[derive(Debug, Parser)]
#[command(name = "markundo")]
#[command(about = "markundo - Transactional undo/redo for markup trees", long_about = None)]
struct Cli {
    /// Logging profile (dev, prod)
    #[arg(long, global = true, default_value = "prod")]
    profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a script and print the resulting document
    Replay(commands::replay::ReplayArgs),
    /// Replay a script and print the undo/redo menus
    Labels(commands::labels::LabelsArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.profile);

    let result = match cli.command {
        Commands::Replay(args) => commands::replay::execute(args),
        Commands::Labels(args) => commands::labels::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
