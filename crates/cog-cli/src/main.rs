//! CLI frontend for Cogtown.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cog",
    about = "Cogtown — explore a city of malfunctioning robots",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game
    Play {
        /// World content file (JSON); defaults to the built-in city
        #[arg(short, long)]
        world: Option<PathBuf>,
    },

    /// Validate a world content file and report content errors
    Check {
        /// World content file (JSON)
        file: PathBuf,
    },

    /// List every location in the world
    Map {
        /// World content file (JSON); defaults to the built-in city
        #[arg(short, long)]
        world: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { world } => commands::play::run(world.as_deref()),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Map { world } => commands::map::run(world.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
