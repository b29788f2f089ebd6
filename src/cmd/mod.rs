mod generate;
mod lists;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate as emit_completions, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sql-seeder")]
#[command(author = "Helge Sverre <helge.sverre@gmail.com>")]
#[command(version)]
#[command(
    about = "Generate referentially consistent SQL seed data for a marketplace schema",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the full randomized marketplace dataset
    Generate {
        /// Output SQL file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for reproducibility
        #[arg(long, default_value = "12345")]
        seed: u64,

        /// Scale preset: small, medium, large
        #[arg(short, long, default_value = "small")]
        scale: String,

        /// YAML file overriding per-table row counts
        #[arg(short, long)]
        counts: Option<PathBuf>,

        /// Show progress during generation
        #[arg(short, long)]
        progress: bool,

        /// Output run summary as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// Emit wishlist/cart seed rows for the fixed demo roster (stdout)
    Lists {
        /// Random seed for reproducibility
        #[arg(long, default_value = "12345")]
        seed: u64,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            output,
            seed,
            scale,
            counts,
            progress,
            json,
        } => generate::run(output, seed, scale, counts, progress, json),
        Commands::Lists { seed } => lists::run(seed),
        Commands::Completions { shell } => {
            emit_completions(shell, &mut Cli::command(), "sql-seeder", &mut io::stdout());
            Ok(())
        }
    }
}
