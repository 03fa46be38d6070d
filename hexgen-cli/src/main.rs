//! HEXGEN CLI - Command-line interface
//!
//! Commands:
//! - generate: Write self-play datasets for a list of board sizes
//! - play: Play a single game and print it

mod generate;
mod play;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexgen")]
#[command(about = "Hex self-play training data generator")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one CSV dataset per board size
    Generate(generate::GenerateArgs),
    /// Play a single game and print the final board
    Play(play::PlayArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate::run(args, cli.seed),
        Commands::Play(args) => play::run(args, cli.seed),
    }
}

/// Use the given seed or draw a fresh one
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => s,
        None => ChaCha8Rng::from_entropy().gen(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_seed_keeps_given_seed() {
        assert_eq!(resolve_seed(Some(42)), 42);
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from(["hexgen", "--seed", "7", "generate", "--sizes", "3,5", "--games", "10"]);
        assert_eq!(cli.seed, Some(7));
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.sizes, vec![3, 5]);
                assert_eq!(args.games, 10);
                assert!(!args.sequential);
            }
            Commands::Play(_) => panic!("expected generate"),
        }
    }
}
