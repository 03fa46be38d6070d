//! Generate command - write self-play datasets
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_dataset_config(), generate_size(), report_results()
//! - Level 3: (delegated to hexgen-datagen crate)
//! - Level 4: progress bar, formatting utilities

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use hexgen_datagen::{
    dataset_filename, generate_batch_with_progress, write_dataset, BatchSummary, DatasetConfig,
    DEFAULT_BOARD_SIZES, DEFAULT_GAMES,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct GenerateArgs {
    /// Board sizes to generate, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_BOARD_SIZES)]
    pub sizes: Vec<usize>,

    /// Games per board size
    #[arg(long, default_value_t = DEFAULT_GAMES)]
    pub games: usize,

    /// Output directory for the CSV files
    #[arg(long, default_value = ".")]
    pub output: PathBuf,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary of a whole run
#[derive(serde::Serialize)]
struct RunSummary {
    seed: u64,
    games_per_size: usize,
    output: String,
    sizes: Vec<BatchSummary>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run generate command
///
/// This function reads like a table of contents:
/// 1. Build the dataset configuration
/// 2. Generate and save each board size
/// 3. Report results
pub fn run(args: GenerateArgs, seed: Option<u64>) -> Result<()> {
    let seed = crate::resolve_seed(seed);
    let config = build_dataset_config(&args, seed)?;

    tracing::info!(
        "Starting generation: sizes={:?}, games={}, seed={}",
        config.board_sizes,
        config.games_per_size,
        seed
    );

    std::fs::create_dir_all(&config.output_dir).context("Failed to create output directory")?;

    let mut sizes = Vec::with_capacity(config.board_sizes.len());
    for &dimension in &config.board_sizes {
        sizes.push(generate_size(&config, dimension, !args.json)?);
    }

    let summary = RunSummary {
        seed,
        games_per_size: config.games_per_size,
        output: config.output_dir.display().to_string(),
        sizes,
    };
    report_results(&summary, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Build dataset configuration from command arguments
fn build_dataset_config(args: &GenerateArgs, seed: u64) -> Result<DatasetConfig> {
    ensure!(!args.sizes.is_empty(), "At least one board size is required");
    ensure!(
        args.sizes.iter().all(|&size| size > 0),
        "Board sizes must be positive: {:?}",
        args.sizes
    );

    Ok(DatasetConfig {
        board_sizes: args.sizes.clone(),
        games_per_size: args.games,
        seed: Some(seed),
        parallel: !args.sequential,
        output_dir: args.output.clone(),
    })
}

/// Generate, save and summarise one board size
fn generate_size(config: &DatasetConfig, dimension: usize, show_progress: bool) -> Result<BatchSummary> {
    tracing::info!("Generating data for {}x{} board...", dimension, dimension);

    let generation = config.generation_for(dimension);
    let progress = create_progress_bar(generation.games, dimension, show_progress)?;

    let result = generate_batch_with_progress(&generation, |_| progress.inc(1))
        .with_context(|| format!("Failed to generate games for {}x{}", dimension, dimension))?;
    progress.finish_and_clear();

    let path = config.output_dir.join(dataset_filename(dimension));
    write_dataset(&path, dimension, &result.records)?;

    if result.draws > 0 {
        tracing::warn!("{} games on {}x{} ended without a winner", result.draws, dimension, dimension);
    }

    tracing::info!(
        "{}x{}: X {} / O {} wins, avg {:.1} moves",
        dimension,
        dimension,
        result.x_wins,
        result.o_wins,
        result.avg_moves
    );

    Ok(result.summary())
}

/// Print the run summary
fn report_results(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print_text_results(summary);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_progress_bar(games: usize, dimension: usize, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(games as u64);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({eta})")?
            .progress_chars("=> "),
    );
    bar.set_message(format!("{}x{}", dimension, dimension));
    Ok(bar)
}

fn print_text_results(summary: &RunSummary) {
    println!("\n=== Generation Results (seed {}) ===", summary.seed);
    println!("Output: {}", summary.output);
    println!(
        "{:>6} {:>7} {:>7} {:>7} {:>9} {:>7} {:>7} {:>8}",
        "size", "games", "X wins", "O wins", "avg moves", "wins", "blocks", "random"
    );
    for size in &summary.sizes {
        println!(
            "{:>6} {:>7} {:>7} {:>7} {:>9.1} {:>7} {:>7} {:>8}",
            format!("{}x{}", size.dimension, size.dimension),
            size.games_played,
            size.x_wins,
            size.o_wins,
            size.avg_moves,
            size.win_moves,
            size.block_moves,
            size.random_moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(sizes: Vec<usize>) -> GenerateArgs {
        GenerateArgs {
            sizes,
            games: 5,
            output: PathBuf::from("out"),
            sequential: true,
            json: false,
        }
    }

    #[test]
    fn test_build_dataset_config() {
        let config = build_dataset_config(&args(vec![3, 5]), 9).unwrap();
        assert_eq!(config.board_sizes, vec![3, 5]);
        assert_eq!(config.games_per_size, 5);
        assert_eq!(config.seed, Some(9));
        assert!(!config.parallel);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_rejects_zero_size() {
        assert!(build_dataset_config(&args(vec![3, 0]), 1).is_err());
        assert!(build_dataset_config(&args(vec![]), 1).is_err());
    }

    #[test]
    fn test_generate_size_writes_csv() {
        let dir = std::env::temp_dir().join(format!("hexgen-cli-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let config = DatasetConfig {
            board_sizes: vec![3],
            games_per_size: 8,
            seed: Some(5),
            parallel: false,
            output_dir: dir.clone(),
        };
        let summary = generate_size(&config, 3, false).unwrap();
        assert_eq!(summary.games_played, 8);

        let content = std::fs::read_to_string(dir.join("hex_game_data_3x3_complete.csv")).unwrap();
        assert_eq!(content.lines().count(), 9);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
