//! CSV dataset output
//!
//! Level 4 - File I/O and formatting
//!
//! One row per finished game: a column per playable cell (`X`, `O` or `.`,
//! row-major, headed `row_col` with 1-based indices) followed by the winner
//! index. Draws never happen in Hex; if one shows up it is written as `-1`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use hexgen_core::{GameRecord, Player};

/// File name for a board size, e.g. `hex_game_data_7x7_complete.csv`
pub fn dataset_filename(dimension: usize) -> String {
    format!("hex_game_data_{}x{}_complete.csv", dimension, dimension)
}

/// Header line including the trailing newline
pub fn header(dimension: usize) -> String {
    let mut line = String::new();
    for row in 1..=dimension {
        for col in 1..=dimension {
            let _ = write!(line, "{}_{},", row, col);
        }
    }
    line.push_str("Winner\n");
    line
}

/// Data line for one game including the trailing newline
pub fn format_record(record: &GameRecord) -> String {
    let mut line = String::with_capacity(record.cells.len() * 2 + 4);
    for cell in &record.cells {
        line.push(cell.map_or('.', Player::symbol));
        line.push(',');
    }
    let winner = record.winner().map_or(-1, |player| player.index() as i32);
    let _ = writeln!(line, "{}", winner);
    line
}

/// Full file contents for a set of games on one board size
pub fn dataset_contents(dimension: usize, records: &[GameRecord]) -> Result<String> {
    let mut content = header(dimension);
    for (i, record) in records.iter().enumerate() {
        ensure!(
            record.dimension == dimension,
            "Record {} is {}x{}, expected {}x{}",
            i,
            record.dimension,
            record.dimension,
            dimension,
            dimension
        );
        content.push_str(&format_record(record));
    }
    Ok(content)
}

/// Write a dataset file
pub fn write_dataset(path: &Path, dimension: usize, records: &[GameRecord]) -> Result<()> {
    let content = dataset_contents(dimension, records)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write dataset: {}", path.display()))?;

    tracing::info!("Saved {} games to {}", records.len(), path.display());

    Ok(())
}
