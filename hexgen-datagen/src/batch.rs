//! Batch generation - many games on one board size
//!
//! Level 2 - Phase-level implementation

use hexgen_core::{GameRecord, MoveKind, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::GenerationConfig;
use crate::game_runner::{play_seeded_game, GameOutcome};

/// Result of a batch of games
#[derive(Clone, Debug)]
pub struct BatchResult {
    /// Board dimension of every game in the batch
    pub dimension: usize,
    /// Wins for X
    pub x_wins: u32,
    /// Wins for O
    pub o_wins: u32,
    /// Games that filled the board without a winner
    pub draws: u32,
    /// Total games played
    pub games_played: u32,
    /// Average game length in plies
    pub avg_moves: f32,
    /// Shortest game in plies
    pub min_moves: usize,
    /// Longest game in plies
    pub max_moves: usize,
    /// Moves chosen to win on the spot
    pub win_moves: usize,
    /// Moves chosen to block an opponent win
    pub block_moves: usize,
    /// Moves chosen at random
    pub random_moves: usize,
    /// Game length (plies) -> number of games
    pub length_histogram: FxHashMap<usize, u32>,
    /// Finished games, in game-index order
    pub records: Vec<GameRecord>,
}

/// Serializable aggregate view of a batch
#[derive(Clone, Debug, Serialize)]
pub struct BatchSummary {
    pub dimension: usize,
    pub games_played: u32,
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
    pub x_win_rate: f32,
    pub avg_moves: f32,
    pub min_moves: usize,
    pub max_moves: usize,
    pub win_moves: usize,
    pub block_moves: usize,
    pub random_moves: usize,
    /// (length, games) sorted by length
    pub length_histogram: Vec<(usize, u32)>,
}

impl BatchResult {
    /// Create empty result
    pub fn empty(dimension: usize) -> Self {
        Self {
            dimension,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            games_played: 0,
            avg_moves: 0.0,
            min_moves: 0,
            max_moves: 0,
            win_moves: 0,
            block_moves: 0,
            random_moves: 0,
            length_histogram: FxHashMap::default(),
            records: Vec::new(),
        }
    }

    /// Combine two results
    pub fn combine(&self, other: &BatchResult) -> BatchResult {
        let total_games = self.games_played + other.games_played;
        let avg_moves = if total_games > 0 {
            (self.avg_moves * self.games_played as f32
                + other.avg_moves * other.games_played as f32)
                / total_games as f32
        } else {
            0.0
        };

        let min_moves = match (self.games_played, other.games_played) {
            (0, _) => other.min_moves,
            (_, 0) => self.min_moves,
            _ => self.min_moves.min(other.min_moves),
        };

        let mut length_histogram = self.length_histogram.clone();
        for (&length, &count) in &other.length_histogram {
            *length_histogram.entry(length).or_insert(0) += count;
        }

        let mut records = self.records.clone();
        records.extend(other.records.iter().cloned());

        BatchResult {
            dimension: self.dimension,
            x_wins: self.x_wins + other.x_wins,
            o_wins: self.o_wins + other.o_wins,
            draws: self.draws + other.draws,
            games_played: total_games,
            avg_moves,
            min_moves,
            max_moves: self.max_moves.max(other.max_moves),
            win_moves: self.win_moves + other.win_moves,
            block_moves: self.block_moves + other.block_moves,
            random_moves: self.random_moves + other.random_moves,
            length_histogram,
            records,
        }
    }

    /// Get win rate for X
    pub fn x_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.x_wins as f32 / self.games_played as f32
        }
    }

    /// Get win rate for O
    pub fn o_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.o_wins as f32 / self.games_played as f32
        }
    }

    /// Get draw rate
    pub fn draw_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.draws as f32 / self.games_played as f32
        }
    }

    /// Aggregates without the records
    pub fn summary(&self) -> BatchSummary {
        let mut length_histogram: Vec<(usize, u32)> = self
            .length_histogram
            .iter()
            .map(|(&length, &count)| (length, count))
            .collect();
        length_histogram.sort_unstable();

        BatchSummary {
            dimension: self.dimension,
            games_played: self.games_played,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            x_win_rate: self.x_win_rate(),
            avg_moves: self.avg_moves,
            min_moves: self.min_moves,
            max_moves: self.max_moves,
            win_moves: self.win_moves,
            block_moves: self.block_moves,
            random_moves: self.random_moves,
            length_histogram,
        }
    }
}

/// Generate a batch of games (Level 2 phase)
///
/// Runs in parallel when the config asks for it. Game `i` is always played
/// with seed `base_seed + i`, so both paths produce the same records.
pub fn generate_batch(config: &GenerationConfig) -> Result<BatchResult> {
    generate_batch_with_progress(config, |_| {})
}

/// Generate a batch, calling `on_game` after every finished game
pub fn generate_batch_with_progress<F>(config: &GenerationConfig, on_game: F) -> Result<BatchResult>
where
    F: Fn(&GameOutcome) + Sync,
{
    if config.games == 0 {
        return Ok(BatchResult::empty(config.dimension));
    }

    let outcomes = if config.parallel {
        execute_games_parallel(config, &on_game)?
    } else {
        execute_games(config, &on_game)?
    };

    Ok(aggregate_results(config.dimension, outcomes))
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Execute games sequentially
fn execute_games<F>(config: &GenerationConfig, on_game: &F) -> Result<Vec<GameOutcome>>
where
    F: Fn(&GameOutcome) + Sync,
{
    let base_seed = config.base_seed();

    (0..config.games)
        .map(|game_index| play_indexed_game(config.dimension, base_seed, game_index, on_game))
        .collect()
}

/// Execute games in parallel using rayon
fn execute_games_parallel<F>(config: &GenerationConfig, on_game: &F) -> Result<Vec<GameOutcome>>
where
    F: Fn(&GameOutcome) + Sync,
{
    let base_seed = config.base_seed();

    (0..config.games)
        .into_par_iter()
        .map(|game_index| play_indexed_game(config.dimension, base_seed, game_index, on_game))
        .collect()
}

fn play_indexed_game<F>(
    dimension: usize,
    base_seed: u64,
    game_index: usize,
    on_game: &F,
) -> Result<GameOutcome>
where
    F: Fn(&GameOutcome) + Sync,
{
    let seed = base_seed.wrapping_add(game_index as u64);
    let outcome = play_seeded_game(dimension, seed)?;

    tracing::debug!(
        "Game {} ({}x{}): {:?} in {} moves",
        game_index,
        dimension,
        dimension,
        outcome.record.status,
        outcome.num_moves()
    );

    on_game(&outcome);
    Ok(outcome)
}

/// Fold outcomes into a batch result
fn aggregate_results(dimension: usize, outcomes: Vec<GameOutcome>) -> BatchResult {
    let mut result = BatchResult::empty(dimension);
    let mut total_moves = 0usize;

    for outcome in outcomes {
        let moves = outcome.num_moves();

        if outcome.x_wins() {
            result.x_wins += 1;
        } else if outcome.o_wins() {
            result.o_wins += 1;
        } else {
            result.draws += 1;
        }

        result.min_moves = if result.games_played == 0 {
            moves
        } else {
            result.min_moves.min(moves)
        };
        result.max_moves = result.max_moves.max(moves);
        result.games_played += 1;
        total_moves += moves;

        result.win_moves += outcome.count_kind(MoveKind::Win);
        result.block_moves += outcome.count_kind(MoveKind::Block);
        result.random_moves += outcome.count_kind(MoveKind::Random);
        *result.length_histogram.entry(moves).or_insert(0) += 1;

        result.records.push(outcome.record);
    }

    if result.games_played > 0 {
        result.avg_moves = total_moves as f32 / result.games_played as f32;
    }

    result
}
