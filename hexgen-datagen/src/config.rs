//! Configuration types for dataset generation
//!
//! Level 4 - Utilities and configuration

use std::path::PathBuf;

/// Board sizes generated when none are given
pub const DEFAULT_BOARD_SIZES: [usize; 6] = [3, 5, 7, 9, 11, 13];

/// Games per board size when not given
pub const DEFAULT_GAMES: usize = 2000;

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 42;

/// Configuration for one batch of games on a single board size
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    /// Playable board dimension
    pub dimension: usize,
    /// Number of games to simulate
    pub games: usize,
    /// Base random seed (None = DEFAULT_SEED)
    pub seed: Option<u64>,
    /// Whether to run games in parallel
    pub parallel: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            dimension: 11,
            games: DEFAULT_GAMES,
            seed: None,
            parallel: true,
        }
    }
}

impl GenerationConfig {
    /// Create config for a board size and game count
    pub fn new(dimension: usize, games: usize) -> Self {
        Self {
            dimension,
            games,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run games one after another
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Seed of the first game
    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

/// Configuration for a full multi-size dataset run
#[derive(Clone, Debug)]
pub struct DatasetConfig {
    /// Board sizes, generated in order
    pub board_sizes: Vec<usize>,
    /// Games per board size
    pub games_per_size: usize,
    /// Base random seed shared by every size
    pub seed: Option<u64>,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Directory receiving one CSV per board size
    pub output_dir: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            board_sizes: DEFAULT_BOARD_SIZES.to_vec(),
            games_per_size: DEFAULT_GAMES,
            seed: None,
            parallel: true,
            output_dir: PathBuf::from("."),
        }
    }
}

impl DatasetConfig {
    /// Per-size generation config
    pub fn generation_for(&self, dimension: usize) -> GenerationConfig {
        GenerationConfig {
            dimension,
            games: self.games_per_size,
            seed: self.seed,
            parallel: self.parallel,
        }
    }
}
