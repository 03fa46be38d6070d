//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use hexgen_core::{GameRecord, GameStatus, HexGame, MoveKind, Player, Result, TacticalPlayer};

/// Outcome of a single game
#[derive(Clone, Debug)]
pub struct GameOutcome {
    /// Seed the game was played with
    pub seed: u64,
    /// Final board and move history
    pub record: GameRecord,
}

impl GameOutcome {
    /// Check if X won
    pub fn x_wins(&self) -> bool {
        self.record.status == GameStatus::Won(Player::X)
    }

    /// Check if O won
    pub fn o_wins(&self) -> bool {
        self.record.status == GameStatus::Won(Player::O)
    }

    /// Check if the board filled without a winner
    pub fn is_draw(&self) -> bool {
        self.record.status == GameStatus::Drawn
    }

    /// Get winner (None for draw)
    pub fn winner(&self) -> Option<Player> {
        self.record.winner()
    }

    pub fn num_moves(&self) -> usize {
        self.record.num_moves()
    }

    pub fn count_kind(&self, kind: MoveKind) -> usize {
        self.record.count_kind(kind)
    }
}

/// Plays successive games on one board size with advancing seeds
pub struct GameRunner {
    dimension: usize,
    seed_counter: u64,
}

impl GameRunner {
    /// Create a new game runner
    pub fn new(dimension: usize, seed: u64) -> Self {
        Self {
            dimension,
            seed_counter: seed,
        }
    }

    /// Play a single game, returning the outcome
    pub fn play_game(&mut self) -> Result<GameOutcome> {
        let seed = self.next_seed();
        play_seeded_game(self.dimension, seed)
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Play one game with a fresh strategy seeded from `seed`
pub fn play_seeded_game(dimension: usize, seed: u64) -> Result<GameOutcome> {
    let mut game = HexGame::new(dimension)?;
    let mut strategy = TacticalPlayer::with_seed(seed);
    let status = game.play(&mut strategy)?;

    if status == GameStatus::Drawn {
        tracing::warn!("Game on {}x{} with seed {} ended without a winner", dimension, dimension, seed);
    }

    Ok(GameOutcome {
        seed,
        record: game.record(),
    })
}
