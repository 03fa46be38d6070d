//! Greedy tactical move selection
//!
//! Priority order: take an immediate win, otherwise occupy the cell the
//! opponent would win on, otherwise play a uniformly random open cell.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, Position};
use crate::connect::would_win;
use crate::error::{HexError, Result};

/// Which rule produced a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Win,
    Block,
    Random,
}

/// A committed move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub position: Position,
    pub kind: MoveKind,
}

/// Self-play strategy with its own seeded RNG
pub struct TacticalPlayer {
    rng: ChaCha8Rng,
}

impl Default for TacticalPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl TacticalPlayer {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a cell for `player` and commit it to the board
    ///
    /// The chosen cell leaves the open set whichever rule picked it.
    pub fn select_move(&mut self, board: &mut Board, player: Player) -> Result<Selection> {
        let open_count = board.open_positions().len();
        if open_count == 0 {
            return Err(HexError::NoOpenPositions);
        }

        let (index, kind) = if let Some(index) = find_winning_index(board, player) {
            (index, MoveKind::Win)
        } else if let Some(index) = find_winning_index(board, player.opponent()) {
            (index, MoveKind::Block)
        } else {
            (self.rng.gen_range(0..open_count), MoveKind::Random)
        };

        let position = board.commit(player, index)?;
        Ok(Selection { position, kind })
    }
}

/// First open-set index where `player` would complete a chain
fn find_winning_index(board: &Board, player: Player) -> Option<usize> {
    board
        .open_positions()
        .iter()
        .position(|&pos| would_win(board, player, pos))
}
