//! Game simulation loop and finished-game records

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, Position};
use crate::connect::{has_winning_path, is_winning_move};
use crate::error::{HexError, Result};
use crate::strategy::{MoveKind, TacticalPlayer};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    /// Board filled without a winner. Hex cannot end this way, but the loop
    /// still reports it instead of spinning.
    Drawn,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// One move of a game, in 1-based playable coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub row: usize,
    pub col: usize,
    pub kind: MoveKind,
}

/// Everything needed to serialize a finished game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub dimension: usize,
    pub status: GameStatus,
    /// Owner of every playable cell, row-major
    pub cells: Vec<Option<Player>>,
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    pub fn num_moves(&self) -> usize {
        self.moves.len()
    }

    /// Count moves produced by a given rule
    pub fn count_kind(&self, kind: MoveKind) -> usize {
        self.moves.iter().filter(|mv| mv.kind == kind).count()
    }
}

// ============================================================================
// GAME
// ============================================================================

/// A single self-play game
#[derive(Clone, Debug)]
pub struct HexGame {
    board: Board,
    ply: usize,
    status: GameStatus,
    moves: Vec<MoveRecord>,
}

impl HexGame {
    /// Start a game on an empty board
    pub fn new(dimension: usize) -> Result<Self> {
        Ok(Self {
            board: Board::new(dimension)?,
            ply: 0,
            status: GameStatus::InProgress,
            moves: Vec::new(),
        })
    }

    /// Start from a position with stones already on the board
    ///
    /// Stones are given as `(player, row, col)` with 1-based coordinates and
    /// are committed and win-checked in order. Each stone counts as a ply,
    /// so the side to move afterwards follows from the number of stones.
    pub fn setup(dimension: usize, stones: &[(Player, usize, usize)]) -> Result<Self> {
        let mut game = Self::new(dimension)?;

        for &(player, row, col) in stones {
            if game.status.is_over() {
                return Err(HexError::GameOver);
            }
            if !(1..=dimension).contains(&row) || !(1..=dimension).contains(&col) {
                return Err(HexError::OffBoard { row, col });
            }

            let pos = game.board.position(row, col);
            let index = game
                .board
                .open_positions()
                .iter()
                .position(|&open| open == pos)
                .ok_or(HexError::CellOccupied { row, col })?;

            game.board.commit(player, index)?;
            game.ply += 1;
            game.update_status(player, pos);
        }

        Ok(game)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Side to move
    pub fn current_player(&self) -> Player {
        Player::from_ply(self.ply)
    }

    // ========================================================================
    // PLAY
    // ========================================================================

    /// Play one ply with the given strategy
    pub fn step(&mut self, strategy: &mut TacticalPlayer) -> Result<GameStatus> {
        if self.status.is_over() {
            return Err(HexError::GameOver);
        }

        let mover = self.current_player();
        let selection = strategy.select_move(&mut self.board, mover)?;
        self.ply += 1;

        let (row, col) = self.board.row_col(selection.position);
        self.moves.push(MoveRecord {
            player: mover,
            row,
            col,
            kind: selection.kind,
        });

        self.update_status(mover, selection.position);
        Ok(self.status)
    }

    /// Play until the game is decided
    pub fn play(&mut self, strategy: &mut TacticalPlayer) -> Result<GameStatus> {
        while !self.status.is_over() {
            self.step(strategy)?;
        }
        Ok(self.status)
    }

    /// Snapshot of the current game
    pub fn record(&self) -> GameRecord {
        GameRecord {
            dimension: self.board.dimension(),
            status: self.status,
            cells: self.board.snapshot(),
            moves: self.moves.clone(),
        }
    }

    fn update_status(&mut self, mover: Player, pos: Position) {
        self.status = if is_winning_move(&mut self.board, mover, pos) {
            debug_assert!(has_winning_path(&self.board, mover));
            GameStatus::Won(mover)
        } else if self.board.open_positions().is_empty() {
            GameStatus::Drawn
        } else {
            GameStatus::InProgress
        };
    }
}

/// Play a full seeded game on an empty board
pub fn play_game(dimension: usize, seed: u64) -> Result<GameRecord> {
    let mut game = HexGame::new(dimension)?;
    let mut strategy = TacticalPlayer::with_seed(seed);
    game.play(&mut strategy)?;
    Ok(game.record())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_creation() {
        let game = HexGame::new(5).unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.ply(), 0);
        assert!(game.moves().is_empty());
    }

    #[test]
    fn test_single_cell_game() {
        let record = play_game(1, 0).unwrap();
        assert_eq!(record.status, GameStatus::Won(Player::X));
        assert_eq!(record.cells, vec![Some(Player::X)]);
        assert_eq!(record.moves[0].kind, MoveKind::Win);
    }

    #[test]
    fn test_games_always_have_a_winner() {
        for dimension in 1..=7 {
            for seed in 0..20 {
                let record = play_game(dimension, seed).unwrap();
                assert!(
                    record.winner().is_some(),
                    "draw on {}x{} with seed {}",
                    dimension,
                    dimension,
                    seed
                );
                assert!(record.num_moves() <= dimension * dimension);
            }
        }
    }

    #[test]
    fn test_players_alternate() {
        let record = play_game(6, 11).unwrap();
        for (ply, mv) in record.moves.iter().enumerate() {
            assert_eq!(mv.player, Player::from_ply(ply));
        }
        let winner = record.winner().unwrap();
        assert_eq!(record.moves.last().unwrap().player, winner);
    }

    #[test]
    fn test_step_after_game_over() {
        let mut game = HexGame::new(1).unwrap();
        let mut strategy = TacticalPlayer::new();
        assert_eq!(game.step(&mut strategy), Ok(GameStatus::Won(Player::X)));
        assert_eq!(game.step(&mut strategy), Err(HexError::GameOver));
    }

    #[test]
    fn test_completes_prepared_chain() {
        let mut game = HexGame::setup(3, &[(Player::X, 1, 2), (Player::X, 2, 2)]).unwrap();
        assert_eq!(game.current_player(), Player::X);

        let mut strategy = TacticalPlayer::new();
        let status = game.step(&mut strategy).unwrap();
        assert_eq!(status, GameStatus::Won(Player::X));

        let last = game.moves().last().unwrap();
        assert_eq!(last.kind, MoveKind::Win);
        assert_eq!(last.row, 3);
        assert!(has_winning_path(game.board(), Player::X));
    }

    #[test]
    fn test_setup_rejects_bad_stones() {
        assert_eq!(
            HexGame::setup(3, &[(Player::X, 0, 1)]).unwrap_err(),
            HexError::OffBoard { row: 0, col: 1 }
        );
        assert_eq!(
            HexGame::setup(3, &[(Player::X, 1, 1), (Player::O, 1, 1)]).unwrap_err(),
            HexError::CellOccupied { row: 1, col: 1 }
        );
    }

    #[test]
    fn test_deterministic_with_seed() {
        assert_eq!(play_game(9, 1234).unwrap(), play_game(9, 1234).unwrap());
    }
}
