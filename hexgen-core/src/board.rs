//! Hex board on a padded square grid
//!
//! The playable `N×N` rhombus is wrapped in one ring of border cells so
//! every playable cell has all six neighbours in bounds. Border cells are
//! never occupied; they only carry the connectivity sentinels that define
//! each player's start edge.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HexError, Result};

/// Index into the padded grid (row-major, stride = dimension + 2)
pub type Position = usize;

/// Player to move
///
/// X moves first and connects the top row to the bottom row.
/// O connects the left column to the right column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X = 0,
    O = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Character used in board dumps and datasets
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// Mover for a zero-based ply number
    pub fn from_ply(ply: usize) -> Self {
        if ply % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }
}

/// Board state for a single game
#[derive(Clone, Debug)]
pub struct Board {
    dimension: usize,
    stride: usize,
    /// Offsets to the six hex neighbours:
    /// up-right, up, left, right, down, down-left
    offsets: [isize; 6],
    occupied: Vec<[bool; 2]>,
    connected: Vec<[bool; 2]>,
    open: Vec<Position>,
}

impl Board {
    /// Create an empty board of the given playable dimension
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(HexError::InvalidDimension(dimension));
        }

        let stride = dimension + 2;
        let s = stride as isize;
        let cells = stride * stride;

        let mut board = Self {
            dimension,
            stride,
            offsets: [-s + 1, -s, -1, 1, s, s - 1],
            occupied: vec![[false; 2]; cells],
            connected: vec![[false; 2]; cells],
            open: Vec::with_capacity(dimension * dimension),
        };
        board.reset();
        Ok(board)
    }

    /// Clear the board back to the start of a game
    ///
    /// Seeds the open set in row-major order and marks the start-edge
    /// sentinels: padded row 0 for X, padded column 0 for O. The win check
    /// relies on these marks to recognise a stone touching its own start
    /// edge, so they must be present before the first move.
    pub fn reset(&mut self) {
        self.occupied.fill([false; 2]);
        self.connected.fill([false; 2]);
        self.open.clear();

        for row in 0..self.stride {
            for col in 0..self.stride {
                let pos = self.position(row, col);
                if self.is_playable(pos) {
                    self.open.push(pos);
                }
                self.connected[pos][Player::X.index()] = row == 0;
                self.connected[pos][Player::O.index()] = col == 0;
            }
        }
    }

    // ========================================================================
    // GEOMETRY
    // ========================================================================

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Padded index of a (row, col) pair, both in `0..dimension + 2`
    pub fn position(&self, row: usize, col: usize) -> Position {
        row * self.stride + col
    }

    /// Padded (row, col) of a position
    pub fn row_col(&self, pos: Position) -> (usize, usize) {
        (pos / self.stride, pos % self.stride)
    }

    /// Whether the position is inside the playable area
    pub fn is_playable(&self, pos: Position) -> bool {
        let (row, col) = self.row_col(pos);
        (1..=self.dimension).contains(&row) && (1..=self.dimension).contains(&col)
    }

    /// Whether the position lies on the player's goal edge
    pub fn is_goal(&self, player: Player, pos: Position) -> bool {
        let (row, col) = self.row_col(pos);
        match player {
            Player::X => row == self.dimension,
            Player::O => col == self.dimension,
        }
    }

    /// The six neighbours of a playable position
    pub fn neighbors(&self, pos: Position) -> [Position; 6] {
        debug_assert!(self.is_playable(pos));
        self.offsets.map(|offset| pos.wrapping_add_signed(offset))
    }

    // ========================================================================
    // OCCUPANCY
    // ========================================================================

    /// Put a stone for `player` on an empty cell
    ///
    /// The open set is left alone; use [`Board::commit`] to do both.
    pub fn place(&mut self, player: Player, pos: Position) -> Result<()> {
        if self.is_occupied(pos) {
            let (row, col) = self.row_col(pos);
            return Err(HexError::CellOccupied { row, col });
        }
        self.occupied[pos][player.index()] = true;
        Ok(())
    }

    /// Lift a stone previously put down with [`Board::place`]
    pub fn unplace(&mut self, player: Player, pos: Position) {
        self.occupied[pos][player.index()] = false;
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        let [x, o] = self.occupied[pos];
        x || o
    }

    pub fn is_occupied_by(&self, player: Player, pos: Position) -> bool {
        self.occupied[pos][player.index()]
    }

    pub fn owner(&self, pos: Position) -> Option<Player> {
        match self.occupied[pos] {
            [true, _] => Some(Player::X),
            [_, true] => Some(Player::O),
            _ => None,
        }
    }

    /// Number of playable cells holding a stone
    pub fn occupied_count(&self) -> usize {
        self.playable_positions()
            .filter(|&pos| self.is_occupied(pos))
            .count()
    }

    // ========================================================================
    // OPEN POSITIONS
    // ========================================================================

    /// Unoccupied playable cells, in no particular order
    pub fn open_positions(&self) -> &[Position] {
        &self.open
    }

    /// Swap-remove the open position at `index`
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn remove_open(&mut self, index: usize) -> Position {
        self.open.swap_remove(index)
    }

    /// Occupy the open position at `index` for `player`
    pub fn commit(&mut self, player: Player, index: usize) -> Result<Position> {
        let pos = *self.open.get(index).ok_or(HexError::NoOpenPositions)?;
        self.place(player, pos)?;
        self.remove_open(index);
        Ok(pos)
    }

    // ========================================================================
    // CONNECTIVITY MARKS
    // ========================================================================

    /// Whether `pos` is proven to reach the player's start edge
    pub fn is_connected(&self, player: Player, pos: Position) -> bool {
        self.connected[pos][player.index()]
    }

    pub(crate) fn mark_connected(&mut self, player: Player, pos: Position) {
        self.connected[pos][player.index()] = true;
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    /// Playable positions in row-major order
    pub fn playable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (1..=self.dimension).flat_map(move |row| {
            (1..=self.dimension).map(move |col| self.position(row, col))
        })
    }

    /// Owner of every playable cell, row-major
    pub fn snapshot(&self) -> Vec<Option<Player>> {
        self.playable_positions().map(|pos| self.owner(pos)).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 1..=self.dimension {
            write!(f, "{}", " ".repeat(row - 1))?;
            for col in 1..=self.dimension {
                let symbol = self
                    .owner(self.position(row, col))
                    .map_or('.', Player::symbol);
                if col > 1 {
                    write!(f, " ")?;
                }
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.stride(), 7);
        assert_eq!(board.open_positions().len(), 25);
        assert_eq!(board.occupied_count(), 0);
        assert!(board.snapshot().iter().all(Option::is_none));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(Board::new(0).unwrap_err(), HexError::InvalidDimension(0));
    }

    #[test]
    fn test_open_positions_row_major() {
        let board = Board::new(3).unwrap();
        let expected: Vec<Position> = vec![6, 7, 8, 11, 12, 13, 16, 17, 18];
        assert_eq!(board.open_positions(), expected.as_slice());
    }

    #[test]
    fn test_sentinels_seeded() {
        let board = Board::new(4).unwrap();
        for i in 0..board.stride() {
            assert!(board.is_connected(Player::X, board.position(0, i)));
            assert!(board.is_connected(Player::O, board.position(i, 0)));
        }
        // Nothing else starts connected
        for pos in board.playable_positions() {
            assert!(!board.is_connected(Player::X, pos));
            assert!(!board.is_connected(Player::O, pos));
        }
        assert!(!board.is_connected(Player::X, board.position(5, 2)));
        assert!(!board.is_connected(Player::O, board.position(2, 5)));
    }

    #[test]
    fn test_neighbor_offsets() {
        let board = Board::new(3).unwrap();
        let centre = board.position(2, 2);
        let mut neighbours: Vec<_> = board
            .neighbors(centre)
            .into_iter()
            .map(|pos| board.row_col(pos))
            .collect();
        neighbours.sort();
        assert_eq!(
            neighbours,
            vec![(1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2)]
        );
    }

    #[test]
    fn test_place_and_unplace() {
        let mut board = Board::new(3).unwrap();
        let pos = board.position(1, 1);
        board.place(Player::O, pos).unwrap();
        assert_eq!(board.owner(pos), Some(Player::O));
        assert!(board.is_occupied_by(Player::O, pos));
        assert!(!board.is_occupied_by(Player::X, pos));

        board.unplace(Player::O, pos);
        assert_eq!(board.owner(pos), None);
    }

    #[test]
    fn test_place_on_occupied_cell_fails() {
        let mut board = Board::new(3).unwrap();
        let pos = board.position(2, 3);
        board.place(Player::X, pos).unwrap();
        assert_eq!(
            board.place(Player::O, pos),
            Err(HexError::CellOccupied { row: 2, col: 3 })
        );
        assert_eq!(board.owner(pos), Some(Player::X));
    }

    #[test]
    fn test_commit_keeps_counts_consistent() {
        let mut board = Board::new(3).unwrap();
        let mut player = Player::X;
        while !board.open_positions().is_empty() {
            let pos = board.commit(player, 0).unwrap();
            assert_eq!(board.owner(pos), Some(player));
            assert!(!board.open_positions().contains(&pos));
            assert_eq!(board.occupied_count() + board.open_positions().len(), 9);
            player = player.opponent();
        }
        assert_eq!(board.commit(player, 0), Err(HexError::NoOpenPositions));
    }

    #[test]
    fn test_reset_clears_game() {
        let mut board = Board::new(2).unwrap();
        board.commit(Player::X, 1).unwrap();
        board.mark_connected(Player::X, board.position(1, 2));
        board.reset();
        assert_eq!(board.open_positions().len(), 4);
        assert_eq!(board.occupied_count(), 0);
        assert!(!board.is_connected(Player::X, board.position(1, 2)));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(2).unwrap();
        board.place(Player::X, board.position(1, 1)).unwrap();
        board.place(Player::O, board.position(2, 2)).unwrap();
        assert_eq!(board.to_string(), "X .\n . O\n");
    }

    #[test]
    fn test_player_from_ply() {
        assert_eq!(Player::from_ply(0), Player::X);
        assert_eq!(Player::from_ply(1), Player::O);
        assert_eq!(Player::from_ply(6), Player::X);
        assert_eq!(Player::X.opponent(), Player::O);
    }
}
