//! Connectivity and win detection
//!
//! Connectivity marks record which cells are proven to reach a player's
//! start edge. They only ever grow within a game, so they double as the
//! visited set of the propagation in [`connect`]. The start-edge sentinels
//! seeded by [`Board::reset`] are what let a stone on the first row (or
//! column) pass the neighbour prefilter.

use crate::board::{Board, Player, Position};

/// Mark `pos` as connected and propagate through the player's own stones
///
/// Returns true as soon as a connected stone on the goal edge is found.
pub fn connect(board: &mut Board, player: Player, pos: Position) -> bool {
    board.mark_connected(player, pos);
    let mut stack = vec![pos];

    while let Some(current) = stack.pop() {
        if board.is_goal(player, current) {
            return true;
        }

        for neighbor in board.neighbors(current) {
            if board.is_occupied_by(player, neighbor) && !board.is_connected(player, neighbor) {
                board.mark_connected(player, neighbor);
                stack.push(neighbor);
            }
        }
    }

    false
}

/// Win check for a stone already on the board
///
/// Only stones touching a connected cell can extend a chain from the start
/// edge, so anything else is rejected without a search.
pub fn is_winning_move(board: &mut Board, player: Player, pos: Position) -> bool {
    if touches_connected(board, player, pos) {
        connect(board, player, pos)
    } else {
        false
    }
}

/// Would a stone for `player` on the open cell `pos` win the game?
///
/// Nothing on the board is modified: occupancy and marks are read through
/// an overlay that adds the hypothetical stone.
pub fn would_win(board: &Board, player: Player, pos: Position) -> bool {
    debug_assert!(!board.is_occupied(pos));

    if !touches_connected(board, player, pos) {
        return false;
    }

    let overlay = Overlay { board, player, stone: pos };
    let mut visited = vec![false; board.stride() * board.stride()];
    let mut stack = vec![pos];
    visited[pos] = true;

    while let Some(current) = stack.pop() {
        if board.is_goal(player, current) {
            return true;
        }

        for neighbor in board.neighbors(current) {
            if !visited[neighbor] && overlay.is_own(neighbor) {
                visited[neighbor] = true;
                stack.push(neighbor);
            }
        }
    }

    false
}

/// Full reachability check from start edge to goal edge
///
/// Looks at occupancy only and ignores the marks, so it can be used to
/// cross-check a reported win.
pub fn has_winning_path(board: &Board, player: Player) -> bool {
    let dimension = board.dimension();
    let mut visited = vec![false; board.stride() * board.stride()];

    let mut stack: Vec<Position> = (1..=dimension)
        .map(|i| match player {
            Player::X => board.position(1, i),
            Player::O => board.position(i, 1),
        })
        .filter(|&pos| board.is_occupied_by(player, pos))
        .collect();
    for &pos in &stack {
        visited[pos] = true;
    }

    while let Some(current) = stack.pop() {
        if board.is_goal(player, current) {
            return true;
        }

        for neighbor in board.neighbors(current) {
            if !visited[neighbor] && board.is_occupied_by(player, neighbor) {
                visited[neighbor] = true;
                stack.push(neighbor);
            }
        }
    }

    false
}

fn touches_connected(board: &Board, player: Player, pos: Position) -> bool {
    board
        .neighbors(pos)
        .into_iter()
        .any(|neighbor| board.is_connected(player, neighbor))
}

/// Committed board plus one hypothetical stone
struct Overlay<'a> {
    board: &'a Board,
    player: Player,
    stone: Position,
}

impl Overlay<'_> {
    fn is_own(&self, pos: Position) -> bool {
        pos == self.stone || self.board.is_occupied_by(self.player, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Place and win-check stones in order, like the game loop does
    fn play_stones(board: &mut Board, player: Player, cells: &[(usize, usize)]) -> bool {
        let mut won = false;
        for &(row, col) in cells {
            let pos = board.position(row, col);
            board.place(player, pos).unwrap();
            won = is_winning_move(board, player, pos);
        }
        won
    }

    fn all_marks(board: &Board) -> Vec<(bool, bool)> {
        (0..board.stride() * board.stride())
            .map(|pos| {
                (
                    board.is_connected(Player::X, pos),
                    board.is_connected(Player::O, pos),
                )
            })
            .collect()
    }

    #[test]
    fn test_single_cell_board_first_move_wins() {
        let mut board = Board::new(1).unwrap();
        let pos = board.position(1, 1);
        assert!(would_win(&board, Player::X, pos));
        assert!(would_win(&board, Player::O, pos));
        board.place(Player::X, pos).unwrap();
        assert!(is_winning_move(&mut board, Player::X, pos));
    }

    #[test]
    fn test_start_edge_stone_passes_prefilter() {
        let mut board = Board::new(3).unwrap();

        assert!(!play_stones(&mut board, Player::X, &[(1, 2)]));
        assert!(board.is_connected(Player::X, board.position(1, 2)));

        assert!(!play_stones(&mut board, Player::O, &[(2, 1)]));
        assert!(board.is_connected(Player::O, board.position(2, 1)));
    }

    #[test]
    fn test_isolated_stone_is_not_marked() {
        let mut board = Board::new(3).unwrap();
        assert!(!play_stones(&mut board, Player::X, &[(2, 2)]));
        assert!(!board.is_connected(Player::X, board.position(2, 2)));
    }

    #[test]
    fn test_column_chain_wins_for_x() {
        let mut board = Board::new(3).unwrap();
        assert!(!play_stones(&mut board, Player::X, &[(1, 1), (2, 1)]));
        assert!(play_stones(&mut board, Player::X, &[(3, 1)]));
        assert!(has_winning_path(&board, Player::X));
        assert!(!has_winning_path(&board, Player::O));
    }

    #[test]
    fn test_row_chain_wins_for_o() {
        let mut board = Board::new(3).unwrap();
        assert!(play_stones(&mut board, Player::O, &[(2, 1), (2, 2), (2, 3)]));
        assert!(has_winning_path(&board, Player::O));
    }

    #[test]
    fn test_joining_stone_connects_detached_group() {
        let mut board = Board::new(4).unwrap();
        // Lower group is not connected to the top yet
        assert!(!play_stones(&mut board, Player::X, &[(3, 2), (4, 2)]));
        assert!(!board.is_connected(Player::X, board.position(3, 2)));

        assert!(!play_stones(&mut board, Player::X, &[(1, 3)]));
        // (2, 2) touches (1, 3) above-right and (3, 2) below
        assert!(play_stones(&mut board, Player::X, &[(2, 2)]));
    }

    #[test]
    fn test_marks_are_monotonic() {
        let mut board = Board::new(4).unwrap();
        let moves = [(1, 1), (2, 1), (1, 4), (3, 3)];
        let mut previous = all_marks(&board);

        for &(row, col) in &moves {
            play_stones(&mut board, Player::X, &[(row, col)]);
            let current = all_marks(&board);
            for (before, after) in previous.iter().zip(&current) {
                assert!(!before.0 || after.0);
                assert!(!before.1 || after.1);
            }
            previous = current;
        }
    }

    #[test]
    fn test_would_win_leaves_board_untouched() {
        let mut board = Board::new(3).unwrap();
        play_stones(&mut board, Player::X, &[(1, 1), (2, 1)]);
        let snapshot = board.snapshot();
        let marks = all_marks(&board);

        let target = board.position(3, 1);
        assert!(would_win(&board, Player::X, target));
        assert!(!would_win(&board, Player::X, board.position(3, 3)));
        assert!(!would_win(&board, Player::O, target));

        assert_eq!(board.snapshot(), snapshot);
        assert_eq!(all_marks(&board), marks);
    }

    #[test]
    fn test_opponent_stones_block_path() {
        let mut board = Board::new(2).unwrap();
        play_stones(&mut board, Player::X, &[(1, 1)]);
        play_stones(&mut board, Player::O, &[(2, 1)]);
        // (1, 1) can only reach the bottom row through (2, 1)
        assert!(!would_win(&board, Player::X, board.position(1, 2)));
        assert!(!would_win(&board, Player::X, board.position(2, 2)));
    }
}
