//! HEXGEN Core - Hex self-play engine
//!
//! This crate provides the core logic for generating Hex training data:
//! - Padded square board with per-player occupancy and open-cell bookkeeping
//! - Connectivity marks and win detection over hex adjacency
//! - Greedy tactical move selection (win, block, random)
//! - Game simulation loop producing serializable records

pub mod board;
pub mod connect;
pub mod error;
pub mod game;
pub mod strategy;

// Re-exports for convenient access
pub use board::{Board, Player, Position};
pub use connect::{connect, has_winning_path, is_winning_move, would_win};
pub use error::{HexError, Result};
pub use game::{play_game, GameRecord, GameStatus, HexGame, MoveRecord};
pub use strategy::{MoveKind, Selection, TacticalPlayer};
